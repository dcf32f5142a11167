//! Order records and receipt rendering
//!
//! An [`OrderRecord`] is the immutable snapshot assembled at a flow's
//! terminal transition; it is rendered once and handed to a
//! [`ReceiptSink`] for delivery to the receipt chat.

use async_trait::async_trait;

use crate::core::error::AppResult;
use crate::orders::flow::FlowKind;

/// Delivery seam for rendered receipts.
///
/// The production implementation sends to the configured Telegram chat;
/// tests capture the text instead.
#[async_trait]
pub trait ReceiptSink: Send + Sync {
    /// Forward one rendered receipt to the destination chat.
    async fn publish(&self, text: &str) -> AppResult<()>;
}

/// The field set captured by a completed flow.
///
/// `unipin_code` is set by TopUp orders, `order_details` by GeneralOrder
/// ones; the rendered layout differs in exactly that row.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub order_id: String,
    pub uid: String,
    pub player_name: String,
    pub unipin_code: Option<String>,
    pub order_details: Option<String>,
    pub bkash_trx: String,
    pub paid_amount: String,
    pub package_name: String,
    pub datetime: String,
}

impl OrderRecord {
    /// Render the fixed-layout monospace receipt for this record.
    pub fn render(&self, kind: FlowKind) -> String {
        let variable_row = match kind {
            FlowKind::TopUp => format!(
                "◆ UniPin Code     : {}",
                self.unipin_code.as_deref().unwrap_or("N/A")
            ),
            FlowKind::GeneralOrder => format!(
                "◆ Order Details   : {}",
                self.order_details.as_deref().unwrap_or("N/A")
            ),
        };

        let mut lines = Vec::new();
        lines.push("```".to_string());
        lines.push("══════════════════════════════════".to_string());
        lines.push("             ORDER RECEIPT ".to_string());
        lines.push("══════════════════════════════════".to_string());
        lines.push(format!("◆ Order ID        : {}", self.order_id));
        lines.push(format!("◆ UID             : {}", self.uid));
        lines.push(variable_row);
        lines.push(format!("◆ bKash Trx ID    : {}", self.bkash_trx));
        lines.push(format!("◆ Paid/Profit     : {}", self.paid_amount));
        lines.push(format!("◆ Player Name     : {}", self.player_name));
        lines.push(format!("◆ Package Name    : {}", self.package_name));
        lines.push(format!("◆ Date & Time     : {}", self.datetime));
        lines.push(String::new());
        lines.push("══════════════════════════════════".to_string());
        lines.push("      ▪ Powered by As Top up BD ▪".to_string());
        lines.push("══════════════════════════════════".to_string());
        lines.push("```".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> OrderRecord {
        OrderRecord {
            order_id: "AB12CD34".to_string(),
            uid: "123456".to_string(),
            player_name: "PlayerOne".to_string(),
            unipin_code: Some("UP-777".to_string()),
            order_details: Some("PUBG UC x1".to_string()),
            bkash_trx: "TRX999".to_string(),
            paid_amount: "500".to_string(),
            package_name: "Weekly Pass".to_string(),
            datetime: "01 January 2025, 06:00 PM".to_string(),
        }
    }

    #[test]
    fn topup_receipt_shows_unipin_row() {
        let receipt = sample_record().render(FlowKind::TopUp);
        assert!(receipt.contains("ORDER RECEIPT"));
        assert!(receipt.contains("◆ Order ID        : AB12CD34"));
        assert!(receipt.contains("◆ UniPin Code     : UP-777"));
        assert!(!receipt.contains("Order Details"));
        assert!(receipt.contains("▪ Powered by As Top up BD ▪"));
    }

    #[test]
    fn general_order_receipt_shows_details_row() {
        let receipt = sample_record().render(FlowKind::GeneralOrder);
        assert!(receipt.contains("◆ Order Details   : PUBG UC x1"));
        assert!(!receipt.contains("UniPin Code"));
        assert!(receipt.contains("◆ bKash Trx ID    : TRX999"));
        assert!(receipt.contains("◆ Paid/Profit     : 500"));
        assert!(receipt.contains("◆ Player Name     : PlayerOne"));
        assert!(receipt.contains("◆ Package Name    : Weekly Pass"));
    }

    #[test]
    fn receipt_is_a_monospace_block() {
        let receipt = sample_record().render(FlowKind::TopUp);
        assert!(receipt.starts_with("```\n"));
        assert!(receipt.ends_with("\n```"));
    }
}
