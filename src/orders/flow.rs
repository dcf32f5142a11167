//! Flow definitions: state machines, prompts and order-id generation

use rand::Rng;

/// Which of the two fixed dialogues a conversation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    TopUp,
    GeneralOrder,
}

/// Position of a conversation inside its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    TopUp(TopUpState),
    GeneralOrder(GeneralOrderState),
}

impl FlowState {
    pub fn kind(&self) -> FlowKind {
        match self {
            FlowState::TopUp(_) => FlowKind::TopUp,
            FlowState::GeneralOrder(_) => FlowKind::GeneralOrder,
        }
    }
}

/// TopUp flow: seeded by `.tp <uid>` after a successful nickname lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopUpState {
    /// Waiting for `y`/`n` after the top-up link prompt.
    Confirm,
    /// Waiting for the UniPin code.
    Unipin,
    /// Waiting for the bKash transaction id.
    Bkash,
    /// Waiting for the package name.
    Package,
    /// Waiting for the paid/profit amount.
    Amount,
    /// Waiting for an order id, or `/gen`.
    OrderId,
    /// Waiting for the final `y`/`n` before publishing.
    FinalConfirm,
}

/// GeneralOrder flow: seeded by `.gor`. Unlike TopUp there is no final
/// confirmation step; the order-id step is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralOrderState {
    /// Waiting for the player UID (looked up before advancing).
    Uid,
    /// Waiting for order details and method.
    Details,
    /// Waiting for the bKash transaction id.
    Bkash,
    /// Waiting for the package name.
    Package,
    /// Waiting for the paid/profit amount.
    Amount,
    /// Waiting for an order id, or `/gen` (terminal).
    OrderId,
}

// Prompts and notices, one per transition. Bold markdown prompts for
// inputs, monospace blocks for errors and confirmations.
pub const PROMPT_GOR_UID: &str = "**Enter UID:**";
pub const PROMPT_UNIPIN: &str = "**Enter Unipin code:**";
pub const PROMPT_TP_BKASH: &str = "**Enter Bkash Trx ID:**";
pub const PROMPT_TP_PACKAGE: &str = "**Enter the package name:**";
pub const PROMPT_TP_AMOUNT: &str = "**Enter Profit/paid amount:**";
pub const PROMPT_GOR_BKASH: &str = "**Enter Bkash Trx ID:**";
pub const PROMPT_GOR_PACKAGE: &str = "**Enter package name:**";
pub const PROMPT_GOR_AMOUNT: &str = "**Enter Paid/profit amount:**";
pub const PROMPT_ORDER_ID: &str = "**Order ID:** (or reply /gen to auto-generate)";
pub const PROMPT_FINAL_CONFIRM: &str = "**All ok? Reply 'y' or 'n'**";

pub const NOTICE_TOPUP_CANCELLED: &str = "```\n❌ Top up cancelled.\n```";
pub const NOTICE_PROCESSING_CANCELLED: &str = "```\n❌ Processing cancelled.\n```";
pub const NOTICE_ORDER_PROCESSED: &str = "```\n✅ Order processed successfully!\n```";

/// Top-up confirmation prompt for `.tp`, with the clickable link.
pub fn topup_prompt(nickname: &str, topup_link: &str) -> String {
    format!(
        "**{}** - If the player name is ok then Top up [Click here]({}), If top up is done say 'y' or 'n'",
        nickname, topup_link
    )
}

/// Prompt after a successful UID lookup in the GeneralOrder flow.
pub fn gor_details_prompt(nickname: &str) -> String {
    format!("**{}** - Enter order detail and method:", nickname)
}

/// Error block for an unknown player UID.
pub fn player_not_found(uid: &str) -> String {
    format!("```\n❌ Error: Player not found. UID: {}\n```", uid)
}

/// Failure notice when the receipt could not be forwarded.
pub fn receipt_failed(err: &str) -> String {
    format!("```\n❌ Error forwarding receipt: {}\n```", err)
}

const ORDER_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ORDER_ID_LEN: usize = 8;

/// Generate a random order id: 8 characters drawn uniformly from
/// uppercase letters and digits. Not collision-free; acceptable here.
pub fn generate_order_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ORDER_ID_LEN)
        .map(|_| ORDER_ID_ALPHABET[rng.gen_range(0..ORDER_ID_ALPHABET.len())] as char)
        .collect()
}
