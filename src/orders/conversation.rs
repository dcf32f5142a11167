//! The conversation engine
//!
//! Owns the map from user identity to in-progress flow and advances it one
//! message at a time. The map lives behind a single async mutex that is
//! held for the whole turn: turns are processed strictly one at a time,
//! which preserves the single-writer model the flows assume. There is no
//! other synchronization on the map.
//!
//! Failure policy favours availability: a failed profile lookup or receipt
//! publish is reported to the operator once and never crashes the process;
//! a conversation with no further input simply stays in memory until a
//! terminal message arrives or the process restarts.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::utils::bd_time_now;
use crate::freefire::ProfileApi;
use crate::orders::flow::{
    self, generate_order_id, FlowKind, FlowState, GeneralOrderState, TopUpState,
};
use crate::orders::receipt::{OrderRecord, ReceiptSink};

/// Fields captured as a flow progresses.
///
/// Which fields end up set depends on the flow kind; the terminal
/// transition snapshots them into an [`OrderRecord`].
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub uid: String,
    pub nickname: String,
    pub unipin_code: Option<String>,
    pub order_details: Option<String>,
    pub bkash_trx: String,
    pub package_name: String,
    pub paid_amount: String,
    pub order_id: String,
}

/// One in-progress flow for one user identity.
///
/// `chat_id` binds the conversation to the chat it started in; turns from
/// the same user in other chats are ignored.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub chat_id: i64,
    pub state: FlowState,
    pub draft: OrderDraft,
}

/// Per-user conversation state machine driver.
///
/// At most one conversation exists per user identity; starting a new flow
/// silently discards any previous one (last-start-wins).
pub struct ConversationEngine {
    store: Mutex<HashMap<i64, Conversation>>,
    profiles: Arc<dyn ProfileApi>,
    receipts: Arc<dyn ReceiptSink>,
    topup_link: String,
}

impl ConversationEngine {
    pub fn new(
        profiles: Arc<dyn ProfileApi>,
        receipts: Arc<dyn ReceiptSink>,
        topup_link: impl Into<String>,
    ) -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            profiles,
            receipts,
            topup_link: topup_link.into(),
        }
    }

    /// Seed a TopUp conversation after a successful nickname lookup.
    /// Returns the confirmation prompt with the clickable top-up link.
    pub async fn start_topup(&self, user_id: i64, chat_id: i64, uid: &str, nickname: &str) -> String {
        let draft = OrderDraft {
            uid: uid.to_string(),
            nickname: nickname.to_string(),
            ..OrderDraft::default()
        };
        let mut store = self.store.lock().await;
        store.insert(
            user_id,
            Conversation {
                chat_id,
                state: FlowState::TopUp(TopUpState::Confirm),
                draft,
            },
        );
        flow::topup_prompt(nickname, &self.topup_link)
    }

    /// Seed a GeneralOrder conversation. Returns the UID prompt.
    pub async fn start_general_order(&self, user_id: i64, chat_id: i64) -> String {
        let mut store = self.store.lock().await;
        store.insert(
            user_id,
            Conversation {
                chat_id,
                state: FlowState::GeneralOrder(GeneralOrderState::Uid),
                draft: OrderDraft::default(),
            },
        );
        flow::PROMPT_GOR_UID.to_string()
    }

    /// Whether a user has an in-progress conversation.
    pub async fn has_conversation(&self, user_id: i64) -> bool {
        self.store.lock().await.contains_key(&user_id)
    }

    /// Snapshot of a user's conversation, if any.
    pub async fn conversation(&self, user_id: i64) -> Option<Conversation> {
        self.store.lock().await.get(&user_id).cloned()
    }

    /// Consume one plain-text message against the user's conversation.
    ///
    /// Returns the reply to send, or `None` when the message is not for the
    /// engine: no conversation, wrong chat, command-prefixed text (commands
    /// always win over an in-progress flow), an unauthorized sender, or a
    /// consumed-but-ignored input at a yes/no step.
    pub async fn handle_turn(
        &self,
        user_id: i64,
        chat_id: i64,
        text: &str,
        authorized: bool,
    ) -> Option<String> {
        let mut store = self.store.lock().await;

        let state = {
            let conv = store.get(&user_id)?;
            if conv.chat_id != chat_id {
                return None;
            }
            if text.starts_with('.') {
                return None;
            }
            if !authorized {
                return None;
            }
            conv.state
        };

        let input = text.trim();
        match state {
            FlowState::TopUp(state) => self.topup_turn(&mut store, user_id, state, input).await,
            FlowState::GeneralOrder(state) => self.gor_turn(&mut store, user_id, state, input).await,
        }
    }

    async fn topup_turn(
        &self,
        store: &mut HashMap<i64, Conversation>,
        user_id: i64,
        state: TopUpState,
        input: &str,
    ) -> Option<String> {
        let lower = input.to_lowercase();
        match state {
            TopUpState::Confirm => {
                if lower == "n" {
                    store.remove(&user_id);
                    Some(flow::NOTICE_TOPUP_CANCELLED.to_string())
                } else if lower == "y" {
                    let conv = store.get_mut(&user_id)?;
                    conv.state = FlowState::TopUp(TopUpState::Unipin);
                    Some(flow::PROMPT_UNIPIN.to_string())
                } else {
                    // Consumed, but neither branch matches: wait for valid input.
                    None
                }
            }
            TopUpState::Unipin => {
                let conv = store.get_mut(&user_id)?;
                conv.draft.unipin_code = Some(input.to_string());
                conv.state = FlowState::TopUp(TopUpState::Bkash);
                Some(flow::PROMPT_TP_BKASH.to_string())
            }
            TopUpState::Bkash => {
                let conv = store.get_mut(&user_id)?;
                conv.draft.bkash_trx = input.to_string();
                conv.state = FlowState::TopUp(TopUpState::Package);
                Some(flow::PROMPT_TP_PACKAGE.to_string())
            }
            TopUpState::Package => {
                let conv = store.get_mut(&user_id)?;
                conv.draft.package_name = input.to_string();
                conv.state = FlowState::TopUp(TopUpState::Amount);
                Some(flow::PROMPT_TP_AMOUNT.to_string())
            }
            TopUpState::Amount => {
                let conv = store.get_mut(&user_id)?;
                conv.draft.paid_amount = input.to_string();
                conv.state = FlowState::TopUp(TopUpState::OrderId);
                Some(flow::PROMPT_ORDER_ID.to_string())
            }
            TopUpState::OrderId => {
                let conv = store.get_mut(&user_id)?;
                conv.draft.order_id = resolve_order_id(input, &lower);
                conv.state = FlowState::TopUp(TopUpState::FinalConfirm);
                Some(flow::PROMPT_FINAL_CONFIRM.to_string())
            }
            TopUpState::FinalConfirm => {
                if lower == "n" {
                    store.remove(&user_id);
                    Some(flow::NOTICE_PROCESSING_CANCELLED.to_string())
                } else if lower == "y" {
                    // Terminal: the conversation ends whether or not the
                    // receipt makes it out.
                    let conv = store.remove(&user_id)?;
                    let record = build_record(conv.draft);
                    Some(self.publish(record, FlowKind::TopUp).await)
                } else {
                    None
                }
            }
        }
    }

    async fn gor_turn(
        &self,
        store: &mut HashMap<i64, Conversation>,
        user_id: i64,
        state: GeneralOrderState,
        input: &str,
    ) -> Option<String> {
        match state {
            GeneralOrderState::Uid => {
                let nickname = match self.profiles.nickname(input).await {
                    Ok(Some(nickname)) => nickname,
                    Ok(None) => {
                        store.remove(&user_id);
                        return Some(flow::player_not_found(input));
                    }
                    Err(e) => {
                        log::error!("Profile API error for UID {}: {}", input, e);
                        store.remove(&user_id);
                        return Some(flow::player_not_found(input));
                    }
                };
                let conv = store.get_mut(&user_id)?;
                conv.draft.uid = input.to_string();
                conv.draft.nickname = nickname.clone();
                conv.state = FlowState::GeneralOrder(GeneralOrderState::Details);
                Some(flow::gor_details_prompt(&nickname))
            }
            GeneralOrderState::Details => {
                let conv = store.get_mut(&user_id)?;
                conv.draft.order_details = Some(input.to_string());
                conv.state = FlowState::GeneralOrder(GeneralOrderState::Bkash);
                Some(flow::PROMPT_GOR_BKASH.to_string())
            }
            GeneralOrderState::Bkash => {
                let conv = store.get_mut(&user_id)?;
                conv.draft.bkash_trx = input.to_string();
                conv.state = FlowState::GeneralOrder(GeneralOrderState::Package);
                Some(flow::PROMPT_GOR_PACKAGE.to_string())
            }
            GeneralOrderState::Package => {
                let conv = store.get_mut(&user_id)?;
                conv.draft.package_name = input.to_string();
                conv.state = FlowState::GeneralOrder(GeneralOrderState::Amount);
                Some(flow::PROMPT_GOR_AMOUNT.to_string())
            }
            GeneralOrderState::Amount => {
                let conv = store.get_mut(&user_id)?;
                conv.draft.paid_amount = input.to_string();
                conv.state = FlowState::GeneralOrder(GeneralOrderState::OrderId);
                Some(flow::PROMPT_ORDER_ID.to_string())
            }
            GeneralOrderState::OrderId => {
                // Terminal: no final confirmation step in this flow.
                let mut conv = store.remove(&user_id)?;
                conv.draft.order_id = resolve_order_id(input, &input.to_lowercase());
                let record = build_record(conv.draft);
                Some(self.publish(record, FlowKind::GeneralOrder).await)
            }
        }
    }

    async fn publish(&self, record: OrderRecord, kind: FlowKind) -> String {
        let receipt = record.render(kind);
        match self.receipts.publish(&receipt).await {
            Ok(()) => {
                log::info!("Receipt for order {} forwarded to receipt chat", record.order_id);
                flow::NOTICE_ORDER_PROCESSED.to_string()
            }
            Err(e) => {
                log::error!("Error forwarding receipt for order {}: {}", record.order_id, e);
                flow::receipt_failed(&e.to_string())
            }
        }
    }
}

fn resolve_order_id(input: &str, lower: &str) -> String {
    if lower == "/gen" {
        generate_order_id()
    } else {
        input.to_string()
    }
}

fn build_record(draft: OrderDraft) -> OrderRecord {
    OrderRecord {
        order_id: draft.order_id,
        uid: draft.uid,
        player_name: draft.nickname,
        unipin_code: draft.unipin_code,
        order_details: draft.order_details,
        bkash_trx: draft.bkash_trx,
        paid_amount: draft.paid_amount,
        package_name: draft.package_name,
        datetime: bd_time_now(),
    }
}
