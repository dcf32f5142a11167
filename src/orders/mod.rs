//! Order flows: conversation engine, state machines and receipts

pub mod conversation;
pub mod flow;
pub mod receipt;

pub use conversation::{Conversation, ConversationEngine};
pub use flow::{generate_order_id, FlowKind, FlowState};
pub use receipt::{OrderRecord, ReceiptSink};
