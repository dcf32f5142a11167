//! Telegram-facing layer: MTProto client setup, authorization, command
//! parsing and update handling.

pub mod auth;
pub mod client;
pub mod commands;
pub mod handlers;

pub use auth::AuthPolicy;
pub use handlers::{HandlerDeps, SentTracker, TelegramReceiptSink};
