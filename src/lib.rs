//! Astopup - Telegram userbot for Free Fire player lookups and top-up orders
//!
//! This library provides all the functionality for the userbot: the
//! per-operator conversational order flows, the Free Fire profile API
//! client, Telegram (MTProto) integration and the uptime web server.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, shared utilities, web server
//! - `freefire`: Free Fire profile API client and profile formatting
//! - `orders`: conversation engine, order flows and receipt rendering
//! - `telegram`: grammers client wrapper, authorization and handlers

pub mod core;
pub mod freefire;
pub mod orders;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::error::{AppError, AppResult};
pub use freefire::{FreeFireClient, ProfileApi};
pub use orders::{ConversationEngine, ReceiptSink};
