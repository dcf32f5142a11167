//! Update handling
//!
//! Routes every `NewMessage` update through the authorization gate and the
//! command dispatcher, and offers non-command text to the conversation
//! engine. This is a user account, not a bot account: the operator's own
//! commands arrive as *outgoing* messages, so outgoing traffic must not be
//! filtered out wholesale. Instead every message this process sends is
//! remembered by id and skipped when it echoes back, which keeps the
//! bot's own prompts from being consumed as flow input.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use grammers_client::types::{Chat, Message};
use grammers_client::{Client, InputMessage, Update};
use grammers_session::PackedChat;
use tokio::sync::{Mutex, OnceCell};

use crate::core::error::{AppError, AppResult};
use crate::freefire::{format_player_profile, ProfileApi};
use crate::orders::flow;
use crate::orders::{ConversationEngine, ReceiptSink};
use crate::telegram::auth::AuthPolicy;
use crate::telegram::commands::{self, Command};

/// Remembers the (chat, message id) pairs of messages this account sent
/// itself. Bounded; old entries are evicted once the window fills, which
/// is fine because echoes arrive promptly.
#[derive(Default)]
pub struct SentTracker {
    recent: Mutex<VecDeque<(i64, i32)>>,
}

impl SentTracker {
    const CAPACITY: usize = 256;

    pub async fn record(&self, chat_id: i64, message_id: i32) {
        let mut recent = self.recent.lock().await;
        if recent.len() == Self::CAPACITY {
            recent.pop_front();
        }
        recent.push_back((chat_id, message_id));
    }

    pub async fn contains(&self, chat_id: i64, message_id: i32) -> bool {
        self.recent
            .lock()
            .await
            .iter()
            .any(|&entry| entry == (chat_id, message_id))
    }
}

/// Shared state for the update loop.
pub struct HandlerDeps {
    pub auth: AuthPolicy,
    pub engine: Arc<ConversationEngine>,
    pub profiles: Arc<dyn ProfileApi>,
    pub sent: Arc<SentTracker>,
}

/// Process one update. Errors bubble up to the loop, which logs and
/// continues; a single bad update never stops the bot.
pub async fn handle_update(deps: &HandlerDeps, update: Update) -> AppResult<()> {
    let Update::NewMessage(message) = update else {
        return Ok(());
    };

    let chat = message.chat();
    let chat_id = chat.id();

    if deps.sent.contains(chat_id, message.id()).await {
        return Ok(());
    }

    let text = message.text();
    if text.is_empty() {
        return Ok(());
    }

    // Outgoing messages carry no sender on some layers; they are always
    // from the session owner.
    let sender_id = if message.outgoing() {
        deps.auth.owner_id()
    } else {
        message.sender().map(|s| s.id()).unwrap_or(chat_id)
    };
    let is_private = matches!(chat, Chat::User(_));
    let authorized = deps.auth.permits(sender_id, chat_id, is_private);

    if let Some(command) = commands::parse(text) {
        if !authorized {
            log::warn!(
                "Unauthorized command from user {} in chat {}",
                sender_id,
                chat_id
            );
            reply(deps, &message, InputMessage::markdown(commands::NOT_AUTHORIZED)).await?;
            return Ok(());
        }
        log::debug!("Command {:?} from user {} in chat {}", command, sender_id, chat_id);
        return dispatch(deps, &message, sender_id, chat_id, command).await;
    }

    let turn = deps
        .engine
        .handle_turn(sender_id, chat_id, text, authorized)
        .await;
    if let Some(reply_text) = turn {
        reply(deps, &message, InputMessage::markdown(&reply_text)).await?;
    }
    Ok(())
}

async fn dispatch(
    deps: &HandlerDeps,
    message: &Message,
    sender_id: i64,
    chat_id: i64,
    command: Command,
) -> AppResult<()> {
    match command {
        Command::PlayerInfo { uid } => player_info(deps, message, &uid).await,
        Command::TopUp { uid } => top_up(deps, message, sender_id, chat_id, &uid).await,
        Command::GeneralOrder => {
            let prompt = deps.engine.start_general_order(sender_id, chat_id).await;
            reply(deps, message, InputMessage::markdown(&prompt)).await?;
            Ok(())
        }
        Command::ChatDetails => {
            let details = chat_details(&message.chat());
            reply(deps, message, InputMessage::markdown(&details)).await?;
            Ok(())
        }
        Command::Ping => {
            reply(deps, message, InputMessage::markdown(commands::PONG)).await?;
            Ok(())
        }
        Command::Help => {
            reply(deps, message, InputMessage::markdown(commands::HELP_TEXT)).await?;
            Ok(())
        }
    }
}

/// `.cid`: reply with a progress notice, then edit the profile (or an
/// error) into it.
async fn player_info(deps: &HandlerDeps, message: &Message, uid: &str) -> AppResult<()> {
    let processing = reply(
        deps,
        message,
        InputMessage::markdown(commands::FETCHING_PLAYER_DETAILS),
    )
    .await?;

    match deps.profiles.fetch_player(uid).await {
        Ok(profile) if profile.is_found() => {
            processing
                .edit(InputMessage::markdown(&format_player_profile(&profile)))
                .await?;
        }
        Ok(_) => {
            processing
                .edit(InputMessage::markdown(&commands::cid_player_not_found(uid)))
                .await?;
        }
        Err(e) => {
            log::error!("Profile fetch failed for UID {}: {}", uid, e);
            processing
                .edit(InputMessage::markdown(commands::API_UNAVAILABLE))
                .await?;
        }
    }
    Ok(())
}

/// `.tp`: look up the nickname first; only a known player seeds a flow.
async fn top_up(
    deps: &HandlerDeps,
    message: &Message,
    sender_id: i64,
    chat_id: i64,
    uid: &str,
) -> AppResult<()> {
    let processing = reply(
        deps,
        message,
        InputMessage::markdown(commands::FETCHING_PLAYER_INFO),
    )
    .await?;

    match deps.profiles.nickname(uid).await {
        Ok(Some(nickname)) => {
            let prompt = deps.engine.start_topup(sender_id, chat_id, uid, &nickname).await;
            processing.edit(InputMessage::markdown(&prompt)).await?;
        }
        Ok(None) => {
            processing
                .edit(InputMessage::markdown(&flow::player_not_found(uid)))
                .await?;
        }
        Err(e) => {
            log::error!("Nickname lookup failed for UID {}: {}", uid, e);
            processing
                .edit(InputMessage::markdown(&flow::player_not_found(uid)))
                .await?;
        }
    }
    Ok(())
}

fn chat_details(chat: &Chat) -> String {
    match chat {
        Chat::User(user) => {
            let mut lines = Vec::new();
            lines.push("```".to_string());
            lines.push("👤 User Details".to_string());
            lines.push("═══════════════════════════════".to_string());
            lines.push(format!("🆔 User ID: {}", user.id()));
            lines.push(format!("📛 Name: {}", placeholder(&user.full_name())));
            lines.push(format!(
                "🔗 Username: @{}",
                user.username().unwrap_or("N/A")
            ));
            lines.push("```".to_string());
            lines.join("\n")
        }
        other => {
            let chat_type = match other {
                Chat::Channel(_) => "Channel",
                _ => "Group",
            };
            let mut lines = Vec::new();
            lines.push("```".to_string());
            lines.push("💬 Chat Details".to_string());
            lines.push("═══════════════════════════════".to_string());
            lines.push(format!("🆔 Chat ID: {}", other.id()));
            lines.push(format!("📛 Title: {}", placeholder(other.name())));
            lines.push(format!(
                "🔗 Username: @{}",
                other.username().unwrap_or("N/A")
            ));
            lines.push(format!("📊 Type: {}", chat_type));
            lines.push("```".to_string());
            lines.join("\n")
        }
    }
}

fn placeholder(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Reply to a message and remember the sent id so the echo is skipped.
async fn reply(deps: &HandlerDeps, message: &Message, input: InputMessage) -> AppResult<Message> {
    let sent = message.reply(input).await?;
    deps.sent.record(message.chat().id(), sent.id()).await;
    Ok(sent)
}

/// Posts rendered receipts to the fixed receipt chat.
///
/// The chat is resolved once from the dialog list to a `PackedChat` and
/// cached; a user account can only message chats it already knows about,
/// so the dialog list is the right source.
pub struct TelegramReceiptSink {
    client: Client,
    chat_id: i64,
    target: OnceCell<PackedChat>,
    sent: Arc<SentTracker>,
}

impl TelegramReceiptSink {
    pub fn new(client: Client, chat_id: i64, sent: Arc<SentTracker>) -> Self {
        Self {
            client,
            chat_id,
            target: OnceCell::new(),
            sent,
        }
    }

    async fn resolve(&self) -> AppResult<PackedChat> {
        if let Some(packed) = self.target.get() {
            return Ok(*packed);
        }
        let wanted = normalize_chat_id(self.chat_id);
        let mut dialogs = self.client.iter_dialogs();
        while let Some(dialog) = dialogs.next().await? {
            let chat = dialog.chat();
            if chat.id() == wanted {
                let packed = chat.pack();
                let _ = self.target.set(packed);
                return Ok(packed);
            }
        }
        Err(AppError::ChatNotFound(self.chat_id))
    }
}

#[async_trait]
impl ReceiptSink for TelegramReceiptSink {
    async fn publish(&self, text: &str) -> AppResult<()> {
        let target = self.resolve().await?;
        let sent = self
            .client
            .send_message(target, InputMessage::markdown(text))
            .await?;
        self.sent.record(target.id, sent.id()).await;
        Ok(())
    }
}

/// Accept chat ids in either the bare form grammers uses or the marked
/// `-100…` / negative form other Telegram libraries hand out.
fn normalize_chat_id(raw: i64) -> i64 {
    if raw <= -1_000_000_000_000 {
        -raw - 1_000_000_000_000
    } else if raw < 0 {
        -raw
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sent_tracker_remembers_and_evicts() {
        let tracker = SentTracker::default();
        tracker.record(10, 1).await;
        assert!(tracker.contains(10, 1).await);
        assert!(!tracker.contains(10, 2).await);
        assert!(!tracker.contains(11, 1).await);

        for i in 0..SentTracker::CAPACITY as i32 {
            tracker.record(10, 100 + i).await;
        }
        // The first entry has been evicted by now.
        assert!(!tracker.contains(10, 1).await);
        assert!(tracker.contains(10, 100).await);
    }

    #[test]
    fn normalizes_marked_chat_ids() {
        assert_eq!(normalize_chat_id(123456), 123456);
        assert_eq!(normalize_chat_id(-123456), 123456);
        assert_eq!(normalize_chat_id(-1_001_234_567_890), 1_234_567_890);
    }
}
