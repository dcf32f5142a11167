use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;

use astopup::core::{config, init_logger, web_server};
use astopup::freefire::FreeFireClient;
use astopup::orders::ConversationEngine;
use astopup::telegram::{
    client, handlers, AuthPolicy, HandlerDeps, SentTracker, TelegramReceiptSink,
};
use astopup::{ProfileApi, ReceiptSink};

/// Main entry point for the userbot
///
/// # Errors
/// Returns an error if initialization fails (logging, session, Telegram
/// connection).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    // Set up global panic handler so panics in spawned tasks are logged
    // instead of disappearing
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!(
                "Panic at {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }
    }));

    if let Err(e) = config::validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    run_bot().await
}

/// Run the userbot: health server, Telegram connection, update loop.
async fn run_bot() -> Result<()> {
    log::info!("Starting Free Fire userbot...");

    // Bind the health server before touching Telegram so a bad PORT fails
    // startup immediately
    let listener = web_server::bind(*config::PORT).await?;
    tokio::spawn(async move {
        if let Err(e) = web_server::serve(listener).await {
            log::error!("Web server error: {}", e);
        }
    });

    let client = client::connect().await?;

    if !client.is_authorized().await? {
        anyhow::bail!(
            "Session is not authorized. Generate a fresh SESSION_STRING and restart."
        );
    }

    let me = client.get_me().await?;
    let owner_id = me.id();

    let receipt_chat_id = (*config::RECEIPT_CHAT_ID)
        .ok_or_else(|| anyhow::anyhow!("RECEIPT_CHAT_ID is not set"))?;

    let sent = Arc::new(SentTracker::default());
    let profiles: Arc<dyn ProfileApi> =
        Arc::new(FreeFireClient::new(config::FREEFIRE_API_URL.clone())?);
    let receipts: Arc<dyn ReceiptSink> = Arc::new(TelegramReceiptSink::new(
        client.clone(),
        receipt_chat_id,
        Arc::clone(&sent),
    ));
    let engine = Arc::new(ConversationEngine::new(
        Arc::clone(&profiles),
        receipts,
        config::TOPUP_LINK.clone(),
    ));

    let deps = HandlerDeps {
        auth: AuthPolicy::from_config(owner_id),
        engine,
        profiles,
        sent,
    };

    log::info!("================================================");
    log::info!("🤖 Logged in as user {} (id {})", me.full_name(), owner_id);
    log::info!("👥 Authorized users: {:?}", *config::AUTHORIZED_USERS);
    log::info!("💬 Authorized groups: {:?}", *config::AUTHORIZED_GROUPS);
    log::info!("🧾 Receipt chat: {}", receipt_chat_id);
    log::info!("🔗 Top-up link: {}", *config::TOPUP_LINK);
    log::info!("📡 Ready! Commands: .Cid, .tp, .gor, .cd, .ping, .help");
    log::info!("================================================");

    loop {
        let update = tokio::select! {
            update = client.next_update() => update,
            _ = signal::ctrl_c() => {
                log::info!("Shutting down gracefully...");
                break;
            }
        };

        match update {
            Ok(Some(update)) => {
                if let Err(e) = handlers::handle_update(&deps, update).await {
                    // One bad update must not stop the loop
                    log::error!("Handler error: {}", e);
                }
            }
            Ok(None) => {
                log::info!("Update stream ended");
                break;
            }
            Err(e) => {
                log::error!("Update stream error: {}", e);
            }
        }
    }

    Ok(())
}
