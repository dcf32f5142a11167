//! MTProto client setup via grammers
//!
//! The session comes either from `SESSION_STRING` (base64-encoded session
//! bytes, convenient for container deployments) or from a session file on
//! disk. User accounts cannot sign themselves in non-interactively, so an
//! unauthorized session is a startup error rather than something to
//! recover from here.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use grammers_client::{Client, Config, InitParams};
use grammers_session::Session;
use std::path::Path;

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// Connect to Telegram with the configured credentials and session.
pub async fn connect() -> AppResult<Client> {
    let session = load_session()?;

    let config = Config {
        session,
        api_id: *config::API_ID,
        api_hash: config::API_HASH.clone(),
        params: InitParams {
            device_model: "Free Fire Userbot".to_string(),
            system_version: "1.0".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            system_lang_code: "en".to_string(),
            lang_code: "en".to_string(),
            ..Default::default()
        },
    };

    log::info!("Connecting to Telegram...");
    let client = Client::connect(config)
        .await
        .map_err(|e| AppError::Session(format!("Failed to connect: {}", e)))?;
    Ok(client)
}

fn load_session() -> AppResult<Session> {
    if let Some(encoded) = config::SESSION_STRING.as_deref() {
        log::info!("Loading session from SESSION_STRING");
        let bytes = BASE64.decode(encoded.trim())?;
        return Session::load(&bytes)
            .map_err(|e| AppError::Session(format!("Failed to parse SESSION_STRING: {}", e)));
    }

    let path = Path::new(config::SESSION_FILE.as_str());
    if path.exists() {
        log::info!("Loading session from {:?}", path);
        Session::load_file(path)
            .map_err(|e| AppError::Session(format!("Failed to load session file: {}", e)))
    } else {
        Err(AppError::Session(format!(
            "No SESSION_STRING set and session file {:?} does not exist",
            path
        )))
    }
}
