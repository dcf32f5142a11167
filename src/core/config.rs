//! Environment-backed configuration
//!
//! All values are read once at startup into `Lazy` statics. Required values
//! are checked by [`validate`]; a failed validation is fatal (the process
//! exits non-zero from `main`).

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

/// Telegram API ID from my.telegram.org
/// Read from API_ID environment variable. Required.
pub static API_ID: Lazy<i32> = Lazy::new(|| {
    env::var("API_ID")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
});

/// Telegram API hash from my.telegram.org
/// Read from API_HASH environment variable. Required.
pub static API_HASH: Lazy<String> = Lazy::new(|| env::var("API_HASH").unwrap_or_default());

/// Base64-encoded grammers session
/// Read from SESSION_STRING environment variable
/// Takes priority over SESSION_FILE when set.
pub static SESSION_STRING: Lazy<Option<String>> = Lazy::new(|| {
    env::var("SESSION_STRING")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
});

/// Session file path, used when SESSION_STRING is not set
/// Read from SESSION_FILE environment variable
/// Default: userbot.session
pub static SESSION_FILE: Lazy<String> =
    Lazy::new(|| env::var("SESSION_FILE").unwrap_or_else(|_| "userbot.session".to_string()));

/// Allow-listed user IDs (comma-separated)
/// Read from AUTHORIZED_USERS environment variable
/// Empty list means nobody but the owner is allowed.
pub static AUTHORIZED_USERS: Lazy<Vec<i64>> = Lazy::new(|| {
    env::var("AUTHORIZED_USERS")
        .ok()
        .map(|raw| parse_id_list(&raw))
        .unwrap_or_default()
});

/// Allow-listed group chat IDs (comma-separated)
/// Read from AUTHORIZED_GROUPS environment variable
pub static AUTHORIZED_GROUPS: Lazy<Vec<i64>> = Lazy::new(|| {
    env::var("AUTHORIZED_GROUPS")
        .ok()
        .map(|raw| parse_id_list(&raw))
        .unwrap_or_default()
});

/// Destination chat for order receipts
/// Read from RECEIPT_CHAT_ID environment variable. Required.
pub static RECEIPT_CHAT_ID: Lazy<Option<i64>> = Lazy::new(|| {
    env::var("RECEIPT_CHAT_ID")
        .ok()
        .and_then(|v| v.trim().parse().ok())
});

/// Top-up link shown in the `.tp` prompt
/// Read from TOPUP_LINK environment variable
pub static TOPUP_LINK: Lazy<String> =
    Lazy::new(|| env::var("TOPUP_LINK").unwrap_or_else(|_| "https://example.com/topup".to_string()));

/// Free Fire profile API base URL
/// Read from FREEFIRE_API_URL environment variable
pub static FREEFIRE_API_URL: Lazy<String> = Lazy::new(|| {
    env::var("FREEFIRE_API_URL")
        .unwrap_or_else(|_| "https://freefire-api-2-e4j5.onrender.com".to_string())
});

/// Uptime web server listen port
/// Read from PORT environment variable
/// Default: 5000
pub static PORT: Lazy<u16> = Lazy::new(|| {
    env::var("PORT")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(5000)
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: userbot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "userbot.log".to_string()));

/// Profile API configuration
pub mod profile {
    use super::Duration;

    /// Timeout for profile API requests (in seconds)
    pub const TIMEOUT_SECS: u64 = 10;

    /// Default server region for player lookups
    pub const DEFAULT_SERVER: &str = "bd";

    /// Profile API request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

/// Parse a comma-separated list of chat/user IDs, skipping malformed entries
pub fn parse_id_list(raw: &str) -> Vec<i64> {
    raw.split([',', ' ', '\n', '\t'])
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}

/// Check that every required configuration value is present.
///
/// Called once from `main` after dotenv; a returned error terminates the
/// process with a non-zero exit code.
pub fn validate() -> AppResult<()> {
    if *API_ID == 0 {
        return Err(AppError::Config(
            "API_ID is not set! Please set it in environment variables.".into(),
        ));
    }
    if API_HASH.is_empty() {
        return Err(AppError::Config(
            "API_HASH is not set! Please set it in environment variables.".into(),
        ));
    }
    if SESSION_STRING.is_none() && !std::path::Path::new(SESSION_FILE.as_str()).exists() {
        return Err(AppError::Config(format!(
            "No session: set SESSION_STRING or provide a session file at {}",
            *SESSION_FILE
        )));
    }
    if RECEIPT_CHAT_ID.is_none() {
        return Err(AppError::Config(
            "RECEIPT_CHAT_ID is not set! Please set it in environment variables.".into(),
        ));
    }
    Ok(())
}
