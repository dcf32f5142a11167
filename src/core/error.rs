use thiserror::Error;

/// Centralized error types for the application
///
/// All errors in the application are converted to this enum for consistent
/// error handling. Uses `thiserror` for automatic error conversion and
/// display formatting.
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram MTProto invocation errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] grammers_mtsender::InvocationError),

    /// Session-related errors (loading, decoding, authorization)
    #[error("Session error: {0}")]
    Session(String),

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP status code errors
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Base64 decoding errors (session string)
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Configuration validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Receipt destination chat is not visible from the account's dialogs
    #[error("Receipt chat {0} not found in dialogs")]
    ChatNotFound(i64),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
