//! Core utilities: configuration, errors, logging, web server

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;
pub mod web_server;

pub use error::{AppError, AppResult};
pub use logging::init_logger;
