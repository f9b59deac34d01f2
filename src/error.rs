use std::io;
use thiserror::Error;

/// Custom error type for the zbxmon application
#[derive(Error, Debug)]
pub enum ZbxmonError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Zabbix API error: {0}")]
    Api(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown trigger severity code: {0}")]
    UnknownSeverity(u8),

    #[error("Unknown host availability code: {0}")]
    UnknownAvailability(u8),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("TUI error: {0}")]
    Tui(String),
}

/// Result type alias for the zbxmon application
pub type Result<T> = std::result::Result<T, ZbxmonError>;

impl ZbxmonError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ZbxmonError::Config(msg.into())
    }

    /// Create an authentication error
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        ZbxmonError::Auth(msg.into())
    }

    /// Create an API error
    pub fn api<S: Into<String>>(msg: S) -> Self {
        ZbxmonError::Api(msg.into())
    }

    /// Create a notification error
    pub fn notification<S: Into<String>>(msg: S) -> Self {
        ZbxmonError::Notification(msg.into())
    }

    pub fn tui<S: Into<String>>(msg: S) -> Self {
        ZbxmonError::Tui(msg.into())
    }
}
