// Zbxmon Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, ZbxmonError};

// Module declarations
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Config;
pub use crate::core::monitor::items::Item;
pub use crate::core::zabbix::Session;

// Initialize logging
pub fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
