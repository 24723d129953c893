//! # Kiosk Configuration
//!
//! Read-only configuration resolved at startup.
//!
//! ## Sources (priority order)
//! 1. Environment variables (`KIOSK_*`)
//! 2. Defaults (this file)

use std::env;

/// Kiosk settings. Read-only after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store name shown in the banner.
    pub store_name: String,
}

impl Config {
    /// Resolves configuration from the environment, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Config {
            store_name: env::var("KIOSK_STORE_NAME")
                .unwrap_or_else(|_| "Shopfront".to_string()),
        }
    }
}
