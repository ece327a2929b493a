//! Runtime configuration
//!
//! Resolved once at startup and injected into constructors. Priority:
//! CLI flags > environment > defaults.

use crate::conversation::state::DEFAULT_CONTEXT;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RESPONDER_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where and how the remote responder is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderConfig {
    /// Base address; the exchange goes to `<base_url>/chat`
    pub base_url: String,
    pub timeout: Duration,
    /// Chart context forwarded with every query
    pub context: String,
}

impl ResponderConfig {
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RESPONDER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub responder: ResponderConfig,
    /// SQLite file holding the prediction cache
    pub store_path: PathBuf,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ResponderConfig::default();

        let timeout = lookup("PANDITAI_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(defaults.timeout, Duration::from_secs);

        let store_path = lookup("PANDITAI_STORE_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(home).join(".panditai").join("panditai.db")
            },
            PathBuf::from,
        );

        Self {
            responder: ResponderConfig {
                base_url: lookup("PANDITAI_RESPONDER_URL").unwrap_or(defaults.base_url),
                timeout,
                context: lookup("PANDITAI_CONTEXT").unwrap_or(defaults.context),
            },
            store_path,
            log_json: lookup("PANDITAI_LOG_JSON")
                .is_some_and(|v| !matches!(v.trim(), "" | "0" | "false")),
        }
    }
}
