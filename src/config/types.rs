use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/v1";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_GREETING: &str = "Olá! Por favor, insira uma URL de um site corporativo para eu analisar (ex: https://vtex.com/br-pt/).";
pub const TOKEN_STORE_FILENAME: &str = "session.json";

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Data directory holding the persisted session - computed, not serialized
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Base URL of the analysis service, including the API prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Greeting appended as the first transcript entry of a conversation.
    #[serde(default = "default_show_greeting")]
    pub show_greeting: bool,

    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_show_greeting() -> bool {
    true
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            config_path: PathBuf::new(),
            api_url: default_api_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            log_level: default_log_level(),
            show_greeting: default_show_greeting(),
            greeting: default_greeting(),
        }
    }
}

impl ClientConfig {
    pub fn token_store_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_STORE_FILENAME)
    }

    /// Greeting to seed a new transcript with, if enabled and non-blank.
    pub fn greeting(&self) -> Option<&str> {
        let greeting = self.greeting.trim();
        (self.show_greeting && !greeting.is_empty()).then_some(greeting)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(self.api_url.trim()).map_err(|e| {
            ConfigError::Validation(format!("api_url '{}' is not a URL: {e}", self.api_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "api_url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "connect_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
