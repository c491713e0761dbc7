use crate::history::DEFAULT_HISTORY_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlossaConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl SuggestionConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    200
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
    #[serde(default = "default_history_key")]
    pub key: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            key: default_history_key(),
        }
    }
}

fn default_history_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".glossa").join("storage.json"),
        None => PathBuf::from("./.glossa/storage.json"),
    }
}

fn default_history_key() -> String {
    DEFAULT_HISTORY_KEY.to_string()
}
