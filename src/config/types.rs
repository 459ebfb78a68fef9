// Configuration type definitions

use serde::Deserialize;

use crate::fetch::MatchStrategy;
use crate::picker::{DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_SUGGESTIONS, DEFAULT_MAX_VISIBLE_ROWS};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Picker timing and size configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub debounce_ms: u64,
    pub max_suggestions: usize,
    pub max_visible_rows: u16,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
        }
    }
}

/// Search backend configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
        }
    }
}

/// Local catalog search configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub matching: MatchStrategy,
    pub limit: usize,
}

impl Default for LocalConfig {
    fn default() -> Self {
        LocalConfig {
            matching: MatchStrategy::Substring,
            limit: crate::fetch::DEFAULT_LOCAL_LIMIT,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub local: LocalConfig,
}
