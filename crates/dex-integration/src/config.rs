use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Remote API settings, stored under `[api]` in the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the REST API, without a trailing slash
    pub base_url: String,
    /// Max index records fetched in the single index call
    pub index_limit: u32,
    /// Max categories listed before membership fetches
    pub category_limit: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_limit: 2000,
            category_limit: 20,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Join a path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
