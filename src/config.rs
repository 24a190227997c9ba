use serde::Deserialize;
use std::time::Duration;

/// Where recommendations come from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Generate plausible data locally, no network involved
    #[default]
    Mock,
    /// Query the remote search API
    Live,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Search API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Optional bearer token for the search API
    #[serde(default)]
    pub api_key: Option<String>,

    /// Mock generator or live search API
    #[serde(default)]
    pub data_source: DataSource,

    /// Per-request timeout for search API calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Fixed seed for the mock generator, random when unset
    #[serde(default)]
    pub mock_seed: Option<u64>,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: None,
            data_source: DataSource::default(),
            request_timeout_secs: default_request_timeout_secs(),
            mock_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// API key, ignoring empty values
    pub fn bearer_token(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.data_source, DataSource::Mock);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.bearer_token().is_none());
    }

    #[test]
    fn test_live_source_with_key() {
        let vars = vec![
            ("DATA_SOURCE".to_string(), "live".to_string()),
            ("API_KEY".to_string(), "secret-token-123".to_string()),
            ("API_BASE_URL".to_string(), "https://api.example.com".to_string()),
            ("MOCK_SEED".to_string(), "42".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.data_source, DataSource::Live);
        assert_eq!(config.bearer_token(), Some("secret-token-123"));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.mock_seed, Some(42));
    }

    #[test]
    fn test_blank_key_is_unauthenticated() {
        let config = Config {
            api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(config.bearer_token().is_none());
    }
}
