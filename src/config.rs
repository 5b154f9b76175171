use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL database connection URL. Comments and watched episodes are
    /// kept in memory when unset.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis connection URL for the catalog cache
    #[serde(default)]
    pub redis_url: Option<String>,

    /// HuggingFace Inference API token
    #[serde(default)]
    pub huggingface_api_key: Option<String>,

    /// HuggingFace Inference API base URL
    #[serde(default = "default_huggingface_api_url")]
    pub huggingface_api_url: String,

    /// Model used for insight generation
    #[serde(default = "default_huggingface_model")]
    pub huggingface_model: String,

    /// Timeout for a single generation request
    #[serde(default = "default_insight_timeout_secs")]
    pub insight_timeout_secs: u64,

    /// Whether templated insights replace failed generations
    #[serde(default = "default_true")]
    pub insight_fallback_enabled: bool,

    /// TVMaze API base URL
    #[serde(default = "default_tvmaze_api_url")]
    pub tvmaze_api_url: String,

    /// Timeout for catalog lookups
    #[serde(default = "default_catalog_timeout_secs")]
    pub catalog_timeout_secs: u64,

    /// Origins allowed by the CORS layer
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_huggingface_api_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_huggingface_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.2".to_string()
}

fn default_insight_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_tvmaze_api_url() -> String {
    "https://api.tvmaze.com".to_string()
}

fn default_catalog_timeout_secs() -> u64 {
    10
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:7777".to_string(),
        "http://127.0.0.1:5173".to_string(),
        "http://127.0.0.1:7777".to_string(),
    ]
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn insight_timeout(&self) -> Duration {
        Duration::from_secs(self.insight_timeout_secs)
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_secs)
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_env_is_empty() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert!(config.database_url.is_none());
        assert!(config.huggingface_api_key.is_none());
        assert_eq!(config.huggingface_model, "mistralai/Mistral-7B-Instruct-v0.2");
        assert_eq!(config.insight_timeout(), Duration::from_secs(30));
        assert_eq!(config.catalog_timeout(), Duration::from_secs(10));
        assert!(config.insight_fallback_enabled);
        assert_eq!(config.cors_origins.len(), 4);
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_env_overrides() {
        let vars = vec![
            ("HUGGINGFACE_API_KEY".to_string(), "hf_test".to_string()),
            ("INSIGHT_FALLBACK_ENABLED".to_string(), "false".to_string()),
            ("INSIGHT_TIMEOUT_SECS".to_string(), "5".to_string()),
            ("PORT".to_string(), "9000".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.huggingface_api_key.as_deref(), Some("hf_test"));
        assert!(!config.insight_fallback_enabled);
        assert_eq!(config.insight_timeout(), Duration::from_secs(5));
        assert_eq!(config.port, 9000);
    }
}
