use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Friendli serverless API key used for preference parsing and explanations
    pub friendli_api_key: String,

    /// Chat completions endpoint
    #[serde(default = "default_friendli_api_url")]
    pub friendli_api_url: String,

    /// Model used for every text-generation call
    #[serde(default = "default_friendli_model")]
    pub friendli_model: String,

    /// Per-call timeout for the text-generation service, in seconds
    #[serde(default = "default_friendli_timeout_secs")]
    pub friendli_timeout_secs: u64,

    /// Extra attempts after a failed text-generation call (0 disables retries)
    #[serde(default)]
    pub friendli_max_retries: u32,

    /// Path to the games catalog CSV
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Fixed seed for the matcher's random source; unset means fresh entropy per request
    #[serde(default)]
    pub match_rng_seed: Option<u64>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_friendli_api_url() -> String {
    "https://api.friendli.ai/serverless/v1/chat/completions".to_string()
}

fn default_friendli_model() -> String {
    "meta-llama-3.1-8b-instruct".to_string()
}

fn default_friendli_timeout_secs() -> u64 {
    30
}

fn default_catalog_path() -> String {
    "data/games.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn friendli_timeout(&self) -> Duration {
        Duration::from_secs(self.friendli_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
