use serde::{Deserialize, Serialize};

pub mod game;
pub mod preferences;

pub use game::{GameRecord, DEFAULT_POPULARITY};
pub use preferences::Preferences;

/// Shortlist size used when a request does not specify one
pub const DEFAULT_MAX_RESULTS: i64 = 3;

/// Request body for `POST /recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub prompt: String,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

fn default_max_results() -> i64 {
    DEFAULT_MAX_RESULTS
}

/// Response body for `POST /recommend`
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub prompt: String,
    pub preferences: Preferences,
    pub results: Vec<GameRecord>,
    /// Free-text explanations, one numbered entry per result
    pub explanations_raw: String,
}
