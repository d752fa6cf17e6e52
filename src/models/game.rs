use serde::{Deserialize, Serialize};

/// Popularity assumed when the catalog omits it or it cannot be parsed
pub const DEFAULT_POPULARITY: f64 = 50.0;

/// A single game from the catalog
///
/// Records are loaded once at startup and never mutated. Titles are not
/// unique; the catalog may carry duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 0-100, higher means better known
    #[serde(default = "default_popularity")]
    pub popularity: f64,
    #[serde(default)]
    pub hidden_gem: bool,
}

fn default_popularity() -> f64 {
    DEFAULT_POPULARITY
}

impl GameRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            genres: Vec::new(),
            tags: Vec::new(),
            popularity: DEFAULT_POPULARITY,
            hidden_gem: false,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn hidden_gem(mut self, hidden_gem: bool) -> Self {
        self.hidden_gem = hidden_gem;
        self
    }

    /// Description, genres and tags joined into one lowercased string
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.description,
            self.genres.join(" "),
            self.tags.join(" ")
        )
        .to_lowercase()
    }

    /// Popularity scaled to [0, 1]
    pub fn popularity_ratio(&self) -> f64 {
        if self.popularity.is_finite() {
            (self.popularity / 100.0).clamp(0.0, 1.0)
        } else {
            DEFAULT_POPULARITY / 100.0
        }
    }
}
