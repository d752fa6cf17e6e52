use serde::{Deserialize, Serialize};

/// Structured preferences inferred from a user's prompt
///
/// Every list always resolves, possibly empty. An all-empty value is what the
/// extractor falls back to and what the matcher uses when none is supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    /// Genres matched (case-insensitive substring) against a game's genres
    #[serde(default)]
    pub preferred_genres: Vec<String>,
    /// Tags matched (case-insensitive substring) against a game's tags
    #[serde(default)]
    pub style_tags: Vec<String>,
    /// Tags whose presence on a game is penalized
    #[serde(default)]
    pub avoid_tags: Vec<String>,
}

impl Preferences {
    pub fn new(
        preferred_genres: Vec<String>,
        style_tags: Vec<String>,
        avoid_tags: Vec<String>,
    ) -> Self {
        Self {
            preferred_genres,
            style_tags,
            avoid_tags,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.preferred_genres.is_empty() && self.style_tags.is_empty() && self.avoid_tags.is_empty()
    }

    /// Trims entries, drops blanks and collapses case-insensitive duplicates
    ///
    /// A blank entry would be a substring of every genre or tag, so it never
    /// reaches the matcher.
    pub fn normalized(self) -> Self {
        Self {
            preferred_genres: normalize_list(self.preferred_genres),
            style_tags: normalize_list(self.style_tags),
            avoid_tags: normalize_list(self.avoid_tags),
        }
    }
}

fn normalize_list(values: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(values.len());
    let mut out = Vec::with_capacity(values.len());

    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(trimmed.to_string());
    }

    out
}
