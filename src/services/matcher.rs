use std::collections::HashSet;

use crate::models::{GameRecord, Preferences};

use super::random::RandomSource;
use super::tokenizer::tokenize;

/// Bonus per preferred genre found in a game's genres
const PREFERRED_GENRE_WEIGHT: f64 = 2.0;
/// Bonus per style tag found in a game's tags
const STYLE_TAG_WEIGHT: f64 = 1.0;
/// Penalty per avoided tag found in a game's tags
const AVOID_TAG_WEIGHT: f64 = 2.0;
/// Contribution of each long prompt word found in the description
const KEYWORD_WEIGHT: f64 = 0.3;
/// Cap on the keyword-in-description term
const KEYWORD_CAP: f64 = 2.0;
/// Prompt words must be longer than this to count as keywords
const KEYWORD_MIN_CHARS: usize = 3;
const HIDDEN_GEM_BONUS: f64 = 2.0;
/// Jitter is drawn from `[-JITTER_BOUND, JITTER_BOUND]`
pub const JITTER_BOUND: f64 = 0.7;

/// A game paired with its composite score for one request
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub game: &'a GameRecord,
    pub score: f64,
}

/// Prompt pre-processed once per request
#[derive(Debug)]
pub struct PromptTerms {
    tokens: HashSet<String>,
    keywords: Vec<String>,
}

impl PromptTerms {
    pub fn new(prompt: &str) -> Self {
        let keywords = prompt
            .split_whitespace()
            .filter(|word| word.chars().count() > KEYWORD_MIN_CHARS)
            .map(str::to_lowercase)
            .collect();

        Self {
            tokens: tokenize(prompt),
            keywords,
        }
    }
}

/// Deterministic part of a game's score, without jitter
///
/// Sums lexical overlap, preference matches, keyword hits in the description,
/// the hidden-gem bonus and the popularity penalty.
pub fn score_game(game: &GameRecord, terms: &PromptTerms, preferences: &Preferences) -> f64 {
    let gem_bonus = if game.hidden_gem { HIDDEN_GEM_BONUS } else { 0.0 };

    overlap_score(game, terms)
        + preference_score(game, preferences)
        + keyword_score(game, terms)
        + gem_bonus
        - game.popularity_ratio()
}

fn overlap_score(game: &GameRecord, terms: &PromptTerms) -> f64 {
    let game_tokens = tokenize(&game.searchable_text());
    terms.tokens.intersection(&game_tokens).count() as f64
}

fn preference_score(game: &GameRecord, preferences: &Preferences) -> f64 {
    let genres: Vec<String> = game.genres.iter().map(|g| g.to_lowercase()).collect();
    let tags: Vec<String> = game.tags.iter().map(|t| t.to_lowercase()).collect();

    let genre_hits = count_matches(&preferences.preferred_genres, &genres);
    let style_hits = count_matches(&preferences.style_tags, &tags);
    let avoid_hits = count_matches(&preferences.avoid_tags, &tags);

    genre_hits as f64 * PREFERRED_GENRE_WEIGHT + style_hits as f64 * STYLE_TAG_WEIGHT
        - avoid_hits as f64 * AVOID_TAG_WEIGHT
}

/// Number of wanted entries that are a case-insensitive substring of any field
///
/// Blank entries never match.
fn count_matches(wanted: &[String], lowered_fields: &[String]) -> usize {
    wanted
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .filter(|w| lowered_fields.iter().any(|field| field.contains(w.as_str())))
        .count()
}

fn keyword_score(game: &GameRecord, terms: &PromptTerms) -> f64 {
    let description = game.description.to_lowercase();
    let hits = terms
        .keywords
        .iter()
        .filter(|word| description.contains(word.as_str()))
        .count();

    (hits as f64 * KEYWORD_WEIGHT).min(KEYWORD_CAP)
}

/// Scores every game and sorts descending by score
///
/// Each game receives its own jitter draw. The sort is stable so equal
/// scores keep catalog order.
pub fn rank_candidates<'a>(
    catalog: &'a [GameRecord],
    prompt: &str,
    preferences: &Preferences,
    rng: &mut dyn RandomSource,
) -> Vec<ScoredCandidate<'a>> {
    let terms = PromptTerms::new(prompt);

    let mut scored: Vec<ScoredCandidate<'a>> = catalog
        .iter()
        .map(|game| ScoredCandidate {
            game,
            score: score_game(game, &terms, preferences)
                + rng.uniform(-JITTER_BOUND, JITTER_BOUND),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Picks up to `max_results` games for a prompt
///
/// A blank prompt skips scoring and samples from the hidden gems (or the
/// whole catalog when there are none). Otherwise games are ranked by
/// composite score. Missing preferences behave like empty ones.
pub fn select_top_games(
    catalog: &[GameRecord],
    prompt: &str,
    preferences: Option<&Preferences>,
    max_results: usize,
    rng: &mut dyn RandomSource,
) -> Vec<GameRecord> {
    if catalog.is_empty() || max_results == 0 {
        return Vec::new();
    }

    if prompt.trim().is_empty() {
        return sample_hidden_gems(catalog, max_results, rng);
    }

    let empty = Preferences::default();
    let preferences = preferences.unwrap_or(&empty);

    let ranked = rank_candidates(catalog, prompt, preferences, rng);

    tracing::debug!(
        candidates = ranked.len(),
        top_score = ranked.first().map(|c| c.score),
        "Ranked catalog"
    );

    ranked
        .into_iter()
        .take(max_results)
        .map(|candidate| candidate.game.clone())
        .collect()
}

fn sample_hidden_gems(
    catalog: &[GameRecord],
    max_results: usize,
    rng: &mut dyn RandomSource,
) -> Vec<GameRecord> {
    let gems: Vec<&GameRecord> = catalog.iter().filter(|g| g.hidden_gem).collect();
    let pool: Vec<&GameRecord> = if gems.is_empty() {
        catalog.iter().collect()
    } else {
        gems
    };

    tracing::debug!(pool = pool.len(), "Empty prompt, sampling catalog");

    rng.sample_indices(pool.len(), max_results)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}
