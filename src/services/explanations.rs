use crate::{
    error::{AppError, AppResult},
    models::GameRecord,
    services::providers::{ChatPrompt, TextGenerator},
};

const SYSTEM_PROMPT: &str = "You are a friendly game recommender. \
Explain in 1-2 sentences why each game fits the user's described mood. \
Return a numbered list.";

const TEMPERATURE: f32 = 0.4;

/// One numbered line per game, in shortlist order
pub fn build_games_block(games: &[GameRecord]) -> String {
    games
        .iter()
        .enumerate()
        .map(|(i, g)| {
            format!(
                "{}. {} | Genres: {} | Tags: {} | Description: {}",
                i + 1,
                g.title,
                g.genres.join(", "),
                g.tags.join(", "),
                g.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asks the text generator why each shortlisted game fits the prompt
///
/// An empty shortlist needs no explanation and makes no call. Any failure
/// of the generator is surfaced as `ServiceUnavailable`.
pub async fn explain_matches(
    generator: &dyn TextGenerator,
    prompt: &str,
    games: &[GameRecord],
) -> AppResult<String> {
    if games.is_empty() {
        return Ok(String::new());
    }

    let user = format!(
        "User prompt:\n{}\n\nGames:\n{}\n\nExplain why each game matches.",
        prompt,
        build_games_block(games)
    );

    generator
        .generate(&ChatPrompt::new(SYSTEM_PROMPT, user, TEMPERATURE))
        .await
        .map_err(|e| {
            tracing::error!(
                provider = generator.name(),
                games = games.len(),
                error = %e,
                "Explanation generation failed"
            );
            AppError::ServiceUnavailable(format!("Explanation generation failed: {}", e))
        })
}
