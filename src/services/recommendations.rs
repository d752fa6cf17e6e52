use std::time::Instant;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{RecommendRequest, RecommendResponse},
    services::{
        explanations::explain_matches, matcher::select_top_games,
        preferences::extract_preferences, providers::TextGenerator, random::RandomSource,
    },
};

/// Generates game recommendations for a free-text prompt
///
/// Runs the full pipeline in order:
/// 1. Validate the request
/// 2. Infer preferences (degrades to empty on any failure)
/// 3. Rank the catalog and take the shortlist
/// 4. Explain the shortlist (failure fails the request)
pub async fn recommend(
    generator: &dyn TextGenerator,
    catalog: &Catalog,
    request: RecommendRequest,
    rng: &mut (dyn RandomSource + Send),
) -> AppResult<RecommendResponse> {
    let start = Instant::now();

    let max_results = usize::try_from(request.max_results).map_err(|_| {
        AppError::InvalidInput(format!(
            "max_results must be zero or positive, got {}",
            request.max_results
        ))
    })?;

    let preferences = extract_preferences(generator, &request.prompt).await;

    tracing::info!(
        prompt_chars = request.prompt.len(),
        preferred_genres = preferences.preferred_genres.len(),
        style_tags = preferences.style_tags.len(),
        avoid_tags = preferences.avoid_tags.len(),
        "Preferences resolved"
    );

    let results = select_top_games(
        catalog.games(),
        &request.prompt,
        Some(&preferences),
        max_results,
        rng,
    );

    let explanations_raw = explain_matches(generator, &request.prompt, &results).await?;

    tracing::info!(
        requested = max_results,
        returned = results.len(),
        catalog = catalog.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Recommendations generated"
    );

    Ok(RecommendResponse {
        prompt: request.prompt,
        preferences,
        results,
        explanations_raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameRecord;
    use crate::services::providers::MockTextGenerator;
    use crate::services::random::{FixedSource, RngSource};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            GameRecord::new("Stardew Clone", "cozy farming sim")
                .with_genres(["Simulation"])
                .with_tags(["relaxing", "farming"])
                .with_popularity(20.0)
                .hidden_gem(true),
            GameRecord::new("Doom Again", "fast loud demon shooter")
                .with_genres(["Shooter"])
                .with_tags(["gore"])
                .with_popularity(95.0),
            GameRecord::new("Tiny Garden", "grow plants")
                .with_genres(["Puzzle"])
                .with_tags(["cute"])
                .hidden_gem(true),
        ])
    }

    fn request(prompt: &str, max_results: i64) -> RecommendRequest {
        RecommendRequest {
            prompt: prompt.to_string(),
            max_results,
        }
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let mut generator = MockTextGenerator::new();
        generator.expect_name().return_const("mock");
        generator
            .expect_generate()
            .withf(|p| p.system.contains("preference parser"))
            .times(1)
            .returning(|_| {
                Ok(r#"{"preferred_genres": ["Simulation"], "style_tags": ["relaxing"], "avoid_tags": ["gore"]}"#.to_string())
            });
        generator
            .expect_generate()
            .withf(|p| p.system.contains("game recommender"))
            .times(1)
            .returning(|_| Ok("1. Stardew Clone is cozy.".to_string()));

        let response = recommend(
            &generator,
            &catalog(),
            request("cozy relaxing farm", 1),
            &mut FixedSource::zero(),
        )
        .await
        .unwrap();

        assert_eq!(response.prompt, "cozy relaxing farm");
        assert_eq!(response.preferences.avoid_tags, vec!["gore"]);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, "Stardew Clone");
        assert_eq!(response.explanations_raw, "1. Stardew Clone is cozy.");
    }

    #[tokio::test]
    async fn test_negative_max_results_rejected_before_any_call() {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let result = recommend(&generator, &catalog(), request("cozy", -1), &mut FixedSource::zero()).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_zero_max_results_is_empty() {
        let mut generator = MockTextGenerator::new();
        generator.expect_name().return_const("mock");
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Ok("{}".to_string()));

        let response = recommend(&generator, &catalog(), request("cozy", 0), &mut FixedSource::zero())
            .await
            .unwrap();

        assert!(response.results.is_empty());
        assert!(response.explanations_raw.is_empty());
    }

    #[tokio::test]
    async fn test_empty_prompt_only_explains() {
        let mut generator = MockTextGenerator::new();
        generator.expect_name().return_const("mock");
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Ok("1. A hidden gem.".to_string()));

        let response = recommend(&generator, &catalog(), request("", 5), &mut RngSource::seeded(3))
            .await
            .unwrap();

        assert_eq!(response.results.len(), 2);
        assert!(response.results.iter().all(|g| g.hidden_gem));
        assert!(response.preferences.is_empty());
    }

    #[tokio::test]
    async fn test_explanation_failure_fails_request() {
        let mut generator = MockTextGenerator::new();
        generator.expect_name().return_const("mock");
        generator
            .expect_generate()
            .withf(|p| p.system.contains("preference parser"))
            .returning(|_| Ok("{}".to_string()));
        generator
            .expect_generate()
            .withf(|p| p.system.contains("game recommender"))
            .returning(|_| Err(AppError::ExternalApi("timeout".into())));

        let result = recommend(&generator, &catalog(), request("cozy", 2), &mut FixedSource::zero()).await;
        assert!(matches!(result, Err(AppError::ServiceUnavailable(_))));
    }
}
