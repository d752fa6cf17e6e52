use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{RecommendRequest, RecommendResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for the recommendation endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    tracing::info!(
        request_id = %request_id,
        prompt_chars = request.prompt.len(),
        max_results = request.max_results,
        "Processing recommendation request"
    );

    let mut rng = state.random_source();
    let response = recommendations::recommend(
        state.generator.as_ref(),
        &state.catalog,
        request,
        &mut rng,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        results = response.results.len(),
        "Recommendation completed"
    );

    Ok(Json(response))
}
