// HTTP route handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::models::{
    ClassificationResult, ClassifyRequest, HealthResponse, HumanizeRequest, HumanizeResult,
    TextAnalysisResponse,
};
use crate::services::humanize::EMPTY_TEXT_MESSAGE;
use crate::services::{analyze_text, TextClassifier};

pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "Humanizer",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/health", "/humanize", "/classify", "/analyze"]
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// POST /humanize
pub async fn humanize_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<HumanizeRequest>, JsonRejection>,
) -> ApiResult<Json<HumanizeResult>> {
    let Json(request) = payload?;
    let config = request.rewrite_config(&state.config.humanize);
    let humanizer = state.humanizer;
    let seed = request.seed;
    let text = request.text;
    let start = Instant::now();

    // CPU-bound; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || match seed {
        Some(seed) => {
            humanizer.humanize_with_rng(&text, &config, &mut ChaCha8Rng::seed_from_u64(seed))
        }
        None => humanizer.humanize(&text, &config),
    })
    .await
    .map_err(|e| ApiError::Internal(format!("humanize task failed: {}", e)))??;

    info!(
        "[API] humanize: words {} -> {}, sentences {} -> {} in {}ms",
        result.orig_word_count,
        result.new_word_count,
        result.orig_sentence_count,
        result.new_sentence_count,
        start.elapsed().as_millis()
    );

    Ok(Json(result))
}

fn require_text(payload: Result<Json<ClassifyRequest>, JsonRejection>) -> ApiResult<String> {
    let Json(request) = payload?;
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest(EMPTY_TEXT_MESSAGE.to_string()));
    }
    Ok(request.text)
}

/// POST /classify
pub async fn classify_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<Json<ClassificationResult>> {
    let text = require_text(payload)?;
    let result = state.classifier.classify(&text).await?;
    info!("[API] classify: label={} confidence={:.3}", result.label.as_str(), result.confidence());
    Ok(Json(result))
}

/// POST /analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<Json<TextAnalysisResponse>> {
    let text = require_text(payload)?;
    let analysis = analyze_text(&state.classifier, &text).await?;
    Ok(Json(analysis))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
