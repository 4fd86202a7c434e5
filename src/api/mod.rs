// HTTP API
// axum router, middleware stack and server lifecycle

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::services::AppConfig;

/// Build the router. Layers run bottom-up: trace, log, request id, CORS, timeout.
pub fn build_router(state: Arc<AppState>) -> Router {
    let server = &state.config.server;
    let cors = if server.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(routes::api_info))
        .route("/health", get(routes::health))
        .route("/humanize", post(routes::humanize_text))
        .route("/classify", post(routes::classify_text))
        .route("/analyze", post(routes::analyze))
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(server.max_body_kb * 1024))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.timeout_secs),
        ))
        .layer(cors)
        .layer(from_fn(middleware::request_id))
        .layer(from_fn(middleware::log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}

/// Bind and serve until Ctrl+C / SIGTERM.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.server.bind_addr();
    info!(
        "CORS: {}, timeout: {}s, max body: {}KB",
        config.server.enable_cors,
        config.server.timeout_secs,
        config.server.max_body_kb
    );
    let state = Arc::new(AppState::new(config));
    info!(
        "Classifier endpoint: {} (token {})",
        state.classifier.endpoint(),
        if state.classifier.is_configured() { "set" } else { "missing" }
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Humanizer API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(config: AppConfig) -> Router {
        build_router(Arc::new(AppState::new(config)))
    }

    fn offline_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.classifier.api_key = None;
        config
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value, Option<String>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let request_id = response
            .headers()
            .get(middleware::REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json, request_id)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body, request_id) = send(app(offline_config()), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"status": "ok"}));
        assert!(request_id.is_some());
    }

    #[tokio::test]
    async fn test_humanize_scenario() {
        let body = serde_json::json!({
            "text": "Recent studies (Smith et al., 2020) show promising results. It can't be ignored.",
            "p_syn": 0.3,
            "p_trans": 0.2,
            "preserve_linebreaks": true,
            "seed": 7
        });
        let (status, json, _) = send(app(offline_config()), "POST", "/humanize", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let text = json["humanized_text"].as_str().unwrap();
        assert!(text.contains("(Smith et al., 2020)"));
        assert!(text.contains("cannot"));
        assert_eq!(json["orig_word_count"], 11);
        assert_eq!(json["orig_sentence_count"], 2);
        for key in ["new_word_count", "new_sentence_count", "words_added", "sentences_added"] {
            assert!(json[key].is_number(), "{}", key);
        }
    }

    #[tokio::test]
    async fn test_humanize_seed_is_reproducible() {
        let body = serde_json::json!({
            "text": "Many researchers use simple methods. The results are clear.",
            "p_syn": 0.8,
            "p_trans": 0.8,
            "seed": 1234
        });
        let (_, a, _) = send(app(offline_config()), "POST", "/humanize", Some(body.clone())).await;
        let (_, b, _) = send(app(offline_config()), "POST", "/humanize", Some(body)).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_humanize_uses_configured_defaults() {
        let mut config = offline_config();
        config.humanize.p_syn = 0.0;
        config.humanize.p_trans = 0.0;
        config.humanize.preserve_linebreaks = false;
        let body = serde_json::json!({"text": "One line.\nTwo line.", "p_syn": null});
        let (status, json, _) = send(app(config), "POST", "/humanize", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["humanized_text"], "One line. Two line.");
    }

    #[tokio::test]
    async fn test_humanize_empty_text_is_400() {
        let (status, json, _) = send(
            app(offline_config()),
            "POST",
            "/humanize",
            Some(serde_json::json!({"text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"detail": "text must be a non-empty string"}));
    }

    #[tokio::test]
    async fn test_humanize_bad_probability_is_422() {
        let (status, json, _) = send(
            app(offline_config()),
            "POST",
            "/humanize",
            Some(serde_json::json!({"text": "Hello there.", "p_syn": 1.5})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["detail"].as_str().unwrap().contains("p_syn"));
    }

    #[tokio::test]
    async fn test_humanize_missing_text_is_rejected() {
        let (status, json, _) = send(
            app(offline_config()),
            "POST",
            "/humanize",
            Some(serde_json::json!({"p_syn": 0.1})),
        )
        .await;
        assert!(status.is_client_error());
        assert!(json["detail"].is_string());
    }

    #[tokio::test]
    async fn test_classify_without_token_is_503() {
        let (status, json, _) = send(
            app(offline_config()),
            "POST",
            "/classify",
            Some(serde_json::json!({"text": "Some text."})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(json["detail"].is_string());

        let (status, _, _) = send(
            app(offline_config()),
            "POST",
            "/analyze",
            Some(serde_json::json!({"text": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, json, _) = send(app(offline_config()), "GET", "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["detail"], "Not Found");
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let request = Request::builder()
            .uri("/health")
            .header(middleware::REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = app(offline_config()).oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(middleware::REQUEST_ID_HEADER).unwrap(),
            "abc-123"
        );
    }
}
