//! HTTP façade for the audit service
//!
//! JSON API with two routes: `POST /analyze` runs one audit, `GET /health`
//! reports liveness plus whether the auditor has an LLM credential. Unknown
//! routes get a JSON 404. The server owns no state beyond a shared
//! [`AuditService`], so concurrent requests need no coordination.

use crate::audit::service::{AuditRequest, AuditService, ServiceError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Request body for `POST /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    code: String,

    #[serde(default = "default_platform")]
    platform: String,

    #[serde(default = "default_language")]
    language: String,

    /// The natural-language prompt that produced the code, if known.
    #[serde(default)]
    prompt: Option<String>,
}

fn default_platform() -> String {
    "unknown".to_string()
}

fn default_language() -> String {
    "python".to_string()
}

/// Builds the application router.
pub fn router(service: Arc<AuditService>) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(service)
}

/// Binds the listener and serves until ctrl-c.
pub async fn serve(service: Arc<AuditService>, port: u16) -> anyhow::Result<()> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!("listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

async fn analyze(
    State(service): State<Arc<AuditService>>,
    Json(body): Json<AnalyzeBody>,
) -> Response {
    let mut request = AuditRequest::new(body.code, body.platform).with_language(body.language);
    if let Some(prompt) = body.prompt {
        request = request.with_original_prompt(prompt);
    }

    match service.analyze(request).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(e),
    }
}

async fn health(State(service): State<Arc<AuditService>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "auditor_available": service.is_configured(),
    }))
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
        .into_response()
}

fn error_response(err: ServiceError) -> Response {
    let status = match err {
        ServiceError::EmptyCode => StatusCode::BAD_REQUEST,
        ServiceError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_defaults() {
        let body: AnalyzeBody = serde_json::from_str(r#"{"code": "x = 1"}"#).unwrap();
        assert_eq!(body.code, "x = 1");
        assert_eq!(body.platform, "unknown");
        assert_eq!(body.language, "python");
        assert!(body.prompt.is_none());
    }

    #[test]
    fn test_body_full() {
        let body: AnalyzeBody = serde_json::from_str(
            r#"{"code": "x", "platform": "cursor", "language": "rust", "prompt": "a counter"}"#,
        )
        .unwrap();
        assert_eq!(body.platform, "cursor");
        assert_eq!(body.language, "rust");
        assert_eq!(body.prompt.as_deref(), Some("a counter"));
    }

    #[test]
    fn test_error_status_mapping() {
        let response = error_response(ServiceError::EmptyCode);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_response(ServiceError::NotConfigured);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
