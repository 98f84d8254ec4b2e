//! Health check handler

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Liveness check
///
/// Always returns 200 OK while the process is serving requests.
pub async fn health(State(config): State<Arc<Config>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: config.service.name.clone(),
        version: Some(crate::VERSION.to_string()),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let app = Router::new()
            .route("/health", get(health))
            .with_state(Arc::new(Config::default()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, "pets-service");
        assert_eq!(body.version.as_deref(), Some(env!("CARGO_PKG_VERSION")));
    }
}
