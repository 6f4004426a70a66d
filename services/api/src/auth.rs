use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::infra::BrokerageState;

pub(crate) const API_KEY_HEADER: &str = "x-api-key";

/// Rejects `/api` requests that do not present the configured key. With no
/// key configured every request is rejected.
pub(crate) async fn require_api_key(
    State(state): State<BrokerageState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = presented_key(request.headers());
    let authorized = match (state.api_key.as_deref(), presented) {
        (Some(expected), Some(presented)) => expected == presented,
        _ => false,
    };

    if !authorized {
        warn!(path = %request.uri().path(), "rejected request without a valid API key");
        return unauthorized();
    }

    next.run(request).await
}

fn presented_key(headers: &HeaderMap) -> Option<&str> {
    let from_header = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    let from_bearer = || {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value))
    };

    from_header.or_else(from_bearer).filter(|key| !key.is_empty())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "error": "Unauthorized",
            "message": "Valid API key required",
        })),
    )
        .into_response()
}
