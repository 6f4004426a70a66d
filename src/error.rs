use crate::brokerage::carriers::RegistryError;
use crate::brokerage::loads::DatasetError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Startup and command-line failures.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Dataset(DatasetError),
    Registry(RegistryError),
    Service(ServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Dataset(err) => write!(f, "dataset error: {}", err),
            AppError::Registry(err) => write!(f, "carrier registry error: {}", err),
            AppError::Service(err) => write!(f, "{}", err.detail()),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Dataset(err) => Some(err),
            AppError::Registry(err) => Some(err),
            AppError::Service(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<DatasetError> for AppError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value)
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<ServiceError> for AppError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

/// Request-level failure reported to API callers.
///
/// `NotFound` and `InvalidInput` are expected client conditions. `Internal`
/// keeps its detail for the log and answers with the public `context` only.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: String },
    #[error("{0}")]
    InvalidInput(String),
    #[error("{context}")]
    Internal {
        context: &'static str,
        detail: String,
    },
}

impl ServiceError {
    pub fn internal(context: &'static str, detail: impl fmt::Display) -> Self {
        Self::Internal {
            context,
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Full description for operators; never sent to API callers.
    pub fn detail(&self) -> String {
        match self {
            ServiceError::NotFound { resource, id } => format!("{resource} '{id}' not found"),
            ServiceError::InvalidInput(message) => message.clone(),
            ServiceError::Internal { context, detail } => format!("{context}: {detail}"),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ServiceError::Internal { context, detail } = &self {
            tracing::error!(%context, %detail, "request failed");
        }

        let body = Json(json!({ "success": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn not_found_maps_to_404_envelope() {
        let response = ServiceError::NotFound {
            resource: "Load",
            id: "L999".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = read_json(response).await;
        assert_eq!(payload["success"], false);
        assert_eq!(payload["error"], "Load not found");
    }

    #[tokio::test]
    async fn internal_hides_detail_from_callers() {
        let err = ServiceError::internal("Failed to verify carrier", "connection reset by peer");
        assert!(err.detail().contains("connection reset"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = read_json(response).await;
        assert_eq!(payload["error"], "Failed to verify carrier");
        assert!(!payload.to_string().contains("connection reset"));
    }

    #[test]
    fn invalid_input_is_bad_request() {
        let err = ServiceError::InvalidInput("MC number is required".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "MC number is required");
    }
}
