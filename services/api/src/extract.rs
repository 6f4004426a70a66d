use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use freight_desk::error::ServiceError;
use serde::de::DeserializeOwned;
use tracing::debug;

pub(crate) const INVALID_BODY_MESSAGE: &str = "Request body must be a JSON object with valid fields";

/// JSON body extractor for the `/api` surface.
///
/// An empty body (with or without a content type) yields `T::default()`, so
/// handlers see the same request as an empty object. Anything unreadable or
/// mistyped becomes `ServiceError::InvalidInput` and is answered with the
/// standard error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ApiJson<T>(pub(crate) T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|err| {
            debug!(error = %err, "request body could not be read");
            ServiceError::InvalidInput(INVALID_BODY_MESSAGE.to_string())
        })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&body).map(Self).map_err(|err| {
            debug!(error = %err, "request body rejected");
            ServiceError::InvalidInput(INVALID_BODY_MESSAGE.to_string())
        })
    }
}
