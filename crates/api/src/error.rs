use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use avatar_speech::api::SpeechApiError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{ "error": ... }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The vendor rejected a call or could not be reached.
    #[error(transparent)]
    Vendor(#[from] SpeechApiError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Vendor detail is passed through verbatim. The speech client
            // already logged the failure.
            AppError::Vendor(err) => {
                tracing::debug!(error = %err, "Responding with vendor failure");
                (StatusCode::INTERNAL_SERVER_ERROR, err.detail())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
