pub mod codes;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use resource::ResourceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

/// Error envelope returned for every failed request.
///
/// ```json
/// {
///   "timestamp": "2025-01-04T10:15:30.123Z",
///   "status": 400,
///   "error": "Bad Request",
///   "message": "Request validation failed",
///   "path": "/api/products",
///   "details": { "name": "name must be at least 3 characters long" }
/// }
/// ```
///
/// `path` is filled in by [`crate::http::error_envelope`]; a response built
/// outside that middleware carries an empty path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// RFC 3339 time the error was produced
    pub timestamp: String,
    /// HTTP status code
    pub status: u16,
    /// Reason phrase of the status, e.g. "Not Found"
    pub error: String,
    pub message: String,
    /// Request path that produced the error
    pub path: String,
    /// Field name to message, present on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
            path: String::new(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: BTreeMap<String, String>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

impl IntoResponse for ErrorResponse {
    /// The envelope also rides along as a response extension so the
    /// envelope middleware can stamp the request path on it.
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.clone())).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Reduce per-field messages to a `field -> message` map.
///
/// Each message is keyed by its first whitespace-delimited token, so
/// messages are expected to start with the field name. A later message for
/// the same field replaces an earlier one.
pub fn validation_details<I, S>(messages: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    messages
        .into_iter()
        .map(Into::into)
        .map(|message| {
            let field = message
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();
            (field, message)
        })
        .collect()
}

/// Application error type rendered as an [`ErrorResponse`]
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Per-field validation messages
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid request body: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::JsonExtractorRejection(_) => ErrorCode::InvalidJson,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }

    /// Build the envelope, logging 4xx at info and 5xx at error.
    ///
    /// Server-side causes are logged and replaced by a generic message.
    pub fn to_error_response(&self) -> ErrorResponse {
        let code = self.code();
        let status = code.status();

        match self {
            AppError::Validation(violations) => {
                tracing::info!(error_code = code.code(), ?violations, "Validation failed");
                ErrorResponse::new(status, messages::VALIDATION_FAILED)
                    .with_details(validation_details(violations.iter().cloned()))
            }
            AppError::JsonExtractorRejection(rejection) => {
                tracing::info!(error_code = code.code(), "Invalid request body: {}", rejection);
                ErrorResponse::new(status, rejection.body_text())
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                ErrorResponse::new(status, msg.clone())
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = code.code(), "Conflict: {}", msg);
                ErrorResponse::new(status, msg.clone())
            }
            AppError::InternalServerError(cause) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", cause);
                ErrorResponse::new(status, messages::INTERNAL_ERROR)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_error_response().into_response()
    }
}

impl From<ResourceError> for AppError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound(msg) => AppError::NotFound(msg),
            ResourceError::Conflict(msg) => AppError::Conflict(msg),
            ResourceError::Validation(messages) => AppError::Validation(messages),
            ResourceError::Internal(cause) => AppError::InternalServerError(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_validation_details_keys_by_first_token() {
        let details = validation_details([
            "name must be at least 3 characters long",
            "price must not be negative",
            "name must not be empty",
        ]);

        assert_eq!(details.len(), 2);
        assert_eq!(details["name"], "name must not be empty");
        assert_eq!(details["price"], "price must not be negative");
    }

    #[tokio::test]
    async fn test_not_found_passes_message_through() {
        let (status, body) =
            render(ResourceError::NotFound("Product with id 9 not found".into()).into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "Product with id 9 not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_conflict_is_409() {
        let (status, body) = render(AppError::Conflict("taken".into())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Conflict");
        assert_eq!(body["message"], "taken");
    }

    #[tokio::test]
    async fn test_validation_renders_details() {
        let (status, body) = render(AppError::Validation(vec![
            "stock must not be negative".into(),
        ]))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "Request validation failed");
        assert_eq!(body["details"]["stock"], "stock must not be negative");
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let (status, body) = render(
            ResourceError::Internal("password authentication failed for user".into()).into(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "An internal server error occurred");
        assert!(!body.to_string().contains("password"));
    }

    #[test]
    fn test_timestamp_is_rfc3339_utc_with_millis() {
        let envelope = ErrorResponse::new(StatusCode::NOT_FOUND, "gone");

        assert!(envelope.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&envelope.timestamp).is_ok());
        assert_eq!(envelope.timestamp.len(), "2025-01-04T10:15:30.123Z".len());
    }

    #[test]
    fn test_envelope_is_attached_as_extension() {
        let response = AppError::NotFound("gone".into()).into_response();
        let envelope = response.extensions().get::<ErrorResponse>().unwrap();

        assert_eq!(envelope.status, 404);
        assert_eq!(envelope.path, "");
    }
}
