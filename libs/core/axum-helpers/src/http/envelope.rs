use axum::{
    body::Body,
    extract::{OriginalUri, Request},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::{ErrorCode, ErrorResponse, messages};

/// Stamps the request path on error envelopes.
///
/// Handlers and extractors render [`ErrorResponse`] without knowing the
/// path; the envelope travels in the response extensions and is re-encoded
/// here with `path` set. The router's bare 405 for a known path with an
/// unsupported method gets an envelope too. Other responses pass through
/// untouched.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;

    let envelope = match response.extensions().get::<ErrorResponse>() {
        Some(envelope) => envelope.clone(),
        None if response.status() == StatusCode::METHOD_NOT_ALLOWED => {
            let code = ErrorCode::MethodNotAllowed;
            tracing::info!(error_code = code.code(), %path, "Method not allowed");
            ErrorResponse::new(code.status(), messages::METHOD_NOT_ALLOWED)
        }
        None => return response,
    };

    let envelope = envelope.with_path(path);
    let body = match serde_json::to_vec(&envelope) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Failed to encode error envelope: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.extensions.insert(envelope);

    Response::from_parts(parts, Body::from(body))
}
