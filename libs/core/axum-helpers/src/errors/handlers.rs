use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse, messages};

/// Router fallback rendering a 404 envelope
pub async fn not_found(uri: Uri) -> Response {
    tracing::info!(
        error_code = ErrorCode::RouteNotFound.code(),
        path = %uri.path(),
        "No route matched"
    );

    ErrorResponse::new(ErrorCode::RouteNotFound.status(), messages::ROUTE_NOT_FOUND)
        .with_path(uri.path())
        .into_response()
}
