//! HTTP middleware: CORS, security headers and the error envelope.
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, error_envelope, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(error_envelope))
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(&server_config.cors_allowed_origins)?);
//! ```

pub mod cors;
pub mod envelope;
pub mod security;

pub use cors::create_cors_layer;
pub use envelope::error_envelope;
pub use security::security_headers;
