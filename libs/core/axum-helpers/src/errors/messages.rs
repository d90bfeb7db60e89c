//! Fixed client-facing messages

pub const VALIDATION_FAILED: &str = "Request validation failed";
pub const INTERNAL_ERROR: &str = "An internal server error occurred";
pub const ROUTE_NOT_FOUND: &str = "The requested resource was not found";
pub const METHOD_NOT_ALLOWED: &str = "The requested method is not supported for this resource";
