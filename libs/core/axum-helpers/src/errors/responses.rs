//! Reusable OpenAPI responses describing the error envelope.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "timestamp": "2025-01-04T10:15:30.123Z",
        "status": 400,
        "error": "Bad Request",
        "message": "Request validation failed",
        "path": "/api/products",
        "details": {
            "name": "name must be at least 3 characters long",
            "price": "price must not be negative"
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "timestamp": "2025-01-04T10:15:30.123Z",
        "status": 404,
        "error": "Not Found",
        "message": "Product with id 42 not found",
        "path": "/api/products/42"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Unique field already taken",
    content_type = "application/json",
    example = json!({
        "timestamp": "2025-01-04T10:15:30.123Z",
        "status": 409,
        "error": "Conflict",
        "message": "Product with name 'Desk Lamp' already exists",
        "path": "/api/products"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "timestamp": "2025-01-04T10:15:30.123Z",
        "status": 500,
        "error": "Internal Server Error",
        "message": "An internal server error occurred",
        "path": "/api/products"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
