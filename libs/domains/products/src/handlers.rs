use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use resource::RecordStore;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::ProductsService;
use crate::entity;
use crate::models::{CreateProduct, PatchProduct, ProductView, UpdateProduct};

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        patch_product,
        delete_product,
    ),
    components(
        schemas(ProductView, CreateProduct, UpdateProduct, PatchProduct),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<S> = Arc<ProductsService<S>>;

/// Product routes, to be nested under `/products`
pub fn router<S: RecordStore<entity::Model> + 'static>(service: ProductsService<S>) -> Router {
    Router::new()
        .route("/", get(list_products::<S>).post(create_product::<S>))
        .route(
            "/{id}",
            get(get_product::<S>)
                .put(update_product::<S>)
                .patch(patch_product::<S>)
                .delete(delete_product::<S>),
        )
        .with_state(Arc::new(service))
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All products", body = Vec<ProductView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<ProductView>>, AppError> {
    Ok(Json(service.find_all().await?))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    IdPath(id): IdPath,
) -> Result<Json<ProductView>, AppError> {
    Ok(Json(service.find_one(id).await?))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product replaced", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<ProductView>, AppError> {
    Ok(Json(service.update(id, input).await?))
}

/// Change some fields of a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = PatchProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_product<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<PatchProduct>,
) -> Result<Json<ProductView>, AppError> {
    Ok(Json(service.partial_update(id, input).await?))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
