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

use crate::UsersService;
use crate::entity;
use crate::models::{CreateUser, PatchUser, UpdateUser, UserView};

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, patch_user, delete_user),
    components(
        schemas(UserView, CreateUser, UpdateUser, PatchUser),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<S> = Arc<UsersService<S>>;

/// User routes, to be nested under `/users`
pub fn router<S: RecordStore<entity::Model> + 'static>(service: UsersService<S>) -> Router {
    Router::new()
        .route("/", get(list_users::<S>).post(create_user::<S>))
        .route(
            "/{id}",
            get(get_user::<S>)
                .put(update_user::<S>)
                .patch(patch_user::<S>)
                .delete(delete_user::<S>),
        )
        .with_state(Arc::new(service))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All users", body = Vec<UserView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<UserView>>, AppError> {
    Ok(Json(service.find_all().await?))
}

/// Register a user
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    IdPath(id): IdPath,
) -> Result<Json<UserView>, AppError> {
    Ok(Json(service.find_one(id).await?))
}

/// Replace a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "User id")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User replaced", body = UserView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> Result<Json<UserView>, AppError> {
    Ok(Json(service.update(id, input).await?))
}

/// Change some fields of a user
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "User id")
    ),
    request_body = PatchUser,
    responses(
        (status = 200, description = "User updated", body = UserView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_user<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<PatchUser>,
) -> Result<Json<UserView>, AppError> {
    Ok(Json(service.partial_update(id, input).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<S: RecordStore<entity::Model>>(
    State(service): State<SharedService<S>>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
