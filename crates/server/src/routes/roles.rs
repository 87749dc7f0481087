use axum::extract::{OriginalUri, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use service::domain::{Role, RoleInput};

use crate::errors::ApiError;
use crate::extract::{IdPath, JsonBody};
use crate::routes::created;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(list_all))
        .route("/role", post(create))
        .route("/role/:id", get(get_one).delete(remove))
}

#[utoipa::path(
    get, path = "/roles/roles", tag = "roles",
    responses((status = 200, description = "Every role", body = [Role]))
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Role>>, ApiError> {
    Ok(Json(state.services.roles.find_all().await?))
}

#[utoipa::path(
    get, path = "/roles/role/{id}", tag = "roles",
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Found", body = Role),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn get_one(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> Result<Json<Role>, ApiError> {
    Ok(Json(state.services.roles.find_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/roles/role", tag = "roles",
    request_body = RoleInput,
    responses(
        (status = 201, description = "Created", body = Role),
        (status = 400, description = "Blank or duplicate name", body = crate::errors::ErrorDetail)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<RoleInput>,
) -> Result<Response, ApiError> {
    let role = state.services.roles.save(input).await?;
    Ok(created(&uri, role.id, role))
}

#[utoipa::path(
    delete, path = "/roles/role/{id}", tag = "roles",
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn remove(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> Result<(), ApiError> {
    state.services.roles.delete(id).await?;
    Ok(())
}
