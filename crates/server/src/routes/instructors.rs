use axum::extract::{OriginalUri, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use service::domain::{Instructor, InstructorInput};

use crate::errors::ApiError;
use crate::extract::{IdPath, JsonBody, PageParams, Paging};
use crate::routes::created;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/instructors", get(list_paged))
        .route("/allinstructors", get(list_all))
        .route("/instructor", post(create))
        .route("/instructor/:id", get(get_one).put(update).delete(remove))
        .route("/instructor/namelike/:name", get(name_like))
}

#[utoipa::path(
    get, path = "/instructors/instructors", tag = "instructors",
    params(PageParams),
    responses(
        (status = 200, description = "One page of instructors", body = [Instructor]),
        (status = 400, description = "Invalid paging", body = crate::errors::ErrorDetail)
    )
)]
pub async fn list_paged(State(state): State<AppState>, Paging(page): Paging) -> Result<Json<Vec<Instructor>>, ApiError> {
    Ok(Json(state.services.instructors.find_all(Some(&page)).await?))
}

#[utoipa::path(
    get, path = "/instructors/allinstructors", tag = "instructors",
    responses((status = 200, description = "Every instructor", body = [Instructor]))
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Instructor>>, ApiError> {
    Ok(Json(state.services.instructors.find_all(None).await?))
}

#[utoipa::path(
    get, path = "/instructors/instructor/{id}", tag = "instructors",
    params(("id" = i32, Path, description = "Instructor id")),
    responses(
        (status = 200, description = "Found", body = Instructor),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn get_one(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> Result<Json<Instructor>, ApiError> {
    Ok(Json(state.services.instructors.find_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/instructors/instructor/namelike/{name}", tag = "instructors",
    params(("name" = String, Path, description = "Substring of the name, any case")),
    responses((status = 200, description = "Matching instructors", body = [Instructor]))
)]
pub async fn name_like(State(state): State<AppState>, IdPath(name): IdPath<String>) -> Result<Json<Vec<Instructor>>, ApiError> {
    Ok(Json(state.services.instructors.find_by_name_like(&name).await?))
}

#[utoipa::path(
    post, path = "/instructors/instructor", tag = "instructors",
    request_body = InstructorInput,
    responses(
        (status = 201, description = "Created", body = Instructor),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<InstructorInput>,
) -> Result<Response, ApiError> {
    let instructor = state.services.instructors.save(input).await?;
    Ok(created(&uri, instructor.id, instructor))
}

#[utoipa::path(
    put, path = "/instructors/instructor/{id}", tag = "instructors",
    params(("id" = i32, Path, description = "Instructor id")),
    request_body = InstructorInput,
    responses(
        (status = 200, description = "Updated", body = Instructor),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    JsonBody(input): JsonBody<InstructorInput>,
) -> Result<Json<Instructor>, ApiError> {
    Ok(Json(state.services.instructors.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/instructors/instructor/{id}", tag = "instructors",
    params(("id" = i32, Path, description = "Instructor id")),
    responses(
        (status = 200, description = "Deleted; taught courses lose their instructor"),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn remove(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> Result<(), ApiError> {
    state.services.instructors.delete(id).await?;
    Ok(())
}
