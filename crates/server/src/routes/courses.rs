use axum::extract::{OriginalUri, State};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use service::domain::{Course, CourseInput, CourseStudentCount};

use crate::errors::ApiError;
use crate::extract::{IdPath, JsonBody, PageParams, Paging};
use crate::routes::created;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/allcourses", get(list_paged))
        .route("/courses", get(list_all))
        .route("/course", post(create))
        .route("/course/:id", get(get_one).put(update))
        .route("/course/namelike/:name", get(name_like))
        .route("/studcount", get(student_counts))
        .route("/courses/:id", delete(remove))
}

#[utoipa::path(
    get, path = "/courses/allcourses", tag = "courses",
    params(PageParams),
    responses(
        (status = 200, description = "One page of courses", body = [Course]),
        (status = 400, description = "Invalid paging", body = crate::errors::ErrorDetail)
    )
)]
pub async fn list_paged(State(state): State<AppState>, Paging(page): Paging) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.services.courses.find_all(Some(&page)).await?))
}

#[utoipa::path(
    get, path = "/courses/courses", tag = "courses",
    responses((status = 200, description = "Every course", body = [Course]))
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.services.courses.find_all(None).await?))
}

#[utoipa::path(
    get, path = "/courses/course/{id}", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Found", body = Course),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn get_one(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> Result<Json<Course>, ApiError> {
    Ok(Json(state.services.courses.find_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/courses/course/namelike/{name}", tag = "courses",
    params(("name" = String, Path, description = "Substring of the name, any case")),
    responses((status = 200, description = "Matching courses", body = [Course]))
)]
pub async fn name_like(State(state): State<AppState>, IdPath(name): IdPath<String>) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.services.courses.find_by_name_like(&name).await?))
}

#[utoipa::path(
    post, path = "/courses/course", tag = "courses",
    request_body = CourseInput,
    responses(
        (status = 201, description = "Created", body = Course),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail),
        (status = 404, description = "Instructor not found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<CourseInput>,
) -> Result<Response, ApiError> {
    let course = state.services.courses.save(input).await?;
    Ok(created(&uri, course.id, course))
}

#[utoipa::path(
    put, path = "/courses/course/{id}", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    request_body = CourseInput,
    responses(
        (status = 200, description = "Updated", body = Course),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail),
        (status = 404, description = "Course or instructor not found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    JsonBody(input): JsonBody<CourseInput>,
) -> Result<Json<Course>, ApiError> {
    Ok(Json(state.services.courses.update(id, input).await?))
}

#[utoipa::path(
    get, path = "/courses/studcount", tag = "courses",
    responses((status = 200, description = "Enrolled students per course", body = [CourseStudentCount]))
)]
pub async fn student_counts(State(state): State<AppState>) -> Result<Json<Vec<CourseStudentCount>>, ApiError> {
    Ok(Json(state.services.courses.count_students_in_courses().await?))
}

#[utoipa::path(
    delete, path = "/courses/courses/{id}", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn remove(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> Result<(), ApiError> {
    state.services.courses.delete(id).await?;
    Ok(())
}
