use axum::extract::{OriginalUri, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use service::domain::{Student, StudentInput};

use crate::errors::ApiError;
use crate::extract::{IdPath, JsonBody, PageParams, Paging};
use crate::routes::created;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_paged))
        .route("/allstudents", get(list_all))
        .route("/Student", post(create))
        .route("/Student/:id", get(get_one).put(update).delete(remove))
        .route("/student/namelike/:name", get(name_like))
        .route("/Student/:id/course/:courseid", post(enroll).delete(unenroll))
}

#[utoipa::path(
    get, path = "/students/students", tag = "students",
    params(PageParams),
    responses(
        (status = 200, description = "One page of students", body = [Student]),
        (status = 400, description = "Invalid paging", body = crate::errors::ErrorDetail)
    )
)]
pub async fn list_paged(State(state): State<AppState>, Paging(page): Paging) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(state.services.students.find_all(Some(&page)).await?))
}

#[utoipa::path(
    get, path = "/students/allstudents", tag = "students",
    responses((status = 200, description = "Every student", body = [Student]))
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(state.services.students.find_all(None).await?))
}

#[utoipa::path(
    get, path = "/students/Student/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Found", body = Student),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn get_one(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.services.students.find_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/students/student/namelike/{name}", tag = "students",
    params(("name" = String, Path, description = "Substring of the name, any case")),
    responses((status = 200, description = "Matching students", body = [Student]))
)]
pub async fn name_like(State(state): State<AppState>, IdPath(name): IdPath<String>) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(state.services.students.find_by_name_like(&name).await?))
}

#[utoipa::path(
    post, path = "/students/Student", tag = "students",
    request_body = StudentInput,
    responses(
        (status = 201, description = "Created", body = Student),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<StudentInput>,
) -> Result<Response, ApiError> {
    let student = state.services.students.save(input).await?;
    Ok(created(&uri, student.id, student))
}

#[utoipa::path(
    put, path = "/students/Student/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    request_body = StudentInput,
    responses(
        (status = 200, description = "Updated", body = Student),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    JsonBody(input): JsonBody<StudentInput>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.services.students.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/students/Student/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn remove(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> Result<(), ApiError> {
    state.services.students.delete(id).await?;
    Ok(())
}

#[utoipa::path(
    post, path = "/students/Student/{id}/course/{courseid}", tag = "students",
    params(
        ("id" = i32, Path, description = "Student id"),
        ("courseid" = i32, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Enrolled", body = Student),
        (status = 404, description = "Student or course not found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    IdPath((id, course_id)): IdPath<(i32, i32)>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.services.students.enroll(id, course_id).await?))
}

#[utoipa::path(
    delete, path = "/students/Student/{id}/course/{courseid}", tag = "students",
    params(
        ("id" = i32, Path, description = "Student id"),
        ("courseid" = i32, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Unenrolled"),
        (status = 404, description = "Not enrolled", body = crate::errors::ErrorDetail)
    )
)]
pub async fn unenroll(
    State(state): State<AppState>,
    IdPath((id, course_id)): IdPath<(i32, i32)>,
) -> Result<(), ApiError> {
    state.services.students.unenroll(id, course_id).await?;
    Ok(())
}
