//! Read-only projections built from aggregate queries.
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// One row per course with the number of enrolled students.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CourseStudentCount {
    pub course_id: i32,
    pub course_name: String,
    pub student_count: i64,
}
