//! Business view of the school records returned by the services.
//!
//! Rows from `models` are hydrated with their relations and carry their
//! audit timestamps as a composed [`AuditInfo`].

use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

pub use models::views::CourseStudentCount;

/// Creation and last-modification instants of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuditInfo {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuditInfo {
    /// Audit info for a record created at `now`.
    pub fn stamped(now: DateTime<Utc>) -> Self { Self { created_at: now, updated_at: now } }

    /// Same creation time, modified at `now`.
    pub fn touched(self, now: DateTime<Utc>) -> Self { Self { updated_at: now, ..self } }

    pub(crate) fn from_columns(created_at: DateTimeWithTimeZone, updated_at: DateTimeWithTimeZone) -> Self {
        Self { created_at: created_at.with_timezone(&Utc), updated_at: updated_at.with_timezone(&Utc) }
    }
}

/// Id and name of a related record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EntityRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Student {
    pub id: i32,
    pub name: String,
    /// Courses the student is enrolled in, by id.
    pub courses: Vec<EntityRef>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub instructor: Option<EntityRef>,
    pub students: Vec<EntityRef>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Instructor {
    pub id: i32,
    pub name: String,
    pub courses: Vec<EntityRef>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Role {
    pub id: i32,
    pub name: String,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

/// Editable student fields; an update replaces all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentInput {
    pub name: String,
}

/// Editable course fields. Leaving `instructor_id` out of an update clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CourseInput {
    pub name: String,
    #[serde(default)]
    pub instructor_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InstructorInput {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoleInput {
    pub name: String,
}
