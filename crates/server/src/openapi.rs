use utoipa::OpenApi;
use utoipa::ToSchema;

use service::domain::{
    AuditInfo, Course, CourseInput, CourseStudentCount, EntityRef, Instructor, InstructorInput, Role, RoleInput,
    Student, StudentInput,
};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list_paged,
        crate::routes::students::list_all,
        crate::routes::students::get_one,
        crate::routes::students::name_like,
        crate::routes::students::create,
        crate::routes::students::update,
        crate::routes::students::remove,
        crate::routes::students::enroll,
        crate::routes::students::unenroll,
        crate::routes::courses::list_paged,
        crate::routes::courses::list_all,
        crate::routes::courses::get_one,
        crate::routes::courses::name_like,
        crate::routes::courses::create,
        crate::routes::courses::update,
        crate::routes::courses::student_counts,
        crate::routes::courses::remove,
        crate::routes::instructors::list_paged,
        crate::routes::instructors::list_all,
        crate::routes::instructors::get_one,
        crate::routes::instructors::name_like,
        crate::routes::instructors::create,
        crate::routes::instructors::update,
        crate::routes::instructors::remove,
        crate::routes::roles::list_all,
        crate::routes::roles::get_one,
        crate::routes::roles::create,
        crate::routes::roles::remove,
    ),
    components(
        schemas(
            HealthResponse,
            AuditInfo,
            EntityRef,
            Student,
            StudentInput,
            Course,
            CourseInput,
            CourseStudentCount,
            Instructor,
            InstructorInput,
            Role,
            RoleInput,
            crate::errors::ErrorDetail,
        )
    ),
    tags(
        (name = "health"),
        (name = "students"),
        (name = "courses"),
        (name = "instructors"),
        (name = "roles")
    )
)]
pub struct ApiDoc;
