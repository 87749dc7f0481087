//! Service layer for the school records.
//! - Repositories own the SeaORM queries and hydrate relations.
//! - Services validate input, stamp audit info and turn misses into `NotFound`.

pub mod errors;
pub mod pagination;
pub mod domain;
mod query;
pub mod student;
pub mod course;
pub mod instructor;
pub mod role;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::course::repository::SeaOrmCourseRepository;
use crate::instructor::repository::SeaOrmInstructorRepository;
use crate::role::repository::SeaOrmRoleRepository;
use crate::student::repository::SeaOrmStudentRepository;

pub use course::CourseService;
pub use instructor::InstructorService;
pub use role::RoleService;
pub use student::StudentService;

/// Every service, wired once at startup.
#[derive(Clone)]
pub struct Services {
    pub students: Arc<StudentService>,
    pub courses: Arc<CourseService>,
    pub instructors: Arc<InstructorService>,
    pub roles: Arc<RoleService>,
}

impl Services {
    /// Wire SeaORM repositories over one shared pool.
    pub fn seaorm(db: DatabaseConnection) -> Self {
        let students = Arc::new(SeaOrmStudentRepository::new(db.clone()));
        let courses = Arc::new(SeaOrmCourseRepository::new(db.clone()));
        let instructors = Arc::new(SeaOrmInstructorRepository::new(db.clone()));
        let roles = Arc::new(SeaOrmRoleRepository::new(db));
        Self {
            students: Arc::new(StudentService::new(students, courses.clone())),
            courses: Arc::new(CourseService::new(courses, instructors.clone())),
            instructors: Arc::new(InstructorService::new(instructors)),
            roles: Arc::new(RoleService::new(roles)),
        }
    }
}
