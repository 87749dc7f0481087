//! Courses: repository abstraction and the service built on it.

pub mod repository;
pub mod service;

pub use service::CourseService;
