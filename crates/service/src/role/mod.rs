//! Roles: named groups used for authorization.

pub mod repository;
pub mod service;

pub use service::RoleService;
