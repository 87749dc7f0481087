use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use models::instructor;

use crate::domain::{AuditInfo, Instructor, InstructorInput};
use crate::errors::ServiceError;
use crate::instructor::repository::InstructorRepository;
use crate::pagination::PageRequest;

pub struct InstructorService {
    repo: Arc<dyn InstructorRepository>,
}

impl InstructorService {
    pub fn new(repo: Arc<dyn InstructorRepository>) -> Self { Self { repo } }

    pub async fn find_all(&self, page: Option<&PageRequest>) -> Result<Vec<Instructor>, ServiceError> {
        self.repo.find_all(page).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Instructor, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("instructor", id))
    }

    pub async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Instructor>, ServiceError> {
        self.repo.find_by_name_like(fragment).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn save(&self, input: InstructorInput) -> Result<Instructor, ServiceError> {
        instructor::validate_name(&input.name)?;
        let created = self.repo.insert(&input, AuditInfo::stamped(Utc::now())).await?;
        info!(id = created.id, "created instructor");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: InstructorInput) -> Result<Instructor, ServiceError> {
        instructor::validate_name(&input.name)?;
        let existing = self.find_by_id(id).await?;
        let updated = self
            .repo
            .replace(id, &input, existing.audit.touched(Utc::now()))
            .await?
            .ok_or_else(|| ServiceError::not_found("instructor", id))?;
        info!(id, "updated instructor");
        Ok(updated)
    }

    /// Courses taught by the instructor stay, without an instructor.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("instructor", id));
        }
        info!(id, "deleted instructor");
        Ok(())
    }
}
