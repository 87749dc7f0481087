use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use models::role;

use crate::domain::{AuditInfo, Role, RoleInput};
use crate::errors::ServiceError;
use crate::role::repository::RoleRepository;

pub struct RoleService {
    repo: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(repo: Arc<dyn RoleRepository>) -> Self { Self { repo } }

    pub async fn find_all(&self) -> Result<Vec<Role>, ServiceError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Role, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("role", id))
    }

    /// Role names are unique.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn save(&self, input: RoleInput) -> Result<Role, ServiceError> {
        role::validate_name(&input.name)?;
        if self.repo.find_by_name(&input.name).await?.is_some() {
            return Err(ServiceError::Validation(format!("role '{}' already exists", input.name)));
        }
        let created = self.repo.insert(&input, AuditInfo::stamped(Utc::now())).await?;
        info!(id = created.id, "created role");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("role", id));
        }
        info!(id, "deleted role");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_services;

    #[tokio::test]
    async fn role_crud_service() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let admin = svc.roles.save(RoleInput { name: "admin".into() }).await?;
        svc.roles.save(RoleInput { name: "user".into() }).await?;

        assert_eq!(svc.roles.find_by_id(admin.id).await?.name, "admin");
        let names: Vec<String> = svc.roles.find_all().await?.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["admin", "user"]);

        svc.roles.delete(admin.id).await?;
        assert!(matches!(svc.roles.find_by_id(admin.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.roles.delete(admin.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_role_is_rejected() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        svc.roles.save(RoleInput { name: "admin".into() }).await?;
        let err = svc.roles.save(RoleInput { name: "admin".into() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}
