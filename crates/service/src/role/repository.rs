use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use models::role;

use crate::domain::{AuditInfo, Role, RoleInput};
use crate::errors::ServiceError;

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Role>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, ServiceError>;
    async fn insert(&self, input: &RoleInput, audit: AuditInfo) -> Result<Role, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

fn to_domain(m: role::Model) -> Role {
    Role { id: m.id, name: m.name, audit: AuditInfo::from_columns(m.created_at, m.updated_at) }
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmRoleRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn find_all(&self) -> Result<Vec<Role>, ServiceError> {
        let rows = role::Entity::find().order_by_asc(role::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, ServiceError> {
        Ok(role::Entity::find_by_id(id).one(&self.db).await?.map(to_domain))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, ServiceError> {
        let found = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(found.map(to_domain))
    }

    async fn insert(&self, input: &RoleInput, audit: AuditInfo) -> Result<Role, ServiceError> {
        let am = role::ActiveModel {
            name: Set(input.name.clone()),
            created_at: Set(audit.created_at.into()),
            updated_at: Set(audit.updated_at.into()),
            ..Default::default()
        };
        Ok(to_domain(am.insert(&self.db).await?))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = role::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
