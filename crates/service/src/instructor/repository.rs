use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use models::{course, instructor};

use crate::domain::{AuditInfo, EntityRef, Instructor, InstructorInput};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::query;

#[async_trait]
pub trait InstructorRepository: Send + Sync {
    async fn find_all(&self, page: Option<&PageRequest>) -> Result<Vec<Instructor>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Instructor>, ServiceError>;
    async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Instructor>, ServiceError>;
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn insert(&self, input: &InstructorInput, audit: AuditInfo) -> Result<Instructor, ServiceError>;
    async fn replace(&self, id: i32, input: &InstructorInput, audit: AuditInfo) -> Result<Option<Instructor>, ServiceError>;
    /// Remove the instructor, detaching the courses it taught.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmInstructorRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmInstructorRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn hydrate(&self, rows: Vec<instructor::Model>) -> Result<Vec<Instructor>, ServiceError> {
        let courses = rows.load_many(course::Entity, &self.db).await?;
        Ok(rows
            .into_iter()
            .zip(courses)
            .map(|(i, cs)| {
                let mut courses: Vec<EntityRef> = cs.into_iter().map(|c| EntityRef { id: c.id, name: c.name }).collect();
                courses.sort_by_key(|c| c.id);
                Instructor { id: i.id, name: i.name, courses, audit: AuditInfo::from_columns(i.created_at, i.updated_at) }
            })
            .collect())
    }
}

#[async_trait]
impl InstructorRepository for SeaOrmInstructorRepository {
    async fn find_all(&self, page: Option<&PageRequest>) -> Result<Vec<Instructor>, ServiceError> {
        let rows = match page {
            Some(p) => {
                query::sorted(instructor::Entity::find(), &p.sort, instructor::sortable, instructor::Column::Id)?
                    .paginate(&self.db, p.size)
                    .fetch_page(p.page)
                    .await?
            }
            None => instructor::Entity::find().order_by_asc(instructor::Column::Id).all(&self.db).await?,
        };
        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Instructor>, ServiceError> {
        let Some(row) = instructor::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Instructor>, ServiceError> {
        let rows = instructor::Entity::find()
            .filter(query::name_contains(instructor::Column::Name, fragment))
            .order_by_asc(instructor::Column::Id)
            .all(&self.db)
            .await?;
        self.hydrate(rows).await
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(instructor::Entity::find_by_id(id).count(&self.db).await? > 0)
    }

    async fn insert(&self, input: &InstructorInput, audit: AuditInfo) -> Result<Instructor, ServiceError> {
        let am = instructor::ActiveModel {
            name: Set(input.name.clone()),
            created_at: Set(audit.created_at.into()),
            updated_at: Set(audit.updated_at.into()),
            ..Default::default()
        };
        let m = am.insert(&self.db).await?;
        Ok(Instructor { id: m.id, name: m.name, courses: Vec::new(), audit: AuditInfo::from_columns(m.created_at, m.updated_at) })
    }

    async fn replace(&self, id: i32, input: &InstructorInput, audit: AuditInfo) -> Result<Option<Instructor>, ServiceError> {
        let Some(found) = instructor::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        let mut am: instructor::ActiveModel = found.into();
        am.name = Set(input.name.clone());
        am.created_at = Set(audit.created_at.into());
        am.updated_at = Set(audit.updated_at.into());
        let updated = am.update(&self.db).await?;
        Ok(self.hydrate(vec![updated]).await?.pop())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        course::Entity::update_many()
            .col_expr(course::Column::InstructorId, Expr::value(Option::<i32>::None))
            .filter(course::Column::InstructorId.eq(id))
            .exec(&txn)
            .await?;
        let res = instructor::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
