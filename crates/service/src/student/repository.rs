use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use models::{course, enrollment, student};

use crate::domain::{AuditInfo, EntityRef, Student, StudentInput};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::query;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_all(&self, page: Option<&PageRequest>) -> Result<Vec<Student>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, ServiceError>;
    async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Student>, ServiceError>;
    async fn insert(&self, input: &StudentInput, audit: AuditInfo) -> Result<Student, ServiceError>;
    /// Overwrite every editable field; `None` when the row is gone.
    async fn replace(&self, id: i32, input: &StudentInput, audit: AuditInfo) -> Result<Option<Student>, ServiceError>;
    /// Remove the student and its enrollments; `false` when nothing matched.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    /// Single insert that ignores an existing pair; `true` when a row was added.
    async fn enroll(&self, student_id: i32, course_id: i32) -> Result<bool, ServiceError>;
    async fn unenroll(&self, student_id: i32, course_id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn hydrate(&self, rows: Vec<student::Model>) -> Result<Vec<Student>, ServiceError> {
        let courses = rows.load_many_to_many(course::Entity, enrollment::Entity, &self.db).await?;
        Ok(rows
            .into_iter()
            .zip(courses)
            .map(|(s, cs)| {
                let mut courses: Vec<EntityRef> = cs.into_iter().map(|c| EntityRef { id: c.id, name: c.name }).collect();
                courses.sort_by_key(|c| c.id);
                Student { id: s.id, name: s.name, courses, audit: AuditInfo::from_columns(s.created_at, s.updated_at) }
            })
            .collect())
    }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_all(&self, page: Option<&PageRequest>) -> Result<Vec<Student>, ServiceError> {
        let rows = match page {
            Some(p) => {
                query::sorted(student::Entity::find(), &p.sort, student::sortable, student::Column::Id)?
                    .paginate(&self.db, p.size)
                    .fetch_page(p.page)
                    .await?
            }
            None => student::Entity::find().order_by_asc(student::Column::Id).all(&self.db).await?,
        };
        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, ServiceError> {
        let Some(row) = student::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Student>, ServiceError> {
        let rows = student::Entity::find()
            .filter(query::name_contains(student::Column::Name, fragment))
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await?;
        self.hydrate(rows).await
    }

    async fn insert(&self, input: &StudentInput, audit: AuditInfo) -> Result<Student, ServiceError> {
        let am = student::ActiveModel {
            name: Set(input.name.clone()),
            created_at: Set(audit.created_at.into()),
            updated_at: Set(audit.updated_at.into()),
            ..Default::default()
        };
        let m = am.insert(&self.db).await?;
        Ok(Student { id: m.id, name: m.name, courses: Vec::new(), audit: AuditInfo::from_columns(m.created_at, m.updated_at) })
    }

    async fn replace(&self, id: i32, input: &StudentInput, audit: AuditInfo) -> Result<Option<Student>, ServiceError> {
        let Some(found) = student::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        let mut am: student::ActiveModel = found.into();
        am.name = Set(input.name.clone());
        am.created_at = Set(audit.created_at.into());
        am.updated_at = Set(audit.updated_at.into());
        let updated = am.update(&self.db).await?;
        Ok(self.hydrate(vec![updated]).await?.pop())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        enrollment::Entity::delete_many()
            .filter(enrollment::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        let res = student::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    async fn enroll(&self, student_id: i32, course_id: i32) -> Result<bool, ServiceError> {
        let am = enrollment::ActiveModel { student_id: Set(student_id), course_id: Set(course_id) };
        let res = enrollment::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([enrollment::Column::StudentId, enrollment::Column::CourseId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;
        match res {
            Ok(rows) => Ok(rows > 0),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn unenroll(&self, student_id: i32, course_id: i32) -> Result<bool, ServiceError> {
        let res = enrollment::Entity::delete_by_id((student_id, course_id)).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
