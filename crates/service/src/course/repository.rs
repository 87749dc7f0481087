use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use models::{course, enrollment, instructor, student};

use crate::domain::{AuditInfo, Course, CourseInput, CourseStudentCount, EntityRef};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::query;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_all(&self, page: Option<&PageRequest>) -> Result<Vec<Course>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, ServiceError>;
    async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Course>, ServiceError>;
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn insert(&self, input: &CourseInput, audit: AuditInfo) -> Result<Course, ServiceError>;
    /// Overwrite every editable field; `None` when the row is gone.
    async fn replace(&self, id: i32, input: &CourseInput, audit: AuditInfo) -> Result<Option<Course>, ServiceError>;
    /// Remove the course and its enrollments; `false` when nothing matched.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    /// One row per course, courses without students included with a zero count.
    async fn count_students(&self) -> Result<Vec<CourseStudentCount>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCourseRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn hydrate(&self, rows: Vec<course::Model>) -> Result<Vec<Course>, ServiceError> {
        let instructors = rows.load_one(instructor::Entity, &self.db).await?;
        let students = rows.load_many_to_many(student::Entity, enrollment::Entity, &self.db).await?;
        Ok(rows
            .into_iter()
            .zip(instructors)
            .zip(students)
            .map(|((c, i), ss)| {
                let mut students: Vec<EntityRef> = ss.into_iter().map(|s| EntityRef { id: s.id, name: s.name }).collect();
                students.sort_by_key(|s| s.id);
                Course {
                    id: c.id,
                    name: c.name,
                    instructor: i.map(|i| EntityRef { id: i.id, name: i.name }),
                    students,
                    audit: AuditInfo::from_columns(c.created_at, c.updated_at),
                }
            })
            .collect())
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn find_all(&self, page: Option<&PageRequest>) -> Result<Vec<Course>, ServiceError> {
        let rows = match page {
            Some(p) => {
                query::sorted(course::Entity::find(), &p.sort, course::sortable, course::Column::Id)?
                    .paginate(&self.db, p.size)
                    .fetch_page(p.page)
                    .await?
            }
            None => course::Entity::find().order_by_asc(course::Column::Id).all(&self.db).await?,
        };
        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, ServiceError> {
        let Some(row) = course::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Course>, ServiceError> {
        let rows = course::Entity::find()
            .filter(query::name_contains(course::Column::Name, fragment))
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await?;
        self.hydrate(rows).await
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(course::Entity::find_by_id(id).count(&self.db).await? > 0)
    }

    async fn insert(&self, input: &CourseInput, audit: AuditInfo) -> Result<Course, ServiceError> {
        let am = course::ActiveModel {
            name: Set(input.name.clone()),
            instructor_id: Set(input.instructor_id),
            created_at: Set(audit.created_at.into()),
            updated_at: Set(audit.updated_at.into()),
            ..Default::default()
        };
        let m = am.insert(&self.db).await?;
        let mut hydrated = self.hydrate(vec![m]).await?;
        hydrated.pop().ok_or_else(|| ServiceError::Db("inserted course vanished".into()))
    }

    async fn replace(&self, id: i32, input: &CourseInput, audit: AuditInfo) -> Result<Option<Course>, ServiceError> {
        let Some(found) = course::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        let mut am: course::ActiveModel = found.into();
        am.name = Set(input.name.clone());
        am.instructor_id = Set(input.instructor_id);
        am.created_at = Set(audit.created_at.into());
        am.updated_at = Set(audit.updated_at.into());
        let updated = am.update(&self.db).await?;
        Ok(self.hydrate(vec![updated]).await?.pop())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        enrollment::Entity::delete_many()
            .filter(enrollment::Column::CourseId.eq(id))
            .exec(&txn)
            .await?;
        let res = course::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    async fn count_students(&self) -> Result<Vec<CourseStudentCount>, ServiceError> {
        let rows = course::Entity::find()
            .select_only()
            .column_as(course::Column::Id, "course_id")
            .column_as(course::Column::Name, "course_name")
            .column_as(Expr::col((enrollment::Entity, enrollment::Column::StudentId)).count(), "student_count")
            .join(JoinType::LeftJoin, course::Relation::Enrollment.def())
            .group_by(course::Column::Id)
            .group_by(course::Column::Name)
            .order_by_asc(course::Column::Id)
            .into_model::<CourseStudentCount>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}
