use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, Set};
use anyhow::Result;

use super::scratch_db;
use crate::{course, enrollment, instructor, student};

async fn insert_student(db: &sea_orm::DatabaseConnection, name: &str) -> Result<student::Model> {
    let now = Utc::now();
    let am = student::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

async fn insert_course(db: &sea_orm::DatabaseConnection, name: &str, instructor_id: Option<i32>) -> Result<course::Model> {
    let now = Utc::now();
    let am = course::ActiveModel {
        name: Set(name.to_string()),
        instructor_id: Set(instructor_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn student_reaches_courses_through_enrollment() -> Result<()> {
    let db = scratch_db().await?;
    let ada = insert_student(&db, "Ada").await?;
    let math = insert_course(&db, "Math", None).await?;
    let art = insert_course(&db, "Art", None).await?;
    insert_course(&db, "Music", None).await?;

    for c in [&math, &art] {
        enrollment::ActiveModel { student_id: Set(ada.id), course_id: Set(c.id) }.insert(&db).await?;
    }

    let mut names: Vec<String> = ada
        .find_related(course::Entity)
        .all(&db)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Art".to_string(), "Math".to_string()]);

    let attendees = math.find_related(student::Entity).all(&db).await?;
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0].id, ada.id);
    Ok(())
}

#[tokio::test]
async fn deleting_student_cascades_enrollments() -> Result<()> {
    let db = scratch_db().await?;
    let ada = insert_student(&db, "Ada").await?;
    let math = insert_course(&db, "Math", None).await?;
    enrollment::ActiveModel { student_id: Set(ada.id), course_id: Set(math.id) }.insert(&db).await?;

    student::Entity::delete_by_id(ada.id).exec(&db).await?;

    assert_eq!(enrollment::Entity::find().count(&db).await?, 0);
    assert!(course::Entity::find_by_id(math.id).one(&db).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn deleting_instructor_detaches_courses() -> Result<()> {
    let db = scratch_db().await?;
    let now = Utc::now();
    let chef = instructor::ActiveModel {
        name: Set("Mr. Hollandaise".into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let cooking = insert_course(&db, "Cooking", Some(chef.id)).await?;

    let owned = chef.find_related(course::Entity).all(&db).await?;
    assert_eq!(owned.len(), 1);

    instructor::Entity::delete_by_id(chef.id).exec(&db).await?;

    let after = course::Entity::find_by_id(cooking.id).one(&db).await?.expect("course survives");
    assert_eq!(after.instructor_id, None);
    Ok(())
}

#[tokio::test]
async fn name_columns_are_as_wide_as_validation_allows() -> Result<()> {
    use sea_orm::{ConnectionTrait, DbBackend, Statement};

    let db = scratch_db().await?;
    for table in ["student", "course", "instructor", "role"] {
        let row = db
            .query_one(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?",
                [table.into()],
            ))
            .await?
            .expect("table exists");
        let ddl: String = row.try_get("", "sql")?;
        let width = format!("varchar({})", crate::errors::MAX_NAME_LEN);
        assert!(ddl.contains(&width), "{table}: {ddl}");
    }
    Ok(())
}
