use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Course: lookups by instructor
        manager
            .create_index(
                Index::create()
                    .name("idx_course_instructor")
                    .table(Course::Table)
                    .col(Course::InstructorId)
                    .to_owned(),
            )
            .await?;

        // Studcourses: reverse lookups and per-course counts
        manager
            .create_index(
                Index::create()
                    .name("idx_studcourses_course")
                    .table(Studcourses::Table)
                    .col(Studcourses::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_name")
                    .table(Student::Table)
                    .col(Student::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_course_instructor").table(Course::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_studcourses_course").table(Studcourses::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_student_name").table(Student::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Course { Table, InstructorId }

#[derive(DeriveIden)]
enum Studcourses { Table, CourseId }

#[derive(DeriveIden)]
enum Student { Table, Name }
