//! Create `studcourses` join table.
//!
//! Rows go away with either side of the enrollment.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Studcourses::Table)
                    .if_not_exists()
                    .col(integer(Studcourses::StudentId).not_null())
                    .col(integer(Studcourses::CourseId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_studcourses")
                            .col(Studcourses::StudentId)
                            .col(Studcourses::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_studcourses_student")
                            .from(Studcourses::Table, Studcourses::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_studcourses_course")
                            .from(Studcourses::Table, Studcourses::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Studcourses::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Studcourses { Table, StudentId, CourseId }

#[derive(DeriveIden)]
enum Student { Table, Id }

#[derive(DeriveIden)]
enum Course { Table, Id }
