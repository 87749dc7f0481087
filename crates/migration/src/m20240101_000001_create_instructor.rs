//! Create `instructor` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Instructor::Table)
                    .if_not_exists()
                    .col(pk_auto(Instructor::Id))
                    .col(string_len(Instructor::Name, 128).not_null())
                    .col(timestamp_with_time_zone(Instructor::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Instructor::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Instructor::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Instructor { Table, Id, Name, CreatedAt, UpdatedAt }
