
/// Relations and cascade behaviour against a scratch SQLite file
pub mod relation_tests;

use sea_orm::DatabaseConnection;
use migration::MigratorTrait;

/// Fresh SQLite database with all migrations applied.
pub(crate) async fn scratch_db() -> anyhow::Result<DatabaseConnection> {
    let path = std::env::temp_dir().join(format!("school-models-{}.db", uuid::Uuid::new_v4()));
    let db = crate::db::connect_url(&format!("sqlite://{}?mode=rwc", path.display())).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
