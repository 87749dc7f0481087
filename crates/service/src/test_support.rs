use std::sync::Arc;

use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

use crate::Services;

/// Fresh SQLite file under the temp dir with every migration applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let path = std::env::temp_dir().join(format!("school-{}.db", uuid::Uuid::new_v4()));
    let cfg = configs::DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 4,
        min_connections: 1,
        ..configs::DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn get_services() -> Result<Arc<Services>, anyhow::Error> {
    Ok(Arc::new(Services::seaorm(get_db().await?)))
}
