/// `lti_link` entity helpers against in-memory SQLite
pub mod lti_link_tests;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::connect_with_config;

/// Fresh in-memory database with all migrations applied.
pub async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
