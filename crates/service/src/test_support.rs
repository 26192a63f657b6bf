#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with the `lti_link` migration applied.
/// Each call gets its own database, so tests never share rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
