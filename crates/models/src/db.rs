use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Connect using pool sizing and timeouts from `[database]`.
///
/// In-memory SQLite is pinned to a single pooled connection, since every
/// new connection would otherwise see its own empty database.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    let in_memory = cfg.url.contains(":memory:");
    let (min, max) = if in_memory { (1, 1) } else { (cfg.min_connections, cfg.max_connections) };
    opts.max_connections(max)
        .min_connections(min)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if !in_memory {
        opts.idle_timeout(Duration::from_secs(cfg.idle_timeout_secs));
    }
    let db = Database::connect(opts).await?;
    info!(max_connections = max, in_memory, "database_connected");
    Ok(db)
}
