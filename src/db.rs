use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

/// Bounded pool; acquirers beyond `db_max_connections` wait in line.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

pub async fn migrate(db: &PgPool) {
    if let Err(e) = sqlx::migrate!("./migrations").run(db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }
}
