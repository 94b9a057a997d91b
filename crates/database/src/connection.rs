//! Database connection management

use anyhow::{Context, Result};
use flatseller_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tokio::fs;
use tracing::info;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a connection pool for the configured SQLite database.
///
/// Foreign keys, WAL and the busy timeout are connection options so every
/// pooled connection gets them, not just the first one.
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    ensure_sqlite_path(&config.url).await?;

    let in_memory = is_in_memory(&config.url);

    let mut options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("invalid database url {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    // each in-memory connection is its own database
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    info!(url = %config.url, "database connection established");
    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Ensure the directory holding the SQLite file exists
async fn ensure_sqlite_path(url: &str) -> Result<()> {
    let Some(rest) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    if is_in_memory(rest) {
        return Ok(());
    }

    let file = rest.split('?').next().unwrap_or(rest);
    let path = Path::new(file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}
