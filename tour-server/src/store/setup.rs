//! Database setup and schema.
//!
//! Stations and tours live in one table each. The `name` column of both
//! carries a unique index, which is what turns a duplicate insert or rename
//! into a `Conflict` without a check-then-insert race.

use std::path::Path;

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

/// Open (creating if needed) the database file and ensure the schema exists.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, the file
/// cannot be opened, or schema creation fails.
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true),
    )
    .await?;

    create_schema(&pool).await?;
    tracing::info!(path = %db_path.display(), "database ready");

    Ok(pool)
}

/// In-memory database with the production schema.
///
/// Limited to one connection: every `:memory:` connection is its own
/// database.
#[cfg(test)]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Create tables and indexes. Safe to call repeatedly.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            url TEXT,
            geojson TEXT NOT NULL,
            created TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_stations_name ON stations(name)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tours (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            waypoints TEXT NOT NULL,
            route_geojson TEXT NOT NULL,
            created TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_tours_name ON tours(name)")
        .execute(pool)
        .await?;

    Ok(())
}
