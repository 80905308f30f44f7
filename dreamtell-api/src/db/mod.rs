//! Database access for dreamtell-api

pub mod dreams;
pub mod status;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// Connects to dreamtell.db in the root folder, creating it if missing.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize service tables
///
/// Creates dream_generations and status_checks tables if they don't exist.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dream_generations (
            id TEXT PRIMARY KEY,
            dream_text TEXT NOT NULL,
            generated_story TEXT NOT NULL,
            format_type TEXT NOT NULL,
            include_audio INTEGER NOT NULL DEFAULT 1,
            status TEXT NOT NULL,
            video_url TEXT,
            audio_url TEXT,
            session_id TEXT NOT NULL,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Session listing is the only filtered query
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_dream_generations_session
         ON dream_generations(session_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS status_checks (
            id TEXT PRIMARY KEY,
            client_name TEXT NOT NULL,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (dream_generations, status_checks)");

    Ok(())
}
