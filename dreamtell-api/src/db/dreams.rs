//! Dream generation database operations

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use dreamtell_common::{time, Error, Result};

use crate::models::{DreamGeneration, FormatType, GenerationStatus};

/// Maximum records returned for a session listing
const SESSION_LIST_LIMIT: i64 = 100;

/// Save a dream generation.
///
/// Upserts so the insert-after-story and update-after-media writes share
/// one path.
pub async fn save_dream(pool: &SqlitePool, dream: &DreamGeneration) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO dream_generations (
            id, dream_text, generated_story, format_type, include_audio,
            status, video_url, audio_url, session_id, timestamp
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            generated_story = excluded.generated_story,
            status = excluded.status,
            video_url = excluded.video_url,
            audio_url = excluded.audio_url
        "#,
    )
    .bind(dream.id.to_string())
    .bind(&dream.dream_text)
    .bind(&dream.generated_story)
    .bind(dream.format_type.as_str())
    .bind(dream.include_audio as i64)
    .bind(dream.status.as_str())
    .bind(&dream.video_url)
    .bind(&dream.audio_url)
    .bind(&dream.session_id)
    .bind(time::to_db(&dream.timestamp))
    .execute(pool)
    .await
    .map_err(Error::Database)?;

    Ok(())
}

/// Load a dream generation by id
pub async fn get_dream(pool: &SqlitePool, id: Uuid) -> Result<Option<DreamGeneration>> {
    let row = sqlx::query(
        r#"
        SELECT id, dream_text, generated_story, format_type, include_audio,
               status, video_url, audio_url, session_id, timestamp
        FROM dream_generations
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(dream_from_row).transpose()
}

/// List dream generations for a session, newest first, capped at 100
pub async fn list_session_dreams(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<Vec<DreamGeneration>> {
    let rows = sqlx::query(
        r#"
        SELECT id, dream_text, generated_story, format_type, include_audio,
               status, video_url, audio_url, session_id, timestamp
        FROM dream_generations
        WHERE session_id = ?
        ORDER BY timestamp DESC
        LIMIT ?
        "#,
    )
    .bind(session_id)
    .bind(SESSION_LIST_LIMIT)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(dream_from_row).collect()
}

fn dream_from_row(row: sqlx::sqlite::SqliteRow) -> Result<DreamGeneration> {
    let id_str: String = row.get("id");
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| Error::Internal(format!("Failed to parse dream id: {}", e)))?;

    let format_type: String = row.get("format_type");
    let format_type = FormatType::parse(&format_type)?;

    let status: String = row.get("status");
    let status = GenerationStatus::parse(&status)?;

    let timestamp: String = row.get("timestamp");
    let timestamp = time::from_db(&timestamp)?;

    Ok(DreamGeneration {
        id,
        dream_text: row.get("dream_text"),
        generated_story: row.get("generated_story"),
        format_type,
        include_audio: row.get::<i64, _>("include_audio") != 0,
        status,
        video_url: row.get("video_url"),
        audio_url: row.get("audio_url"),
        session_id: row.get("session_id"),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::media;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        crate::db::init_tables(&pool).await.unwrap();
        pool
    }

    fn test_dream(session_id: &str) -> DreamGeneration {
        DreamGeneration::new(
            "I was flying over a forest".to_string(),
            "A story about flight.".to_string(),
            FormatType::Video,
            true,
            session_id.to_string(),
        )
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let pool = test_pool().await;
        let dream = test_dream("session-1");

        save_dream(&pool, &dream).await.unwrap();
        let loaded = get_dream(&pool, dream.id).await.unwrap().unwrap();

        assert_eq!(loaded.id, dream.id);
        assert_eq!(loaded.dream_text, dream.dream_text);
        assert_eq!(loaded.generated_story, dream.generated_story);
        assert_eq!(loaded.format_type, dream.format_type);
        assert_eq!(loaded.include_audio, dream.include_audio);
        assert_eq!(loaded.status, GenerationStatus::StoryGenerated);
        assert_eq!(loaded.session_id, "session-1");
    }

    #[tokio::test]
    async fn upsert_updates_status_and_media() {
        let pool = test_pool().await;
        let mut dream = test_dream("session-1");

        save_dream(&pool, &dream).await.unwrap();

        media::attach_placeholder_media(&mut dream);
        dream.status = GenerationStatus::Completed;
        save_dream(&pool, &dream).await.unwrap();

        let loaded = get_dream(&pool, dream.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, GenerationStatus::Completed);
        assert!(loaded.video_url.is_some());
        assert!(loaded.audio_url.is_some());

        // Still a single row
        let dreams = list_session_dreams(&pool, "session-1").await.unwrap();
        assert_eq!(dreams.len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_dream_returns_none() {
        let pool = test_pool().await;
        let missing = get_dream(&pool, Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn session_listing_filters_by_session() {
        let pool = test_pool().await;

        for _ in 0..3 {
            save_dream(&pool, &test_dream("session-a")).await.unwrap();
        }
        save_dream(&pool, &test_dream("session-b")).await.unwrap();

        let dreams = list_session_dreams(&pool, "session-a").await.unwrap();
        assert_eq!(dreams.len(), 3);
        assert!(dreams.iter().all(|d| d.session_id == "session-a"));

        let empty = list_session_dreams(&pool, "session-missing").await.unwrap();
        assert!(empty.is_empty());
    }
}
