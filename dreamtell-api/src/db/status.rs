//! Status check database operations

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use dreamtell_common::{time, Error, Result};

use crate::models::StatusCheck;

/// Maximum records returned by the status listing
const STATUS_LIST_LIMIT: i64 = 1000;

/// Insert a status check
pub async fn insert_status_check(pool: &SqlitePool, check: &StatusCheck) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO status_checks (id, client_name, timestamp)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(check.id.to_string())
    .bind(&check.client_name)
    .bind(time::to_db(&check.timestamp))
    .execute(pool)
    .await
    .map_err(Error::Database)?;

    Ok(())
}

/// List status checks, newest first, capped at 1000
pub async fn list_status_checks(pool: &SqlitePool) -> Result<Vec<StatusCheck>> {
    let rows = sqlx::query(
        r#"
        SELECT id, client_name, timestamp
        FROM status_checks
        ORDER BY timestamp DESC
        LIMIT ?
        "#,
    )
    .bind(STATUS_LIST_LIMIT)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let id_str: String = row.get("id");
            let id = Uuid::parse_str(&id_str)
                .map_err(|e| Error::Internal(format!("Failed to parse status check id: {}", e)))?;

            let timestamp: String = row.get("timestamp");
            let timestamp = time::from_db(&timestamp)?;

            Ok(StatusCheck {
                id,
                client_name: row.get("client_name"),
                timestamp,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[tokio::test]
    async fn insert_and_list_round_trip() {
        let pool = test_pool().await;

        let check = StatusCheck::new("monitor".to_string());
        insert_status_check(&pool, &check).await.unwrap();

        let checks = list_status_checks(&pool).await.unwrap();
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].id, check.id);
        assert_eq!(checks[0].client_name, "monitor");
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let pool = test_pool().await;
        assert!(list_status_checks(&pool).await.unwrap().is_empty());
    }
}
