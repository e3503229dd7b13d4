//! SQLite implementation of RunRepository.
//!
//! A run is a row in the `runs` entity table plus a row in `run_payloads`
//! holding the collected input as JSON. Both are written in one
//! transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::analysis::CollectedInput;
use crate::domain::catalog::Entity;
use crate::domain::foundation::{EntityId, Timestamp};
use crate::ports::{EntitySetStore, RunRepository, SavedRun, StoreError};

use super::SqliteEntitySetStore;

const RUNS: &str = "runs";

/// SQLite implementation of RunRepository.
#[derive(Clone)]
pub struct SqliteRunRepository {
    pool: SqlitePool,
    runs: SqliteEntitySetStore,
}

impl SqliteRunRepository {
    /// Opens the `runs` collection and the payload table.
    pub async fn open(pool: SqlitePool) -> Result<Self, StoreError> {
        let runs = SqliteEntitySetStore::open(pool.clone(), RUNS).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS run_payloads (
                run_id INTEGER PRIMARY KEY,
                created_at TEXT NOT NULL,
                payload TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::unavailable(RUNS, e))?;

        Ok(Self { pool, runs })
    }
}

#[async_trait]
impl RunRepository for SqliteRunRepository {
    async fn save(&self, name: &str, input: &CollectedInput) -> Result<SavedRun, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::BlankName);
        }
        let payload = serde_json::to_string(input).map_err(|e| StoreError::Corrupt {
            collection: RUNS.to_string(),
            id: EntityId::new(0),
            reason: e.to_string(),
        })?;
        let created_at = Timestamp::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::unavailable(RUNS, e))?;

        let result = sqlx::query("INSERT INTO runs (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::unavailable(RUNS, e))?;
        let id = EntityId::new(result.last_insert_rowid());

        sqlx::query("INSERT INTO run_payloads (run_id, created_at, payload) VALUES (?, ?, ?)")
            .bind(id.as_i64())
            .bind(created_at.as_datetime())
            .bind(payload)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::unavailable(RUNS, e))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::unavailable(RUNS, e))?;

        tracing::info!(entity_id = %id, name, "Recorded run");
        Ok(SavedRun {
            id,
            name: name.to_string(),
            created_at,
            input: input.clone(),
        })
    }

    async fn load(&self, id: EntityId) -> Result<Option<SavedRun>, StoreError> {
        let row: Option<(String, DateTime<Utc>, String)> = sqlx::query_as(
            r#"
            SELECT r.name, p.created_at, p.payload
            FROM runs r
            JOIN run_payloads p ON p.run_id = r.id
            WHERE r.id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable(RUNS, e))?;

        let Some((name, created_at, payload)) = row else {
            return Ok(None);
        };

        let input: CollectedInput =
            serde_json::from_str(&payload).map_err(|e| StoreError::Corrupt {
                collection: RUNS.to_string(),
                id,
                reason: e.to_string(),
            })?;

        Ok(Some(SavedRun {
            id,
            name,
            created_at: Timestamp::from_datetime(created_at),
            input,
        }))
    }

    async fn list(&self) -> Result<Vec<Entity>, StoreError> {
        self.runs.list().await
    }

    async fn delete(&self, id: EntityId) -> Result<bool, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::unavailable(RUNS, e))?;

        sqlx::query("DELETE FROM run_payloads WHERE run_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::unavailable(RUNS, e))?;
        let result = sqlx::query("DELETE FROM runs WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::unavailable(RUNS, e))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::unavailable(RUNS, e))?;

        Ok(result.rows_affected() > 0)
    }
}
