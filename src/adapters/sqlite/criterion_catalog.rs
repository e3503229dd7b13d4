//! SQLite implementation of CriterionCatalog.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::catalog::{CriterionDefinition, CriterionKind, CriterionScale, Direction};
use crate::domain::foundation::EntityId;
use crate::ports::{CriterionCatalog, StoreError};

const COLLECTION: &str = "criterion_definitions";

/// SQLite implementation of CriterionCatalog.
///
/// Table `criterion_definitions(criterion_id, kind, scale, direction)`;
/// `scale` holds the option list or unit string as JSON.
#[derive(Clone)]
pub struct SqliteCriterionCatalog {
    pool: SqlitePool,
}

impl SqliteCriterionCatalog {
    /// Opens the definitions table, creating it if absent.
    pub async fn open(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS criterion_definitions (
                criterion_id INTEGER PRIMARY KEY,
                kind TEXT NOT NULL,
                scale TEXT NOT NULL,
                direction TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::unavailable(COLLECTION, e))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl CriterionCatalog for SqliteCriterionCatalog {
    async fn define(
        &self,
        id: EntityId,
        definition: &CriterionDefinition,
    ) -> Result<(), StoreError> {
        let scale = serde_json::to_string(&definition.scale).map_err(|e| StoreError::Corrupt {
            collection: COLLECTION.to_string(),
            id,
            reason: e.to_string(),
        })?;

        sqlx::query(
            r#"
            INSERT INTO criterion_definitions (criterion_id, kind, scale, direction)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(criterion_id) DO UPDATE SET
                kind = excluded.kind,
                scale = excluded.scale,
                direction = excluded.direction
            "#,
        )
        .bind(id.as_i64())
        .bind(definition.kind.as_str())
        .bind(scale)
        .bind(definition.direction.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable(COLLECTION, e))?;

        tracing::debug!(entity_id = %id, kind = %definition.kind, "Stored criterion definition");
        Ok(())
    }

    async fn definition(&self, id: EntityId) -> Result<Option<CriterionDefinition>, StoreError> {
        let row: Option<(String, String, String)> = sqlx::query_as(
            "SELECT kind, scale, direction FROM criterion_definitions WHERE criterion_id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable(COLLECTION, e))?;

        row.map(|(kind, scale, direction)| row_to_definition(id, &kind, &scale, &direction))
            .transpose()
    }

    async fn forget(&self, id: EntityId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM criterion_definitions WHERE criterion_id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable(COLLECTION, e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_definition(
    id: EntityId,
    kind: &str,
    scale: &str,
    direction: &str,
) -> Result<CriterionDefinition, StoreError> {
    let corrupt = |reason: String| StoreError::Corrupt {
        collection: COLLECTION.to_string(),
        id,
        reason,
    };

    let kind = CriterionKind::parse(kind).ok_or_else(|| corrupt(format!("unknown kind '{kind}'")))?;
    let direction = Direction::parse(direction)
        .ok_or_else(|| corrupt(format!("unknown direction '{direction}'")))?;
    let scale: CriterionScale = serde_json::from_str(scale).map_err(|e| corrupt(e.to_string()))?;

    let definition = CriterionDefinition {
        kind,
        scale,
        direction,
    };
    definition
        .validate()
        .map_err(|e| corrupt(e.to_string()))?;
    Ok(definition)
}
