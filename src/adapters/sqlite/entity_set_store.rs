//! SQLite implementation of EntitySetStore.
//!
//! One table per collection with the fixed schema
//! `(id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)`.
//! `AUTOINCREMENT` keeps ids from being reused after the highest one is
//! removed.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::domain::catalog::Entity;
use crate::domain::foundation::EntityId;
use crate::ports::{EntitySetStore, StoreError};

use super::pool::check_identifier;

/// SQLite implementation of EntitySetStore.
#[derive(Clone)]
pub struct SqliteEntitySetStore {
    pool: SqlitePool,
    collection: String,
}

impl SqliteEntitySetStore {
    /// Opens the table backing `collection`, creating it if absent.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if the name is not a plain identifier, the database
    ///   cannot be reached, or an existing table lacks `id`/`name` columns
    pub async fn open(pool: SqlitePool, collection: &str) -> Result<Self, StoreError> {
        check_identifier(collection)?;

        let columns: Vec<String> = sqlx::query(&format!("PRAGMA table_info(\"{collection}\")"))
            .fetch_all(&pool)
            .await
            .map_err(|e| StoreError::unavailable(collection, e))?
            .iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<Result<_, _>>()
            .map_err(|e| StoreError::unavailable(collection, e))?;

        if columns.is_empty() {
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS \"{collection}\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL
                )"
            ))
            .execute(&pool)
            .await
            .map_err(|e| StoreError::unavailable(collection, e))?;
            tracing::debug!(collection, "Created entity table");
        } else if !["id", "name"]
            .iter()
            .all(|required| columns.iter().any(|c| c.eq_ignore_ascii_case(required)))
        {
            tracing::warn!(collection, ?columns, "Entity table has an incompatible schema");
            return Err(StoreError::unavailable(
                collection,
                "existing table has no id/name columns",
            ));
        } else if !Self::has_autoincrement(&pool, collection).await? {
            tracing::warn!(collection, "Entity table would reuse removed ids");
            return Err(StoreError::unavailable(
                collection,
                "existing table does not declare id AUTOINCREMENT",
            ));
        }

        Ok(Self {
            pool,
            collection: collection.to_string(),
        })
    }

    /// Without `AUTOINCREMENT` SQLite hands out the highest removed rowid
    /// again.
    async fn has_autoincrement(pool: &SqlitePool, collection: &str) -> Result<bool, StoreError> {
        let sql: Option<String> =
            sqlx::query_scalar("SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(collection)
                .fetch_optional(pool)
                .await
                .map_err(|e| StoreError::unavailable(collection, e))?;

        Ok(sql.is_some_and(|sql| sql.to_ascii_uppercase().contains("AUTOINCREMENT")))
    }

    fn unavailable(&self, e: sqlx::Error) -> StoreError {
        StoreError::unavailable(&self.collection, e)
    }
}

#[async_trait]
impl EntitySetStore for SqliteEntitySetStore {
    fn collection_name(&self) -> &str {
        &self.collection
    }

    async fn add(&self, name: &str) -> Result<EntityId, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::BlankName);
        }

        let result = sqlx::query(&format!(
            "INSERT INTO \"{}\" (name) VALUES (?)",
            self.collection
        ))
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| self.unavailable(e))?;

        let id = EntityId::new(result.last_insert_rowid());
        tracing::debug!(collection = %self.collection, entity_id = %id, "Added entity");
        Ok(id)
    }

    async fn remove(&self, id: EntityId) -> Result<bool, StoreError> {
        let result = sqlx::query(&format!("DELETE FROM \"{}\" WHERE id = ?", self.collection))
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        let removed = result.rows_affected() > 0;
        if removed {
            tracing::debug!(collection = %self.collection, entity_id = %id, "Removed entity");
        }
        Ok(removed)
    }

    async fn list_ids(&self) -> Result<Vec<EntityId>, StoreError> {
        let ids: Vec<i64> =
            sqlx::query_scalar(&format!("SELECT id FROM \"{}\" ORDER BY id", self.collection))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| self.unavailable(e))?;

        Ok(ids.into_iter().map(EntityId::new).collect())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM \"{}\"", self.collection))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn list(&self) -> Result<Vec<Entity>, StoreError> {
        let rows: Vec<(i64, String)> = sqlx::query_as(&format!(
            "SELECT id, name FROM \"{}\" ORDER BY id",
            self.collection
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| self.unavailable(e))?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Entity::new(id, name))
            .collect())
    }

    async fn get(&self, id: EntityId) -> Result<Option<Entity>, StoreError> {
        let row: Option<(i64, String)> = sqlx::query_as(&format!(
            "SELECT id, name FROM \"{}\" WHERE id = ?",
            self.collection
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| self.unavailable(e))?;

        Ok(row.map(|(id, name)| Entity::new(id, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn open_creates_missing_table() {
        let pool = memory_pool().await;
        let store = SqliteEntitySetStore::open(pool, "alternatives").await.unwrap();
        assert_eq!(store.collection_name(), "alternatives");
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn add_then_list_in_id_order() {
        let store = SqliteEntitySetStore::open(memory_pool().await, "alternatives")
            .await
            .unwrap();
        let a = store.add("Reserve A").await.unwrap();
        let b = store.add("Reserve B").await.unwrap();

        assert!(a < b);
        assert_eq!(store.list_ids().await.unwrap(), vec![a, b]);
        assert_eq!(
            store.list().await.unwrap(),
            vec![Entity::new(a, "Reserve A"), Entity::new(b, "Reserve B")]
        );
        assert_eq!(store.get(b).await.unwrap(), Some(Entity::new(b, "Reserve B")));
    }

    #[tokio::test]
    async fn remove_unknown_id_returns_false() {
        let store = SqliteEntitySetStore::open(memory_pool().await, "criteria")
            .await
            .unwrap();
        assert!(!store.remove(EntityId::new(42)).await.unwrap());
    }

    #[tokio::test]
    async fn removed_ids_are_never_reused() {
        let store = SqliteEntitySetStore::open(memory_pool().await, "criteria")
            .await
            .unwrap();
        let x = store.add("X").await.unwrap();
        assert!(store.remove(x).await.unwrap());
        assert!(!store.remove(x).await.unwrap());
        assert!(!store.list_ids().await.unwrap().contains(&x));

        let y = store.add("Y").await.unwrap();
        assert_ne!(x, y);
        assert!(y > x);
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let store = SqliteEntitySetStore::open(memory_pool().await, "alternatives")
            .await
            .unwrap();
        assert_eq!(store.add("  ").await, Err(StoreError::BlankName));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn incompatible_table_is_unavailable() {
        let pool = memory_pool().await;
        sqlx::query("CREATE TABLE alternatives (key TEXT, label TEXT)")
            .execute(&pool)
            .await
            .unwrap();

        let result = SqliteEntitySetStore::open(pool, "alternatives").await;
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn table_without_autoincrement_is_unavailable() {
        let pool = memory_pool().await;
        sqlx::query("CREATE TABLE alternatives (id INTEGER PRIMARY KEY, name TEXT)")
            .execute(&pool)
            .await
            .unwrap();

        let result = SqliteEntitySetStore::open(pool, "alternatives").await;
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn existing_autoincrement_table_is_accepted() {
        let pool = memory_pool().await;
        sqlx::query(
            "CREATE TABLE alternatives (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let store = SqliteEntitySetStore::open(pool, "alternatives").await.unwrap();
        let x = store.add("X").await.unwrap();
        store.remove(x).await.unwrap();
        assert!(store.add("Y").await.unwrap() > x);
    }

    #[tokio::test]
    async fn invalid_collection_name_is_unavailable() {
        let result = SqliteEntitySetStore::open(memory_pool().await, "alt; DROP").await;
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn second_handle_sees_first_handles_writes() {
        let pool = memory_pool().await;
        let first = SqliteEntitySetStore::open(pool.clone(), "alternatives")
            .await
            .unwrap();
        let second = SqliteEntitySetStore::open(pool, "alternatives").await.unwrap();

        first.add("Reserve A").await.unwrap();
        assert_eq!(second.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reopening_a_project_file_loads_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("project.del").display());

        let pool = SqlitePoolOptions::new().connect(&url).await.unwrap();
        let store = SqliteEntitySetStore::open(pool.clone(), "alternatives")
            .await
            .unwrap();
        let id = store.add("Reserve A").await.unwrap();
        pool.close().await;

        let pool = SqlitePoolOptions::new().connect(&url).await.unwrap();
        let store = SqliteEntitySetStore::open(pool, "alternatives").await.unwrap();
        assert_eq!(store.list_ids().await.unwrap(), vec![id]);
    }
}
