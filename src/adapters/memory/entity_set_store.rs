//! In-Memory Entity Set Store Adapter
//!
//! Keeps each collection in a shared map. Handles opened on the same
//! [`InMemoryDatabase`] see each other's writes, like two handles on one
//! SQLite file. Useful for testing and development.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::Entity;
use crate::domain::foundation::EntityId;
use crate::ports::{EntitySetStore, StoreError};

#[derive(Debug, Default)]
struct Collection {
    rows: BTreeMap<EntityId, String>,
    last_id: i64,
}

/// Shared backing for in-memory collections.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory implementation of EntitySetStore.
#[derive(Debug, Clone)]
pub struct InMemoryEntitySetStore {
    database: InMemoryDatabase,
    collection: String,
}

impl InMemoryEntitySetStore {
    /// Opens `collection` in `database`, creating it if absent.
    pub async fn open(database: InMemoryDatabase, collection: &str) -> Result<Self, StoreError> {
        if collection.trim().is_empty() {
            return Err(StoreError::unavailable(
                collection,
                "collection name must not be blank",
            ));
        }
        database
            .collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default();

        Ok(Self {
            database,
            collection: collection.to_string(),
        })
    }

    fn missing(&self) -> StoreError {
        StoreError::unavailable(&self.collection, "collection was dropped")
    }
}

#[async_trait]
impl EntitySetStore for InMemoryEntitySetStore {
    fn collection_name(&self) -> &str {
        &self.collection
    }

    async fn add(&self, name: &str) -> Result<EntityId, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::BlankName);
        }
        let mut collections = self.database.collections.write().await;
        let collection = collections
            .get_mut(&self.collection)
            .ok_or_else(|| self.missing())?;

        collection.last_id += 1;
        let id = EntityId::new(collection.last_id);
        collection.rows.insert(id, name.to_string());
        Ok(id)
    }

    async fn remove(&self, id: EntityId) -> Result<bool, StoreError> {
        let mut collections = self.database.collections.write().await;
        let collection = collections
            .get_mut(&self.collection)
            .ok_or_else(|| self.missing())?;
        Ok(collection.rows.remove(&id).is_some())
    }

    async fn list_ids(&self) -> Result<Vec<EntityId>, StoreError> {
        let collections = self.database.collections.read().await;
        let collection = collections.get(&self.collection).ok_or_else(|| self.missing())?;
        Ok(collection.rows.keys().copied().collect())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let collections = self.database.collections.read().await;
        let collection = collections.get(&self.collection).ok_or_else(|| self.missing())?;
        Ok(collection.rows.len())
    }

    async fn list(&self) -> Result<Vec<Entity>, StoreError> {
        let collections = self.database.collections.read().await;
        let collection = collections.get(&self.collection).ok_or_else(|| self.missing())?;
        Ok(collection
            .rows
            .iter()
            .map(|(id, name)| Entity::new(*id, name.clone()))
            .collect())
    }

    async fn get(&self, id: EntityId) -> Result<Option<Entity>, StoreError> {
        let collections = self.database.collections.read().await;
        let collection = collections.get(&self.collection).ok_or_else(|| self.missing())?;
        Ok(collection
            .rows
            .get(&id)
            .map(|name| Entity::new(id, name.clone())))
    }
}
