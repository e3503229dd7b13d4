//! In-Memory Run Repository Adapter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::analysis::CollectedInput;
use crate::domain::catalog::Entity;
use crate::domain::foundation::{EntityId, Timestamp};
use crate::ports::{EntitySetStore, RunRepository, SavedRun, StoreError};

use super::{InMemoryDatabase, InMemoryEntitySetStore};

/// In-memory implementation of RunRepository.
///
/// Run names live in the `runs` collection of the given database, so a
/// runs store opened on the same database sees recorded runs.
#[derive(Debug, Clone)]
pub struct InMemoryRunRepository {
    runs: InMemoryEntitySetStore,
    payloads: Arc<RwLock<HashMap<EntityId, (Timestamp, CollectedInput)>>>,
}

impl InMemoryRunRepository {
    pub async fn open(database: InMemoryDatabase) -> Result<Self, StoreError> {
        Ok(Self {
            runs: InMemoryEntitySetStore::open(database, "runs").await?,
            payloads: Arc::new(RwLock::new(HashMap::new())),
        })
    }
}

#[async_trait]
impl RunRepository for InMemoryRunRepository {
    async fn save(&self, name: &str, input: &CollectedInput) -> Result<SavedRun, StoreError> {
        let mut payloads = self.payloads.write().await;
        let id = self.runs.add(name).await?;
        let created_at = Timestamp::now();
        payloads.insert(id, (created_at, input.clone()));

        Ok(SavedRun {
            id,
            name: name.to_string(),
            created_at,
            input: input.clone(),
        })
    }

    async fn load(&self, id: EntityId) -> Result<Option<SavedRun>, StoreError> {
        let Some(entity) = self.runs.get(id).await? else {
            return Ok(None);
        };
        let payloads = self.payloads.read().await;
        Ok(payloads.get(&id).map(|(created_at, input)| SavedRun {
            id,
            name: entity.name,
            created_at: *created_at,
            input: input.clone(),
        }))
    }

    async fn list(&self) -> Result<Vec<Entity>, StoreError> {
        self.runs.list().await
    }

    async fn delete(&self, id: EntityId) -> Result<bool, StoreError> {
        let mut payloads = self.payloads.write().await;
        payloads.remove(&id);
        self.runs.remove(id).await
    }
}
