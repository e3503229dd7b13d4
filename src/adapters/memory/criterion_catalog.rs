//! In-Memory Criterion Catalog Adapter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::CriterionDefinition;
use crate::domain::foundation::EntityId;
use crate::ports::{CriterionCatalog, StoreError};

/// In-memory implementation of CriterionCatalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCriterionCatalog {
    definitions: Arc<RwLock<HashMap<EntityId, CriterionDefinition>>>,
}

impl InMemoryCriterionCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CriterionCatalog for InMemoryCriterionCatalog {
    async fn define(
        &self,
        id: EntityId,
        definition: &CriterionDefinition,
    ) -> Result<(), StoreError> {
        self.definitions
            .write()
            .await
            .insert(id, definition.clone());
        Ok(())
    }

    async fn definition(&self, id: EntityId) -> Result<Option<CriterionDefinition>, StoreError> {
        Ok(self.definitions.read().await.get(&id).cloned())
    }

    async fn forget(&self, id: EntityId) -> Result<bool, StoreError> {
        Ok(self.definitions.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn define_load_forget() {
        let catalog = InMemoryCriterionCatalog::new();
        let id = EntityId::new(1);
        let definition = CriterionDefinition::ratio("hectares");

        catalog.define(id, &definition).await.unwrap();
        assert_eq!(catalog.definition(id).await.unwrap(), Some(definition));
        assert!(catalog.forget(id).await.unwrap());
        assert_eq!(catalog.definition(id).await.unwrap(), None);
    }
}
