//! Run repository port - finished collection runs.
//!
//! A run is an entity in the `runs` collection plus the serialized
//! collected input it produced.

use async_trait::async_trait;

use crate::domain::analysis::CollectedInput;
use crate::domain::catalog::Entity;
use crate::domain::foundation::{EntityId, Timestamp};

use super::StoreError;

/// A persisted run.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRun {
    pub id: EntityId,
    pub name: String,
    pub created_at: Timestamp,
    pub input: CollectedInput,
}

/// Repository port for finished runs.
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Persists a finished run under `name`.
    async fn save(&self, name: &str, input: &CollectedInput) -> Result<SavedRun, StoreError>;

    /// Loads a run by id. Returns `None` if not found.
    async fn load(&self, id: EntityId) -> Result<Option<SavedRun>, StoreError>;

    /// Run names and ids, oldest first.
    async fn list(&self) -> Result<Vec<Entity>, StoreError>;

    /// Deletes a run. Returns whether it existed.
    async fn delete(&self, id: EntityId) -> Result<bool, StoreError>;
}
