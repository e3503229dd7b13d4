//! Criterion catalog port - kind, scale and direction of each criterion.
//!
//! The criteria collection itself is a plain entity set; definitions live
//! beside it, keyed by the criterion's entity id.

use async_trait::async_trait;

use crate::domain::catalog::CriterionDefinition;
use crate::domain::foundation::EntityId;

use super::StoreError;

/// Port for criterion definitions.
#[async_trait]
pub trait CriterionCatalog: Send + Sync {
    /// Stores the definition for `id`, replacing any previous one.
    async fn define(&self, id: EntityId, definition: &CriterionDefinition)
        -> Result<(), StoreError>;

    /// Loads the definition for `id`, if any.
    async fn definition(&self, id: EntityId) -> Result<Option<CriterionDefinition>, StoreError>;

    /// Drops the definition for `id`. Returns whether one existed.
    async fn forget(&self, id: EntityId) -> Result<bool, StoreError>;
}
