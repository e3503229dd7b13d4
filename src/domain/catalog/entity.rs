//! Entity - a named record owned by one entity-set collection.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::EntityId;

/// A named record in an entity-set collection (an alternative, a criterion
/// or a run).
///
/// Entities are created by the store and never mutated afterwards. Callers
/// always hold copies, never live references into the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
}

impl Entity {
    /// Creates an entity snapshot.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
