//! Entity set store port - one named collection of `(id, name)` records.
//!
//! Each collection (`alternatives`, `criteria`, `runs`) is backed by exactly
//! one table. Ids are assigned by the store, grow monotonically and are never
//! reused after removal. Every call reads the backing table afresh, so
//! changes made through another handle are visible immediately.
//!
//! Positions in [`list_ids`](EntitySetStore::list_ids) order are what the
//! wizard selects by; callers must map positions to ids explicitly.

use async_trait::async_trait;

use crate::domain::catalog::Entity;
use crate::domain::foundation::{DomainError, EntityId, ErrorCode};

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Collection '{collection}' is unavailable: {reason}")]
    Unavailable { collection: String, reason: String },

    #[error("Entity name must not be blank")]
    BlankName,

    #[error("No record {id} in collection '{collection}'")]
    NotFound { collection: String, id: EntityId },

    #[error("Stored record {id} in collection '{collection}' is unreadable: {reason}")]
    Corrupt {
        collection: String,
        id: EntityId,
        reason: String,
    },
}

impl StoreError {
    pub fn unavailable(collection: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Unavailable {
            collection: collection.into(),
            reason: reason.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Unavailable { .. } => ErrorCode::StorageUnavailable,
            StoreError::BlankName => ErrorCode::ValidationFailed,
            StoreError::NotFound { .. } => ErrorCode::EntityNotFound,
            StoreError::Corrupt { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match &err {
            StoreError::Unavailable { collection, .. }
            | StoreError::NotFound { collection, .. }
            | StoreError::Corrupt { collection, .. } => {
                domain.with_detail("collection", collection.clone())
            }
            StoreError::BlankName => domain,
        }
    }
}

/// Port for one named collection of entities.
///
/// Opening a collection is adapter-specific (`SqliteEntitySetStore::open`,
/// `InMemoryEntitySetStore::open`); this trait covers everything after that.
#[async_trait]
pub trait EntitySetStore: Send + Sync {
    /// Name of the backing collection.
    fn collection_name(&self) -> &str;

    /// Appends one record and returns its newly assigned id.
    ///
    /// Persisted immediately.
    async fn add(&self, name: &str) -> Result<EntityId, StoreError>;

    /// Deletes the record with `id`.
    ///
    /// Returns whether a record existed; unknown ids are not an error.
    async fn remove(&self, id: EntityId) -> Result<bool, StoreError>;

    /// All live ids, ascending.
    async fn list_ids(&self) -> Result<Vec<EntityId>, StoreError>;

    /// Number of live records.
    async fn count(&self) -> Result<usize, StoreError>;

    /// All live records in ascending id order.
    async fn list(&self) -> Result<Vec<Entity>, StoreError>;

    /// Finds one record by id.
    async fn get(&self, id: EntityId) -> Result<Option<Entity>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_set_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn EntitySetStore) {}
    }

    #[test]
    fn unavailable_maps_to_storage_unavailable() {
        let err = StoreError::unavailable("alternatives", "disk on fire");
        assert_eq!(err.code(), ErrorCode::StorageUnavailable);

        let domain: DomainError = err.into();
        assert_eq!(
            domain.details.get("collection"),
            Some(&"alternatives".to_string())
        );
        assert!(domain.message.contains("disk on fire"));
    }

    #[test]
    fn not_found_names_the_id() {
        let err = StoreError::NotFound {
            collection: "runs".to_string(),
            id: EntityId::new(7),
        };
        assert_eq!(err.to_string(), "No record 7 in collection 'runs'");
    }
}
