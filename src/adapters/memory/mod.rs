//! In-memory adapters for the storage ports.
//!
//! Useful for testing and development; nothing survives the process.

mod criterion_catalog;
mod entity_set_store;
mod run_repository;

pub use criterion_catalog::InMemoryCriterionCatalog;
pub use entity_set_store::{InMemoryDatabase, InMemoryEntitySetStore};
pub use run_repository::InMemoryRunRepository;
