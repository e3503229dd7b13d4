//! SQLite adapters - storage ports backed by the project file.
//!
//! All adapters share one `SqlitePool`; see [`connect`] for opening it.

mod criterion_catalog;
mod entity_set_store;
mod pool;
mod run_repository;

pub use criterion_catalog::SqliteCriterionCatalog;
pub use entity_set_store::SqliteEntitySetStore;
pub use pool::connect;
pub use run_repository::SqliteRunRepository;
