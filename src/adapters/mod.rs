//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `sqlite` - Storage ports backed by the SQLite project file
//! - `memory` - In-memory storage ports (tests, development)
//! - `template` - CSV template files with Latin-1 bytes on disk
//! - `seed` - YAML seed files for new projects

pub mod memory;
pub mod seed;
pub mod sqlite;
pub mod template;

pub use memory::{InMemoryCriterionCatalog, InMemoryDatabase, InMemoryEntitySetStore, InMemoryRunRepository};
pub use seed::{SeedCriterion, SeedData, SeedError};
pub use sqlite::{SqliteCriterionCatalog, SqliteEntitySetStore, SqliteRunRepository};
pub use template::CsvTemplateFile;
