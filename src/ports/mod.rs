//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `EntitySetStore` - One named collection of `(id, name)` records
//! - `CriterionCatalog` - Kind, scale and direction per criterion
//! - `RunRepository` - Finished collection runs
//!
//! ## File Ports
//!
//! - `TemplateFile` - Spreadsheet template rows on disk

mod criterion_catalog;
mod entity_set_store;
mod run_repository;
mod template_file;

pub use criterion_catalog::CriterionCatalog;
pub use entity_set_store::{EntitySetStore, StoreError};
pub use run_repository::{RunRepository, SavedRun};
pub use template_file::{TemplateFile, TemplateFileError};
