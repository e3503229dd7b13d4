//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.

pub mod collection;
pub mod project;

pub use collection::{
    RecordRunCommand, RecordRunHandler, ResumeCollectionCommand, ResumeCollectionError,
    ResumeCollectionHandler, StartCollectionHandler, StartCollectionResult,
};
pub use project::{SeedProjectCommand, SeedProjectHandler, SeedProjectResult};
