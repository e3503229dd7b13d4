//! Application layer - Commands, Handlers, and the collection session.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod session;

pub use handlers::{
    // Collection handlers
    RecordRunCommand, RecordRunHandler, ResumeCollectionCommand, ResumeCollectionError,
    ResumeCollectionHandler, StartCollectionHandler, StartCollectionResult,
    // Project handlers
    SeedProjectCommand, SeedProjectHandler, SeedProjectResult,
};
pub use session::CollectionSession;
