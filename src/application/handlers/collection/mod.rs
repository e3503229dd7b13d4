//! Collection command handlers.
//!
//! Handlers for starting, resuming and recording collection runs.

mod record_run;
mod resume_collection;
mod start_collection;

pub use record_run::{RecordRunCommand, RecordRunHandler};
pub use resume_collection::{
    ResumeCollectionCommand, ResumeCollectionError, ResumeCollectionHandler,
};
pub use start_collection::{StartCollectionHandler, StartCollectionResult};
