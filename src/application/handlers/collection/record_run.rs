//! RecordRunHandler - Persists the collected input of a finished run.
//!
//! Nothing from a collection run reaches the project file until this
//! handler is called; abandoning a run is simply dropping the wizard.

use std::sync::Arc;

use crate::domain::analysis::CollectedInput;
use crate::domain::foundation::DomainError;
use crate::ports::{RunRepository, SavedRun};

/// Command to record a finished run.
#[derive(Debug, Clone)]
pub struct RecordRunCommand {
    /// Display name of the run.
    pub name: String,
    /// The terminal artifact of the wizard.
    pub input: CollectedInput,
}

/// Handler for recording runs.
pub struct RecordRunHandler {
    runs: Arc<dyn RunRepository>,
}

impl RecordRunHandler {
    pub fn new(runs: Arc<dyn RunRepository>) -> Self {
        Self { runs }
    }

    pub async fn handle(&self, cmd: RecordRunCommand) -> Result<SavedRun, DomainError> {
        let saved = self.runs.save(cmd.name.trim(), &cmd.input).await?;
        tracing::debug!(entity_id = %saved.id, "Run recorded");
        Ok(saved)
    }
}
