//! ResumeCollectionHandler - Re-opens a recorded run for revision.
//!
//! The wizard is pre-populated from the run's collected input and moved to
//! the requested step through every intermediate gate.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, EntityId};
use crate::domain::wizard::{CollectionWizard, WizardError, WizardStep};
use crate::ports::{RunRepository, StoreError};

/// Command to resume a recorded run.
#[derive(Debug, Clone)]
pub struct ResumeCollectionCommand {
    /// The run to load.
    pub run_id: EntityId,
    /// The step to open the wizard at.
    pub target: WizardStep,
}

/// Error type for resuming a run.
#[derive(Debug, Clone)]
pub enum ResumeCollectionError {
    /// Run not found.
    RunNotFound(EntityId),
    /// Domain error (storage failure, unavailable step).
    Domain(DomainError),
}

impl std::fmt::Display for ResumeCollectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResumeCollectionError::RunNotFound(id) => write!(f, "Run not found: {}", id),
            ResumeCollectionError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ResumeCollectionError {}

impl From<DomainError> for ResumeCollectionError {
    fn from(err: DomainError) -> Self {
        ResumeCollectionError::Domain(err)
    }
}

impl From<StoreError> for ResumeCollectionError {
    fn from(err: StoreError) -> Self {
        ResumeCollectionError::Domain(err.into())
    }
}

impl From<WizardError> for ResumeCollectionError {
    fn from(err: WizardError) -> Self {
        ResumeCollectionError::Domain(err.into())
    }
}

/// Handler for resuming recorded runs.
pub struct ResumeCollectionHandler {
    runs: Arc<dyn RunRepository>,
}

impl ResumeCollectionHandler {
    pub fn new(runs: Arc<dyn RunRepository>) -> Self {
        Self { runs }
    }

    pub async fn handle(
        &self,
        cmd: ResumeCollectionCommand,
    ) -> Result<CollectionWizard, ResumeCollectionError> {
        // 1. Load the run
        let run = self
            .runs
            .load(cmd.run_id)
            .await?
            .ok_or(ResumeCollectionError::RunNotFound(cmd.run_id))?;

        // 2. Pre-populate and move to the requested step
        let mut wizard = CollectionWizard::from_prior_run(&run.input);
        wizard.jump_to(cmd.target)?;

        tracing::info!(entity_id = %cmd.run_id, step = %cmd.target, "Resumed run");
        Ok(wizard)
    }
}
