//! CollectionSession - a wizard bound to the template file port.
//!
//! The wizard itself is synchronous and holds no I/O. The session forwards
//! step operations to it, performs template reads and writes through the
//! port, and reports every failure as a `DomainError`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::analysis::CollectedInput;
use crate::domain::foundation::DomainError;
use crate::domain::wizard::{CollectionWizard, WizardStep};
use crate::ports::TemplateFile;

/// One interactive collection run.
pub struct CollectionSession {
    wizard: CollectionWizard,
    templates: Arc<dyn TemplateFile>,
}

impl CollectionSession {
    pub fn new(wizard: CollectionWizard, templates: Arc<dyn TemplateFile>) -> Self {
        Self { wizard, templates }
    }

    pub fn wizard(&self) -> &CollectionWizard {
        &self.wizard
    }

    pub fn current_step(&self) -> WizardStep {
        self.wizard.current_step()
    }

    pub fn select_alternatives(&mut self, indices: &[usize]) -> Result<(), DomainError> {
        Ok(self.wizard.select_alternatives(indices)?)
    }

    pub fn select_criteria(&mut self, indices: &[usize]) -> Result<(), DomainError> {
        Ok(self.wizard.select_criteria(indices)?)
    }

    pub fn set_cell(&mut self, index: usize, raw: &str) -> Result<(), DomainError> {
        Ok(self.wizard.set_cell(index, raw)?)
    }

    pub fn clear_cell(&mut self, index: usize) -> Result<(), DomainError> {
        Ok(self.wizard.clear_cell(index)?)
    }

    pub fn set_cells<S: AsRef<str>>(&mut self, raw_values: &[S]) -> Result<(), DomainError> {
        Ok(self.wizard.set_cells(raw_values)?)
    }

    pub fn set_weights(&mut self, values: &[f64]) -> Result<(), DomainError> {
        Ok(self.wizard.set_weights(values)?)
    }

    pub fn assign_equal_weight(&mut self) -> Result<(), DomainError> {
        Ok(self.wizard.assign_equal_weight()?)
    }

    pub fn advance(&mut self) -> Result<WizardStep, DomainError> {
        let from = self.wizard.current_step();
        match self.wizard.advance() {
            Ok(to) => {
                tracing::info!(%from, %to, "Advanced collection step");
                Ok(to)
            }
            Err(e) => {
                tracing::debug!(step = %from, error = %e, "Step gate refused advance");
                Err(e.into())
            }
        }
    }

    pub fn retreat(&mut self) -> Result<WizardStep, DomainError> {
        let to = self.wizard.retreat()?;
        tracing::debug!(%to, "Retreated collection step");
        Ok(to)
    }

    pub fn jump_to(&mut self, target: WizardStep) -> Result<WizardStep, DomainError> {
        let to = self.wizard.jump_to(target)?;
        tracing::info!(%to, "Jumped to collection step");
        Ok(to)
    }

    /// Writes a blank template for the current selection.
    ///
    /// Returns the path actually written, which carries the template suffix.
    pub async fn export_template(&self, path: &Path) -> Result<PathBuf, DomainError> {
        let rows = self.wizard.export_rows()?;
        Ok(self.templates.write_rows(path, &rows).await?)
    }

    /// Reads a filled-in template into the matrix.
    ///
    /// A read or parse failure leaves the matrix exactly as it was.
    pub async fn import_template(&mut self, path: &Path) -> Result<(), DomainError> {
        let rows = self.templates.read_rows(path).await?;
        if let Err(e) = self.wizard.import_rows(&rows) {
            tracing::warn!(path = %path.display(), error = %e, "Template import rejected");
            return Err(e.into());
        }
        tracing::info!(path = %path.display(), "Imported template");
        Ok(())
    }

    /// The finished run's input.
    pub fn collected_result(&self) -> Result<CollectedInput, DomainError> {
        Ok(self.wizard.collected_result()?.clone())
    }
}
