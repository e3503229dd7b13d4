//! Error types for the collection wizard.

use thiserror::Error;

use crate::domain::analysis::{AssemblyError, InputError, WeightError};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::template::TemplateError;

use super::WizardStep;

/// Errors raised by wizard operations and gates.
///
/// A failed operation never changes the wizard's committed state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("Select at least {min} {what}, {found} selected")]
    SelectionTooSmall {
        what: &'static str,
        min: usize,
        found: usize,
    },

    #[error("Selection index {index} is outside the {len} candidates")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("Operation is only available at step {expected}, wizard is at {actual}")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    #[error("Cannot jump to {step}: {reason}")]
    StepUnavailable {
        step: WizardStep,
        reason: Box<WizardError>,
    },

    #[error("No collected input yet, wizard is at {step}")]
    NotFinished { step: WizardStep },

    #[error("Collection is finished, no further navigation")]
    Finished,

    #[error("Weights are not assigned: {0}")]
    WeightsUnassigned(WeightError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Weight(#[from] WeightError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

impl WizardError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::SelectionTooSmall { .. } => ErrorCode::SelectionTooSmall,
            WizardError::SelectionOutOfRange { .. } => ErrorCode::ValidationFailed,
            WizardError::WrongStep { .. }
            | WizardError::NotFinished { .. }
            | WizardError::Finished => ErrorCode::InvalidStateTransition,
            WizardError::StepUnavailable { reason, .. } => reason.code(),
            WizardError::WeightsUnassigned(_) => ErrorCode::MissingValue,
            WizardError::Input(e) => e.code(),
            WizardError::Weight(e) => e.code(),
            WizardError::Template(e) => e.code(),
            WizardError::Assembly(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<WizardError> for DomainError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Input(e) => e.into(),
            WizardError::Weight(e) => e.into(),
            WizardError::Template(e) => e.into(),
            WizardError::Assembly(e) => e.into(),
            WizardError::StepUnavailable { step, reason } => {
                let message = format!("Cannot jump to {step}: {reason}");
                let mut domain: DomainError = (*reason).into();
                domain.message = message;
                domain.with_detail("target_step", step.as_str())
            }
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}
