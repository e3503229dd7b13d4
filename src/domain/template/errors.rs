//! Error types for template import.

use thiserror::Error;

use crate::domain::analysis::InputError;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while reading template rows back into a matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template has {found} data rows, expected {expected} (one header row plus one per criterion)")]
    StructuralMismatch { expected: usize, found: usize },

    #[error(transparent)]
    Input(#[from] InputError),
}

impl TemplateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TemplateError::StructuralMismatch { .. } => ErrorCode::StructuralMismatch,
            TemplateError::Input(e) => e.code(),
        }
    }
}

impl From<TemplateError> for DomainError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::Input(e) => e.into(),
            TemplateError::StructuralMismatch { expected, found } => DomainError::new(
                ErrorCode::StructuralMismatch,
                format!("Template has {found} data rows, expected {expected}"),
            )
            .with_detail("expected_rows", expected.to_string())
            .with_detail("found_rows", found.to_string()),
        }
    }
}
