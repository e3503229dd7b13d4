//! Error types shared across the domain layer.
//!
//! Each concern (store, matrix, weights, template, wizard) has its own
//! `thiserror` enum. All of them collapse into [`DomainError`] so the
//! presentation shell can branch on a single [`ErrorCode`].

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    MalformedInput,
    MissingValue,
    OutOfDomain,
    DegenerateRow,
    DegenerateInput,
    InvalidWeight,

    // Template errors
    StructuralMismatch,
    UnencodableText,
    TemplateIo,

    // Wizard errors
    SelectionTooSmall,
    InvalidStateTransition,

    // Not found errors
    EntityNotFound,
    RunNotFound,

    // Infrastructure errors
    StorageUnavailable,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::MalformedInput => "MALFORMED_INPUT",
            ErrorCode::MissingValue => "MISSING_VALUE",
            ErrorCode::OutOfDomain => "OUT_OF_DOMAIN",
            ErrorCode::DegenerateRow => "DEGENERATE_ROW",
            ErrorCode::DegenerateInput => "DEGENERATE_INPUT",
            ErrorCode::InvalidWeight => "INVALID_WEIGHT",
            ErrorCode::StructuralMismatch => "STRUCTURAL_MISMATCH",
            ErrorCode::UnencodableText => "UNENCODABLE_TEXT",
            ErrorCode::TemplateIo => "TEMPLATE_IO",
            ErrorCode::SelectionTooSmall => "SELECTION_TOO_SMALL",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::EntityNotFound => "ENTITY_NOT_FOUND",
            ErrorCode::RunNotFound => "RUN_NOT_FOUND",
            ErrorCode::StorageUnavailable => "STORAGE_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

impl ErrorCode {
    /// Returns true if the shell can recover by correcting input and retrying.
    ///
    /// Only storage and internal failures are fatal to the current operation's
    /// backing medium.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ErrorCode::StorageUnavailable | ErrorCode::InternalError)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        DomainError::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("collection", "must be an identifier");
        assert_eq!(
            format!("{}", err),
            "Field 'collection' has invalid format: must be an identifier"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::DegenerateRow, "Row 2 is constant");
        assert_eq!(format!("{}", err), "[DEGENERATE_ROW] Row 2 is constant");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::MalformedInput, "bad cell")
            .with_detail("row", "2")
            .with_detail("column", "3");

        assert_eq!(err.details.get("row"), Some(&"2".to_string()));
        assert_eq!(err.details.get("column"), Some(&"3".to_string()));
    }

    #[test]
    fn validation_error_converts_with_field_detail() {
        let err: DomainError = ValidationError::empty_field("name").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"name".to_string()));
    }

    #[test]
    fn storage_errors_are_not_recoverable() {
        assert!(!ErrorCode::StorageUnavailable.is_recoverable());
        assert!(ErrorCode::StructuralMismatch.is_recoverable());
        assert!(ErrorCode::SelectionTooSmall.is_recoverable());
    }
}
