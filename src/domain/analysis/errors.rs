//! Error types for matrix and weight input.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Human-readable position of one matrix cell.
///
/// `row` and `column` are 1-based positions in the data-entry template
/// (row 1 holds alternative names, columns A and B hold criterion name and
/// scale), so the first data cell is row 2, column 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLocator {
    pub index: usize,
    pub row: usize,
    pub criterion: String,
    pub column: usize,
    pub alternative: String,
}

impl fmt::Display for CellLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: '{}', column {}: '{}'",
            self.row, self.criterion, self.column, self.alternative
        )
    }
}

/// Errors raised while editing or validating an input matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Malformed input in {locator}: '{raw}' is not an integer")]
    MalformedInput { locator: CellLocator, raw: String },

    #[error("Missing input in {locator}")]
    MissingValue { locator: CellLocator },

    #[error("Value {value} in {locator} is not valid for this criterion")]
    OutOfDomain { locator: CellLocator, value: i64 },

    #[error("Cell index {index} is outside a matrix of {size} cells")]
    CellOutOfRange { index: usize, size: usize },

    #[error("Expected {expected} values, got {found}")]
    ValueCountMismatch { expected: usize, found: usize },

    #[error("All inputs for quantitative criterion '{criterion}' (row {row}) are the same value; at least one must differ")]
    DegenerateRow { row: usize, criterion: String },

    #[error("All inputs for qualitative (Ordinal/Binary) criteria are the same value; at least one must differ")]
    DegenerateInput,
}

impl InputError {
    /// Returns the shell-facing error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            InputError::MalformedInput { .. } => ErrorCode::MalformedInput,
            InputError::MissingValue { .. } => ErrorCode::MissingValue,
            InputError::OutOfDomain { .. } => ErrorCode::OutOfDomain,
            InputError::CellOutOfRange { .. } | InputError::ValueCountMismatch { .. } => {
                ErrorCode::ValidationFailed
            }
            InputError::DegenerateRow { .. } => ErrorCode::DegenerateRow,
            InputError::DegenerateInput => ErrorCode::DegenerateInput,
        }
    }

    /// Returns the offending cell, if the error concerns a single cell.
    pub fn locator(&self) -> Option<&CellLocator> {
        match self {
            InputError::MalformedInput { locator, .. }
            | InputError::MissingValue { locator }
            | InputError::OutOfDomain { locator, .. } => Some(locator),
            _ => None,
        }
    }
}

impl From<InputError> for DomainError {
    fn from(err: InputError) -> Self {
        let mut domain = DomainError::new(err.code(), err.to_string());
        if let Some(locator) = err.locator() {
            domain = domain
                .with_detail("row", locator.row.to_string())
                .with_detail("criterion", locator.criterion.clone())
                .with_detail("column", locator.column.to_string())
                .with_detail("alternative", locator.alternative.clone());
        }
        domain
    }
}

/// Errors raised while editing or validating a weight set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("Expected {expected} weights, got {found}")]
    CountMismatch { expected: usize, found: usize },

    #[error("Weight {value} for criterion '{criterion}' must be a finite, non-negative number")]
    InvalidWeight { criterion: String, value: f64 },

    #[error("No weight assigned to criterion '{criterion}'")]
    Unassigned { criterion: String },

    #[error("No criteria to weight")]
    Empty,
}

impl WeightError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WeightError::CountMismatch { .. } => ErrorCode::ValidationFailed,
            WeightError::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            WeightError::Unassigned { .. } => ErrorCode::MissingValue,
            WeightError::Empty => ErrorCode::ValidationFailed,
        }
    }
}

impl From<WeightError> for DomainError {
    fn from(err: WeightError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Errors raised when a collected-input record is assembled from parts that
/// do not fit together.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssemblyError {
    #[error("At least {min} alternatives are required, got {found}")]
    TooFewAlternatives { min: usize, found: usize },

    #[error("At least {min} criterion is required, got {found}")]
    TooFewCriteria { min: usize, found: usize },

    #[error("{0} headings do not match the selection")]
    HeadingMismatch(&'static str),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Weight(#[from] WeightError),
}

impl From<AssemblyError> for DomainError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::Input(e) => e.into(),
            AssemblyError::Weight(e) => e.into(),
            other => DomainError::new(ErrorCode::ValidationFailed, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> CellLocator {
        CellLocator {
            index: 0,
            row: 2,
            criterion: "Cost".to_string(),
            column: 3,
            alternative: "Reserve A".to_string(),
        }
    }

    #[test]
    fn malformed_input_names_row_and_column() {
        let err = InputError::MalformedInput {
            locator: locator(),
            raw: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed input in row 2: 'Cost', column 3: 'Reserve A': 'abc' is not an integer"
        );
    }

    #[test]
    fn domain_error_carries_locator_details() {
        let err: DomainError = InputError::MissingValue { locator: locator() }.into();
        assert_eq!(err.code, ErrorCode::MissingValue);
        assert_eq!(err.details.get("alternative"), Some(&"Reserve A".to_string()));
        assert_eq!(err.details.get("row"), Some(&"2".to_string()));
    }

    #[test]
    fn degenerate_errors_map_to_their_codes() {
        let row = InputError::DegenerateRow {
            row: 2,
            criterion: "Cost".to_string(),
        };
        assert_eq!(row.code(), ErrorCode::DegenerateRow);
        assert_eq!(InputError::DegenerateInput.code(), ErrorCode::DegenerateInput);
    }

    #[test]
    fn assembly_error_unwraps_input_codes() {
        let err: DomainError = AssemblyError::from(InputError::DegenerateInput).into();
        assert_eq!(err.code, ErrorCode::DegenerateInput);
    }
}
