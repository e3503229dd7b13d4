//! Template layout - row and column conventions of the data-entry template.
//!
//! ```text
//!            | A          | B                  | C        | D        | ...
//! row 1      |            |                    | altern 1 | altern 2 |
//! row 2      | crit 1     | (1 = Low)(2 = High)|          |          |
//! row 3      | crit 2     | (# tonnes)         |          |          |
//! ...
//! (blank rows, then instruction rows starting with '*')
//! ```
//!
//! This module only deals in rows of internal strings. Byte encoding and
//! the CSV dialect belong to the template file adapter.

use crate::domain::analysis::InputMatrix;
use crate::domain::catalog::{Criterion, Entity};

use super::TemplateError;

/// Number of leading columns (criterion name, scale description) before the
/// first data column.
pub const LEADING_COLUMNS: usize = 2;

/// Fixed instruction block appended after the data rows.
pub const INSTRUCTIONS: &[&str] = &[
    "",
    "",
    "",
    "*******************************************************************",
    "* Generated data-entry template. Use it ONLY to enter values.",
    "*",
    "****** Layout ******",
    "*",
    "* Row 1: alternative names, starting in column C",
    "* Column A: criterion names",
    "* Column B: valid values or units for each criterion",
    "*",
    "****** Entering data ******",
    "*",
    "* - Enter one whole number for every criterion/alternative",
    "*   pair, starting in row 2, column C.",
    "* - Ordinal and Binary criteria: use one of the values",
    "*   listed in column B.",
    "* - Ratio criteria: use a positive whole number in the",
    "*   units given in column B.",
    "* - Do not add, remove or reorder criteria or alternatives;",
    "*   rows and columns are read back in export order.",
    "* - Save the file again as CSV before importing it.",
    "*******************************************************************",
];

/// Row/column conventions of the template.
pub struct TemplateLayout;

impl TemplateLayout {
    /// Builds the rows of a blank template for the given selection.
    pub fn export_rows(alternatives: &[Entity], criteria: &[Criterion]) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(criteria.len() + 1 + INSTRUCTIONS.len());

        let mut header = vec![String::new(); LEADING_COLUMNS];
        header.extend(alternatives.iter().map(|a| a.name.clone()));
        rows.push(header);

        for criterion in criteria {
            let mut row = vec![criterion.name.clone(), criterion.describe_scale()];
            row.extend(std::iter::repeat(String::new()).take(alternatives.len()));
            rows.push(row);
        }

        rows.extend(INSTRUCTIONS.iter().map(|line| vec![line.to_string()]));
        rows
    }

    /// Returns the leading data rows: everything before the first blank row
    /// or instruction row.
    ///
    /// Column A of a criterion row is a user-chosen name and may itself start
    /// with `*`. Within the first `num_criteria + 1` rows a `*` row therefore
    /// only ends the section when column A is all it holds; criterion rows
    /// always carry their scale description in column B.
    pub fn data_section(rows: &[Vec<String>], num_criteria: usize) -> &[Vec<String>] {
        let end = rows
            .iter()
            .enumerate()
            .position(|(i, row)| {
                Self::is_blank(row)
                    || (Self::is_instruction(row)
                        && (i > num_criteria || Self::is_blank(&row[1..])))
            })
            .unwrap_or(rows.len());
        &rows[..end]
    }

    /// Extracts the raw cell text, row-major, in the flat order the input
    /// matrix expects.
    ///
    /// The data section must hold exactly `num_criteria + 1` rows. From each
    /// criterion row the two leading columns are skipped and exactly
    /// `num_alternatives` cells are taken; short rows read as empty cells and
    /// anything past the last alternative is ignored.
    pub fn extract_cells(
        rows: &[Vec<String>],
        num_alternatives: usize,
        num_criteria: usize,
    ) -> Result<Vec<String>, TemplateError> {
        let data = Self::data_section(rows, num_criteria);
        let expected = num_criteria + 1;
        if data.len() != expected {
            return Err(TemplateError::StructuralMismatch {
                expected,
                found: data.len(),
            });
        }

        Ok(data[1..]
            .iter()
            .flat_map(|row| {
                (0..num_alternatives).map(move |c| {
                    row.get(LEADING_COLUMNS + c)
                        .cloned()
                        .unwrap_or_default()
                })
            })
            .collect())
    }

    /// Loads template rows into a scratch copy of `matrix`.
    ///
    /// Returns the filled copy; `matrix` itself is never touched, so a failed
    /// import leaves the caller's state exactly as it was.
    pub fn import_into(
        matrix: &InputMatrix,
        rows: &[Vec<String>],
    ) -> Result<InputMatrix, TemplateError> {
        let cells = Self::extract_cells(rows, matrix.num_alternatives(), matrix.num_criteria())?;
        let mut scratch = matrix.make_copy();
        for (index, raw) in cells.iter().enumerate() {
            scratch.set_value(index, raw)?;
        }
        Ok(scratch)
    }

    fn is_blank(row: &[String]) -> bool {
        row.iter().all(|field| field.trim().is_empty())
    }

    fn is_instruction(row: &[String]) -> bool {
        row.first().is_some_and(|field| field.starts_with('*'))
    }
}
