//! Input Matrix - the criterion × alternative grid of raw scores.
//!
//! Cells are stored flat, row-major by criterion:
//!
//! ```text
//!              alt 0   alt 1   alt 2
//! criterion 0 [  0   ,   1   ,   2  ]
//! criterion 1 [  3   ,   4   ,   5  ]
//! ```
//!
//! so `row_of(i) = i / num_alternatives` and `col_of(i) = i % num_alternatives`.
//! A cell is `None` until a value is entered.
//!
//! Parsing (`set_value`) is deliberately tolerant: it only checks that the
//! text is an integer. Domain and algorithm checks run as separate passes so
//! that half-finished grids can still be edited and saved while navigating.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::catalog::{Criterion, Entity};
use crate::domain::foundation::EntityId;

use super::{CellLocator, InputError};

/// Alternative × criterion value grid with its headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InputMatrixRecord")]
pub struct InputMatrix {
    alternatives: Vec<Entity>,
    criteria: Vec<Criterion>,
    cells: Vec<Option<i64>>,
}

/// Unchecked serialized shape of [`InputMatrix`].
#[derive(Deserialize)]
struct InputMatrixRecord {
    alternatives: Vec<Entity>,
    criteria: Vec<Criterion>,
    cells: Vec<Option<i64>>,
}

impl TryFrom<InputMatrixRecord> for InputMatrix {
    type Error = InputError;

    fn try_from(record: InputMatrixRecord) -> Result<Self, Self::Error> {
        let expected = record.alternatives.len() * record.criteria.len();
        if record.cells.len() != expected {
            return Err(InputError::ValueCountMismatch {
                expected,
                found: record.cells.len(),
            });
        }
        Ok(Self {
            alternatives: record.alternatives,
            criteria: record.criteria,
            cells: record.cells,
        })
    }
}

impl InputMatrix {
    /// Creates an empty (all cells unset) matrix for the given headings.
    ///
    /// Minimum sizes are enforced by the wizard gates, not here.
    pub fn new(alternatives: Vec<Entity>, criteria: Vec<Criterion>) -> Self {
        let size = alternatives.len() * criteria.len();
        Self {
            alternatives,
            criteria,
            cells: vec![None; size],
        }
    }

    /// Deep snapshot used as the target of an edit session.
    pub fn make_copy(&self) -> Self {
        self.clone()
    }

    pub fn alternatives(&self) -> &[Entity] {
        &self.alternatives
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn num_alternatives(&self) -> usize {
        self.alternatives.len()
    }

    pub fn num_criteria(&self) -> usize {
        self.criteria.len()
    }

    /// Number of cells (`num_criteria × num_alternatives`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Re-derives the shape for a new selection.
    ///
    /// Values are carried over by (criterion id, alternative id), so a
    /// reordering or renaming of the same entities leaves every value attached
    /// to the same logical pair. New pairs start unset; dropped pairs vanish.
    pub fn update_headings(&mut self, alternatives: Vec<Entity>, criteria: Vec<Criterion>) {
        let mut previous: HashMap<(EntityId, EntityId), i64> = HashMap::new();
        for (i, cell) in self.cells.iter().enumerate() {
            if let Some(value) = cell {
                let crit = self.criteria[self.row_of(i)].id;
                let alt = self.alternatives[self.col_of(i)].id;
                previous.insert((crit, alt), *value);
            }
        }

        let cells = criteria
            .iter()
            .flat_map(|c| {
                alternatives
                    .iter()
                    .map(|a| previous.get(&(c.id, a.id)).copied())
                    .collect::<Vec<_>>()
            })
            .collect();

        self.alternatives = alternatives;
        self.criteria = criteria;
        self.cells = cells;
    }

    /// Parses `raw` as an integer and stores it at `index`.
    ///
    /// On error the matrix is unchanged.
    pub fn set_value(&mut self, index: usize, raw: &str) -> Result<(), InputError> {
        if index >= self.cells.len() {
            return Err(InputError::CellOutOfRange {
                index,
                size: self.cells.len(),
            });
        }
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| InputError::MalformedInput {
                locator: self.locate(index),
                raw: raw.to_string(),
            })?;
        self.cells[index] = Some(value);
        Ok(())
    }

    /// Replaces every cell from raw text, all or nothing.
    ///
    /// The values are applied to a copy; the matrix only changes if every
    /// value parses.
    pub fn set_values<S: AsRef<str>>(&mut self, raw_values: &[S]) -> Result<(), InputError> {
        if raw_values.len() != self.cells.len() {
            return Err(InputError::ValueCountMismatch {
                expected: self.cells.len(),
                found: raw_values.len(),
            });
        }
        let mut scratch = self.make_copy();
        for (i, raw) in raw_values.iter().enumerate() {
            scratch.set_value(i, raw.as_ref())?;
        }
        *self = scratch;
        Ok(())
    }

    /// Clears a cell back to unset.
    pub fn clear_value(&mut self, index: usize) -> Result<(), InputError> {
        let size = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(InputError::CellOutOfRange { index, size })?;
        *cell = None;
        Ok(())
    }

    /// Returns the value at a flat index.
    pub fn value(&self, index: usize) -> Option<i64> {
        self.cells.get(index).copied().flatten()
    }

    /// Returns the value for a (criterion position, alternative position) pair.
    pub fn get(&self, criterion: usize, alternative: usize) -> Option<i64> {
        if criterion >= self.num_criteria() || alternative >= self.num_alternatives() {
            return None;
        }
        self.value(criterion * self.num_alternatives() + alternative)
    }

    /// Flat cell sequence.
    pub fn cell_data(&self) -> &[Option<i64>] {
        &self.cells
    }

    /// One criterion's row.
    pub fn row(&self, criterion: usize) -> &[Option<i64>] {
        let width = self.num_alternatives();
        &self.cells[criterion * width..(criterion + 1) * width]
    }

    /// Criterion position of a flat index.
    pub fn row_of(&self, index: usize) -> usize {
        index / self.num_alternatives().max(1)
    }

    /// Alternative position of a flat index.
    pub fn col_of(&self, index: usize) -> usize {
        index % self.num_alternatives().max(1)
    }

    pub fn criterion_name(&self, index: usize) -> &str {
        self.criteria
            .get(self.row_of(index))
            .map(|c| c.name.as_str())
            .unwrap_or_default()
    }

    pub fn alternative_name(&self, index: usize) -> &str {
        self.alternatives
            .get(self.col_of(index))
            .map(|a| a.name.as_str())
            .unwrap_or_default()
    }

    /// Builds the human-readable position of a cell.
    pub fn locate(&self, index: usize) -> CellLocator {
        CellLocator {
            index,
            row: self.row_of(index) + 2,
            criterion: self.criterion_name(index).to_string(),
            column: self.col_of(index) + 3,
            alternative: self.alternative_name(index).to_string(),
        }
    }

    /// Fails on the first unset cell.
    pub fn check_complete(&self) -> Result<(), InputError> {
        match self.cells.iter().position(Option::is_none) {
            Some(index) => Err(InputError::MissingValue {
                locator: self.locate(index),
            }),
            None => Ok(()),
        }
    }

    /// Fails on the first value outside its criterion's domain: negative for
    /// Ratio rows, undeclared for Ordinal/Binary rows.
    pub fn check_domains(&self) -> Result<(), InputError> {
        for (index, cell) in self.cells.iter().enumerate() {
            if let Some(value) = cell {
                let criterion = &self.criteria[self.row_of(index)];
                if !criterion.accepts(*value) {
                    return Err(InputError::OutOfDomain {
                        locator: self.locate(index),
                        value: *value,
                    });
                }
            }
        }
        Ok(())
    }

    /// Every Ratio row must contain at least two distinct values.
    pub fn check_quant_rows(&self) -> Result<(), InputError> {
        for (r, criterion) in self.criteria.iter().enumerate() {
            if !criterion.is_quantitative() {
                continue;
            }
            let row = self.row(r);
            if row.iter().all(|v| *v == row[0]) {
                return Err(InputError::DegenerateRow {
                    row: r + 2,
                    criterion: criterion.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Ordinal/Binary rows, taken together, must contain at least two distinct
    /// values.
    ///
    /// This is a single check across all qualitative cells, not a per-row
    /// check: one varying qualitative row is enough for the whole set to pass.
    pub fn check_qual_rows(&self) -> Result<(), InputError> {
        let mut qualitative = self
            .criteria
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_qualitative())
            .flat_map(|(r, _)| self.row(r).iter());

        let Some(first) = qualitative.next() else {
            return Ok(());
        };
        if qualitative.all(|v| v == first) {
            return Err(InputError::DegenerateInput);
        }
        Ok(())
    }

    /// Runs every forward-navigation check in order: completeness, value
    /// domains, quantitative rows, qualitative rows.
    pub fn validate(&self) -> Result<(), InputError> {
        self.check_complete()?;
        self.check_domains()?;
        self.check_quant_rows()?;
        self.check_qual_rows()
    }

    /// Returns the grid as rows of numbers, failing on any unset cell.
    pub fn scores(&self) -> Result<Vec<Vec<i64>>, InputError> {
        self.check_complete()?;
        Ok((0..self.num_criteria())
            .map(|r| self.row(r).iter().map(|v| v.unwrap_or_default()).collect())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CriterionDefinition;
    use proptest::prelude::*;

    fn alts(names: &[&str]) -> Vec<Entity> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Entity::new(i as i64 + 1, *n))
            .collect()
    }

    fn ratio(id: i64, name: &str) -> Criterion {
        Criterion::new(Entity::new(id, name), CriterionDefinition::ratio("units")).unwrap()
    }

    fn ordinal(id: i64, name: &str) -> Criterion {
        Criterion::new(
            Entity::new(id, name),
            CriterionDefinition::ordinal([("Low", 1), ("Mid", 2), ("High", 3)]),
        )
        .unwrap()
    }

    fn filled(criteria: Vec<Criterion>, num_alts: usize, values: &[i64]) -> InputMatrix {
        let names: Vec<String> = (0..num_alts).map(|i| format!("A{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut m = InputMatrix::new(alts(&refs), criteria);
        let raw: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        m.set_values(&raw).unwrap();
        m
    }

    #[test]
    fn new_matrix_has_exact_size_and_unset_cells() {
        let m = InputMatrix::new(alts(&["A", "B", "C"]), vec![ratio(1, "Cost"), ordinal(2, "Q")]);
        assert_eq!(m.len(), 6);
        assert!(m.cell_data().iter().all(Option::is_none));
    }

    #[test]
    fn row_and_col_follow_row_major_layout() {
        let m = InputMatrix::new(alts(&["A", "B", "C"]), vec![ratio(1, "Cost"), ordinal(2, "Q")]);
        assert_eq!((m.row_of(4), m.col_of(4)), (1, 1));
        assert_eq!(m.criterion_name(4), "Q");
        assert_eq!(m.alternative_name(4), "B");
    }

    #[test]
    fn set_value_rejects_non_integers_with_locator() {
        let mut m = InputMatrix::new(alts(&["A", "B"]), vec![ratio(1, "Cost")]);
        let err = m.set_value(1, "12.5").unwrap_err();
        match err {
            InputError::MalformedInput { locator, raw } => {
                assert_eq!(locator.row, 2);
                assert_eq!(locator.column, 4);
                assert_eq!(locator.criterion, "Cost");
                assert_eq!(locator.alternative, "B");
                assert_eq!(raw, "12.5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(m.value(1), None);
    }

    #[test]
    fn set_value_accepts_surrounding_whitespace() {
        let mut m = InputMatrix::new(alts(&["A", "B"]), vec![ratio(1, "Cost")]);
        m.set_value(0, " 42 ").unwrap();
        assert_eq!(m.value(0), Some(42));
    }

    #[test]
    fn set_value_out_of_range_fails() {
        let mut m = InputMatrix::new(alts(&["A", "B"]), vec![ratio(1, "Cost")]);
        assert!(matches!(
            m.set_value(2, "1"),
            Err(InputError::CellOutOfRange { index: 2, size: 2 })
        ));
    }

    #[test]
    fn set_values_is_all_or_nothing() {
        let mut m = InputMatrix::new(alts(&["A", "B"]), vec![ratio(1, "Cost")]);
        m.set_value(0, "5").unwrap();
        let result = m.set_values(&["7", "x"]);
        assert!(matches!(result, Err(InputError::MalformedInput { .. })));
        assert_eq!(m.value(0), Some(5));
        assert_eq!(m.value(1), None);
    }

    #[test]
    fn make_copy_is_independent() {
        let mut m = InputMatrix::new(alts(&["A", "B"]), vec![ratio(1, "Cost")]);
        let mut copy = m.make_copy();
        copy.set_value(0, "9").unwrap();
        assert_eq!(m.value(0), None);
        m.set_value(1, "3").unwrap();
        assert_eq!(copy.value(1), None);
    }

    #[test]
    fn check_quant_rows_fails_on_constant_row() {
        let m = filled(vec![ratio(1, "Cost")], 3, &[4, 4, 4]);
        assert!(matches!(
            m.check_quant_rows(),
            Err(InputError::DegenerateRow { row: 2, .. })
        ));
    }

    #[test]
    fn check_quant_rows_passes_with_one_distinct_value() {
        let m = filled(vec![ratio(1, "Cost")], 3, &[4, 4, 5]);
        assert!(m.check_quant_rows().is_ok());
    }

    #[test]
    fn check_quant_rows_ignores_qualitative_rows() {
        let m = filled(vec![ordinal(1, "Q"), ratio(2, "Cost")], 2, &[1, 1, 3, 4]);
        assert!(m.check_quant_rows().is_ok());
    }

    #[test]
    fn check_qual_rows_fails_when_all_qualitative_cells_match() {
        let m = filled(vec![ordinal(1, "Q1"), ordinal(2, "Q2")], 3, &[1, 1, 1, 1, 1, 1]);
        assert_eq!(m.check_qual_rows(), Err(InputError::DegenerateInput));
    }

    #[test]
    fn check_qual_rows_passes_when_any_qualitative_cell_differs() {
        let m = filled(vec![ordinal(1, "Q1"), ordinal(2, "Q2")], 3, &[1, 1, 2, 1, 1, 1]);
        assert!(m.check_qual_rows().is_ok());
    }

    #[test]
    fn check_qual_rows_is_global_not_per_row() {
        // Each row is constant, but the rows differ from each other.
        let m = filled(vec![ordinal(1, "Q1"), ordinal(2, "Q2")], 3, &[1, 1, 1, 2, 2, 2]);
        assert!(m.check_qual_rows().is_ok());
    }

    #[test]
    fn check_qual_rows_passes_without_qualitative_criteria() {
        let m = filled(vec![ratio(1, "Cost")], 2, &[1, 1]);
        assert!(m.check_qual_rows().is_ok());
    }

    #[test]
    fn check_qual_rows_ignores_ratio_variation() {
        let m = filled(vec![ordinal(1, "Q"), ratio(2, "Cost")], 2, &[2, 2, 1, 9]);
        assert_eq!(m.check_qual_rows(), Err(InputError::DegenerateInput));
    }

    #[test]
    fn check_complete_reports_first_unset_cell() {
        let mut m = InputMatrix::new(alts(&["A", "B"]), vec![ratio(1, "Cost")]);
        m.set_value(0, "1").unwrap();
        match m.check_complete() {
            Err(InputError::MissingValue { locator }) => assert_eq!(locator.alternative, "B"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn check_domains_rejects_negative_ratio_and_undeclared_options() {
        let m = filled(vec![ratio(1, "Cost")], 2, &[-1, 3]);
        assert!(matches!(m.check_domains(), Err(InputError::OutOfDomain { value: -1, .. })));

        let m = filled(vec![ordinal(1, "Q")], 2, &[1, 7]);
        assert!(matches!(m.check_domains(), Err(InputError::OutOfDomain { value: 7, .. })));
    }

    #[test]
    fn validate_checks_completeness_first() {
        let m = InputMatrix::new(alts(&["A", "B"]), vec![ratio(1, "Cost")]);
        assert!(matches!(m.validate(), Err(InputError::MissingValue { .. })));
    }

    #[test]
    fn update_headings_drops_removed_alternative_and_keeps_the_rest() {
        let mut m = filled(vec![ratio(10, "Cost")], 3, &[1, 2, 3]);
        let remaining = vec![m.alternatives()[0].clone(), m.alternatives()[2].clone()];
        let criteria = m.criteria().to_vec();
        m.update_headings(remaining, criteria);
        assert_eq!(m.cell_data(), &[Some(1), Some(3)]);
    }

    #[test]
    fn update_headings_adds_unset_cells_for_new_criterion() {
        let mut m = filled(vec![ratio(10, "Cost")], 2, &[5, 6]);
        let alternatives = m.alternatives().to_vec();
        m.update_headings(alternatives, vec![ordinal(11, "Q"), ratio(10, "Cost")]);
        assert_eq!(m.cell_data(), &[None, None, Some(5), Some(6)]);
    }

    #[test]
    fn update_headings_follows_identity_through_renames() {
        let mut m = filled(vec![ratio(10, "Cost")], 2, &[5, 6]);
        let renamed = vec![
            Entity::new(m.alternatives()[1].id, "Renamed B"),
            Entity::new(m.alternatives()[0].id, "Renamed A"),
        ];
        let criteria = m.criteria().to_vec();
        m.update_headings(renamed, criteria);
        assert_eq!(m.cell_data(), &[Some(6), Some(5)]);
        assert_eq!(m.alternative_name(0), "Renamed B");
    }

    #[test]
    fn scores_requires_a_complete_grid() {
        let m = filled(vec![ratio(1, "Cost"), ordinal(2, "Q")], 2, &[10, 20, 1, 2]);
        assert_eq!(m.scores().unwrap(), vec![vec![10, 20], vec![1, 2]]);
        let empty = InputMatrix::new(alts(&["A", "B"]), vec![ratio(1, "Cost")]);
        assert!(empty.scores().is_err());
    }

    #[test]
    fn deserializing_misshaped_cells_fails() {
        let m = InputMatrix::new(alts(&["A", "B"]), vec![ratio(1, "Cost")]);
        let mut json = serde_json::to_value(&m).unwrap();
        json["cells"] = serde_json::json!([1, 2, 3, 4]);

        let err = serde_json::from_value::<InputMatrix>(json).unwrap_err();
        assert!(err.to_string().contains("Expected 2 values, got 4"));
    }

    #[test]
    fn clear_value_unsets_one_cell() {
        let mut m = filled(vec![ratio(1, "Cost")], 2, &[10, 20]);
        m.clear_value(1).unwrap();

        assert_eq!(m.cell_data(), &[Some(10), None]);
        assert_eq!(
            m.clear_value(2),
            Err(InputError::CellOutOfRange { index: 2, size: 2 })
        );
    }

    proptest! {
        #[test]
        fn reordering_headings_keeps_values_attached(
            values in proptest::collection::vec(0i64..1000, 8),
            alt_order in Just((0usize..4).collect::<Vec<_>>()).prop_shuffle(),
            crit_order in Just((0usize..2).collect::<Vec<_>>()).prop_shuffle(),
        ) {
            let mut m = filled(vec![ratio(10, "C0"), ratio(11, "C1")], 4, &values);
            let original = m.make_copy();

            let new_alts: Vec<Entity> = alt_order.iter().map(|&i| original.alternatives()[i].clone()).collect();
            let new_crits: Vec<Criterion> = crit_order.iter().map(|&i| original.criteria()[i].clone()).collect();
            m.update_headings(new_alts, new_crits);

            for (new_r, &old_r) in crit_order.iter().enumerate() {
                for (new_c, &old_c) in alt_order.iter().enumerate() {
                    prop_assert_eq!(m.get(new_r, new_c), original.get(old_r, old_c));
                }
            }
        }
    }
}
