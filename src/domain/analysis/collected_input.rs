//! Collected Input - the terminal artifact of a collection run.
//!
//! Built once, when the wizard reaches its final step, and never mutated.
//! Deserialization goes through the same checks as assembly, so a stored
//! run that no longer satisfies them cannot be loaded back.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Criterion, Entity};

use super::{AssemblyError, InputMatrix, WeightSet};

/// Fewest alternatives a run can compare.
pub const MIN_ALTERNATIVES: usize = 2;

/// Fewest criteria a run can compare on.
pub const MIN_CRITERIA: usize = 1;

/// Validated alternatives, criteria, matrix and weights of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CollectedInputRecord")]
pub struct CollectedInput {
    alternatives: Vec<Entity>,
    criteria: Vec<Criterion>,
    matrix: InputMatrix,
    weights: WeightSet,
}

/// Unchecked serialized shape of [`CollectedInput`].
#[derive(Deserialize)]
struct CollectedInputRecord {
    alternatives: Vec<Entity>,
    criteria: Vec<Criterion>,
    matrix: InputMatrix,
    weights: WeightSet,
}

impl TryFrom<CollectedInputRecord> for CollectedInput {
    type Error = AssemblyError;

    fn try_from(record: CollectedInputRecord) -> Result<Self, Self::Error> {
        CollectedInput::assemble(
            record.alternatives,
            record.criteria,
            record.matrix,
            record.weights,
        )
    }
}

impl CollectedInput {
    /// Builds the record after checking that every part agrees with the
    /// selection and passes the forward checks.
    pub fn assemble(
        alternatives: Vec<Entity>,
        criteria: Vec<Criterion>,
        matrix: InputMatrix,
        weights: WeightSet,
    ) -> Result<Self, AssemblyError> {
        if alternatives.len() < MIN_ALTERNATIVES {
            return Err(AssemblyError::TooFewAlternatives {
                min: MIN_ALTERNATIVES,
                found: alternatives.len(),
            });
        }
        if criteria.len() < MIN_CRITERIA {
            return Err(AssemblyError::TooFewCriteria {
                min: MIN_CRITERIA,
                found: criteria.len(),
            });
        }
        if matrix.alternatives() != alternatives.as_slice() {
            return Err(AssemblyError::HeadingMismatch("Matrix alternative"));
        }
        if matrix.criteria() != criteria.as_slice() {
            return Err(AssemblyError::HeadingMismatch("Matrix criterion"));
        }
        if weights.criteria() != criteria.as_slice() {
            return Err(AssemblyError::HeadingMismatch("Weight criterion"));
        }
        matrix.validate()?;
        weights.check_assigned()?;

        Ok(Self {
            alternatives,
            criteria,
            matrix,
            weights,
        })
    }

    pub fn alternatives(&self) -> &[Entity] {
        &self.alternatives
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn matrix(&self) -> &InputMatrix {
        &self.matrix
    }

    pub fn weights(&self) -> &WeightSet {
        &self.weights
    }

    /// Scores as `criteria × alternatives` rows.
    pub fn scores(&self) -> Vec<Vec<i64>> {
        self.matrix.scores().unwrap_or_default()
    }

    /// Weights aligned with criteria order.
    pub fn weight_values(&self) -> Vec<f64> {
        self.weights.values().unwrap_or_default()
    }
}
