//! Weight Set - relative importance of each selected criterion.
//!
//! Weights are aligned with criteria order and are not normalized here;
//! whatever consumes the collected input decides how to scale them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::catalog::Criterion;
use crate::domain::foundation::EntityId;

use super::WeightError;

/// One weight slot per selected criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightSetRecord")]
pub struct WeightSet {
    criteria: Vec<Criterion>,
    weights: Vec<Option<f64>>,
}

/// Unchecked serialized shape of [`WeightSet`].
#[derive(Deserialize)]
struct WeightSetRecord {
    criteria: Vec<Criterion>,
    weights: Vec<Option<f64>>,
}

impl TryFrom<WeightSetRecord> for WeightSet {
    type Error = WeightError;

    fn try_from(record: WeightSetRecord) -> Result<Self, Self::Error> {
        if record.weights.len() != record.criteria.len() {
            return Err(WeightError::CountMismatch {
                expected: record.criteria.len(),
                found: record.weights.len(),
            });
        }
        Ok(Self {
            criteria: record.criteria,
            weights: record.weights,
        })
    }
}

impl WeightSet {
    /// Creates a weight set with every slot unset.
    pub fn new(criteria: Vec<Criterion>) -> Self {
        let weights = vec![None; criteria.len()];
        Self { criteria, weights }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Re-aligns the slots to a new criteria selection, carrying weights over
    /// by criterion id.
    pub fn update_crits(&mut self, criteria: Vec<Criterion>) {
        let previous: HashMap<EntityId, f64> = self
            .criteria
            .iter()
            .zip(&self.weights)
            .filter_map(|(c, w)| w.map(|w| (c.id, w)))
            .collect();

        self.weights = criteria.iter().map(|c| previous.get(&c.id).copied()).collect();
        self.criteria = criteria;
    }

    /// Replaces every weight at once.
    pub fn update_weights(&mut self, values: &[f64]) -> Result<(), WeightError> {
        if values.len() != self.criteria.len() {
            return Err(WeightError::CountMismatch {
                expected: self.criteria.len(),
                found: values.len(),
            });
        }
        if let Some((criterion, value)) = self
            .criteria
            .iter()
            .zip(values)
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(WeightError::InvalidWeight {
                criterion: criterion.name.clone(),
                value: *value,
            });
        }
        self.weights = values.iter().copied().map(Some).collect();
        Ok(())
    }

    /// Gives every criterion the weight `1 / n`.
    pub fn assign_equal_weight(&mut self) {
        let n = self.criteria.len();
        if n == 0 {
            return;
        }
        let equal = 1.0 / n as f64;
        self.weights = vec![Some(equal); n];
    }

    /// Weights aligned with criteria order.
    pub fn weights(&self) -> &[Option<f64>] {
        &self.weights
    }

    /// Weight of one criterion by id.
    pub fn weight_for(&self, id: EntityId) -> Option<f64> {
        self.criteria
            .iter()
            .position(|c| c.id == id)
            .and_then(|i| self.weights.get(i).copied().flatten())
    }

    /// Returns true when the set is non-empty and every slot holds a weight.
    pub fn is_assigned(&self) -> bool {
        !self.weights.is_empty() && self.weights.iter().all(Option::is_some)
    }

    /// Fails on the first criterion without a weight.
    pub fn check_assigned(&self) -> Result<(), WeightError> {
        if self.criteria.is_empty() {
            return Err(WeightError::Empty);
        }
        match self.weights.iter().position(Option::is_none) {
            Some(i) => Err(WeightError::Unassigned {
                criterion: self.criteria[i].name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Returns the weights as plain numbers, failing if any slot is unset.
    pub fn values(&self) -> Result<Vec<f64>, WeightError> {
        self.check_assigned()?;
        Ok(self.weights.iter().map(|w| w.unwrap_or_default()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CriterionDefinition, Entity};

    fn crit(id: i64, name: &str) -> Criterion {
        Criterion::new(Entity::new(id, name), CriterionDefinition::ratio("units")).unwrap()
    }

    fn three() -> Vec<Criterion> {
        vec![crit(1, "Cost"), crit(2, "Catch"), crit(3, "Area")]
    }

    #[test]
    fn new_weight_set_is_unassigned() {
        let ws = WeightSet::new(three());
        assert_eq!(ws.len(), 3);
        assert!(!ws.is_assigned());
        assert!(matches!(ws.check_assigned(), Err(WeightError::Unassigned { .. })));
    }

    #[test]
    fn assign_equal_weight_splits_evenly() {
        let mut ws = WeightSet::new(three());
        ws.assign_equal_weight();
        for w in ws.weights() {
            assert!((w.unwrap() - 1.0 / 3.0).abs() < 1e-12);
        }
        assert!(ws.is_assigned());
    }

    #[test]
    fn update_weights_does_not_normalize() {
        let mut ws = WeightSet::new(three());
        ws.update_weights(&[5.0, 3.0, 2.0]).unwrap();
        assert_eq!(ws.values().unwrap(), vec![5.0, 3.0, 2.0]);
    }

    #[test]
    fn update_weights_rejects_wrong_count() {
        let mut ws = WeightSet::new(three());
        assert_eq!(
            ws.update_weights(&[1.0]),
            Err(WeightError::CountMismatch { expected: 3, found: 1 })
        );
    }

    #[test]
    fn update_weights_rejects_negative_and_nan_without_changes() {
        let mut ws = WeightSet::new(three());
        ws.assign_equal_weight();
        assert!(ws.update_weights(&[1.0, -1.0, 1.0]).is_err());
        assert!(ws.update_weights(&[1.0, f64::NAN, 1.0]).is_err());
        assert!(ws.is_assigned());
    }

    #[test]
    fn update_crits_carries_weights_by_identity() {
        let mut ws = WeightSet::new(three());
        ws.update_weights(&[0.5, 0.3, 0.2]).unwrap();

        ws.update_crits(vec![crit(3, "Area"), crit(4, "Jobs"), crit(1, "Cost")]);

        assert_eq!(ws.weights(), &[Some(0.2), None, Some(0.5)]);
        assert_eq!(ws.weight_for(EntityId::new(1)), Some(0.5));
        assert_eq!(ws.weight_for(EntityId::new(2)), None);
    }

    #[test]
    fn empty_weight_set_is_never_assigned() {
        let ws = WeightSet::new(Vec::new());
        assert!(!ws.is_assigned());
        assert_eq!(ws.check_assigned(), Err(WeightError::Empty));
    }

    #[test]
    fn deserializing_misaligned_weights_fails() {
        let mut json = serde_json::to_value(WeightSet::new(three())).unwrap();
        json["weights"] = serde_json::json!([0.5]);

        let err = serde_json::from_value::<WeightSet>(json).unwrap_err();
        assert!(err.to_string().contains("Expected 3 weights, got 1"));
    }
}
