//! WizardStep - the named steps of a collection run and their ordering.
//!
//! # Step Order
//!
//! 1. AlternativeSelection → 2. CriterionSelection → 3. MatrixInput →
//! 4. WeightInput → 5. Run
//!
//! Adjacent steps may move either way, except that `Run` is terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// One step of the collection wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    AlternativeSelection,
    CriterionSelection,
    MatrixInput,
    WeightInput,
    Run,
}

impl WizardStep {
    /// The canonical order of steps.
    pub const ORDER: [WizardStep; 5] = [
        WizardStep::AlternativeSelection,
        WizardStep::CriterionSelection,
        WizardStep::MatrixInput,
        WizardStep::WeightInput,
        WizardStep::Run,
    ];

    /// Returns the first step.
    pub fn first() -> Self {
        WizardStep::AlternativeSelection
    }

    /// Returns the 0-based position of this step.
    pub fn index(&self) -> usize {
        match self {
            WizardStep::AlternativeSelection => 0,
            WizardStep::CriterionSelection => 1,
            WizardStep::MatrixInput => 2,
            WizardStep::WeightInput => 3,
            WizardStep::Run => 4,
        }
    }

    /// Returns the step at a 0-based position, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ORDER.get(index).copied()
    }

    /// Returns the next step, or None at `Run`.
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Returns the previous step, or None at the first step.
    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::AlternativeSelection => "alternative_selection",
            WizardStep::CriterionSelection => "criterion_selection",
            WizardStep::MatrixInput => "matrix_input",
            WizardStep::WeightInput => "weight_input",
            WizardStep::Run => "run",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for WizardStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            WizardStep::Run => vec![],
            _ => self.next().into_iter().chain(self.previous()).collect(),
        }
    }
}
