//! CollectionWizard - step-by-step collection of one analysis input.
//!
//! Each step has one entry action and one exit gate:
//!
//! | Step | Entry | Forward gate |
//! |------|-------|--------------|
//! | AlternativeSelection | - | at least 2 alternatives selected |
//! | CriterionSelection | - | at least 1 criterion selected |
//! | MatrixInput | build matrix or update its headings | complete, in domain, no degenerate rows |
//! | WeightInput | build weights or update their criteria | every weight assigned |
//! | Run | assemble the collected input | terminal |
//!
//! Moving backward never validates and never discards data. Selections are
//! positions into the candidate lists, which keep store order.

use std::collections::BTreeSet;

use crate::domain::analysis::{
    CollectedInput, InputMatrix, WeightSet, MIN_ALTERNATIVES, MIN_CRITERIA,
};
use crate::domain::catalog::{Criterion, Entity};
use crate::domain::foundation::StateMachine;
use crate::domain::template::TemplateLayout;

use super::{WizardError, WizardStep};

/// Headless state machine driving a collection run.
#[derive(Debug, Clone)]
pub struct CollectionWizard {
    step: WizardStep,
    candidate_alternatives: Vec<Entity>,
    candidate_criteria: Vec<Criterion>,
    alternative_selection: Vec<usize>,
    criterion_selection: Vec<usize>,
    matrix: Option<InputMatrix>,
    weights: Option<WeightSet>,
    result: Option<CollectedInput>,
}

impl CollectionWizard {
    /// Starts a run at the first step with nothing selected.
    pub fn new(candidate_alternatives: Vec<Entity>, candidate_criteria: Vec<Criterion>) -> Self {
        Self {
            step: WizardStep::first(),
            candidate_alternatives,
            candidate_criteria,
            alternative_selection: Vec::new(),
            criterion_selection: Vec::new(),
            matrix: None,
            weights: None,
            result: None,
        }
    }

    /// Starts a run pre-populated from a previously collected input.
    ///
    /// The wizard sits at the first step with every prior alternative and
    /// criterion selected and the prior matrix and weights loaded; use
    /// [`jump_to`](Self::jump_to) to move straight to a later step.
    pub fn from_prior_run(prior: &CollectedInput) -> Self {
        let alternatives = prior.alternatives().to_vec();
        let criteria = prior.criteria().to_vec();
        Self {
            step: WizardStep::first(),
            alternative_selection: (0..alternatives.len()).collect(),
            criterion_selection: (0..criteria.len()).collect(),
            candidate_alternatives: alternatives,
            candidate_criteria: criteria,
            matrix: Some(prior.matrix().clone()),
            weights: Some(prior.weights().clone()),
            result: None,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn candidate_alternatives(&self) -> &[Entity] {
        &self.candidate_alternatives
    }

    pub fn candidate_criteria(&self) -> &[Criterion] {
        &self.candidate_criteria
    }

    /// Selected positions into the candidate alternatives, ascending.
    pub fn alternative_selection(&self) -> &[usize] {
        &self.alternative_selection
    }

    /// Selected positions into the candidate criteria, ascending.
    pub fn criterion_selection(&self) -> &[usize] {
        &self.criterion_selection
    }

    pub fn selected_alternatives(&self) -> Vec<Entity> {
        pick(&self.candidate_alternatives, &self.alternative_selection)
    }

    pub fn selected_criteria(&self) -> Vec<Criterion> {
        pick(&self.candidate_criteria, &self.criterion_selection)
    }

    pub fn matrix(&self) -> Option<&InputMatrix> {
        self.matrix.as_ref()
    }

    pub fn weights(&self) -> Option<&WeightSet> {
        self.weights.as_ref()
    }

    /// The collected input, available only once the run is finished.
    pub fn collected_result(&self) -> Result<&CollectedInput, WizardError> {
        self.result
            .as_ref()
            .ok_or(WizardError::NotFinished { step: self.step })
    }

    // ════════════════════════════════════════════════════════════════════════
    // Step-scoped operations
    // ════════════════════════════════════════════════════════════════════════

    /// Replaces the alternative selection. Duplicates collapse.
    pub fn select_alternatives(&mut self, indices: &[usize]) -> Result<(), WizardError> {
        self.require_step(WizardStep::AlternativeSelection)?;
        self.alternative_selection = normalize(indices, self.candidate_alternatives.len())?;
        Ok(())
    }

    /// Replaces the criterion selection. Duplicates collapse.
    pub fn select_criteria(&mut self, indices: &[usize]) -> Result<(), WizardError> {
        self.require_step(WizardStep::CriterionSelection)?;
        self.criterion_selection = normalize(indices, self.candidate_criteria.len())?;
        Ok(())
    }

    /// Sets one matrix cell from its raw text.
    pub fn set_cell(&mut self, index: usize, raw: &str) -> Result<(), WizardError> {
        self.matrix_mut()?.set_value(index, raw)?;
        Ok(())
    }

    /// Blanks one matrix cell.
    pub fn clear_cell(&mut self, index: usize) -> Result<(), WizardError> {
        self.matrix_mut()?.clear_value(index)?;
        Ok(())
    }

    /// Sets every matrix cell at once, row-major. All or nothing.
    pub fn set_cells<S: AsRef<str>>(&mut self, raw_values: &[S]) -> Result<(), WizardError> {
        self.matrix_mut()?.set_values(raw_values)?;
        Ok(())
    }

    /// Replaces every weight, aligned with the selected criteria.
    pub fn set_weights(&mut self, values: &[f64]) -> Result<(), WizardError> {
        self.weights_mut()?.update_weights(values)?;
        Ok(())
    }

    pub fn assign_equal_weight(&mut self) -> Result<(), WizardError> {
        self.weights_mut()?.assign_equal_weight();
        Ok(())
    }

    /// Rows of a blank template for the current selection.
    pub fn export_rows(&self) -> Result<Vec<Vec<String>>, WizardError> {
        self.require_step(WizardStep::MatrixInput)?;
        Ok(TemplateLayout::export_rows(
            &self.selected_alternatives(),
            &self.selected_criteria(),
        ))
    }

    /// Loads filled-in template rows into the matrix.
    ///
    /// The rows are applied to a scratch copy; the working matrix is replaced
    /// only when every cell parses.
    pub fn import_rows(&mut self, rows: &[Vec<String>]) -> Result<(), WizardError> {
        let matrix = self.matrix_mut()?;
        let imported = TemplateLayout::import_into(matrix, rows)?;
        *matrix = imported;
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Navigation
    // ════════════════════════════════════════════════════════════════════════

    /// Runs the current step's gate, then moves forward and runs the next
    /// step's entry action. On failure nothing changes.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let Some(target) = self.step.next() else {
            return Err(WizardError::Finished);
        };
        self.step
            .transition_to(target)
            .map_err(|_| WizardError::Finished)?;

        self.check_gate()?;
        self.enter(target)?;
        self.step = target;
        Ok(target)
    }

    /// Moves back one step without validation.
    ///
    /// At the first step the wizard stays put and the call still succeeds.
    /// A finished run cannot move.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::Finished);
        }
        if let Some(target) = self.step.previous() {
            self.step = target;
        }
        Ok(self.step)
    }

    /// Moves directly to `target`.
    ///
    /// Forward jumps pass through every intermediate gate and entry action,
    /// so the resulting state is the same as advancing step by step; if any
    /// gate fails the wizard stays where it was and the failure is reported as
    /// `StepUnavailable`. Backward jumps retreat step by step.
    pub fn jump_to(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        if target == self.step {
            return Ok(self.step);
        }
        if self.step.is_terminal() {
            return Err(WizardError::Finished);
        }

        let mut scratch = self.clone();
        while scratch.step != target {
            let moved = if target > scratch.step {
                scratch.advance()
            } else {
                scratch.retreat()
            };
            moved.map_err(|reason| WizardError::StepUnavailable {
                step: target,
                reason: Box::new(reason),
            })?;
        }
        *self = scratch;
        Ok(self.step)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Gates and entry actions
    // ════════════════════════════════════════════════════════════════════════

    fn check_gate(&self) -> Result<(), WizardError> {
        match self.step {
            WizardStep::AlternativeSelection => {
                check_selection("alternatives", MIN_ALTERNATIVES, &self.alternative_selection)
            }
            WizardStep::CriterionSelection => {
                check_selection("criteria", MIN_CRITERIA, &self.criterion_selection)
            }
            WizardStep::MatrixInput => {
                let matrix = self.matrix.as_ref().ok_or(WizardError::WrongStep {
                    expected: WizardStep::MatrixInput,
                    actual: self.step,
                })?;
                matrix.validate()?;
                Ok(())
            }
            WizardStep::WeightInput => {
                let weights = self.weights.as_ref().ok_or(WizardError::WrongStep {
                    expected: WizardStep::WeightInput,
                    actual: self.step,
                })?;
                weights
                    .check_assigned()
                    .map_err(WizardError::WeightsUnassigned)
            }
            WizardStep::Run => Err(WizardError::Finished),
        }
    }

    fn enter(&mut self, target: WizardStep) -> Result<(), WizardError> {
        match target {
            WizardStep::AlternativeSelection | WizardStep::CriterionSelection => {}
            WizardStep::MatrixInput => {
                let alternatives = self.selected_alternatives();
                let criteria = self.selected_criteria();
                match self.matrix.as_mut() {
                    Some(matrix) => {
                        if matrix.alternatives() != alternatives.as_slice()
                            || matrix.criteria() != criteria.as_slice()
                        {
                            matrix.update_headings(alternatives, criteria);
                        }
                    }
                    None => self.matrix = Some(InputMatrix::new(alternatives, criteria)),
                }
            }
            WizardStep::WeightInput => {
                let criteria = self.selected_criteria();
                match self.weights.as_mut() {
                    Some(weights) => {
                        if weights.criteria() != criteria.as_slice() {
                            weights.update_crits(criteria);
                        }
                    }
                    None => self.weights = Some(WeightSet::new(criteria)),
                }
            }
            WizardStep::Run => {
                let matrix = self.matrix.clone().ok_or(WizardError::NotFinished {
                    step: self.step,
                })?;
                let weights = self.weights.clone().ok_or(WizardError::NotFinished {
                    step: self.step,
                })?;
                self.result = Some(CollectedInput::assemble(
                    self.selected_alternatives(),
                    self.selected_criteria(),
                    matrix,
                    weights,
                )?);
            }
        }
        Ok(())
    }

    fn require_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn matrix_mut(&mut self) -> Result<&mut InputMatrix, WizardError> {
        self.require_step(WizardStep::MatrixInput)?;
        let actual = self.step;
        self.matrix.as_mut().ok_or(WizardError::WrongStep {
            expected: WizardStep::MatrixInput,
            actual,
        })
    }

    fn weights_mut(&mut self) -> Result<&mut WeightSet, WizardError> {
        self.require_step(WizardStep::WeightInput)?;
        let actual = self.step;
        self.weights.as_mut().ok_or(WizardError::WrongStep {
            expected: WizardStep::WeightInput,
            actual,
        })
    }
}

fn normalize(indices: &[usize], len: usize) -> Result<Vec<usize>, WizardError> {
    if let Some(&index) = indices.iter().find(|&&i| i >= len) {
        return Err(WizardError::SelectionOutOfRange { index, len });
    }
    Ok(indices.iter().copied().collect::<BTreeSet<_>>().into_iter().collect())
}

fn check_selection(what: &'static str, min: usize, selection: &[usize]) -> Result<(), WizardError> {
    if selection.len() < min {
        return Err(WizardError::SelectionTooSmall {
            what,
            min,
            found: selection.len(),
        });
    }
    Ok(())
}

fn pick<T: Clone>(candidates: &[T], selection: &[usize]) -> Vec<T> {
    selection
        .iter()
        .filter_map(|&i| candidates.get(i).cloned())
        .collect()
}
