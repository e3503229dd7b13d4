//! StartCollectionHandler - Opens a new collection run on the current
//! project's alternatives and criteria.

use std::sync::Arc;

use crate::domain::catalog::{Criterion, Entity};
use crate::domain::foundation::DomainError;
use crate::domain::wizard::CollectionWizard;
use crate::ports::{CriterionCatalog, EntitySetStore};

/// Result of starting a collection run.
#[derive(Debug)]
pub struct StartCollectionResult {
    /// Wizard at its first step, candidates in store order.
    pub wizard: CollectionWizard,
    /// Criteria left out because they have no usable definition.
    pub skipped_criteria: Vec<Entity>,
}

/// Handler for starting collection runs.
pub struct StartCollectionHandler {
    alternatives: Arc<dyn EntitySetStore>,
    criteria: Arc<dyn EntitySetStore>,
    catalog: Arc<dyn CriterionCatalog>,
}

impl StartCollectionHandler {
    pub fn new(
        alternatives: Arc<dyn EntitySetStore>,
        criteria: Arc<dyn EntitySetStore>,
        catalog: Arc<dyn CriterionCatalog>,
    ) -> Self {
        Self {
            alternatives,
            criteria,
            catalog,
        }
    }

    pub async fn handle(&self) -> Result<StartCollectionResult, DomainError> {
        // 1. Candidate alternatives, in id order
        let alternatives = self.alternatives.list().await?;

        // 2. Candidate criteria joined with their definitions
        let mut criteria = Vec::new();
        let mut skipped_criteria = Vec::new();
        for entity in self.criteria.list().await? {
            let Some(definition) = self.catalog.definition(entity.id).await? else {
                tracing::warn!(entity_id = %entity.id, name = %entity.name, "Criterion has no definition");
                skipped_criteria.push(entity);
                continue;
            };
            match Criterion::new(entity.clone(), definition) {
                Ok(criterion) => criteria.push(criterion),
                Err(e) => {
                    tracing::warn!(entity_id = %entity.id, error = %e, "Criterion definition rejected");
                    skipped_criteria.push(entity);
                }
            }
        }

        tracing::debug!(
            alternatives = alternatives.len(),
            criteria = criteria.len(),
            skipped = skipped_criteria.len(),
            "Started collection run"
        );

        Ok(StartCollectionResult {
            wizard: CollectionWizard::new(alternatives, criteria),
            skipped_criteria,
        })
    }
}
