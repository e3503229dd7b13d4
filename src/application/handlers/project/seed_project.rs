//! SeedProjectHandler - Fills a new project with default alternatives
//! and criteria from a seed file.

use std::sync::Arc;

use crate::adapters::seed::SeedData;
use crate::domain::foundation::{DomainError, EntityId};
use crate::ports::{CriterionCatalog, EntitySetStore};

/// Command to seed a project.
#[derive(Debug, Clone)]
pub struct SeedProjectCommand {
    /// Parsed seed file contents.
    pub seed: SeedData,
    /// Add the seeded alternatives.
    pub include_alternatives: bool,
    /// Add the seeded criteria and their definitions.
    pub include_criteria: bool,
}

/// Ids assigned to the seeded records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedProjectResult {
    pub alternative_ids: Vec<EntityId>,
    pub criterion_ids: Vec<EntityId>,
}

/// Handler for seeding projects.
pub struct SeedProjectHandler {
    alternatives: Arc<dyn EntitySetStore>,
    criteria: Arc<dyn EntitySetStore>,
    catalog: Arc<dyn CriterionCatalog>,
}

impl SeedProjectHandler {
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

    pub async fn handle(&self, cmd: SeedProjectCommand) -> Result<SeedProjectResult, DomainError> {
        let mut result = SeedProjectResult::default();

        if cmd.include_alternatives {
            for name in &cmd.seed.alternatives {
                result.alternative_ids.push(self.alternatives.add(name).await?);
            }
        }

        if cmd.include_criteria {
            for criterion in &cmd.seed.criteria {
                let id = self.criteria.add(&criterion.name).await?;
                if let Err(e) = self.catalog.define(id, &criterion.definition).await {
                    // No criterion without a definition.
                    self.criteria.remove(id).await?;
                    return Err(e.into());
                }
                result.criterion_ids.push(id);
            }
        }

        tracing::info!(
            alternatives = result.alternative_ids.len(),
            criteria = result.criterion_ids.len(),
            "Seeded project"
        );
        Ok(result)
    }
}
