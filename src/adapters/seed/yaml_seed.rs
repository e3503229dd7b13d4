//! YAML seed files - default alternatives and criteria for a new project.
//!
//! ```yaml
//! alternatives:
//!   - Reserve A
//!   - Reserve B
//! criteria:
//!   - name: Cost
//!     kind: Ratio
//!     scale: { units: dollars }
//!     direction: cost
//!   - name: Habitat quality
//!     kind: Ordinal
//!     scale:
//!       options:
//!         - { label: Poor, value: 1 }
//!         - { label: Good, value: 2 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::domain::catalog::CriterionDefinition;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while loading a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(String),

    #[error("Failed to parse seed file: {0}")]
    Parse(String),

    #[error("Invalid seed entry '{name}': {reason}")]
    Invalid { name: String, reason: String },
}

impl From<SeedError> for DomainError {
    fn from(err: SeedError) -> Self {
        let code = match err {
            SeedError::Io(_) => ErrorCode::TemplateIo,
            SeedError::Parse(_) | SeedError::Invalid { .. } => ErrorCode::ValidationFailed,
        };
        DomainError::new(code, err.to_string())
    }
}

/// One seeded criterion: a name plus its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCriterion {
    pub name: String,
    #[serde(flatten)]
    pub definition: CriterionDefinition,
}

/// Contents of a seed file. Either list may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub criteria: Vec<SeedCriterion>,
}

impl SeedData {
    /// Parses and validates seed YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, SeedError> {
        let data: SeedData =
            serde_yaml::from_str(yaml).map_err(|e| SeedError::Parse(e.to_string()))?;
        data.validate()?;
        Ok(data)
    }

    /// Reads, parses and validates a seed file.
    pub async fn load(path: &Path) -> Result<Self, SeedError> {
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SeedError::Io(e.to_string()))?;
        let data = Self::from_yaml(&yaml)?;
        tracing::debug!(
            path = %path.display(),
            alternatives = data.alternatives.len(),
            criteria = data.criteria.len(),
            "Loaded seed file"
        );
        Ok(data)
    }

    fn validate(&self) -> Result<(), SeedError> {
        if let Some(blank) = self.alternatives.iter().find(|a| a.trim().is_empty()) {
            return Err(SeedError::Invalid {
                name: blank.clone(),
                reason: "alternative name is blank".to_string(),
            });
        }
        for criterion in &self.criteria {
            if criterion.name.trim().is_empty() {
                return Err(SeedError::Invalid {
                    name: criterion.name.clone(),
                    reason: "criterion name is blank".to_string(),
                });
            }
            criterion
                .definition
                .validate()
                .map_err(|e| SeedError::Invalid {
                    name: criterion.name.clone(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}
