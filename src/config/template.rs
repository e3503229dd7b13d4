//! Template file configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Reserved file suffixes
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    /// Suffix of data-entry templates, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Suffix of project files, without the dot
    #[serde(default = "default_project_extension")]
    pub project_extension: String,
}

impl TemplateConfig {
    /// Validate template configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for ext in [&self.extension, &self.project_extension] {
            if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ValidationError::InvalidExtension(ext.clone()));
            }
        }
        if self.extension.eq_ignore_ascii_case(&self.project_extension) {
            return Err(ValidationError::ExtensionClash);
        }
        Ok(())
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            project_extension: default_project_extension(),
        }
    }
}

fn default_extension() -> String {
    "csv".to_string()
}

fn default_project_extension() -> String {
    "del".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TemplateConfig::default();
        assert_eq!(config.extension, "csv");
        assert_eq!(config.project_extension, "del");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_extensions_must_differ() {
        let config = TemplateConfig {
            extension: "DEL".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::ExtensionClash)));
    }

    #[test]
    fn test_extension_without_dot() {
        let config = TemplateConfig {
            extension: ".csv".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidExtension(_))
        ));
    }
}
