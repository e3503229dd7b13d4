//! Template file port - reading and writing template rows on disk.
//!
//! Rows cross this boundary as internal strings; the adapter owns the file
//! format and the on-disk byte encoding.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur while moving a template to or from disk.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateFileError {
    #[error("Character '{character}' in '{field}' cannot be written to a template")]
    Unencodable { character: char, field: String },

    #[error("'{path}' is not a template file, expected a .{expected} file")]
    WrongExtension { path: String, expected: String },

    #[error("Template IO error: {0}")]
    Io(String),

    #[error("Template format error: {0}")]
    Csv(String),
}

impl TemplateFileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TemplateFileError::Unencodable { .. } => ErrorCode::UnencodableText,
            TemplateFileError::WrongExtension { .. } => ErrorCode::ValidationFailed,
            TemplateFileError::Io(_) | TemplateFileError::Csv(_) => ErrorCode::TemplateIo,
        }
    }
}

impl From<TemplateFileError> for DomainError {
    fn from(err: TemplateFileError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match &err {
            TemplateFileError::Unencodable { field, .. } => domain.with_detail("field", field.clone()),
            TemplateFileError::WrongExtension { path, .. } => domain.with_detail("path", path.clone()),
            _ => domain,
        }
    }
}

/// Port for template files.
#[async_trait]
pub trait TemplateFile: Send + Sync {
    /// Reserved template suffix, without the dot.
    fn extension(&self) -> &str;

    /// Writes `rows` to `path`, appending the reserved suffix when missing.
    ///
    /// Returns the path actually written. Nothing is written if any field
    /// cannot be encoded.
    async fn write_rows(
        &self,
        path: &Path,
        rows: &[Vec<String>],
    ) -> Result<PathBuf, TemplateFileError>;

    /// Reads every row of the template at `path`.
    ///
    /// Paths without the reserved suffix are rejected.
    async fn read_rows(&self, path: &Path) -> Result<Vec<Vec<String>>, TemplateFileError>;
}
