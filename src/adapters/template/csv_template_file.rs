//! CSV Template File Adapter
//!
//! Writes and reads data-entry templates as comma-separated files in the
//! spreadsheet dialect: `,` delimiter, `"` quoting, CRLF line ends, rows of
//! varying length. Bytes on disk are Latin-1.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::TemplateConfig;
use crate::ports::{TemplateFile, TemplateFileError};

use super::latin1::{from_disk_encoding, to_disk_encoding, EncodingError};

/// CSV-backed template files.
#[derive(Debug, Clone)]
pub struct CsvTemplateFile {
    extension: String,
}

impl CsvTemplateFile {
    /// Creates an adapter using `extension` (without the dot) as the
    /// reserved template suffix.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &TemplateConfig) -> Self {
        Self::new(config.extension.clone())
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Returns `path` with the reserved suffix appended when missing.
    pub fn with_extension(&self, path: &Path) -> PathBuf {
        if self.has_extension(path) {
            return path.to_path_buf();
        }
        let mut name = OsString::from(path.as_os_str());
        name.push(".");
        name.push(&self.extension);
        PathBuf::from(name)
    }

    fn encode(rows: &[Vec<String>]) -> Result<Vec<u8>, TemplateFileError> {
        let encoded = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|field| to_disk_encoding(field))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|EncodingError::Unencodable { character, field }| {
                TemplateFileError::Unencodable { character, field }
            })?;

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());
        for record in &encoded {
            writer
                .write_record(record)
                .map_err(|e| TemplateFileError::Csv(e.to_string()))?;
        }
        writer
            .into_inner()
            .map_err(|e| TemplateFileError::Io(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Vec<Vec<String>>, TemplateFileError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        reader
            .byte_records()
            .map(|record| {
                record
                    .map(|r| r.iter().map(from_disk_encoding).collect())
                    .map_err(|e| TemplateFileError::Csv(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl TemplateFile for CsvTemplateFile {
    fn extension(&self) -> &str {
        &self.extension
    }

    async fn write_rows(
        &self,
        path: &Path,
        rows: &[Vec<String>],
    ) -> Result<PathBuf, TemplateFileError> {
        let path = self.with_extension(path);
        let bytes = Self::encode(rows)?;

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| TemplateFileError::Io(e.to_string()))?;

        tracing::info!(path = %path.display(), rows = rows.len(), "Exported template");
        Ok(path)
    }

    async fn read_rows(&self, path: &Path) -> Result<Vec<Vec<String>>, TemplateFileError> {
        if !self.has_extension(path) {
            return Err(TemplateFileError::WrongExtension {
                path: path.display().to_string(),
                expected: self.extension.clone(),
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| TemplateFileError::Io(e.to_string()))?;
        let rows = Self::decode(&bytes)?;

        tracing::debug!(path = %path.display(), rows = rows.len(), "Read template");
        Ok(rows)
    }
}
