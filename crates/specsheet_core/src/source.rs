//! Where tabular documents come from.
//!
//! Parsing a workbook out of a spreadsheet format is not this crate's
//! job. A [`DocumentSource`] hands over an already-tabular document; the
//! file-backed source reads one that was exported as JSON or YAML.

use std::fs;
use std::path::Path;

use specsheet_schema::TabularDocument;
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Supplies tabular documents by path.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentSource: Send + Sync {
    fn load(&self, path: &Path) -> CoreResult<TabularDocument>;
}

/// Reads `.json`, `.yaml` and `.yml` exports from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentSource;

impl FileDocumentSource {
    pub fn new() -> Self {
        Self
    }

    /// Whether the path has an extension this source reads.
    pub fn supports(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("json") | Some("yaml") | Some("yml")
        )
    }
}

impl DocumentSource for FileDocumentSource {
    fn load(&self, path: &Path) -> CoreResult<TabularDocument> {
        debug!("Reading tabular document from {:?}", path);

        let content = fs::read_to_string(path)?;
        let mut document: TabularDocument = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => return Err(CoreError::UnsupportedFormat(path.to_path_buf())),
        };

        if document.path.is_none() {
            document.path = Some(path.to_path_buf());
        }
        if document.name.is_empty() {
            document.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        Ok(document)
    }
}
