//! Bindings and code lists.

use serde::Serialize;
use url::Url;

/// A row of the Bindings tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub name: Option<String>,
    pub definition: Option<String>,
    /// How the value set is defined (code list, value set, reference, ...).
    pub binding: Option<String>,
    pub is_example: bool,
    pub conformance: Option<String>,
    pub is_extensible: bool,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub oid: Option<String>,
    pub uri: Option<Url>,
    pub contact: Option<String>,
    pub copyright: Option<String>,
    pub v2: Option<String>,
    pub v3: Option<String>,
    pub committee_notes: Option<String>,
}

/// A translated display from a `Display:<lang>` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTranslation {
    pub language: String,
    pub display: String,
}

/// A row of a code list tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeListEntry {
    pub code: Option<String>,
    pub id: Option<String>,
    pub system: Option<String>,
    pub parent: Option<String>,
    pub display: Option<String>,
    pub definition: Option<String>,
    pub v2: Option<String>,
    pub v3: Option<String>,
    pub committee_notes: Option<String>,
    /// In column order.
    pub translations: Vec<DisplayTranslation>,
}

impl CodeListEntry {
    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|t| t.language == language)
            .map(|t| t.display.as_str())
    }
}
