//! Profile metadata, read from name/value rows.

use chrono::NaiveDate;
use serde::Serialize;
use url::Url;

/// The Metadata tab of a profile workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub id: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub author_reference: Option<Url>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub publish_date: Option<NaiveDate>,
    /// Structure tabs to publish, in row order.
    pub published_structures: Vec<String>,
    pub extension_uri: Option<Url>,
    pub introduction: Option<String>,
    pub notes: Option<String>,
}

impl Metadata {
    pub fn publishes(&self, structure: &str) -> bool {
        self.published_structures.iter().any(|s| s == structure)
    }
}
