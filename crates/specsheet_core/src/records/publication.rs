//! Packages, profiles and examples published alongside a definition.

use serde::Serialize;

/// A row of the Packages tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: Option<String>,
    pub filename: Option<String>,
    pub source: Option<String>,
    pub package_type: Option<String>,
    pub ig_name: Option<String>,
}

/// A row of the Profiles tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub filename: Option<String>,
    pub source: Option<String>,
    pub definition_type: Option<String>,
    pub ig_name: Option<String>,
}

/// A row of the Examples tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Example {
    pub name: Option<String>,
    pub example_type: Option<String>,
    pub description: Option<String>,
    pub identity: Option<String>,
    /// File the example instance is read from.
    pub source: Option<String>,
    pub profile: Option<String>,
    pub in_book: Option<bool>,
}
