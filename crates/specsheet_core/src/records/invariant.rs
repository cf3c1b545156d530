//! Invariants and search parameters.

use serde::Serialize;

/// A row of an invariants tab. Expressions are carried as text and never
/// evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Invariant {
    pub id: Option<String>,
    pub name: Option<String>,
    pub severity: Option<String>,
    pub context: Option<String>,
    pub english: Option<String>,
    pub explanation: Option<String>,
    pub expression: Option<String>,
    pub xpath: Option<String>,
    pub ocl: Option<String>,
    pub rdf: Option<String>,
}

/// Search parameter types accepted in the Type column.
pub const SEARCH_TYPES: &[&str] = &[
    "composite",
    "date",
    "number",
    "quantity",
    "reference",
    "string",
    "token",
    "uri",
    "special",
];

/// A row of a search tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchParameter {
    pub name: Option<String>,
    pub search_type: Option<String>,
    pub target_types: Vec<String>,
    pub path: Option<String>,
    pub description: Option<String>,
}
