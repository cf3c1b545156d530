//! Schema registry.
//!
//! The registry is built once from the literal catalog and is read-only
//! afterwards, so one handle can be shared by every workbook being
//! assembled, on any thread.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog;
use crate::error::{SchemaError, SchemaResult};
use crate::schema::TabSchema;

/// Shared, immutable registry handle.
pub type RegistryHandle = Arc<SchemaRegistry>;

/// A tab-name test used to recognize tabs that have no canonical name.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum TabNamePattern {
    Suffix(&'static str),
    LeadingLowercase,
    LeadingUppercase,
}

impl TabNamePattern {
    pub fn matches(&self, tab_name: &str) -> bool {
        match self {
            TabNamePattern::Suffix(suffix) => tab_name.ends_with(suffix),
            TabNamePattern::LeadingLowercase => {
                tab_name.chars().next().is_some_and(char::is_lowercase)
            }
            TabNamePattern::LeadingUppercase => {
                tab_name.chars().next().is_some_and(char::is_uppercase)
            }
        }
    }
}

impl std::fmt::Display for TabNamePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabNamePattern::Suffix(suffix) => write!(f, "name ends with '{}'", suffix),
            TabNamePattern::LeadingLowercase => f.write_str("name starts with a lower-case letter"),
            TabNamePattern::LeadingUppercase => f.write_str("name starts with an upper-case letter"),
        }
    }
}

/// A pattern paired with the schema a matching tab is checked against.
#[derive(Debug, Clone, Copy)]
pub struct PatternSchema<'r> {
    pub pattern: TabNamePattern,
    pub schema: &'r TabSchema,
}

/// Catalog of known tab schemas.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<&'static str, TabSchema>,
    exact: Vec<&'static str>,
    patterns: Vec<(TabNamePattern, &'static str)>,
}

impl SchemaRegistry {
    /// Build the full catalog.
    ///
    /// Pattern schemas are registered from the most specific test to the
    /// least specific one: named suffixes first, then the single-character
    /// case tests, with the code-list test ahead of the structure test.
    pub fn register() -> RegistryHandle {
        let mut registry = Self::default();

        registry.insert_exact(catalog::bindings());
        registry.insert_exact(catalog::data_elements());
        registry.insert_exact(catalog::events());
        registry.insert_exact(catalog::examples());
        registry.insert_exact(catalog::extensions());
        registry.insert_exact(catalog::invariants());
        registry.insert_exact(catalog::metadata());
        registry.insert_exact(catalog::operations());
        registry.insert_exact(catalog::packages());
        registry.insert_exact(catalog::profiles());
        registry.insert_exact(catalog::search());

        registry.insert_pattern(TabNamePattern::Suffix("-Inv"), catalog::invariants());
        registry.insert_pattern(TabNamePattern::Suffix("-search"), catalog::search());
        registry.insert_pattern(TabNamePattern::LeadingLowercase, catalog::code_list());
        registry.insert_pattern(TabNamePattern::LeadingUppercase, catalog::structure());

        debug!(
            "Schema registry built: {} schemas, {} exact names, {} patterns",
            registry.schemas.len(),
            registry.exact.len(),
            registry.patterns.len()
        );

        Arc::new(registry)
    }

    fn insert_exact(&mut self, schema: TabSchema) {
        debug!("Registering schema by name: {}", schema.name);
        self.exact.push(schema.name);
        self.schemas.insert(schema.name, schema);
    }

    fn insert_pattern(&mut self, pattern: TabNamePattern, schema: TabSchema) {
        debug!("Registering schema by pattern: {} ({})", schema.name, pattern);
        self.patterns.push((pattern, schema.name));
        self.schemas.entry(schema.name).or_insert(schema);
    }

    /// Resolve a canonical tab name. Case-sensitive; pattern-only schemas
    /// are not reachable through this lookup.
    pub fn lookup_by_name(&self, name: &str) -> Option<&TabSchema> {
        if self.exact.iter().any(|exact| *exact == name) {
            self.schemas.get(name)
        } else {
            None
        }
    }

    /// Pattern schemas in priority order.
    pub fn pattern_schemas(&self) -> impl Iterator<Item = PatternSchema<'_>> {
        self.patterns.iter().filter_map(move |(pattern, name)| {
            self.schemas.get(name).map(|schema| PatternSchema {
                pattern: *pattern,
                schema,
            })
        })
    }

    /// Any registered schema by its schema name, including pattern-only ones.
    pub fn schema(&self, name: &str) -> Option<&TabSchema> {
        self.schemas.get(name)
    }

    /// Get a schema by name, returning an error if not found.
    pub fn get_required(&self, name: &str) -> SchemaResult<&TabSchema> {
        self.schema(name)
            .ok_or_else(|| SchemaError::SchemaNotFound(name.to_string()))
    }

    /// Canonical tab names, in registration order.
    pub fn exact_names(&self) -> &[&'static str] {
        &self.exact
    }

    /// Every schema, ordered by name.
    pub fn schemas(&self) -> impl Iterator<Item = &TabSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
