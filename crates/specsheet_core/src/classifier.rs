//! Tab classifier.
//!
//! Decides, for each tab of a workbook, which schema it is an instance of.
//! The order of the checks is fixed: the ignore list, then canonical names,
//! then name patterns whose required columns are all present.

use specsheet_schema::{compat, SchemaRegistry, TabSchema, TabularSheet};
use tracing::debug;

use crate::config::IgnoreList;

/// Outcome of classifying one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabClassification<'r> {
    Known(&'r TabSchema),
    Unknown,
    Ignored,
}

impl<'r> TabClassification<'r> {
    pub fn schema(&self) -> Option<&'r TabSchema> {
        match self {
            TabClassification::Known(schema) => Some(*schema),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, TabClassification::Known(_))
    }
}

/// Classifies tabs against a registry.
pub struct TabClassifier<'r> {
    registry: &'r SchemaRegistry,
    ignore: &'r IgnoreList,
}

impl<'r> TabClassifier<'r> {
    pub fn new(registry: &'r SchemaRegistry, ignore: &'r IgnoreList) -> Self {
        Self { registry, ignore }
    }

    /// Classify one tab. Tabs without a name are not classified at all.
    pub fn classify(&self, sheet: &TabularSheet) -> Option<TabClassification<'r>> {
        let name = sheet.name.as_str();
        if name.is_empty() {
            return None;
        }

        if self.ignore.contains(name) {
            debug!("Tab '{}' ignored", name);
            return Some(TabClassification::Ignored);
        }

        if let Some(schema) = self.registry.lookup_by_name(name) {
            debug!("Tab '{}' matched by name", name);
            return Some(TabClassification::Known(schema));
        }

        for candidate in self.registry.pattern_schemas() {
            if candidate.pattern.matches(name) && compat::is_compatible(sheet, candidate.schema) {
                debug!(
                    "Tab '{}' matched {} ({})",
                    name, candidate.schema.name, candidate.pattern
                );
                return Some(TabClassification::Known(candidate.schema));
            }
        }

        debug!("Tab '{}' not recognized", name);
        Some(TabClassification::Unknown)
    }
}
