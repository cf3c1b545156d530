//! Element-definition records: data elements, profile structures and
//! extensions all share [`ElementFields`].

use std::collections::BTreeMap;

use serde::Serialize;

use super::cardinality::Cardinality;

/// Columns common to every element-definition tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementFields {
    /// Full dot-separated path, e.g. `Patient.contact.name`.
    pub path: Option<String>,
    pub aliases: Vec<String>,
    pub cardinality: Cardinality,
    /// Ids of invariants that apply to this element.
    pub invariant_refs: Vec<String>,
    pub type_expression: Option<String>,
    pub is_modifier: Option<bool>,
    pub modifier_reason: Option<String>,
    /// Binding name; resolved against the Bindings tab by consumers.
    pub binding: Option<String>,
    pub example: Option<String>,
    pub default_value: Option<String>,
    pub missing_meaning: Option<String>,
    pub short_label: Option<String>,
    pub definition: Option<String>,
    pub requirements: Option<String>,
    pub comments: Option<String>,
    pub to_do: Option<String>,
    pub rim_mapping: Option<String>,
    pub v2_mapping: Option<String>,
    /// Values of undeclared `... Mapping` columns, keyed by column header.
    pub other_mappings: BTreeMap<String, String>,
    pub display_hint: Option<String>,
    pub committee_notes: Option<String>,
    pub five_ws: Option<String>,
}

/// A row of the Data Elements tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataElement {
    #[serde(flatten)]
    pub element: ElementFields,
    pub summary: Option<bool>,
    pub regex: Option<String>,
    pub uml: Option<String>,
}

/// A row of a profile structure tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureElement {
    #[serde(flatten)]
    pub element: ElementFields,
    pub profile_name: Option<String>,
    /// Slicing discriminator exactly as written (`path|ordered|rules`).
    pub discriminator: Option<String>,
    pub slice_description: Option<String>,
    pub must_support: Option<bool>,
    pub fixed_value: Option<String>,
    pub pattern: Option<String>,
    pub max_length: Option<u32>,
}

/// A structure tab of a profile workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Structure {
    pub name: String,
    pub elements: Vec<StructureElement>,
}

impl Structure {
    /// The root element path, taken from the first row.
    pub fn root_path(&self) -> Option<&str> {
        self.elements
            .first()
            .and_then(|e| e.element.path.as_deref())
    }
}

/// A row of the Extensions tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionElement {
    #[serde(flatten)]
    pub element: ElementFields,
    pub code: Option<String>,
    pub context_type: Option<String>,
    pub context: Option<String>,
}

impl ExtensionElement {
    /// Whether this row defines a part of another extension
    /// (`parent.child` codes).
    pub fn is_nested(&self) -> bool {
        self.code.as_deref().is_some_and(|c| c.contains('.'))
    }
}
