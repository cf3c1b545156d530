//! Tab schema definitions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::{FieldSpec, RequirementLevel};

/// How a tab lays out its fields.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldLayout {
    /// Field names are column headers; each row is a record.
    Columns,
    /// Each row is a (field name, value) pair; the whole tab is one record.
    NameValueRows,
}

/// Whether a tab may, or must, appear in a workbook of a given kind.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TabAllowance {
    NotAllowed,
    Allowed,
    Required,
}

/// What a workbook describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WorkbookKind {
    DataType,
    Resource,
    Profile,
}

impl std::fmt::Display for WorkbookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            WorkbookKind::DataType => "data type",
            WorkbookKind::Resource => "resource",
            WorkbookKind::Profile => "profile",
        };
        f.write_str(label)
    }
}

impl FromStr for WorkbookKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "datatype" => Ok(WorkbookKind::DataType),
            "resource" => Ok(WorkbookKind::Resource),
            "profile" => Ok(WorkbookKind::Profile),
            other => Err(format!(
                "unknown workbook kind '{}' (expected data-type, resource or profile)",
                other
            )),
        }
    }
}

/// Allowance of a tab per workbook kind.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Applicability {
    pub profile: TabAllowance,
    pub resource: TabAllowance,
    pub data_type: TabAllowance,
}

impl Applicability {
    pub const fn new(profile: TabAllowance, resource: TabAllowance, data_type: TabAllowance) -> Self {
        Self {
            profile,
            resource,
            data_type,
        }
    }

    pub const fn everywhere() -> Self {
        Self::new(TabAllowance::Allowed, TabAllowance::Allowed, TabAllowance::Allowed)
    }

    pub fn for_kind(&self, kind: WorkbookKind) -> TabAllowance {
        match kind {
            WorkbookKind::Profile => self.profile,
            WorkbookKind::Resource => self.resource,
            WorkbookKind::DataType => self.data_type,
        }
    }
}

/// The record type a schema produces.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    Bindings,
    CodeList,
    DataElements,
    Events,
    Examples,
    Extensions,
    Invariants,
    Metadata,
    Operations,
    Packages,
    Profiles,
    Search,
    Structure,
}

/// A known tab layout: its fields and where it may appear.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TabSchema {
    pub name: &'static str,
    pub kind: SchemaKind,
    pub layout: FieldLayout,
    pub applicability: Applicability,
    pub fields: Vec<FieldSpec>,
    pub description: &'static str,
}

impl TabSchema {
    pub fn new(name: &'static str, kind: SchemaKind, layout: FieldLayout) -> Self {
        Self {
            name,
            kind,
            layout,
            applicability: Applicability::everywhere(),
            fields: Vec::new(),
            description: "",
        }
    }

    pub fn allowed(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields<I: IntoIterator<Item = FieldSpec>>(mut self, fields: I) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Look up a field by its declared name.
    pub fn field_named(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The field a column header belongs to, preferring exact names over
    /// wildcard patterns.
    pub fn field_for_column(&self, column: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| !f.is_wildcard() && f.matches(column))
            .or_else(|| self.fields.iter().find(|f| f.is_wildcard() && f.matches(column)))
    }

    pub fn declares_column(&self, column: &str) -> bool {
        self.field_for_column(column).is_some()
    }

    pub fn fields_at(&self, level: RequirementLevel) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.level == level)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields_at(RequirementLevel::Required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TabSchema {
        TabSchema::new("CodeList", SchemaKind::CodeList, FieldLayout::Columns)
            .field(FieldSpec::required("Code"))
            .field(FieldSpec::optional("Display"))
            .field(FieldSpec::optional("Display:*"))
    }

    #[test]
    fn test_field_for_column_prefers_exact() {
        let schema = sample();
        assert_eq!(schema.field_for_column("Display").unwrap().name, "Display");
        assert_eq!(schema.field_for_column("Display:fr").unwrap().name, "Display:*");
        assert!(schema.field_for_column("Comments").is_none());
    }

    #[test]
    fn test_required_fields() {
        let schema = sample();
        let names: Vec<_> = schema.required_fields().map(|f| f.name).collect();
        assert_eq!(names, vec!["Code"]);
    }

    #[test]
    fn test_workbook_kind_from_str() {
        assert_eq!("data-type".parse::<WorkbookKind>(), Ok(WorkbookKind::DataType));
        assert_eq!("DataType".parse::<WorkbookKind>(), Ok(WorkbookKind::DataType));
        assert_eq!("profile".parse::<WorkbookKind>(), Ok(WorkbookKind::Profile));
        assert!("widget".parse::<WorkbookKind>().is_err());
    }

    #[test]
    fn test_applicability_for_kind() {
        let applicability = Applicability::new(
            TabAllowance::Required,
            TabAllowance::NotAllowed,
            TabAllowance::NotAllowed,
        );
        assert_eq!(applicability.for_kind(WorkbookKind::Profile), TabAllowance::Required);
        assert_eq!(applicability.for_kind(WorkbookKind::Resource), TabAllowance::NotAllowed);
    }
}
