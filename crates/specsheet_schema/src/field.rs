//! Field specifications: what a column is called, how strongly it is
//! required, and how its cell text is read.

use serde::Serialize;

/// Trailing marker that turns a field name into a prefix pattern.
pub const WILDCARD: char = '*';

/// Per-field requirement policy.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RequirementLevel {
    Optional,
    /// Required only under conditions that depend on other fields.
    Conditional,
    Required,
    Prohibited,
    Recommended,
}

impl std::fmt::Display for RequirementLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RequirementLevel::Optional => "optional",
            RequirementLevel::Conditional => "conditional",
            RequirementLevel::Required => "required",
            RequirementLevel::Prohibited => "prohibited",
            RequirementLevel::Recommended => "recommended",
        };
        f.pad(label)
    }
}

/// How the text of a cell is interpreted by the record builder.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case", tag = "kind", content = "delimiter")]
pub enum ValueShape {
    #[default]
    Text,
    /// Delimited list; empty segments are dropped.
    List(char),
    /// Y/N style flag.
    Flag,
    /// Non-negative integer.
    Count,
    /// `min..max` with `*` for an unbounded maximum.
    Cardinality,
    Uri,
    Date,
    /// Name-value field that may appear on several rows.
    Repeated,
}

/// A single column (or name-value row label) a tab schema knows about.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub level: RequirementLevel,
    pub display_name: &'static str,
    pub description: &'static str,
    pub shape: ValueShape,
}

impl FieldSpec {
    pub const fn new(name: &'static str, level: RequirementLevel) -> Self {
        Self {
            name,
            level,
            display_name: name,
            description: "",
            shape: ValueShape::Text,
        }
    }

    pub const fn required(name: &'static str) -> Self {
        Self::new(name, RequirementLevel::Required)
    }

    pub const fn optional(name: &'static str) -> Self {
        Self::new(name, RequirementLevel::Optional)
    }

    pub const fn conditional(name: &'static str) -> Self {
        Self::new(name, RequirementLevel::Conditional)
    }

    pub const fn prohibited(name: &'static str) -> Self {
        Self::new(name, RequirementLevel::Prohibited)
    }

    pub const fn recommended(name: &'static str) -> Self {
        Self::new(name, RequirementLevel::Recommended)
    }

    pub const fn display(mut self, display_name: &'static str) -> Self {
        self.display_name = display_name;
        self
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn shape(mut self, shape: ValueShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn is_required(&self) -> bool {
        self.level == RequirementLevel::Required
    }

    pub fn is_wildcard(&self) -> bool {
        self.name.ends_with(WILDCARD)
    }

    /// The fixed part of a wildcard name, or the whole name otherwise.
    pub fn prefix(&self) -> &'static str {
        self.name.strip_suffix(WILDCARD).unwrap_or(self.name)
    }

    /// Whether `column` is a header for this field.
    pub fn matches(&self, column: &str) -> bool {
        if self.is_wildcard() {
            column.starts_with(self.prefix())
        } else {
            column == self.name
        }
    }

    /// For wildcard fields, the part of `column` after the fixed prefix.
    pub fn wildcard_suffix<'c>(&self, column: &'c str) -> Option<&'c str> {
        if self.is_wildcard() {
            column.strip_prefix(self.prefix())
        } else {
            None
        }
    }
}
