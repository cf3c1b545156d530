//! Record builder: turns the rows of a classified tab into typed records.
//!
//! Field problems never abort a tab. Each row still yields a record, with
//! the offending field left unset, and the problem is reported as a
//! [`RecordIssue`] next to the records.

mod cells;
mod elements;
mod metadata;
mod operations;
mod tables;

use serde::Serialize;
use specsheet_schema::{FieldLayout, Row, SchemaKind, TabSchema, TabularSheet};
use tracing::debug;

use crate::error::{CoreResult, FieldError};
use crate::records::{
    Binding, CodeListEntry, DataElement, Example, ExtensionElement, Invariant, Metadata, Operation,
    Package, ProfileEntry, SearchParameter, Structure,
};

pub use cells::{parse_date, parse_flag, split_list, OTHER_MAPPING_SUFFIX};

use cells::RowReader;

/// A field problem found while building a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    pub tab: String,
    /// Zero-based row index within the tab, when the problem belongs to a row.
    pub row: Option<usize>,
    pub error: FieldError,
}

impl RecordIssue {
    pub fn new(tab: impl Into<String>, row: Option<usize>, error: FieldError) -> Self {
        Self {
            tab: tab.into(),
            row,
            error,
        }
    }
}

impl std::fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(f, "{} row {}: {}", self.tab, row, self.error),
            None => write!(f, "{}: {}", self.tab, self.error),
        }
    }
}

/// Records of one tab, by schema kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "records")]
pub enum TypedRecords {
    Bindings(Vec<Binding>),
    CodeList(Vec<CodeListEntry>),
    DataElements(Vec<DataElement>),
    Events(Vec<Row>),
    Examples(Vec<Example>),
    Extensions(Vec<ExtensionElement>),
    Invariants(Vec<Invariant>),
    Metadata(Metadata),
    Operations(Vec<Operation>),
    Packages(Vec<Package>),
    Profiles(Vec<ProfileEntry>),
    Search(Vec<SearchParameter>),
    Structure(Structure),
}

impl TypedRecords {
    /// Number of records; name/value tabs count as one.
    pub fn len(&self) -> usize {
        match self {
            TypedRecords::Bindings(r) => r.len(),
            TypedRecords::CodeList(r) => r.len(),
            TypedRecords::DataElements(r) => r.len(),
            TypedRecords::Events(r) => r.len(),
            TypedRecords::Examples(r) => r.len(),
            TypedRecords::Extensions(r) => r.len(),
            TypedRecords::Invariants(r) => r.len(),
            TypedRecords::Metadata(_) => 1,
            TypedRecords::Operations(r) => r.len(),
            TypedRecords::Packages(r) => r.len(),
            TypedRecords::Profiles(r) => r.len(),
            TypedRecords::Search(r) => r.len(),
            TypedRecords::Structure(s) => s.elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of building one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltTab {
    pub records: TypedRecords,
    pub issues: Vec<RecordIssue>,
}

impl BuiltTab {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Per-tab build state: the sheet being read and the issues found so far.
pub(crate) struct TabBuild<'s> {
    sheet: &'s TabularSheet,
    schema: &'s TabSchema,
    issues: Vec<RecordIssue>,
}

impl<'s> TabBuild<'s> {
    fn new(sheet: &'s TabularSheet, schema: &'s TabSchema) -> Self {
        Self {
            sheet,
            schema,
            issues: Vec::new(),
        }
    }

    /// Non-blank rows with their zero-based index.
    fn rows(&self) -> impl Iterator<Item = (usize, &'s Row)> {
        self.sheet
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !cells::is_blank(row))
    }

    /// Read every non-blank row into one record, then check the schema's
    /// requirement levels for it.
    fn each_row<T>(&mut self, mut read: impl FnMut(&mut RowReader<'s>) -> T) -> Vec<T> {
        let mut records = Vec::new();
        for (index, row) in self.rows() {
            let mut reader = RowReader::new(self.sheet, row);
            records.push(read(&mut reader));
            self.record_errors(Some(index), reader.finish(self.schema));
        }
        records
    }

    fn record_errors(&mut self, row: Option<usize>, errors: Vec<FieldError>) {
        let tab = &self.sheet.name;
        self.issues
            .extend(errors.into_iter().map(|e| RecordIssue::new(tab.clone(), row, e)));
    }

    fn finish(self, records: TypedRecords) -> BuiltTab {
        BuiltTab {
            records,
            issues: self.issues,
        }
    }
}

/// Builds typed records for a tab that has been classified as known.
pub struct RecordBuilder;

impl RecordBuilder {
    /// Build the records of `sheet` according to `schema`.
    ///
    /// Fails only when the sheet itself is malformed.
    pub fn build(sheet: &TabularSheet, schema: &TabSchema) -> CoreResult<BuiltTab> {
        sheet.validate()?;
        debug!("Building tab '{}' as {}", sheet.name, schema.name);

        let mut build = TabBuild::new(sheet, schema);
        let records = match (schema.kind, schema.layout) {
            (SchemaKind::Metadata, _) | (_, FieldLayout::NameValueRows) => {
                TypedRecords::Metadata(metadata::build(&mut build))
            }
            (SchemaKind::Bindings, _) => TypedRecords::Bindings(tables::bindings(&mut build)),
            (SchemaKind::CodeList, _) => TypedRecords::CodeList(tables::code_list(&mut build)),
            (SchemaKind::DataElements, _) => {
                TypedRecords::DataElements(elements::data_elements(&mut build))
            }
            (SchemaKind::Events, _) => TypedRecords::Events(tables::events(&build)),
            (SchemaKind::Examples, _) => TypedRecords::Examples(tables::examples(&mut build)),
            (SchemaKind::Extensions, _) => {
                TypedRecords::Extensions(elements::extensions(&mut build))
            }
            (SchemaKind::Invariants, _) => {
                TypedRecords::Invariants(tables::invariants(&mut build))
            }
            (SchemaKind::Operations, _) => {
                TypedRecords::Operations(operations::build(&mut build))
            }
            (SchemaKind::Packages, _) => TypedRecords::Packages(tables::packages(&mut build)),
            (SchemaKind::Profiles, _) => TypedRecords::Profiles(tables::profiles(&mut build)),
            (SchemaKind::Search, _) => TypedRecords::Search(tables::search(&mut build)),
            (SchemaKind::Structure, _) => TypedRecords::Structure(Structure {
                name: sheet.name.clone(),
                elements: elements::structure(&mut build),
            }),
        };

        let built = build.finish(records);
        debug!(
            "Tab '{}': {} record(s), {} issue(s)",
            sheet.name,
            built.records.len(),
            built.issues.len()
        );
        Ok(built)
    }
}
