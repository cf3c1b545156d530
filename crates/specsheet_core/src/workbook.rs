//! Workbook assembly.
//!
//! [`WorkbookAssembler`] classifies every tab of a document, builds the
//! records of each known tab and folds them into one [`WorkbookModel`].
//! Nothing is checked across tabs (binding names are not resolved against
//! the Bindings tab, for instance); the only workbook-level checks are
//! whether each tab is allowed for the workbook's kind.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use specsheet_schema::{
    catalog, Row, SchemaRegistry, TabAllowance, TabSchema, TabularDocument, TabularSheet,
    WorkbookKind,
};
use tracing::{debug, info, warn};

use crate::builder::{RecordBuilder, RecordIssue, TypedRecords, OTHER_MAPPING_SUFFIX};
use crate::classifier::{TabClassification, TabClassifier};
use crate::config::{IgnoreList, SheetConfig};
use crate::error::CoreResult;
use crate::records::{
    Binding, CodeListEntry, DataElement, Example, ExtensionElement, Invariant, Metadata, Operation,
    Package, ProfileEntry, SearchParameter, Structure,
};
use crate::source::DocumentSource;

/// Directory name that marks a workbook as a data type definition.
pub const DATATYPES_DIR: &str = "datatypes";

/// Column width of the tab table.
const TAB_TABLE_WIDTH: usize = 43;

/// A tab that is present or missing against its schema's applicability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ApplicabilityWarning {
    TabNotAllowed {
        tab: String,
        schema: String,
        workbook_kind: WorkbookKind,
    },
    RequiredTabMissing {
        schema: String,
        workbook_kind: WorkbookKind,
    },
}

impl std::fmt::Display for ApplicabilityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicabilityWarning::TabNotAllowed {
                tab,
                schema,
                workbook_kind,
            } => write!(
                f,
                "Tab '{}' ({}) is not allowed in a {} workbook",
                tab, schema, workbook_kind
            ),
            ApplicabilityWarning::RequiredTabMissing {
                schema,
                workbook_kind,
            } => write!(f, "A {} workbook requires a {} tab", workbook_kind, schema),
        }
    }
}

/// Non-fatal problems found while assembling a workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub issues: Vec<RecordIssue>,
    pub applicability: Vec<ApplicabilityWarning>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.applicability.is_empty()
    }
}

/// Everything read from one workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbookModel {
    pub name: String,
    pub path: Option<PathBuf>,
    pub kind: WorkbookKind,
    pub maturity_level: u8,
    pub known_tabs: BTreeSet<String>,
    pub unknown_tabs: BTreeSet<String>,
    pub ignored_tabs: BTreeSet<String>,
    /// Schema name of every known tab.
    pub tab_schemas: BTreeMap<String, String>,
    pub metadata: Option<Metadata>,
    pub data_elements: Option<Vec<DataElement>>,
    /// Extra `... Mapping` columns of the Data Elements tab, in column order.
    pub data_element_mapping_columns: Vec<String>,
    pub structures: BTreeMap<String, Structure>,
    pub invariants: BTreeMap<String, Vec<Invariant>>,
    pub bindings: Vec<Binding>,
    pub code_lists: BTreeMap<String, Vec<CodeListEntry>>,
    pub extensions: Vec<ExtensionElement>,
    pub search_parameters: BTreeMap<String, Vec<SearchParameter>>,
    pub operations: Vec<Operation>,
    pub packages: Vec<Package>,
    pub examples: Vec<Example>,
    pub profiles: Vec<ProfileEntry>,
    pub events: Vec<Row>,
    pub diagnostics: Diagnostics,
}

impl WorkbookModel {
    fn new(document: &TabularDocument) -> Self {
        Self {
            name: document.name.clone(),
            path: document.path.clone(),
            kind: WorkbookKind::Resource,
            maturity_level: 0,
            known_tabs: BTreeSet::new(),
            unknown_tabs: BTreeSet::new(),
            ignored_tabs: BTreeSet::new(),
            tab_schemas: BTreeMap::new(),
            metadata: None,
            data_elements: None,
            data_element_mapping_columns: Vec::new(),
            structures: BTreeMap::new(),
            invariants: BTreeMap::new(),
            bindings: Vec::new(),
            code_lists: BTreeMap::new(),
            extensions: Vec::new(),
            search_parameters: BTreeMap::new(),
            operations: Vec::new(),
            packages: Vec::new(),
            examples: Vec::new(),
            profiles: Vec::new(),
            events: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Schema name a known tab was classified as.
    pub fn schema_of(&self, tab: &str) -> Option<&str> {
        self.tab_schemas.get(tab).map(String::as_str)
    }

    pub fn has_unknown_tabs(&self) -> bool {
        !self.unknown_tabs.is_empty()
    }

    /// Known, unknown and ignored tabs side by side, each column sorted.
    pub fn render_tab_table(&self) -> String {
        let columns: [Vec<&str>; 3] = [
            self.known_tabs.iter().map(String::as_str).collect(),
            self.unknown_tabs.iter().map(String::as_str).collect(),
            self.ignored_tabs.iter().map(String::as_str).collect(),
        ];
        let height = columns.iter().map(Vec::len).max().unwrap_or(0);
        let w = TAB_TABLE_WIDTH;

        let mut out = String::new();
        out.push_str(&format!("{:<w$} {:<w$} {:<w$}\n", "Known", "Unknown", "Ignored"));
        out.push_str(&format!("{:-<w$} {:-<w$} {:-<w$}\n", "", "", ""));
        for i in 0..height {
            let cell = |c: usize| columns[c].get(i).copied().unwrap_or("");
            let line = format!("{:<w$} {:<w$} {:<w$}", cell(0), cell(1), cell(2));
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    fn merge(&mut self, sheet: &TabularSheet, schema: &TabSchema, records: TypedRecords) {
        let tab = sheet.name.clone();
        match records {
            TypedRecords::Bindings(r) => self.bindings.extend(r),
            TypedRecords::CodeList(r) => {
                self.code_lists.insert(tab, r);
            }
            TypedRecords::DataElements(r) => {
                self.data_element_mapping_columns = sheet
                    .columns
                    .iter()
                    .filter(|c| c.ends_with(OTHER_MAPPING_SUFFIX) && !schema.declares_column(c))
                    .cloned()
                    .collect();
                self.data_elements = Some(r);
            }
            TypedRecords::Events(r) => self.events.extend(r),
            TypedRecords::Examples(r) => self.examples.extend(r),
            TypedRecords::Extensions(r) => self.extensions.extend(r),
            TypedRecords::Invariants(r) => {
                self.invariants.insert(tab, r);
            }
            TypedRecords::Metadata(m) => self.metadata = Some(m),
            TypedRecords::Operations(r) => self.operations.extend(r),
            TypedRecords::Packages(r) => self.packages.extend(r),
            TypedRecords::Profiles(r) => self.profiles.extend(r),
            TypedRecords::Search(r) => {
                self.search_parameters.insert(tab, r);
            }
            TypedRecords::Structure(s) => {
                self.structures.insert(tab, s);
            }
        }
    }
}

/// Assembles workbooks against a shared registry and configuration.
pub struct WorkbookAssembler<'r> {
    registry: &'r SchemaRegistry,
    config: &'r SheetConfig,
    ignore: IgnoreList,
}

impl<'r> WorkbookAssembler<'r> {
    pub fn new(registry: &'r SchemaRegistry, config: &'r SheetConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            registry,
            config,
            ignore: config.ignore_list()?,
        })
    }

    /// Load a document through `source` and assemble it.
    pub fn assemble_from(&self, source: &dyn DocumentSource, path: &Path) -> CoreResult<WorkbookModel> {
        let document = source.load(path)?;
        self.assemble(&document)
    }

    /// Assemble one document. Fails only when the document is malformed.
    pub fn assemble(&self, document: &TabularDocument) -> CoreResult<WorkbookModel> {
        document.validate()?;
        debug!("Assembling workbook '{}'", document.name);

        let classifier = TabClassifier::new(self.registry, &self.ignore);
        let mut model = WorkbookModel::new(document);

        for sheet in &document.sheets {
            let Some(classification) = classifier.classify(sheet) else {
                continue;
            };
            match classification {
                TabClassification::Ignored => {
                    model.ignored_tabs.insert(sheet.name.clone());
                }
                TabClassification::Unknown => {
                    warn!("Workbook '{}': unknown tab '{}'", document.name, sheet.name);
                    model.unknown_tabs.insert(sheet.name.clone());
                }
                TabClassification::Known(schema) => {
                    let built = RecordBuilder::build(sheet, schema)?;
                    model.known_tabs.insert(sheet.name.clone());
                    model
                        .tab_schemas
                        .insert(sheet.name.clone(), schema.name.to_string());
                    model.diagnostics.issues.extend(built.issues);
                    model.merge(sheet, schema, built.records);
                }
            }
        }

        model.kind = self.workbook_kind(document, &model);
        model.maturity_level = self.config.maturity_level;
        model.diagnostics.applicability = self.check_applicability(&model);
        for warning in &model.diagnostics.applicability {
            warn!("Workbook '{}': {}", model.name, warning);
        }

        info!(
            "Assembled {} workbook '{}': {} known, {} unknown, {} ignored tabs, {} issues",
            model.kind,
            model.name,
            model.known_tabs.len(),
            model.unknown_tabs.len(),
            model.ignored_tabs.len(),
            model.diagnostics.issues.len()
        );

        Ok(model)
    }

    fn workbook_kind(&self, document: &TabularDocument, model: &WorkbookModel) -> WorkbookKind {
        if let Some(kind) = self.config.workbook_kind {
            return kind;
        }
        if model.schema_of(catalog::METADATA) == Some(catalog::METADATA) {
            return WorkbookKind::Profile;
        }
        let in_datatypes = document.path.as_deref().is_some_and(|p| {
            p.components()
                .any(|c| c.as_os_str().eq_ignore_ascii_case(DATATYPES_DIR))
        });
        if in_datatypes {
            WorkbookKind::DataType
        } else {
            WorkbookKind::Resource
        }
    }

    fn check_applicability(&self, model: &WorkbookModel) -> Vec<ApplicabilityWarning> {
        let kind = model.kind;
        let mut warnings = Vec::new();

        for (tab, schema_name) in &model.tab_schemas {
            let Some(schema) = self.registry.schema(schema_name) else {
                continue;
            };
            if schema.applicability.for_kind(kind) == TabAllowance::NotAllowed {
                warnings.push(ApplicabilityWarning::TabNotAllowed {
                    tab: tab.clone(),
                    schema: schema.name.to_string(),
                    workbook_kind: kind,
                });
            }
        }

        for schema in self.registry.schemas() {
            let present = model.tab_schemas.values().any(|s| s == schema.name);
            if schema.applicability.for_kind(kind) == TabAllowance::Required && !present {
                warnings.push(ApplicabilityWarning::RequiredTabMissing {
                    schema: schema.name.to_string(),
                    workbook_kind: kind,
                });
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::source::MockDocumentSource;
    use specsheet_schema::SchemaError;

    fn resource_document() -> TabularDocument {
        TabularDocument::new("patient")
            .with_path("source/patient/patient-spreadsheet.json")
            .with_sheet(
                TabularSheet::new("Data Elements")
                    .with_columns(["Element", "Card.", "Definition", "Committee Mapping"])
                    .with_row([("Element", "Patient"), ("Card.", "1..1"), ("Definition", "A patient")]),
            )
            .with_sheet(
                TabularSheet::new("Packages")
                    .with_columns(["Name", "Filename", "Type", "IG Name"])
                    .with_row([
                        ("Name", "core"),
                        ("Filename", "patient.xml"),
                        ("Type", "spreadsheet"),
                        ("IG Name", "core"),
                    ]),
            )
            .with_sheet(TabularSheet::new("Instructions"))
            .with_sheet(TabularSheet::new(""))
            .with_sheet(TabularSheet::new("Scratch Pad").with_columns(["Note"]))
    }

    fn assemble(document: &TabularDocument, config: &SheetConfig) -> CoreResult<WorkbookModel> {
        let registry = SchemaRegistry::register();
        WorkbookAssembler::new(&registry, config)?.assemble(document)
    }

    #[test]
    fn test_resource_workbook() {
        let model = assemble(&resource_document(), &SheetConfig::default()).unwrap();

        assert_eq!(model.kind, WorkbookKind::Resource);
        assert_eq!(model.known_tabs.len(), 2);
        assert!(model.ignored_tabs.contains("Instructions"));
        assert!(model.unknown_tabs.contains("Scratch Pad"));
        assert_eq!(model.data_elements.as_ref().map(Vec::len), Some(1));
        assert_eq!(model.data_element_mapping_columns, vec!["Committee Mapping"]);
        assert_eq!(model.packages.len(), 1);
        assert!(model.diagnostics.is_empty(), "{:?}", model.diagnostics);
    }

    #[test]
    fn test_datatype_from_path() {
        let document = TabularDocument::new("quantity")
            .with_path("source/datatypes/quantity-spreadsheet.json")
            .with_sheet(TabularSheet::new("Bindings"));
        let model = assemble(&document, &SheetConfig::default()).unwrap();

        assert_eq!(model.kind, WorkbookKind::DataType);
        assert_eq!(
            model.diagnostics.applicability,
            vec![
                ApplicabilityWarning::RequiredTabMissing {
                    schema: "Data Elements".to_string(),
                    workbook_kind: WorkbookKind::DataType,
                },
                ApplicabilityWarning::RequiredTabMissing {
                    schema: "Packages".to_string(),
                    workbook_kind: WorkbookKind::DataType,
                },
            ]
        );
    }

    #[test]
    fn test_metadata_makes_profile() {
        let document = TabularDocument::new("patient-clinical")
            .with_sheet(
                TabularSheet::new("Metadata")
                    .with_columns(["Name", "Value"])
                    .with_row([("Name", "id"), ("Value", "patient-clinical")]),
            )
            .with_sheet(TabularSheet::new("Packages"));
        let model = assemble(&document, &SheetConfig::default()).unwrap();

        assert_eq!(model.kind, WorkbookKind::Profile);
        assert!(model.metadata.is_some());
        assert!(model
            .diagnostics
            .applicability
            .contains(&ApplicabilityWarning::TabNotAllowed {
                tab: "Packages".to_string(),
                schema: "Packages".to_string(),
                workbook_kind: WorkbookKind::Profile,
            }));
        assert!(!model.diagnostics.issues.is_empty());
    }

    #[test]
    fn test_configured_kind_and_maturity() {
        let config = SheetConfig::default()
            .with_workbook_kind(WorkbookKind::Profile)
            .with_maturity_level(3);
        let model = assemble(&resource_document(), &config).unwrap();
        assert_eq!(model.kind, WorkbookKind::Profile);
        assert_eq!(model.maturity_level, 3);
    }

    #[test]
    fn test_duplicate_tab_is_malformed() {
        let document = TabularDocument::new("dup")
            .with_sheet(TabularSheet::new("Bindings"))
            .with_sheet(TabularSheet::new("Bindings"));
        let err = assemble(&document, &SheetConfig::default()).unwrap_err();
        assert!(err.is_malformed());
        assert!(matches!(
            err,
            CoreError::Schema(SchemaError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_tab_table() {
        let model = assemble(&resource_document(), &SheetConfig::default()).unwrap();
        let table = model.render_tab_table();
        let lines: Vec<_> = table.lines().collect();

        assert!(lines[0].starts_with("Known"));
        assert_eq!(lines[1].len(), TAB_TABLE_WIDTH * 3 + 2);
        assert!(lines[2].starts_with("Data Elements"));
        assert!(lines[2].contains("Scratch Pad"));
        assert!(lines[2].ends_with("Instructions"));
        assert_eq!(lines[3].trim(), "Packages");
    }

    #[test]
    fn test_assemble_from_source() {
        let mut source = MockDocumentSource::new();
        source
            .expect_load()
            .times(1)
            .returning(|_| Ok(resource_document()));

        let registry = SchemaRegistry::register();
        let config = SheetConfig::default();
        let assembler = WorkbookAssembler::new(&registry, &config).unwrap();
        let model = assembler
            .assemble_from(&source, Path::new("patient-spreadsheet.json"))
            .unwrap();
        assert_eq!(model.name, "patient");
    }

    #[test]
    fn test_source_error_propagates() {
        let mut source = MockDocumentSource::new();
        source
            .expect_load()
            .returning(|p| Err(CoreError::UnsupportedFormat(p.to_path_buf())));

        let registry = SchemaRegistry::register();
        let config = SheetConfig::default();
        let assembler = WorkbookAssembler::new(&registry, &config).unwrap();
        assert!(matches!(
            assembler.assemble_from(&source, Path::new("patient.xlsx")),
            Err(CoreError::UnsupportedFormat(_))
        ));
    }
}
