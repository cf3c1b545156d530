//! Integration tests for workbook assembly.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tempfile::tempdir;

use serde_json::{json, Value};
use specsheet_core::{
    DocumentSource, FieldError, FileDocumentSource, RecordBuilder, SheetConfig,
    TabClassification, TabClassifier, WorkbookAssembler, WorkbookModel,
};
use specsheet_schema::{
    FieldLayout, SchemaKind, SchemaRegistry, TabularDocument, TabularSheet, ValueShape,
    WorkbookKind,
};

fn profile_document() -> TabularDocument {
    TabularDocument::new("patient-clinical")
        .with_sheet(
            TabularSheet::new("Metadata")
                .with_columns(["Name", "Value"])
                .with_row([("Name", "id"), ("Value", "patient-clinical")])
                .with_row([("Name", "name"), ("Value", "Clinical Patient")])
                .with_row([("Name", "name.author"), ("Value", "Patient Administration")])
                .with_row([("Name", "description"), ("Value", "Clinical extras")])
                .with_row([("Name", "status"), ("Value", "draft")])
                .with_row([("Name", "date"), ("Value", "2020-01-02")])
                .with_row([("Name", "published.structure"), ("Value", "PatientClinical")])
                .with_row([("Name", "extension.uri"), ("Value", "http://hl7.org/fhir/ext")])
                .with_row([("Name", "code"), ("Value", "XYZ")]),
        )
        .with_sheet(
            TabularSheet::new("PatientClinical")
                .with_columns(["Element", "Card.", "Type", "Definition", "Must Support"])
                .with_row([("Element", "Patient"), ("Card.", "1..1"), ("Definition", "Patient")])
                .with_row([
                    ("Element", "Patient.birthDate"),
                    ("Card.", "1..1"),
                    ("Type", "date"),
                    ("Definition", "Date of birth"),
                    ("Must Support", "Y"),
                ]),
        )
        .with_sheet(
            TabularSheet::new("Patient-Inv")
                .with_columns(["Id", "Name", "Severity", "Context", "English", "Expression"])
                .with_row([
                    ("Id", "pc-1"),
                    ("Name", "Birth date"),
                    ("Severity", "Rule"),
                    ("Context", "Patient"),
                    ("Expression", "birthDate.exists()"),
                ]),
        )
        .with_sheet(
            TabularSheet::new("Notes-Inv").with_columns(["Id", "Name", "Severity", "Context"]),
        )
        .with_sheet(
            TabularSheet::new("clinical-status")
                .with_columns(["Code", "Id", "Display:es"])
                .with_row([("Code", "active"), ("Id", "1"), ("Display:es", "Activo")]),
        )
        .with_sheet(TabularSheet::new("Removed Elements").with_columns(["Element"]))
        .with_sheet(
            TabularSheet::new("patient-search")
                .with_columns(["Name", "Type", "Path"])
                .with_row([("Name", "birthdate"), ("Type", "date"), ("Path", "Patient.birthDate")]),
        )
}

fn assemble(document: &TabularDocument) -> WorkbookModel {
    let registry = SchemaRegistry::register();
    let config = SheetConfig::default();
    WorkbookAssembler::new(&registry, &config)
        .unwrap()
        .assemble(document)
        .unwrap()
}

#[test]
fn test_profile_workbook_end_to_end() {
    let model = assemble(&profile_document());

    assert_eq!(model.kind, WorkbookKind::Profile);
    assert_eq!(model.schema_of("PatientClinical"), Some("Structure"));
    assert_eq!(model.schema_of("Patient-Inv"), Some("Invariants"));
    assert_eq!(model.schema_of("clinical-status"), Some("CodeList"));
    assert_eq!(model.schema_of("patient-search"), Some("Search"));
    assert!(model.unknown_tabs.contains("Notes-Inv"));
    assert!(model.ignored_tabs.contains("Removed Elements"));

    let structure = &model.structures["PatientClinical"];
    assert_eq!(structure.elements.len(), 2);
    assert_eq!(structure.elements[1].must_support, Some(true));
    assert_eq!(model.invariants["Patient-Inv"][0].id.as_deref(), Some("pc-1"));
    assert_eq!(
        model.code_lists["clinical-status"][0].translation("es"),
        Some("Activo")
    );
    assert_eq!(model.search_parameters["patient-search"].len(), 1);

    let metadata = model.metadata.as_ref().unwrap();
    assert!(metadata.publishes("PatientClinical"));

    let errors: Vec<_> = model.diagnostics.issues.iter().map(|i| &i.error).collect();
    assert_eq!(errors, vec![&FieldError::prohibited("code")]);
    assert!(model.diagnostics.applicability.is_empty());
}

#[test]
fn test_classification_partitions_tab_names() {
    let document = profile_document();
    let model = assemble(&document);

    let all: BTreeSet<String> = document.tab_names().map(str::to_string).collect();
    let union: BTreeSet<String> = model
        .known_tabs
        .iter()
        .chain(&model.unknown_tabs)
        .chain(&model.ignored_tabs)
        .cloned()
        .collect();

    assert_eq!(union, all);
    assert_eq!(
        model.known_tabs.len() + model.unknown_tabs.len() + model.ignored_tabs.len(),
        all.len()
    );
}

#[test]
fn test_assembly_is_idempotent() {
    let document = profile_document();
    assert_eq!(assemble(&document), assemble(&document));
}

#[test]
fn test_ignore_list_beats_exact_name() {
    let registry = SchemaRegistry::register();
    let config = SheetConfig {
        ignored_tabs: vec!["Bindings".to_string()],
        ignored_tab_patterns: vec![r"Scratch.*".to_string()],
        ..SheetConfig::default()
    };
    let ignore = config.ignore_list().unwrap();
    let classifier = TabClassifier::new(&registry, &ignore);

    assert_eq!(
        classifier.classify(&TabularSheet::new("Bindings")),
        Some(TabClassification::Ignored)
    );
    assert_eq!(
        classifier.classify(&TabularSheet::new("Scratch 2")),
        Some(TabClassification::Ignored)
    );
}

#[test]
fn test_load_and_assemble_from_file() {
    let dir = tempdir().unwrap();
    let datatypes = dir.path().join("source").join("datatypes");
    fs::create_dir_all(&datatypes).unwrap();
    let path = datatypes.join("quantity-spreadsheet.yaml");
    fs::write(
        &path,
        r#"
name: quantity
sheets:
  - name: Data Elements
    columns: [Element, Card., Definition]
    rows:
      - {Element: Quantity, Card.: "1..1", Definition: A measured amount}
      - {Element: Quantity.value, Definition: Numerical value}
  - name: Packages
    columns: [Name, Filename, Type, IG Name]
    rows:
      - {Name: core, Filename: quantity.xml, Type: spreadsheet, IG Name: core}
"#,
    )
    .unwrap();

    let registry = SchemaRegistry::register();
    let config = SheetConfig::default();
    let assembler = WorkbookAssembler::new(&registry, &config).unwrap();
    let model = assembler
        .assemble_from(&FileDocumentSource::new(), &path)
        .unwrap();

    assert_eq!(model.kind, WorkbookKind::DataType);
    let elements = model.data_elements.as_ref().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[1].element.cardinality.as_str(), "0..*");
    assert_eq!(model.diagnostics.issues.len(), 1);
    assert_eq!(model.diagnostics.issues[0].row, Some(1));
    assert_eq!(model.diagnostics.issues[0].error, FieldError::missing("Card."));
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken-spreadsheet.json");
    fs::write(
        &path,
        r#"{"name": "broken", "sheets": [{"name": "Events", "columns": ["A", "A"]}]}"#,
    )
    .unwrap();

    let document = FileDocumentSource::new().load(Path::new(&path)).unwrap();
    let registry = SchemaRegistry::register();
    let config = SheetConfig::default();
    let err = WorkbookAssembler::new(&registry, &config)
        .unwrap()
        .assemble(&document)
        .unwrap_err();
    assert!(err.is_malformed());
}

fn count_matching(value: &Value, wanted: &Value) -> usize {
    let nested = match value {
        Value::Array(items) => items.iter().map(|v| count_matching(v, wanted)).sum(),
        Value::Object(fields) => fields.values().map(|v| count_matching(v, wanted)).sum(),
        _ => 0,
    };
    nested + usize::from(value == wanted)
}

#[test]
fn test_catalog_shapes_match_builders() {
    let registry = SchemaRegistry::register();
    let list = json!(["alpha", "beta"]);

    for schema in registry.schemas().filter(|s| s.layout == FieldLayout::Columns) {
        let columns: Vec<&str> = schema
            .fields
            .iter()
            .filter(|f| !f.is_wildcard())
            .map(|f| f.name)
            .collect();
        let parsed: BTreeSet<&str> = schema
            .fields
            .iter()
            .filter(|f| {
                matches!(
                    f.shape,
                    ValueShape::Flag | ValueShape::Count | ValueShape::Uri | ValueShape::Cardinality
                )
            })
            .map(|f| f.name)
            .collect();
        let lists: Vec<&str> = schema
            .fields
            .iter()
            .filter(|f| matches!(f.shape, ValueShape::List(',')))
            .map(|f| f.name)
            .collect();

        let mut cells: Vec<(&str, &str)> = parsed.iter().map(|c| (*c, "not valid")).collect();
        cells.extend(lists.iter().map(|c| (*c, "alpha, beta")));
        if schema.kind == SchemaKind::Operations {
            // Min and Profile are only read on parameter rows.
            cells.push(("Name", "lookup.input"));
        }
        let sheet = TabularSheet::new(schema.name)
            .with_columns(columns)
            .with_row(cells);
        let built = RecordBuilder::build(&sheet, schema).unwrap();

        let rejected: BTreeSet<&str> = built
            .issues
            .iter()
            .filter_map(|issue| match &issue.error {
                FieldError::InvalidValue { field, .. } => Some(field.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(rejected, parsed, "{}", schema.name);

        let records = serde_json::to_value(&built.records).unwrap();
        assert_eq!(count_matching(&records, &list), lists.len(), "{}", schema.name);
    }
}
