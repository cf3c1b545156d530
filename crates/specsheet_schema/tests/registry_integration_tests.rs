//! Integration tests for the schema registry and compatibility checks.

use specsheet_schema::{
    catalog, is_compatible, missing_required, FieldLayout, SchemaKind, SchemaRegistry,
    TabAllowance, TabNamePattern, TabularDocument, TabularSheet, WorkbookKind,
};

/// Canonical names resolve no matter how the columns look.
#[test]
fn test_every_exact_name_resolves() {
    let registry = SchemaRegistry::register();

    for name in registry.exact_names() {
        let schema = registry.lookup_by_name(name).unwrap();
        assert_eq!(schema.name, *name);
    }
    assert_eq!(registry.exact_names().len(), 11);
    assert_eq!(registry.len(), 13);
}

/// The first pattern whose name test matches is not necessarily the winner:
/// the columns have to fit as well.
#[test]
fn test_pattern_and_columns_together() {
    let registry = SchemaRegistry::register();
    let with_expression = TabularSheet::new("Patient-Inv")
        .with_columns(["Expression", "Context", "Severity", "Name", "Id"]);
    let without_expression =
        TabularSheet::new("Patient-Inv").with_columns(["Id", "Name", "Severity", "Context"]);

    let first_fit = |sheet: &TabularSheet| {
        registry
            .pattern_schemas()
            .find(|p| p.pattern.matches(&sheet.name) && is_compatible(sheet, p.schema))
            .map(|p| p.schema.kind)
    };

    assert_eq!(first_fit(&with_expression), Some(SchemaKind::Invariants));
    assert_eq!(first_fit(&without_expression), None);
}

#[test]
fn test_code_list_needs_only_code() {
    let registry = SchemaRegistry::register();
    let sheet = TabularSheet::new("medication-status").with_columns(["Code", "Id"]);
    let code_list = registry.get_required(catalog::CODE_LIST).unwrap();

    assert!(TabNamePattern::LeadingLowercase.matches(&sheet.name));
    assert!(is_compatible(&sheet, code_list));
    assert!(missing_required(&sheet, code_list).is_empty());
}

#[test]
fn test_missing_required_lists_structure_fields() {
    let registry = SchemaRegistry::register();
    let structure = registry.get_required(catalog::STRUCTURE).unwrap();
    let sheet = TabularSheet::new("PatientClinical").with_columns(["Element", "Short Label"]);

    let missing: Vec<_> = missing_required(&sheet, structure).iter().map(|f| f.name).collect();
    assert_eq!(missing, vec!["Card.", "Definition"]);
}

#[test]
fn test_applicability_table() {
    let registry = SchemaRegistry::register();
    let allowance = |name: &str, kind| {
        registry
            .get_required(name)
            .unwrap()
            .applicability
            .for_kind(kind)
    };

    assert_eq!(allowance(catalog::METADATA, WorkbookKind::Profile), TabAllowance::Required);
    assert_eq!(allowance(catalog::METADATA, WorkbookKind::Resource), TabAllowance::NotAllowed);
    assert_eq!(allowance(catalog::DATA_ELEMENTS, WorkbookKind::DataType), TabAllowance::Required);
    assert_eq!(allowance(catalog::STRUCTURE, WorkbookKind::Profile), TabAllowance::Allowed);
    assert_eq!(allowance(catalog::BINDINGS, WorkbookKind::Resource), TabAllowance::Allowed);
    assert_eq!(
        registry.get_required(catalog::METADATA).unwrap().layout,
        FieldLayout::NameValueRows
    );
}

#[test]
fn test_document_from_json() {
    let json = r#"{
        "name": "patient",
        "sheets": [
            {"name": "Bindings", "columns": ["Binding Name", "Definition"],
             "rows": [{"Binding Name": "Gender", "Definition": "Administrative gender"}]},
            {"name": "", "columns": []}
        ]
    }"#;
    let document: TabularDocument = serde_json::from_str(json).unwrap();

    assert!(document.validate().is_ok());
    assert_eq!(document.tab_names().collect::<Vec<_>>(), vec!["Bindings"]);
    assert_eq!(
        document.sheet("Bindings").and_then(|s| s.cell(0, "Definition")),
        Some("Administrative gender")
    );
}

#[test]
fn test_undeclared_cell_is_malformed() {
    let document = TabularDocument::new("bad").with_sheet(
        TabularSheet::new("Bindings")
            .with_columns(["Binding Name"])
            .with_row([("Binding Nmae", "typo")]),
    );
    assert!(document.validate().is_err());
}
