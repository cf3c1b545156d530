//! Plain one-record-per-row tabs.

use specsheet_schema::Row;

use super::cells::is_blank;
use super::TabBuild;
use crate::records::{
    Binding, CodeListEntry, DisplayTranslation, Example, Invariant, Package, ProfileEntry,
    SearchParameter, SEARCH_TYPES,
};

pub(super) fn bindings(build: &mut TabBuild<'_>) -> Vec<Binding> {
    build.each_row(|reader| Binding {
        name: reader.text("Binding Name"),
        definition: reader.text("Definition"),
        binding: reader.text("Binding"),
        is_example: reader.flag("Example").unwrap_or(false),
        conformance: reader.text("Conformance"),
        is_extensible: reader.flag("Extensible").unwrap_or(false),
        reference: reader.text("Reference"),
        description: reader.text("Description"),
        oid: reader.text("OID"),
        uri: reader.url("URI"),
        contact: reader.text("Website/Email"),
        copyright: reader.text("Copyright"),
        v2: reader.text("v2"),
        v3: reader.text("v3"),
        committee_notes: reader.text("Committee Notes"),
    })
}

pub(super) fn code_list(build: &mut TabBuild<'_>) -> Vec<CodeListEntry> {
    let schema = build.schema;
    let translations = schema.field_named("Display:*");
    build.each_row(|reader| CodeListEntry {
        code: reader.text("Code"),
        id: reader.text("Id"),
        system: reader.text("System"),
        parent: reader.text("Parent"),
        display: reader.text("Display"),
        definition: reader.text("Definition"),
        v2: reader.text("V2"),
        v3: reader.text("V3"),
        committee_notes: reader.text("Committee Notes"),
        translations: translations
            .map(|field| reader.wildcard(field))
            .unwrap_or_default()
            .into_iter()
            .map(|(language, display)| DisplayTranslation { language, display })
            .collect(),
    })
}

pub(super) fn events(build: &TabBuild<'_>) -> Vec<Row> {
    build
        .sheet
        .rows
        .iter()
        .filter(|row| !is_blank(row))
        .cloned()
        .collect()
}

pub(super) fn examples(build: &mut TabBuild<'_>) -> Vec<Example> {
    build.each_row(|reader| Example {
        name: reader.text("Name"),
        example_type: reader.text("Type"),
        description: reader.text("Description"),
        identity: reader.text("Identity"),
        source: reader.text("Source"),
        profile: reader.text("Profile"),
        in_book: reader.flag("In Book"),
    })
}

pub(super) fn invariants(build: &mut TabBuild<'_>) -> Vec<Invariant> {
    build.each_row(|reader| Invariant {
        id: reader.text("Id"),
        name: reader.text("Name"),
        severity: reader.text("Severity"),
        context: reader.text("Context"),
        english: reader.text("English"),
        explanation: reader.text("Explanation"),
        expression: reader.text("Expression"),
        xpath: reader.text("XPath"),
        ocl: reader.text("OCL"),
        rdf: reader.text("RDF"),
    })
}

pub(super) fn packages(build: &mut TabBuild<'_>) -> Vec<Package> {
    build.each_row(|reader| Package {
        name: reader.text("Name"),
        filename: reader.text("Filename"),
        source: reader.text("Source"),
        package_type: reader.text("Type"),
        ig_name: reader.text("IG Name"),
    })
}

pub(super) fn profiles(build: &mut TabBuild<'_>) -> Vec<ProfileEntry> {
    build.each_row(|reader| ProfileEntry {
        name: reader.text("Name"),
        description: reader.text("Description"),
        filename: reader.text("Filename"),
        source: reader.text("Source"),
        definition_type: reader.text("Type"),
        ig_name: reader.text("IGName"),
    })
}

pub(super) fn search(build: &mut TabBuild<'_>) -> Vec<SearchParameter> {
    build.each_row(|reader| {
        let search_type = reader.text("Type");
        if let Some(t) = search_type.as_deref() {
            if !SEARCH_TYPES.contains(&t) {
                reader.reject("Type", t, "not a search parameter type");
            }
        }
        SearchParameter {
            name: reader.text("Name"),
            search_type,
            target_types: reader.list("Target Types", ','),
            path: reader.text("Path"),
            description: reader.text("Description"),
        }
    })
}
