//! Element-definition tabs: Data Elements, profile structures, Extensions.

use specsheet_schema::TabSchema;

use super::cells::RowReader;
use super::TabBuild;
use crate::records::{DataElement, ElementFields, ExtensionElement, StructureElement};

fn element_fields(reader: &mut RowReader<'_>, schema: &TabSchema) -> ElementFields {
    ElementFields {
        path: reader.text("Element"),
        aliases: reader.list("Aliases", ','),
        cardinality: reader.cardinality("Card."),
        invariant_refs: reader.list("Inv.", ','),
        type_expression: reader.text("Type"),
        is_modifier: reader.flag("Is Modifier"),
        modifier_reason: reader.text("Modifier Reason"),
        binding: reader.text("Binding"),
        example: reader.text("Example"),
        default_value: reader.text("Default Value"),
        missing_meaning: reader.text("Missing Meaning"),
        short_label: reader.text("Short Label"),
        definition: reader.text("Definition"),
        requirements: reader.text("Requirements"),
        comments: reader.text("Comments"),
        to_do: reader.text("To Do"),
        rim_mapping: reader.text("RIM Mapping"),
        v2_mapping: reader.text("v2 Mapping"),
        other_mappings: reader.other_mappings(schema),
        display_hint: reader.text("Display Hint"),
        committee_notes: reader.text("Committee Notes"),
        five_ws: reader.text("w5"),
    }
}

pub(super) fn data_elements(build: &mut TabBuild<'_>) -> Vec<DataElement> {
    let schema = build.schema;
    build.each_row(|reader| DataElement {
        element: element_fields(reader, schema),
        summary: reader.flag("Summary"),
        regex: reader.text("Regex"),
        uml: reader.text("UML"),
    })
}

pub(super) fn structure(build: &mut TabBuild<'_>) -> Vec<StructureElement> {
    let schema = build.schema;
    build.each_row(|reader| StructureElement {
        element: element_fields(reader, schema),
        profile_name: reader.text("Profile Name"),
        discriminator: reader.text("Discriminator"),
        slice_description: reader.text("Slice Description"),
        must_support: reader.flag("Must Support"),
        fixed_value: reader.text("Value"),
        pattern: reader.text("Pattern"),
        max_length: reader.count("Max Length"),
    })
}

pub(super) fn extensions(build: &mut TabBuild<'_>) -> Vec<ExtensionElement> {
    let schema = build.schema;
    build.each_row(|reader| ExtensionElement {
        element: element_fields(reader, schema),
        code: reader.text("Code"),
        context_type: reader.text("Context Type"),
        context: reader.text("Context"),
    })
}
