//! The literal catalog of tab schemas.
//!
//! Every schema a workbook tab can be recognized as is declared here, with
//! its fields in authoring order. Descriptions are one-line summaries; the
//! long-form authoring guidance lives with the workbook templates.

use crate::field::{FieldSpec, ValueShape};
use crate::schema::{Applicability, FieldLayout, SchemaKind, TabSchema};

use crate::schema::TabAllowance::{Allowed, NotAllowed, Required};

pub const BINDINGS: &str = "Bindings";
pub const CODE_LIST: &str = "CodeList";
pub const DATA_ELEMENTS: &str = "Data Elements";
pub const EVENTS: &str = "Events";
pub const EXAMPLES: &str = "Examples";
pub const EXTENSIONS: &str = "Extensions";
pub const INVARIANTS: &str = "Invariants";
pub const METADATA: &str = "Metadata";
pub const OPERATIONS: &str = "Operations";
pub const PACKAGES: &str = "Packages";
pub const PROFILES: &str = "Profiles";
pub const SEARCH: &str = "Search";
pub const STRUCTURE: &str = "Structure";

/// Fields shared by every element-definition tab (data elements, profile
/// structures and extensions).
pub fn element_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::required("Element")
            .display("Element Name (full-path)")
            .describe("Dot-separated path of the element, prefixed by the resource or type name."),
        FieldSpec::optional("Aliases")
            .shape(ValueShape::List(','))
            .describe("Comma-separated alternate names for the element."),
        FieldSpec::required("Card.")
            .display("Cardinality")
            .shape(ValueShape::Cardinality)
            .describe("Cardinality as min..max, where max may be *."),
        FieldSpec::optional("Inv.")
            .display("Invariant Ids")
            .shape(ValueShape::List(','))
            .describe("Comma-separated ids of invariants that apply to the element."),
        FieldSpec::conditional("Type")
            .display("Element Type")
            .describe("Type expression; required except on the root row and content references."),
        FieldSpec::optional("Is Modifier")
            .shape(ValueShape::Flag)
            .describe("Whether the element modifies the meaning of its parent."),
        FieldSpec::optional("Modifier Reason")
            .describe("Why the element is a modifier."),
        FieldSpec::optional("Binding")
            .describe("Name of the binding on the Bindings tab."),
        FieldSpec::optional("Example").describe("Example value."),
        FieldSpec::optional("Default Value").describe("Value assumed when the element is absent."),
        FieldSpec::optional("Missing Meaning").describe("Meaning of the element being absent."),
        FieldSpec::recommended("Short Label")
            .describe("Short description shown in tables."),
        FieldSpec::required("Definition").describe("Formal definition of the element."),
        FieldSpec::optional("Requirements").describe("Why the element exists."),
        FieldSpec::optional("Comments").describe("Usage notes."),
        FieldSpec::optional("To Do").describe("Open work items for the element."),
        FieldSpec::conditional("RIM Mapping").describe("HL7 v3 RIM mapping."),
        FieldSpec::conditional("v2 Mapping").describe("HL7 v2 mapping."),
        FieldSpec::optional("Display Hint")
            .describe("Semicolon-separated name:value parameters for the narrative generator."),
        FieldSpec::optional("Committee Notes").describe("Work group notes, not published."),
        FieldSpec::conditional("w5")
            .display("Five W's Hint")
            .describe("Five W's classification (who, what, where, when, why)."),
    ]
}

pub fn bindings() -> TabSchema {
    TabSchema::new(BINDINGS, SchemaKind::Bindings, FieldLayout::Columns)
        .describe("Value set bindings referenced from element rows.")
        .fields([
            FieldSpec::required("Binding Name"),
            FieldSpec::required("Definition"),
            FieldSpec::optional("Binding").describe("How the value set is defined."),
            FieldSpec::optional("Example").shape(ValueShape::Flag),
            FieldSpec::optional("Conformance").describe("required, extensible, preferred or example."),
            FieldSpec::optional("Extensible").shape(ValueShape::Flag),
            FieldSpec::optional("Reference").describe("Value set reference or code list tab name."),
            FieldSpec::optional("Description"),
            FieldSpec::optional("OID"),
            FieldSpec::optional("URI").shape(ValueShape::Uri),
            FieldSpec::optional("Website/Email").display("Contact Info Override"),
            FieldSpec::optional("Copyright"),
            FieldSpec::optional("v2").display("V2 Table"),
            FieldSpec::optional("v3").display("V3 Code System"),
            FieldSpec::optional("Committee Notes"),
        ])
}

pub fn code_list() -> TabSchema {
    TabSchema::new(CODE_LIST, SchemaKind::CodeList, FieldLayout::Columns)
        .describe("Codes of an internally defined code system.")
        .fields([
            FieldSpec::required("Code"),
            FieldSpec::optional("Id"),
            FieldSpec::optional("System").display("External System"),
            FieldSpec::optional("Parent"),
            FieldSpec::optional("Display"),
            FieldSpec::conditional("Definition"),
            FieldSpec::optional("V2"),
            FieldSpec::optional("V3"),
            FieldSpec::optional("Committee Notes"),
            FieldSpec::optional("Display:*")
                .display("Display Translations")
                .describe("Translated display, one column per language code after the colon."),
        ])
}

pub fn data_elements() -> TabSchema {
    TabSchema::new(DATA_ELEMENTS, SchemaKind::DataElements, FieldLayout::Columns)
        .allowed(Applicability::new(NotAllowed, Required, Required))
        .describe("Element definitions of a resource or data type.")
        .fields(element_fields())
        .fields([
            FieldSpec::optional("Summary")
                .shape(ValueShape::Flag)
                .describe("Whether the element is part of the summary view."),
            FieldSpec::optional("Regex").display("Validation RegEx"),
            FieldSpec::optional("UML").describe("Diagram placement hint."),
        ])
}

pub fn events() -> TabSchema {
    TabSchema::new(EVENTS, SchemaKind::Events, FieldLayout::Columns)
        .describe("Messaging events; rows are carried verbatim.")
}

pub fn examples() -> TabSchema {
    TabSchema::new(EXAMPLES, SchemaKind::Examples, FieldLayout::Columns)
        .describe("Example instances published with the definition.")
        .fields([
            FieldSpec::required("Name"),
            FieldSpec::required("Type").display("Example Type"),
            FieldSpec::required("Description"),
            FieldSpec::conditional("Identity"),
            FieldSpec::required("Source").display("Filename"),
            FieldSpec::optional("Profile"),
            FieldSpec::optional("In Book").shape(ValueShape::Flag),
        ])
}

pub fn extensions() -> TabSchema {
    TabSchema::new(EXTENSIONS, SchemaKind::Extensions, FieldLayout::Columns)
        .describe("Extension definitions.")
        .fields([
            FieldSpec::optional("Code").describe("Extension code, dot-joined for nested parts."),
            FieldSpec::optional("Context Type"),
            FieldSpec::optional("Context"),
        ])
        .fields(element_fields())
}

pub fn invariants() -> TabSchema {
    TabSchema::new(INVARIANTS, SchemaKind::Invariants, FieldLayout::Columns)
        .describe("Constraints referenced from element rows.")
        .fields([
            FieldSpec::required("Id"),
            FieldSpec::required("Name"),
            FieldSpec::required("Severity"),
            FieldSpec::required("Context"),
            FieldSpec::optional("English").display("Description"),
            FieldSpec::conditional("Explanation"),
            FieldSpec::required("Expression").display("FHIRPath Expression"),
            FieldSpec::optional("XPath"),
            FieldSpec::optional("OCL"),
            FieldSpec::optional("RDF"),
        ])
}

pub fn metadata() -> TabSchema {
    TabSchema::new(METADATA, SchemaKind::Metadata, FieldLayout::NameValueRows)
        .allowed(Applicability::new(Required, NotAllowed, NotAllowed))
        .describe("Profile-level metadata as name/value rows.")
        .fields([
            FieldSpec::required("id").display("Profile ID"),
            FieldSpec::required("name").display("Profile Name"),
            FieldSpec::required("name.author").display("Owning Work Group Name"),
            FieldSpec::optional("name.reference")
                .display("Owning Work Group URL")
                .shape(ValueShape::Uri),
            FieldSpec::prohibited("code"),
            FieldSpec::required("description"),
            FieldSpec::required("status"),
            FieldSpec::required("date").display("Publish Date").shape(ValueShape::Date),
            FieldSpec::conditional("published.structure")
                .display("Published Structure Names")
                .shape(ValueShape::Repeated),
            FieldSpec::prohibited("version"),
            FieldSpec::required("extension.uri")
                .display("Extension URI")
                .shape(ValueShape::Uri),
            FieldSpec::conditional("introduction").display("Introduction Filename"),
            FieldSpec::conditional("notes").display("Notes Filename"),
        ])
}

pub fn operations() -> TabSchema {
    TabSchema::new(OPERATIONS, SchemaKind::Operations, FieldLayout::Columns)
        .describe("Operations and, on the rows after each, their parameters.")
        .fields([
            FieldSpec::required("Name").describe("Operation name, or operation.parameter for parameters."),
            FieldSpec::required("Use").describe("system|type|instance for operations, in|out for parameters."),
            FieldSpec::conditional("Type"),
            FieldSpec::conditional("Title"),
            FieldSpec::conditional("Documentation"),
            FieldSpec::optional("Footer"),
            FieldSpec::conditional("Min").shape(ValueShape::Count),
            FieldSpec::conditional("Max"),
            FieldSpec::optional("Profile").shape(ValueShape::Uri),
        ])
}

pub fn packages() -> TabSchema {
    TabSchema::new(PACKAGES, SchemaKind::Packages, FieldLayout::Columns)
        .allowed(Applicability::new(NotAllowed, Required, Required))
        .describe("Implementation guide packages the definition belongs to.")
        .fields([
            FieldSpec::required("Name"),
            FieldSpec::required("Filename"),
            FieldSpec::optional("Source").display("Source Filename"),
            FieldSpec::required("Type").display("Package Type"),
            FieldSpec::required("IG Name").display("Implementation Guide Name"),
        ])
}

pub fn profiles() -> TabSchema {
    TabSchema::new(PROFILES, SchemaKind::Profiles, FieldLayout::Columns)
        .describe("Profiles defined against this resource.")
        .fields([
            FieldSpec::optional("Name"),
            FieldSpec::optional("Description"),
            FieldSpec::optional("Filename"),
            FieldSpec::optional("Source"),
            FieldSpec::optional("Type").display("Definition Type"),
            FieldSpec::optional("IGName").display("IG Name"),
        ])
}

pub fn search() -> TabSchema {
    TabSchema::new(SEARCH, SchemaKind::Search, FieldLayout::Columns)
        .describe("Search parameters.")
        .fields([
            FieldSpec::required("Name"),
            FieldSpec::required("Type").display("Search Data Type"),
            FieldSpec::conditional("Target Types").shape(ValueShape::List(',')),
            FieldSpec::conditional("Path"),
            FieldSpec::conditional("Description"),
        ])
}

pub fn structure() -> TabSchema {
    TabSchema::new(STRUCTURE, SchemaKind::Structure, FieldLayout::Columns)
        .allowed(Applicability::new(Allowed, NotAllowed, NotAllowed))
        .describe("A constrained structure defined by a profile.")
        .fields([
            FieldSpec::optional("Profile Name").describe("Slice or reusable constraint name."),
            FieldSpec::optional("Discriminator").describe("path|ordered|rules, kept as written."),
            FieldSpec::conditional("Slice Description"),
            FieldSpec::optional("Must Support").shape(ValueShape::Flag),
            FieldSpec::optional("Value").display("Fixed Value"),
            FieldSpec::optional("Pattern"),
            FieldSpec::optional("Max Length").shape(ValueShape::Count),
        ])
        .fields(element_fields())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::RequirementLevel;

    #[test]
    fn test_invariants_required_fields() {
        let schema = invariants();
        let required: Vec<_> = schema.required_fields().map(|f| f.name).collect();
        assert_eq!(required, vec!["Id", "Name", "Severity", "Context", "Expression"]);
    }

    #[test]
    fn test_code_list_only_requires_code() {
        let schema = code_list();
        let required: Vec<_> = schema.required_fields().map(|f| f.name).collect();
        assert_eq!(required, vec!["Code"]);
    }

    #[test]
    fn test_structure_embeds_element_fields() {
        let schema = structure();
        for field in element_fields() {
            assert!(schema.field_named(field.name).is_some(), "missing {}", field.name);
        }
        assert!(schema.field_named("Must Support").is_some());
    }

    #[test]
    fn test_metadata_prohibits_code_and_version() {
        let schema = metadata();
        let prohibited: Vec<_> = schema.fields_at(RequirementLevel::Prohibited).map(|f| f.name).collect();
        assert_eq!(prohibited, vec!["code", "version"]);
        assert_eq!(schema.layout, FieldLayout::NameValueRows);
    }

    #[test]
    fn test_field_names_unique_per_schema() {
        for schema in [
            bindings(),
            code_list(),
            data_elements(),
            examples(),
            extensions(),
            invariants(),
            metadata(),
            operations(),
            packages(),
            profiles(),
            search(),
            structure(),
        ] {
            let mut names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate field in {}", schema.name);
        }
    }
}
