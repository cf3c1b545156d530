//! Compatibility checks between a tab's columns and a schema.

use tracing::debug;

use crate::document::TabularSheet;
use crate::field::FieldSpec;
use crate::schema::TabSchema;

/// Required fields of `schema` that no column of `sheet` provides.
///
/// Only the column headers are consulted; rows never matter here.
pub fn missing_required<'s>(sheet: &TabularSheet, schema: &'s TabSchema) -> Vec<&'s FieldSpec> {
    schema
        .required_fields()
        .filter(|field| !sheet.columns.iter().any(|column| field.matches(column)))
        .collect()
}

/// Whether `sheet` could be an instance of `schema`: every required field
/// has a matching column.
pub fn is_compatible(sheet: &TabularSheet, schema: &TabSchema) -> bool {
    let missing = missing_required(sheet, schema);
    if missing.is_empty() {
        return true;
    }

    debug!(
        "Tab '{}' is not a {} tab, missing: {}",
        sheet.name,
        schema.name,
        missing.iter().map(|f| f.name).collect::<Vec<_>>().join(", ")
    );
    false
}
