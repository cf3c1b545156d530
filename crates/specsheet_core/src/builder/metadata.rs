//! Name/value tabs. Each row contributes one `(name, value)` pair and all
//! pairs fold into a single [`Metadata`] record.

use std::collections::BTreeMap;

use specsheet_schema::{RequirementLevel, TabularSheet, ValueShape};
use tracing::debug;
use url::Url;

use super::cells::parse_date;
use super::TabBuild;
use crate::error::FieldError;
use crate::records::Metadata;

const NAME_COLUMN: &str = "Name";
const VALUE_COLUMN: &str = "Value";

/// The columns holding field names and values: `Name` and `Value` when the
/// tab has them, otherwise its first two columns.
fn name_value_columns(sheet: &TabularSheet) -> Option<(&str, &str)> {
    let find = |title: &str| {
        sheet
            .columns
            .iter()
            .find(|c| c.trim().eq_ignore_ascii_case(title))
            .map(String::as_str)
    };
    match (find(NAME_COLUMN), find(VALUE_COLUMN)) {
        (Some(name), Some(value)) => Some((name, value)),
        _ => match sheet.columns.as_slice() {
            [name, value, ..] => Some((name.as_str(), value.as_str())),
            _ => None,
        },
    }
}

/// Pairs collected from the rows, keyed by field name, with the row each
/// value came from.
struct NameValueReader {
    pairs: BTreeMap<String, Vec<(usize, String)>>,
}

impl NameValueReader {
    fn read(build: &TabBuild<'_>) -> Self {
        let mut pairs: BTreeMap<String, Vec<(usize, String)>> = BTreeMap::new();
        let Some((name_column, value_column)) = name_value_columns(build.sheet) else {
            return Self { pairs };
        };

        for (index, row) in build.rows() {
            let Some(name) = row.get(name_column).map(|n| n.trim()).filter(|n| !n.is_empty()) else {
                continue;
            };
            let value = row.get(value_column).map(|v| v.trim()).unwrap_or_default();
            if value.is_empty() {
                continue;
            }
            if build.schema.field_named(name).is_none() {
                debug!("Tab '{}': ignoring undeclared name '{}'", build.sheet.name, name);
                continue;
            }
            pairs
                .entry(name.to_string())
                .or_default()
                .push((index, value.to_string()));
        }
        Self { pairs }
    }

    fn first(&self, name: &str) -> Option<&(usize, String)> {
        self.pairs.get(name).and_then(|values| values.first())
    }

    fn text(&self, name: &str) -> Option<String> {
        self.first(name).map(|(_, value)| value.clone())
    }

    fn all(&self, name: &str) -> Vec<String> {
        self.pairs
            .get(name)
            .map(|values| values.iter().map(|(_, v)| v.clone()).collect())
            .unwrap_or_default()
    }
}

pub(super) fn build(build: &mut TabBuild<'_>) -> Metadata {
    let reader = NameValueReader::read(build);
    let mut errors: Vec<(Option<usize>, FieldError)> = Vec::new();

    for field in &build.schema.fields {
        let values = reader.pairs.get(field.name);
        match (field.level, values) {
            (RequirementLevel::Required, None) => {
                errors.push((None, FieldError::missing(field.name)));
            }
            (RequirementLevel::Prohibited, Some(values)) => {
                for (index, _) in values {
                    errors.push((Some(*index), FieldError::prohibited(field.name)));
                }
            }
            (_, Some(values)) if field.shape != ValueShape::Repeated => {
                for (index, value) in values.iter().skip(1) {
                    errors.push((
                        Some(*index),
                        FieldError::invalid(field.name, value, "given more than once"),
                    ));
                }
            }
            _ => {}
        }
    }

    let mut url = |name: &str| {
        let (index, value) = reader.first(name)?;
        match Url::parse(value) {
            Ok(url) => Some(url),
            Err(e) => {
                errors.push((Some(*index), FieldError::invalid(name, value, e.to_string())));
                None
            }
        }
    };
    let author_reference = url("name.reference");
    let extension_uri = url("extension.uri");

    let publish_date = reader.first("date").and_then(|(index, value)| {
        let date = parse_date(value);
        if date.is_none() {
            errors.push((
                Some(*index),
                FieldError::invalid("date", value, "expected YYYY-MM-DD"),
            ));
        }
        date
    });

    for (row, error) in errors {
        build.record_errors(row, vec![error]);
    }

    Metadata {
        id: reader.text("id"),
        name: reader.text("name"),
        author: reader.text("name.author"),
        author_reference,
        description: reader.text("description"),
        status: reader.text("status"),
        publish_date,
        published_structures: reader.all("published.structure"),
        extension_uri,
        introduction: reader.text("introduction"),
        notes: reader.text("notes"),
    }
}
