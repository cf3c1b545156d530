//! Cell readers shared by the per-kind builders.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use specsheet_schema::{FieldSpec, RequirementLevel, Row, TabSchema, TabularSheet};
use url::Url;

use crate::error::FieldError;
use crate::records::Cardinality;

/// Undeclared element columns with this suffix are kept as extra mappings.
pub const OTHER_MAPPING_SUFFIX: &str = "Mapping";

const TRUE_FLAGS: &[&str] = &["y", "yes", "true", "1"];
const FALSE_FLAGS: &[&str] = &["n", "no", "false", "0"];

/// Whether every cell of the row is absent or whitespace.
pub fn is_blank(row: &Row) -> bool {
    row.values().all(|v| v.trim().is_empty())
}

/// Parse a Y/N style flag.
pub fn parse_flag(text: &str) -> Option<bool> {
    let lower = text.trim().to_ascii_lowercase();
    if TRUE_FLAGS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_FLAGS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Parse `YYYY-MM-DD`, falling back to an RFC 3339 timestamp.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Split on `delimiter`, trimming segments and dropping empty ones.
pub fn split_list(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the cells of one row of a columns-layout tab and collects the
/// problems found along the way.
pub struct RowReader<'a> {
    row: &'a Row,
    columns: &'a [String],
    errors: Vec<FieldError>,
}

impl<'a> RowReader<'a> {
    pub fn new(sheet: &'a TabularSheet, row: &'a Row) -> Self {
        Self {
            row,
            columns: &sheet.columns,
            errors: Vec::new(),
        }
    }

    /// Trimmed cell text; blank cells read as absent.
    pub fn value(&self, column: &str) -> Option<&'a str> {
        self.row
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn text(&self, column: &str) -> Option<String> {
        self.value(column).map(str::to_string)
    }

    pub fn list(&self, column: &str, delimiter: char) -> Vec<String> {
        self.value(column)
            .map(|v| split_list(v, delimiter))
            .unwrap_or_default()
    }

    pub fn flag(&mut self, column: &str) -> Option<bool> {
        let value = self.value(column)?;
        let flag = parse_flag(value);
        if flag.is_none() {
            self.reject(column, value, "expected a Y/N flag");
        }
        flag
    }

    pub fn count(&mut self, column: &str) -> Option<u32> {
        let value = self.value(column)?;
        match value.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.reject(column, value, "expected a non-negative integer");
                None
            }
        }
    }

    pub fn cardinality(&mut self, column: &str) -> Cardinality {
        let Some(value) = self.value(column) else {
            return Cardinality::default();
        };
        match Cardinality::parse(value) {
            Ok(card) => card,
            Err(reason) => {
                self.reject(column, value, &reason);
                Cardinality::default()
            }
        }
    }

    pub fn url(&mut self, column: &str) -> Option<Url> {
        let value = self.value(column)?;
        match Url::parse(value) {
            Ok(url) => Some(url),
            Err(e) => {
                self.reject(column, value, &e.to_string());
                None
            }
        }
    }

    /// Values of every column matched by a wildcard field, keyed by the
    /// part of the header after the prefix, in column order.
    pub fn wildcard(&self, field: &FieldSpec) -> Vec<(String, String)> {
        self.columns
            .iter()
            .filter_map(|column| {
                let suffix = field.wildcard_suffix(column)?;
                let value = self.value(column)?;
                Some((suffix.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Non-empty values of undeclared `... Mapping` columns.
    pub fn other_mappings(&self, schema: &TabSchema) -> BTreeMap<String, String> {
        self.columns
            .iter()
            .filter(|c| c.ends_with(OTHER_MAPPING_SUFFIX) && !schema.declares_column(c))
            .filter_map(|c| self.value(c).map(|v| (c.clone(), v.to_string())))
            .collect()
    }

    /// Require a field beyond what the schema declares for this row.
    pub fn require(&mut self, column: &str) {
        if self.value(column).is_none() {
            self.errors.push(FieldError::missing(column));
        }
    }

    pub fn reject(&mut self, column: &str, value: &str, reason: &str) {
        self.errors.push(FieldError::invalid(column, value, reason));
    }

    /// Check Required and Prohibited fields and hand back everything found.
    pub fn finish(mut self, schema: &TabSchema) -> Vec<FieldError> {
        for field in &schema.fields {
            let present = if field.is_wildcard() {
                !self.wildcard(field).is_empty()
            } else {
                self.value(field.name).is_some()
            };
            match field.level {
                RequirementLevel::Required if !present => {
                    self.errors.push(FieldError::missing(field.name));
                }
                RequirementLevel::Prohibited if present => {
                    self.errors.push(FieldError::prohibited(field.name));
                }
                _ => {}
            }
        }
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specsheet_schema::catalog;

    fn sheet() -> TabularSheet {
        TabularSheet::new("x")
            .with_columns(["Code", "Display", "Display:de", "Display:nl", "Card."])
            .with_row([("Code", "a"), ("Display:nl", "Een"), ("Display:de", "Eins")])
    }

    #[test]
    fn test_flags() {
        assert_eq!(parse_flag("Y"), Some(true));
        assert_eq!(parse_flag(" yes "), Some(true));
        assert_eq!(parse_flag("N"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(parse_date("2024-03-01"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(
            parse_date("2024-03-01T10:00:00+01:00"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_date("March 2024"), None);
    }

    #[test]
    fn test_split_list_drops_empty_segments() {
        assert_eq!(split_list("a, ,b,,c ", ','), vec!["a", "b", "c"]);
        assert!(split_list(" , ", ',').is_empty());
    }

    #[test]
    fn test_wildcard_follows_column_order() {
        let sheet = sheet();
        let reader = RowReader::new(&sheet, &sheet.rows[0]);
        let field = FieldSpec::optional("Display:*");
        assert_eq!(
            reader.wildcard(&field),
            vec![
                ("de".to_string(), "Eins".to_string()),
                ("nl".to_string(), "Een".to_string())
            ]
        );
    }

    #[test]
    fn test_invalid_count_is_reported() {
        let sheet = TabularSheet::new("x")
            .with_columns(["Max Length"])
            .with_row([("Max Length", "ten")]);
        let mut reader = RowReader::new(&sheet, &sheet.rows[0]);
        assert_eq!(reader.count("Max Length"), None);
        let errors = reader.finish(&catalog::events());
        assert!(matches!(&errors[0], FieldError::InvalidValue { field, .. } if field == "Max Length"));
    }

    #[test]
    fn test_finish_reports_missing_required() {
        let sheet = TabularSheet::new("x")
            .with_columns(["Code", "Definition"])
            .with_row([("Code", " ")]);
        let reader = RowReader::new(&sheet, &sheet.rows[0]);
        let errors = reader.finish(&catalog::code_list());
        assert_eq!(errors, vec![FieldError::missing("Code")]);
    }

    #[test]
    fn test_blank_row() {
        let mut row = Row::new();
        assert!(is_blank(&row));
        row.insert("Code".into(), "  ".into());
        assert!(is_blank(&row));
        row.insert("Display".into(), "x".into());
        assert!(!is_blank(&row));
    }
}
