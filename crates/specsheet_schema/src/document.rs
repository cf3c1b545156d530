//! Tabular document shapes.
//!
//! A [`TabularDocument`] is what an external spreadsheet parser hands to the
//! engine: the workbook name, where it came from, and its tabs in authoring
//! order. Nothing in this module knows about FHIR; it only describes tables.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};

/// One row of a tab, keyed by column name.
///
/// A column missing from the map is a missing value, which is not the same
/// thing as an empty cell.
pub type Row = BTreeMap<String, String>;

/// A single named tab of a workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularSheet {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl TabularSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append a row built from `(column, value)` pairs.
    pub fn with_row<I, K, V>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.rows
            .push(cells.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Cell text at `row` for `column`, if the row carries that column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    /// Check that the rows agree with the declared columns.
    ///
    /// A column declared twice, or a row cell for a column that was never
    /// declared, means the parser produced something the builder cannot
    /// interpret.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.as_str()) {
                return Err(SchemaError::malformed(
                    &self.name,
                    format!("column '{}' is declared more than once", column),
                ));
            }
        }

        for (index, row) in self.rows.iter().enumerate() {
            if let Some(column) = row.keys().find(|k| !seen.contains(k.as_str())) {
                return Err(SchemaError::malformed(
                    &self.name,
                    format!("row {} has a cell for undeclared column '{}'", index, column),
                ));
            }
        }

        Ok(())
    }
}

/// A parsed workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularDocument {
    pub name: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub sheets: Vec<TabularSheet>,
}

impl TabularDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            sheets: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_sheet(mut self, sheet: TabularSheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Look up a tab by exact name.
    pub fn sheet(&self, name: &str) -> Option<&TabularSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Names of all tabs that have a name, in tab order.
    pub fn tab_names(&self) -> impl Iterator<Item = &str> {
        self.sheets
            .iter()
            .map(|s| s.name.as_str())
            .filter(|n| !n.is_empty())
    }

    /// Validate every sheet and reject duplicate tab names.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut names = HashSet::new();
        for sheet in &self.sheets {
            sheet.validate()?;
            if !sheet.name.is_empty() && !names.insert(sheet.name.as_str()) {
                return Err(SchemaError::malformed(
                    &sheet.name,
                    "tab name appears more than once in the workbook",
                ));
            }
        }
        Ok(())
    }
}
