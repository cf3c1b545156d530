//! Engine configuration.
//!
//! Configuration is optional. Without a file the engine runs with the
//! built-in ignore list, infers the workbook kind, and reports maturity 0.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use specsheet_schema::WorkbookKind;
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Tab names that are template leftovers or obsolete, never classified.
pub const DEFAULT_IGNORED_TABS: &[&str] = &[
    "Instructions",
    "Removed Elements",
    "SomeStructure",
    "SomeStructure-Inv",
    "some-code-list",
    "some-code-list (2)",
];

/// Highest FHIR maturity model level.
pub const MAX_MATURITY_LEVEL: u8 = 5;

/// Engine configuration, loadable from YAML or TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Exact tab names to ignore.
    pub ignored_tabs: Vec<String>,
    /// Regular expressions; a tab whose whole name matches one is ignored.
    pub ignored_tab_patterns: Vec<String>,
    /// Force the workbook kind instead of inferring it.
    pub workbook_kind: Option<WorkbookKind>,
    pub maturity_level: u8,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            ignored_tabs: DEFAULT_IGNORED_TABS.iter().map(|s| s.to_string()).collect(),
            ignored_tab_patterns: Vec::new(),
            workbook_kind: None,
            maturity_level: 0,
        }
    }
}

impl SheetConfig {
    /// Load from a `.yaml`, `.yml` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);

        let content = fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => return Err(CoreError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> CoreResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_workbook_kind(mut self, kind: WorkbookKind) -> Self {
        self.workbook_kind = Some(kind);
        self
    }

    pub fn with_maturity_level(mut self, level: u8) -> Self {
        self.maturity_level = level;
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.maturity_level > MAX_MATURITY_LEVEL {
            return Err(CoreError::InvalidConfiguration(format!(
                "maturity_level {} is above {}",
                self.maturity_level, MAX_MATURITY_LEVEL
            )));
        }
        self.ignore_list().map(|_| ())
    }

    /// Compile the ignore list.
    pub fn ignore_list(&self) -> CoreResult<IgnoreList> {
        IgnoreList::new(&self.ignored_tabs, &self.ignored_tab_patterns)
    }
}

/// Compiled set of tab names and patterns to ignore.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    names: BTreeSet<String>,
    patterns: Vec<Regex>,
}

impl IgnoreList {
    pub fn new(names: &[String], patterns: &[String]) -> CoreResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("^(?:{})$", p)).map_err(|e| {
                    CoreError::InvalidConfiguration(format!("ignored tab pattern '{}': {}", p, e))
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            names: names.iter().cloned().collect(),
            patterns,
        })
    }

    pub fn contains(&self, tab_name: &str) -> bool {
        self.names.contains(tab_name) || self.patterns.iter().any(|p| p.is_match(tab_name))
    }
}
