//! CLI command definitions.
//!
//! This module defines the command structure for the specsheet CLI.

use clap::{Parser, Subcommand};
use thiserror::Error;

pub mod classify;
pub mod schemas;

/// specsheet - FHIR specification workbook classifier
#[derive(Parser)]
#[command(name = "specsheet")]
#[command(version, about = "specsheet - FHIR specification workbook classifier")]
#[command(long_about = r#"
specsheet reads FHIR specification workbooks that were exported to JSON or
YAML, classifies every tab against the known tab schemas, and builds the
typed records of each recognized tab.

COMMANDS:
  classify  → Classify and assemble workbooks, report unknown tabs and field issues
  schemas   → List the tab schema catalog

EXIT CODES:
  0 - Success
  1 - General error (unreadable or malformed workbook)
  2 - Invalid arguments
  3 - Validation failure (with --strict)
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify workbook tabs and build their records
    Classify(classify::ClassifyArgs),

    /// List the known tab schemas
    Schemas(schemas::SchemasArgs),
}

/// Failures that map to a dedicated exit code.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Validation failed for {failed} of {total} workbook(s)")]
    ValidationFailed { failed: usize, total: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
