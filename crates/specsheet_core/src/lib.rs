//! # specsheet_core
//!
//! Turns the tabs of a FHIR specification workbook into a typed model.
//!
//! Assembly runs in three steps for each tab:
//! - classification against the [`SchemaRegistry`](specsheet_schema::SchemaRegistry)
//!   (ignored, known or unknown),
//! - record building for known tabs, collecting field problems as issues,
//! - merging into a [`WorkbookModel`] keyed by tab name.
//!
//! ## Example
//!
//! ```rust
//! use specsheet_core::{SheetConfig, WorkbookAssembler};
//! use specsheet_schema::{SchemaRegistry, TabularDocument, TabularSheet};
//!
//! let registry = SchemaRegistry::register();
//! let config = SheetConfig::default();
//! let assembler = WorkbookAssembler::new(&registry, &config).unwrap();
//!
//! let document = TabularDocument::new("patient").with_sheet(
//!     TabularSheet::new("medication-status")
//!         .with_columns(["Code", "Display"])
//!         .with_row([("Code", "active"), ("Display", "Active")]),
//! );
//! let model = assembler.assemble(&document).unwrap();
//! assert!(model.code_lists.contains_key("medication-status"));
//! ```

pub mod builder;
pub mod classifier;
pub mod config;
pub mod error;
pub mod records;
pub mod source;
pub mod workbook;

pub use builder::{BuiltTab, RecordBuilder, RecordIssue, TypedRecords};
pub use classifier::{TabClassification, TabClassifier};
pub use config::{IgnoreList, SheetConfig};
pub use error::{CoreError, CoreResult, FieldError};
pub use source::{DocumentSource, FileDocumentSource};
pub use workbook::{ApplicabilityWarning, Diagnostics, WorkbookAssembler, WorkbookModel};
