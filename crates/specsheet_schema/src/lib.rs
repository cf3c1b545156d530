//! # specsheet_schema
//!
//! Tabular document shapes and the registry of known tab schemas for
//! FHIR specification workbooks.
//!
//! A workbook is a set of named tabs. Some tab names are canonical
//! ("Bindings", "Data Elements", "Metadata", ...); others are only
//! recognizable from their name shape and columns ("Patient-Inv",
//! "medication-status"). This crate declares every schema a tab can be
//! recognized as, and answers whether a tab's columns satisfy one.
//!
//! ## Example
//!
//! ```rust
//! use specsheet_schema::{compat, SchemaRegistry, TabularSheet};
//!
//! let registry = SchemaRegistry::register();
//! let invariants = registry.lookup_by_name("Invariants").unwrap();
//!
//! let sheet = TabularSheet::new("Patient-Inv")
//!     .with_columns(["Id", "Name", "Severity", "Context", "Expression"]);
//! assert!(compat::is_compatible(&sheet, invariants));
//! ```

pub mod catalog;
pub mod compat;
pub mod document;
pub mod error;
pub mod field;
pub mod registry;
pub mod schema;

pub use compat::{is_compatible, missing_required};
pub use document::{Row, TabularDocument, TabularSheet};
pub use error::{SchemaError, SchemaResult};
pub use field::{FieldSpec, RequirementLevel, ValueShape};
pub use registry::{PatternSchema, RegistryHandle, SchemaRegistry, TabNamePattern};
pub use schema::{Applicability, FieldLayout, SchemaKind, TabAllowance, TabSchema, WorkbookKind};
