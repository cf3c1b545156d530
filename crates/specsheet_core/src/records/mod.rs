//! Typed records built from workbook tabs.

mod cardinality;
mod element;
mod invariant;
mod metadata;
mod operation;
mod publication;
mod terminology;

pub use cardinality::Cardinality;
pub use element::{DataElement, ElementFields, ExtensionElement, Structure, StructureElement};
pub use invariant::{Invariant, SearchParameter, SEARCH_TYPES};
pub use metadata::Metadata;
pub use operation::{Operation, OperationParameter};
pub use publication::{Example, Package, ProfileEntry};
pub use terminology::{Binding, CodeListEntry, DisplayTranslation};
