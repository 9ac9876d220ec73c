//! Document model types for DOCX table content.
//!
//! This module defines the object model the package reader produces and
//! the rest of the pipeline consumes: tables down to runs, the package
//! relationship metadata, and the references to embedded objects that
//! must be resolved before any cell is rendered.

mod document;
mod paragraph;
mod reference;
mod relationship;
mod table;

pub use document::{Document, Metadata};
pub use paragraph::{EmbeddedObject, Extent, InlineDrawing, Paragraph, Run, RunKind};
pub use reference::{ObjectKind, ObjectReference};
pub use relationship::{Relationship, RelationshipKind, Relationships};
pub use table::{Table, TableCell, TableRow};
