//! Document structure.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Relationships, Table};

/// A parsed DOCX package: tables, relationship metadata and the bytes of
/// every embedded image and object part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Body-level tables in document order
    pub tables: Vec<Table>,

    /// Relationships of the main document part
    pub relationships: Relationships,

    /// Embedded part bytes keyed by part name
    #[serde(skip)]
    parts: HashMap<String, Vec<u8>>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Store the bytes of a package part.
    pub fn add_part(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.parts.insert(name.into(), data);
    }

    /// Read the bytes of a package part.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(|d| d.as_slice())
    }

    /// Names of the stored parts, sorted.
    pub fn part_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parts.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Total number of cells across all tables.
    pub fn cell_count(&self) -> usize {
        self.tables.iter().map(|t| t.cell_count()).sum()
    }
}

/// Document metadata from `docProps/core.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub creator: Option<String>,

    /// Last author
    pub last_modified_by: Option<String>,
}
