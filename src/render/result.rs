//! Extraction results.

use serde::Serialize;

use crate::model::Metadata;
use crate::resolve::{ResolutionMap, ResolutionReport};

/// Rendered content of one table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CellContent {
    /// Plain text; paragraphs are concatenated without separator
    pub text: String,

    /// HTML fragment; paragraphs are separated by the break marker
    pub html: String,
}

impl CellContent {
    /// Create a cell from its two renderings.
    pub fn new(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: html.into(),
        }
    }

    /// Check if the cell rendered to nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.html.is_empty()
    }
}

/// Rendered cells of one row, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowData {
    /// Cells in column order
    pub cells: Vec<CellContent>,
}

impl RowData {
    /// Plain text of the row, cells joined by tabs.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Rendered rows of one table, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableData {
    /// Rows in document order
    pub rows: Vec<RowData>,
}

impl TableData {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }

    /// Cell at `(row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellContent> {
        self.rows.get(row).and_then(|r| r.cells.get(column))
    }

    /// Plain text of the table, one line per row.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(RowData::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A fully extracted document.
///
/// Owns the rendered tables together with the resolution maps they were
/// rendered from, so a caller can look up any equation or image by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedDocument {
    /// Core properties of the package
    pub metadata: Metadata,

    /// Rendered tables in document order
    pub tables: Vec<TableData>,

    /// Equation id → LaTeX
    pub equations: ResolutionMap,

    /// Image id → URI
    pub images: ResolutionMap,

    /// Objects that could not be resolved
    pub report: ResolutionReport,
}

impl ExtractedDocument {
    /// Number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of cells across all tables.
    pub fn cell_count(&self) -> usize {
        self.tables.iter().map(TableData::cell_count).sum()
    }

    /// Plain text of all tables: tab-separated rows, tables separated by
    /// a blank line.
    pub fn plain_text(&self) -> String {
        self.tables
            .iter()
            .map(TableData::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Serialize to JSON.
    pub fn to_json(&self, format: super::JsonFormat) -> crate::error::Result<String> {
        super::to_json(self, format)
    }
}
