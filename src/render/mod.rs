//! Rendering of resolved tables into plain text and HTML cell content.

mod cell;
mod json;
mod options;
mod result;
mod tables;

pub use cell::{render_cell, CellRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, DEFAULT_LINE_BREAK};
pub use result::{CellContent, ExtractedDocument, RowData, TableData};
pub use tables::render_tables;
