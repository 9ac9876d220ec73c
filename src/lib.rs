//! # undocx
//!
//! Table extraction from DOCX documents with resolved equations and images.
//!
//! Every table cell is rendered twice: as plain text and as an HTML
//! fragment. Embedded equation objects are converted to LaTeX and inline
//! images are uploaded before rendering starts, each distinct object
//! exactly once, concurrently on the rayon pool.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undocx::extract_file;
//!
//! fn main() -> undocx::Result<()> {
//!     let doc = extract_file("report.docx")?;
//!
//!     for table in &doc.tables {
//!         for row in &table.rows {
//!             for cell in &row.cells {
//!                 println!("{}", cell.html);
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Collaborators
//!
//! Equations and images are resolved through the [`EquationConverter`] and
//! [`ImageUploader`] traits. An [`Extractor`] without them still extracts
//! every table, rendering unresolved objects as the configured placeholder.
//!
//! ```no_run
//! use undocx::{CommandConverter, DirectoryUploader, Extractor, UploadKeyStrategy};
//! use undocx::extract::ExtractOptions;
//!
//! fn main() -> undocx::Result<()> {
//!     let extractor = Extractor::new()
//!         .with_converter(CommandConverter::from_command_line("mtef2tex --display")?)
//!         .with_uploader(DirectoryUploader::new("public/img")?.with_url_prefix("/img/"))
//!         .with_options(ExtractOptions::new().with_key_strategy(UploadKeyStrategy::ContentHash));
//!
//!     let doc = extractor.extract_file("report.docx")?;
//!     println!("{}", doc.to_json(undocx::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```

pub mod collect;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod resolve;

// Re-export commonly used types
pub use collect::{collect_references, CollectedReferences};
pub use detect::{is_docx, is_docx_bytes, PackageKind};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, Extractor};
pub use model::{
    Document, EmbeddedObject, Extent, InlineDrawing, Metadata, ObjectKind, ObjectReference,
    Paragraph, Run, Table, TableCell, TableRow,
};
pub use parser::{DocxParser, ErrorMode, ParseOptions};
pub use render::{CellContent, ExtractedDocument, JsonFormat, RenderOptions, RowData, TableData};
pub use resolve::{
    CommandConverter, DirectoryUploader, EquationConverter, FnConverter, FnUploader,
    ImageUploader, ObjectPayload, ResolutionMap, ResolutionPolicy, ResolutionReport,
    UploadKeyStrategy,
};

use std::io::Read;
use std::path::Path;

/// Parse a DOCX file into its document model.
///
/// # Example
///
/// ```no_run
/// use undocx::parse_file;
///
/// let doc = parse_file("report.docx").unwrap();
/// println!("Tables: {}", doc.table_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocxParser::open(path)?.parse()
}

/// Parse a DOCX package from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    DocxParser::from_bytes(data)?.parse()
}

/// Parse a DOCX package from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    DocxParser::from_reader(reader)?.parse()
}

/// Extract the tables of a DOCX file without collaborators.
///
/// Equations and images render as the empty placeholder.
///
/// # Example
///
/// ```no_run
/// use undocx::extract_file;
///
/// let doc = extract_file("report.docx").unwrap();
/// println!("{}", doc.plain_text());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument> {
    Extractor::new().extract_file(path)
}

/// Extract the tables of an in-memory DOCX package without collaborators.
pub fn extract_bytes(data: &[u8]) -> Result<ExtractedDocument> {
    Extractor::new().extract_bytes(data)
}

/// Extract the tables of a DOCX file as tab-separated plain text.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(extract_file(path)?.plain_text())
}

/// Extract the tables of a DOCX file as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    extract_file(path)?.to_json(format)
}
