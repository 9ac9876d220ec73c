//! DOCX format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Kind of Office Open XML package, derived from its part names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Word-processing document (`word/document.xml`)
    Docx,
    /// Spreadsheet (`xl/workbook.xml`)
    Xlsx,
    /// Presentation (`ppt/presentation.xml`)
    Pptx,
    /// ZIP archive without a recognised main part
    Unknown,
}

impl std::fmt::Display for PackageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageKind::Docx => write!(f, "DOCX"),
            PackageKind::Xlsx => write!(f, "XLSX"),
            PackageKind::Pptx => write!(f, "PPTX"),
            PackageKind::Unknown => write!(f, "ZIP"),
        }
    }
}

/// Main document part of a word-processing package.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// Local file header signature of a ZIP archive: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect a ZIP container from a file path.
///
/// This only checks the container signature. Whether the archive is a
/// word-processing package is decided from its part names, see
/// [`classify_parts`].
///
/// # Example
/// ```no_run
/// use undocx::detect::detect_container_from_path;
///
/// detect_container_from_path("report.docx").unwrap();
/// ```
pub fn detect_container_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 4];
    reader
        .read_exact(&mut header)
        .map_err(|_| Error::UnknownFormat)?;
    detect_container_from_bytes(&header)
}

/// Detect a ZIP container from bytes.
///
/// # Returns
/// * `Ok(())` if the data starts with a ZIP local file header
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_container_from_bytes(data: &[u8]) -> Result<()> {
    if data.len() < ZIP_MAGIC.len() || !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    Ok(())
}

/// Classify an Office package by the names of its parts.
pub fn classify_parts<'a>(names: impl IntoIterator<Item = &'a str>) -> PackageKind {
    let mut kind = PackageKind::Unknown;
    for name in names {
        match name {
            MAIN_DOCUMENT_PART => return PackageKind::Docx,
            "xl/workbook.xml" => kind = PackageKind::Xlsx,
            "ppt/presentation.xml" => kind = PackageKind::Pptx,
            _ => {}
        }
    }
    kind
}

/// Check if a file looks like a DOCX package (ZIP signature only).
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_container_from_path(path).is_ok()
}

/// Check if bytes look like a DOCX package (ZIP signature only).
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_container_from_bytes(data).is_ok()
}
