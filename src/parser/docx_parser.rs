//! DOCX package parser using zip and quick-xml.

use std::io::{Cursor, Read};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::{
    classify_parts, detect_container_from_bytes, detect_container_from_path, PackageKind,
    MAIN_DOCUMENT_PART,
};
use crate::error::{Error, Result};
use crate::model::{Document, RelationshipKind, Relationships};

use super::body::parse_tables;
use super::core_props::{parse_core_properties, CORE_PROPS_PART};
use super::options::{ErrorMode, ParseOptions};
use super::rels::{parse_relationships, DOCUMENT_RELS_PART};

/// DOCX package parser.
pub struct DocxParser {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    entry_names: Vec<String>,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a ZIP container before reading it whole
        detect_container_from_path(path)?;

        let data = std::fs::read(path)?;
        Self::from_vec(data, options)
    }

    /// Parse a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX package from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        Self::from_vec(data.to_vec(), options)
    }

    /// Parse a DOCX package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a DOCX package from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_vec(data, options)
    }

    fn from_vec(data: Vec<u8>, options: ParseOptions) -> Result<Self> {
        detect_container_from_bytes(&data)?;

        let archive = ZipArchive::new(Cursor::new(data))?;
        let entry_names: Vec<String> = archive.file_names().map(|n| n.to_string()).collect();

        match classify_parts(entry_names.iter().map(|n| n.as_str())) {
            PackageKind::Docx => {}
            other => {
                log::debug!("Package is {}, not a word-processing document", other);
                return Err(Error::UnknownFormat);
            }
        }

        Ok(Self {
            archive,
            entry_names,
            options,
        })
    }

    /// Names of all parts in the package.
    pub fn part_names(&self) -> &[String] {
        &self.entry_names
    }

    /// Parse the package and return the document model.
    pub fn parse(mut self) -> Result<Document> {
        let mut document = Document::new();

        if self.options.read_metadata {
            if let Some(data) = self.read_part(CORE_PROPS_PART)? {
                document.metadata = parse_core_properties(&data);
            }
        }

        document.relationships = match self.read_part(DOCUMENT_RELS_PART)? {
            Some(data) => parse_relationships(&data, "word")?,
            None => {
                log::debug!("No {} in package", DOCUMENT_RELS_PART);
                Relationships::new()
            }
        };

        let main = self
            .read_part(MAIN_DOCUMENT_PART)?
            .ok_or_else(|| Error::MissingPart(MAIN_DOCUMENT_PART.to_string()))?;
        document.tables = parse_tables(&main, MAIN_DOCUMENT_PART)?;

        if self.options.extract_parts {
            self.load_embedded_parts(&mut document)?;
        }

        Ok(document)
    }

    /// Load the bytes of every internal image and OLE-object target.
    fn load_embedded_parts(&mut self, document: &mut Document) -> Result<()> {
        let targets: Vec<String> = document
            .relationships
            .iter()
            .filter(|r| !r.external)
            .filter(|r| matches!(r.kind, RelationshipKind::Image | RelationshipKind::OleObject))
            .map(|r| r.target.clone())
            .collect();

        for target in targets {
            if document.part(&target).is_some() {
                continue;
            }
            match self.read_part(&target)? {
                Some(data) => document.add_part(target, data),
                None => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(Error::MissingPart(target));
                    }
                    // In lenient mode the reference resolves as a failure later
                    log::warn!("Relationship target {} is missing from the package", target);
                }
            }
        }

        Ok(())
    }

    /// Read a part by name; part names are matched case-insensitively as a
    /// fallback since some producers disagree on casing.
    fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let actual = match self.entry_names.iter().find(|n| n.as_str() == name) {
            Some(n) => n.clone(),
            None => match self
                .entry_names
                .iter()
                .find(|n| n.eq_ignore_ascii_case(name))
            {
                Some(n) => n.clone(),
                None => return Ok(None),
            },
        };

        let mut entry = match self.archive.by_name(&actual) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut data = Vec::with_capacity(initial_capacity(entry.size()));
        entry.read_to_end(&mut data)?;
        Ok(Some(data))
    }
}

/// Upper bound for pre-allocating a part buffer from its declared size.
const MAX_PREALLOCATION: u64 = 1 << 20;

/// Buffer capacity for a part. The declared size comes from the archive
/// itself and is only trusted up to [`MAX_PREALLOCATION`].
fn initial_capacity(declared: u64) -> usize {
    declared.min(MAX_PREALLOCATION) as usize
}
