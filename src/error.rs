//! Error types for undocx library.

use std::io;
use thiserror::Error;

use crate::model::ObjectKind;

/// Result type alias for undocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during DOCX processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as a DOCX package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// The ZIP container could not be read.
    #[error("Package error: {0}")]
    Zip(String),

    /// A package part is not well-formed XML.
    #[error("XML error in {part}: {message}")]
    Xml {
        /// Part name inside the package
        part: String,
        /// Parser message
        message: String,
    },

    /// The package structure is corrupted or incomplete.
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    /// A part referenced by a relationship is missing from the package.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// The equation converter failed.
    #[error("Equation conversion error: {0}")]
    Conversion(String),

    /// The image uploader failed.
    #[error("Upload error: {0}")]
    Upload(String),

    /// An embedded object could not be resolved (fail-fast policy).
    #[error("Failed to resolve {kind} {id}: {message}")]
    Resolution {
        /// Kind of embedded object
        kind: ObjectKind,
        /// Relationship identifier
        id: String,
        /// Underlying failure
        message: String,
    },

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::InvalidArchive(_) => Error::UnknownFormat,
            zip::result::ZipError::FileNotFound => Error::MissingPart("(unnamed)".into()),
            _ => Error::Zip(err.to_string()),
        }
    }
}

impl Error {
    /// Whether this error means the input could not be opened as a document.
    pub fn is_open_error(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::UnknownFormat
                | Error::Zip(_)
                | Error::Xml { .. }
                | Error::InvalidPackage(_)
                | Error::MissingPart(_)
        )
    }
}
