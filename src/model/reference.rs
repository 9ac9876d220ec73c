//! References to embedded objects awaiting resolution.

use serde::{Deserialize, Serialize};

/// Kind of embedded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Equation binary, resolved to LaTeX
    Equation,
    /// Image binary, resolved to a hosted URI
    Image,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Equation => write!(f, "equation"),
            ObjectKind::Image => write!(f, "image"),
        }
    }
}

/// A reference to an embedded object collected from the package metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    /// Relationship identifier, unique per relationship within the document
    pub id: String,

    /// Package part holding the object bytes
    pub part: String,

    /// Declared format extension (images), e.g. `png`
    pub format: Option<String>,
}

impl ObjectReference {
    /// Create a reference.
    pub fn new(id: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            part: part.into(),
            format: None,
        }
    }

    /// Set the declared format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Format extension, `bin` when unknown.
    pub fn extension(&self) -> &str {
        self.format.as_deref().unwrap_or("bin")
    }
}
