//! Package relationship metadata (`word/_rels/document.xml.rels`).

use serde::{Deserialize, Serialize};

/// What a relationship points at, derived from its type URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    /// Image part (`…/relationships/image`)
    Image,
    /// Embedded OLE object (`…/relationships/oleObject`)
    OleObject,
    /// Anything else (styles, numbering, hyperlinks, …)
    Other,
}

impl RelationshipKind {
    /// Classify a relationship type URI by its last path segment.
    pub fn from_type_uri(uri: &str) -> Self {
        match uri.rsplit('/').next() {
            Some("image") => RelationshipKind::Image,
            Some("oleObject") => RelationshipKind::OleObject,
            _ => RelationshipKind::Other,
        }
    }
}

/// A single relationship of the main document part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship identifier, e.g. `rId7`
    pub id: String,

    /// Relationship kind
    pub kind: RelationshipKind,

    /// Target as resolved to a package part name, or the raw URI for
    /// external targets
    pub target: String,

    /// Whether the target lives outside the package
    pub external: bool,
}

impl Relationship {
    /// Create an internal relationship.
    pub fn new(id: impl Into<String>, kind: RelationshipKind, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            target: target.into(),
            external: false,
        }
    }

    /// Mark the relationship as external.
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    /// Lower-cased extension of the target, e.g. `png`.
    pub fn target_extension(&self) -> Option<String> {
        let name = self.target.rsplit('/').next()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Relationships in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    /// Create an empty relationship set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship. A later duplicate identifier is ignored.
    pub fn add(&mut self, rel: Relationship) {
        if self.get(&rel.id).is_none() {
            self.items.push(rel);
        } else {
            log::debug!("Duplicate relationship id {} ignored", rel.id);
        }
    }

    /// Look up a relationship by identifier.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Iterate relationships in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    /// Iterate internal relationships of one kind.
    pub fn of_kind(&self, kind: RelationshipKind) -> impl Iterator<Item = &Relationship> {
        self.items
            .iter()
            .filter(move |r| r.kind == kind && !r.external)
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no relationships.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Relationship> for Relationships {
    fn from_iter<I: IntoIterator<Item = Relationship>>(iter: I) -> Self {
        let mut rels = Relationships::new();
        for rel in iter {
            rels.add(rel);
        }
        rels
    }
}
