//! Reference collection from the package relationship metadata.
//!
//! Collection is a document-level pass over the relationships of the main
//! part. It does not look at run content, so it reports every embedded
//! object in the package whether or not a table cell references it.

use serde::Serialize;

use crate::model::{Document, ObjectReference, RelationshipKind};

/// Embedded object references of a document, in relationship order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectedReferences {
    /// OLE-object references, resolved to LaTeX
    pub equations: Vec<ObjectReference>,

    /// Image references, resolved to hosted URIs
    pub images: Vec<ObjectReference>,
}

impl CollectedReferences {
    /// Total number of references.
    pub fn len(&self) -> usize {
        self.equations.len() + self.images.len()
    }

    /// Check if there are no references.
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty() && self.images.is_empty()
    }
}

/// Collect equation and image references from a document.
pub fn collect_references(doc: &Document) -> CollectedReferences {
    let equations: Vec<ObjectReference> = doc
        .relationships
        .of_kind(RelationshipKind::OleObject)
        .map(|rel| ObjectReference::new(&rel.id, &rel.target))
        .collect();

    let images: Vec<ObjectReference> = doc
        .relationships
        .of_kind(RelationshipKind::Image)
        .map(|rel| {
            let reference = ObjectReference::new(&rel.id, &rel.target);
            match rel.target_extension() {
                Some(ext) => reference.with_format(ext),
                None => reference,
            }
        })
        .collect();

    log::debug!(
        "Collected {} equation and {} image references",
        equations.len(),
        images.len()
    );

    CollectedReferences { equations, images }
}
