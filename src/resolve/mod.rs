//! Resolution of embedded objects.
//!
//! Every distinct relationship id collected from the package is turned into
//! its display value exactly once: equations into LaTeX through an
//! [`EquationConverter`], images into hosted URIs through an
//! [`ImageUploader`]. Equations and images are resolved concurrently with
//! each other, each list fanned out over the rayon pool, and
//! [`resolve_all`] returns only after every task has finished. The frozen
//! [`ResolutionMap`]s are then read without locking.

mod equation;
mod image;
mod pool;
mod store;

pub use equation::{bracket_display_math, CommandConverter, EquationConverter, FnConverter};
pub use image::{DirectoryUploader, FnUploader, ImageUploader, UploadKeyStrategy};
pub use pool::{ResolutionOutcome, ResolverPool};
pub use store::ResolutionStore;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::collect::CollectedReferences;
use crate::error::{Error, Result};
use crate::model::{Document, ObjectKind, ObjectReference};

/// An embedded object handed to a collaborator: its reference and bytes.
#[derive(Debug, Clone, Copy)]
pub struct ObjectPayload<'a> {
    /// The reference being resolved
    pub reference: &'a ObjectReference,

    /// Raw bytes of the referenced part
    pub data: &'a [u8],
}

impl<'a> ObjectPayload<'a> {
    /// Create a payload.
    pub fn new(reference: &'a ObjectReference, data: &'a [u8]) -> Self {
        Self { reference, data }
    }
}

/// Read-only map from relationship id to resolved value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolutionMap {
    values: BTreeMap<String, String>,
}

impl ResolutionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from resolved values.
    pub fn from_values(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Resolved value for an id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(|v| v.as_str())
    }

    /// Whether an id was resolved.
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Iterate `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of resolved ids.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolutionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A single failed resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionFailure {
    /// Kind of object
    pub kind: ObjectKind,

    /// Relationship identifier
    pub id: String,

    /// Failure message
    pub message: String,
}

impl From<ResolutionFailure> for Error {
    fn from(failure: ResolutionFailure) -> Self {
        Error::Resolution {
            kind: failure.kind,
            id: failure.id,
            message: failure.message,
        }
    }
}

/// Failures collected during the resolution phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    /// Failed resolutions, equations first, each in reference order
    pub failures: Vec<ResolutionFailure>,
}

impl ResolutionReport {
    /// Whether every reference resolved.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures of one kind.
    pub fn failures_of(&self, kind: ObjectKind) -> impl Iterator<Item = &ResolutionFailure> {
        self.failures.iter().filter(move |f| f.kind == kind)
    }
}

/// What to do when a single object fails to resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// Log, record in the report, render the placeholder
    #[default]
    Degrade,
    /// Fail the whole extraction once the resolution phase has finished
    FailFast,
}

/// Options for the resolution phase.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Failure policy
    pub policy: ResolutionPolicy,

    /// Upload key derivation
    pub key_strategy: UploadKeyStrategy,

    /// Run sequentially instead of on the rayon pool
    pub sequential: bool,
}

/// Collaborators used by [`resolve_all`]. An absent collaborator skips
/// its phase.
#[derive(Clone, Copy, Default)]
pub struct Resolvers<'a> {
    /// Equation converter
    pub converter: Option<&'a dyn EquationConverter>,

    /// Image uploader
    pub uploader: Option<&'a dyn ImageUploader>,
}

/// Completed resolution phase.
#[derive(Debug, Clone, Default)]
pub struct Resolutions {
    /// Equation id → LaTeX
    pub equations: ResolutionMap,

    /// Image id → URI
    pub images: ResolutionMap,

    /// Failures (empty under the fail-fast policy)
    pub report: ResolutionReport,
}

/// Resolve all collected references of a document.
///
/// Equations and images are resolved concurrently; the call returns after
/// both have finished. Under [`ResolutionPolicy::FailFast`] the first
/// failure (equations before images, reference order within each) is
/// returned as [`Error::Resolution`].
pub fn resolve_all(
    doc: &Document,
    refs: &CollectedReferences,
    resolvers: Resolvers<'_>,
    options: &ResolveOptions,
) -> Result<Resolutions> {
    let parallel = !options.sequential;

    let equations = || match resolvers.converter {
        Some(converter) => ResolverPool::new(ObjectKind::Equation)
            .with_parallel(parallel)
            .resolve(&refs.equations, |reference| {
                let data = part_data(doc, reference)?;
                let latex = converter.convert(&ObjectPayload::new(reference, data))?;
                Ok(bracket_display_math(&latex))
            }),
        None => {
            log::debug!("No equation converter; skipping {} equations", refs.equations.len());
            ResolutionOutcome::default()
        }
    };

    let images = || match resolvers.uploader {
        Some(uploader) => ResolverPool::new(ObjectKind::Image)
            .with_parallel(parallel)
            .resolve(&refs.images, |reference| {
                let data = part_data(doc, reference)?;
                let key = options.key_strategy.key(reference, data);
                uploader.upload(&key, &ObjectPayload::new(reference, data))
            }),
        None => {
            log::debug!("No image uploader; skipping {} images", refs.images.len());
            ResolutionOutcome::default()
        }
    };

    let (equations, images) = if parallel {
        rayon::join(equations, images)
    } else {
        (equations(), images())
    };

    let mut failures = equations.failures;
    failures.extend(images.failures);

    if options.policy == ResolutionPolicy::FailFast {
        if let Some(first) = failures.first() {
            return Err(first.clone().into());
        }
    }

    for failure in &failures {
        log::warn!(
            "Could not resolve {} {}: {}",
            failure.kind,
            failure.id,
            failure.message
        );
    }

    Ok(Resolutions {
        equations: equations.map,
        images: images.map,
        report: ResolutionReport { failures },
    })
}

fn part_data<'d>(doc: &'d Document, reference: &ObjectReference) -> Result<&'d [u8]> {
    doc.part(&reference.part)
        .ok_or_else(|| Error::MissingPart(reference.part.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::collect_references;
    use crate::model::{Relationship, RelationshipKind};

    fn document() -> Document {
        let mut doc = Document::new();
        doc.relationships = [
            Relationship::new("rId1", RelationshipKind::OleObject, "word/embeddings/oleObject1.bin"),
            Relationship::new("rId2", RelationshipKind::Image, "word/media/image1.png"),
            Relationship::new("rId3", RelationshipKind::Image, "word/media/missing.png"),
        ]
        .into_iter()
        .collect();
        doc.add_part("word/embeddings/oleObject1.bin", b"ole".to_vec());
        doc.add_part("word/media/image1.png", b"png".to_vec());
        doc
    }

    #[test]
    fn test_resolve_all_degrade() {
        let doc = document();
        let refs = collect_references(&doc);
        let converter = FnConverter(|_: &ObjectPayload<'_>| -> Result<String> {
            Ok("$$x^2$$".to_string())
        });
        let uploader = FnUploader(|key: &str, _: &ObjectPayload<'_>| -> Result<String> {
            Ok(format!("https://cdn/{}", key))
        });
        let options = ResolveOptions {
            key_strategy: UploadKeyStrategy::ContentHash,
            ..ResolveOptions::default()
        };

        let resolutions = resolve_all(
            &doc,
            &refs,
            Resolvers {
                converter: Some(&converter),
                uploader: Some(&uploader),
            },
            &options,
        )
        .unwrap();

        assert_eq!(resolutions.equations.get("rId1"), Some("[x^2]"));
        let uri = resolutions.images.get("rId2").unwrap();
        assert!(uri.starts_with("https://cdn/") && uri.ends_with(".png"));
        assert!(!resolutions.images.contains("rId3"));

        let failures: Vec<_> = resolutions.report.failures_of(ObjectKind::Image).collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, "rId3");
    }

    #[test]
    fn test_resolve_all_fail_fast() {
        let doc = document();
        let refs = collect_references(&doc);
        let uploader = FnUploader(|key: &str, _: &ObjectPayload<'_>| -> Result<String> {
            Ok(key.to_string())
        });
        let options = ResolveOptions {
            policy: ResolutionPolicy::FailFast,
            ..ResolveOptions::default()
        };

        let result = resolve_all(
            &doc,
            &refs,
            Resolvers {
                converter: None,
                uploader: Some(&uploader),
            },
            &options,
        );

        match result {
            Err(Error::Resolution { kind, id, .. }) => {
                assert_eq!(kind, ObjectKind::Image);
                assert_eq!(id, "rId3");
            }
            other => panic!("expected resolution error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_resolve_all_without_collaborators() {
        let doc = document();
        let refs = collect_references(&doc);
        let resolutions =
            resolve_all(&doc, &refs, Resolvers::default(), &ResolveOptions::default()).unwrap();

        assert!(resolutions.equations.is_empty());
        assert!(resolutions.images.is_empty());
        assert!(resolutions.report.is_clean());
    }

    #[test]
    fn test_resolution_map_from_iter() {
        let map: ResolutionMap = [("rId2", "b"), ("rId1", "a")].into_iter().collect();
        let ids: Vec<_> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["rId1", "rId2"]);
    }
}
