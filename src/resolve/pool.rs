//! Fan-out/join resolution of reference lists.

use std::collections::{BTreeMap, HashSet};

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{ObjectKind, ObjectReference};

use super::store::ResolutionStore;
use super::{ResolutionFailure, ResolutionMap};

/// Outcome of resolving one reference list.
#[derive(Debug, Clone, Default)]
pub struct ResolutionOutcome {
    /// Successfully resolved values
    pub map: ResolutionMap,

    /// Failed ids, in reference order
    pub failures: Vec<ResolutionFailure>,
}

/// Resolves a list of references, one task per reference.
#[derive(Debug, Clone, Copy)]
pub struct ResolverPool {
    kind: ObjectKind,
    parallel: bool,
}

impl ResolverPool {
    /// Create a parallel pool for one object kind.
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            parallel: true,
        }
    }

    /// Enable or disable parallel resolution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolve every reference and wait for all of them.
    ///
    /// `resolve` is called at most once per distinct id, however many
    /// references share it. Nothing is returned before every task has
    /// finished.
    pub fn resolve<F>(&self, refs: &[ObjectReference], resolve: F) -> ResolutionOutcome
    where
        F: Fn(&ObjectReference) -> Result<String> + Sync,
    {
        let store = ResolutionStore::new();

        // Outcomes are read back from the store in `freeze`
        let task = |reference: &ObjectReference| {
            let _ = store.get_or_resolve(&reference.id, || resolve(reference));
        };
        if self.parallel {
            refs.par_iter().for_each(task);
        } else {
            refs.iter().for_each(task);
        }

        log::debug!(
            "Resolved {} {} references ({} distinct)",
            refs.len(),
            self.kind,
            store.len()
        );

        self.freeze(store, refs)
    }

    fn freeze(&self, store: ResolutionStore, refs: &[ObjectReference]) -> ResolutionOutcome {
        let mut outcomes = store.into_outcomes();
        let mut values = BTreeMap::new();
        let mut failures = Vec::new();
        let mut seen = HashSet::new();

        for reference in refs {
            if !seen.insert(reference.id.as_str()) {
                continue;
            }
            match outcomes.remove(&reference.id) {
                Some(Ok(value)) => {
                    values.insert(reference.id.clone(), value);
                }
                Some(Err(message)) => failures.push(ResolutionFailure {
                    kind: self.kind,
                    id: reference.id.clone(),
                    message,
                }),
                None => {}
            }
        }

        ResolutionOutcome {
            map: ResolutionMap::from_values(values),
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn refs(ids: &[&str]) -> Vec<ObjectReference> {
        ids.iter()
            .map(|id| ObjectReference::new(*id, format!("word/embeddings/{}.bin", id)))
            .collect()
    }

    #[test]
    fn test_pool_deduplicates() {
        let calls = AtomicUsize::new(0);
        let outcome = ResolverPool::new(ObjectKind::Equation).resolve(
            &refs(&["rId1", "rId2", "rId1", "rId1"]),
            |r| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(format!("x_{}", r.id))
            },
        );

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.map.len(), 2);
        assert_eq!(outcome.map.get("rId1"), Some("x_rId1"));
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_pool_failure_does_not_abort_others() {
        let outcome = ResolverPool::new(ObjectKind::Image)
            .with_parallel(false)
            .resolve(&refs(&["rId1", "rId2", "rId3"]), |r| {
                if r.id == "rId2" {
                    Err(Error::Upload("refused".into()))
                } else {
                    Ok(format!("https://cdn/{}", r.id))
                }
            });

        assert_eq!(outcome.map.len(), 2);
        assert_eq!(outcome.map.get("rId2"), None);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].id, "rId2");
        assert_eq!(outcome.failures[0].kind, ObjectKind::Image);
    }

    #[test]
    fn test_pool_failures_in_reference_order() {
        let outcome = ResolverPool::new(ObjectKind::Equation).resolve(
            &refs(&["rId5", "rId3", "rId4", "rId3"]),
            |_| Err(Error::Conversion("unsupported".into())),
        );

        let ids: Vec<_> = outcome.failures.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["rId5", "rId3", "rId4"]);
        assert!(outcome.map.is_empty());
    }

    #[test]
    fn test_pool_empty() {
        let outcome = ResolverPool::new(ObjectKind::Image).resolve(&[], |_| unreachable!());
        assert!(outcome.map.is_empty());
        assert!(outcome.failures.is_empty());
    }
}
