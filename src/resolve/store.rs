//! Concurrent get-or-resolve store.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::error::Result;

type Outcome = std::result::Result<String, String>;
type Slot = Arc<OnceCell<Outcome>>;

/// Write-once store of resolution outcomes keyed by relationship id.
///
/// `get_or_resolve` is atomic per key: the first caller for an id runs the
/// resolver, concurrent callers for the same id block until that run
/// finishes and then observe its outcome. The map-wide mutex is held only
/// while looking up or inserting a slot, never while resolving, so distinct
/// ids resolve in parallel.
#[derive(Debug, Default)]
pub struct ResolutionStore {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ResolutionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the outcome for `id`, running `resolve` if no outcome exists.
    ///
    /// Failures are stored as well, so a failing id is attempted once.
    pub fn get_or_resolve<F>(&self, id: &str, resolve: F) -> Outcome
    where
        F: FnOnce() -> Result<String>,
    {
        let slot = {
            let mut slots = self.slots.lock();
            slots
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        slot.get_or_init(|| resolve().map_err(|e| e.to_string()))
            .clone()
    }

    /// Outcome for `id` if it has been resolved.
    pub fn get(&self, id: &str) -> Option<Outcome> {
        let slots = self.slots.lock();
        slots.get(id).and_then(|slot| slot.get().cloned())
    }

    /// Number of ids with a slot.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Consume the store after the resolution barrier.
    pub fn into_outcomes(self) -> HashMap<String, Outcome> {
        self.slots
            .into_inner()
            .into_iter()
            .filter_map(|(id, slot)| slot.get().cloned().map(|outcome| (id, outcome)))
            .collect()
    }
}
