//! Saved-state tracking.
//!
//! A [`Snapshot`] is a frozen copy of every segment taken right after a
//! successful save or load. The store counts as saved while it is
//! structurally equal to that copy.

use crate::model::{AnnotationStore, Segment};

/// Frozen copy of every segment of a store, single cells first.
#[derive(Debug, Clone)]
pub struct Snapshot {
    segments: Vec<Segment>,
}

impl Snapshot {
    /// Copy the current content of `store`.
    pub fn capture(store: &AnnotationStore) -> Self {
        Self {
            segments: store.all_segments().map(Segment::clone_for_snapshot).collect(),
        }
    }

    /// True if `store` has the same segments, pairwise equal and in order.
    pub fn matches(&self, store: &AnnotationStore) -> bool {
        let mut current = store.all_segments();
        for saved in &self.segments {
            match current.next() {
                Some(segment) if segment.equals(saved) => {}
                _ => return false,
            }
        }
        current.next().is_none()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

/// Tracks whether a store still matches what was last saved or loaded.
#[derive(Debug, Clone)]
pub struct DirtyTracker {
    snapshot: Snapshot,
}

impl DirtyTracker {
    /// Start tracking with `store` as the saved state.
    pub fn new(store: &AnnotationStore) -> Self {
        Self {
            snapshot: Snapshot::capture(store),
        }
    }

    /// Record `store` as saved. Call only after a successful save or load.
    pub fn snapshot(&mut self, store: &AnnotationStore) {
        self.snapshot = Snapshot::capture(store);
        log::debug!(
            "Saved-state snapshot refreshed ({} segments)",
            self.snapshot.segment_count()
        );
    }

    /// True if `store` is structurally equal to the last snapshot.
    pub fn is_saved(&self, store: &AnnotationStore) -> bool {
        self.snapshot.matches(store)
    }
}
