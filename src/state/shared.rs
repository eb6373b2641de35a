//! The store and its saved-state tracker behind one lock.

use std::sync::{Arc, Mutex, MutexGuard};

use super::snapshot::DirtyTracker;
use crate::model::AnnotationStore;

/// A store together with the tracker that knows whether it is saved.
#[derive(Debug, Clone)]
pub struct Annotations {
    pub store: AnnotationStore,
    pub tracker: DirtyTracker,
}

impl Annotations {
    /// Wrap `store`, treating its current content as saved.
    pub fn new(store: AnnotationStore) -> Self {
        let tracker = DirtyTracker::new(&store);
        Self { store, tracker }
    }

    pub fn is_saved(&self) -> bool {
        self.tracker.is_saved(&self.store)
    }

    /// Record the current store as saved.
    pub fn mark_saved(&mut self) {
        self.tracker.snapshot(&self.store);
    }

    /// Swap in a freshly loaded store and record it as saved.
    pub fn replace(&mut self, store: AnnotationStore) {
        self.store = store;
        self.mark_saved();
    }
}

/// Shared handle used by the session and the count poller.
#[derive(Debug, Clone)]
pub struct SharedAnnotations {
    inner: Arc<Mutex<Annotations>>,
}

impl SharedAnnotations {
    pub fn new(annotations: Annotations) -> Self {
        Self {
            inner: Arc::new(Mutex::new(annotations)),
        }
    }

    /// Lock the annotations.
    ///
    /// Every critical section leaves the store consistent, so a lock poisoned
    /// by a panicking holder is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, Annotations> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::warn!("Annotation lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Run `f` with the annotations locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut Annotations) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }
}
