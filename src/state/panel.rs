//! Display side of the polled per-group counts.

use std::sync::Mutex;

use web_time::Instant;

use crate::table::CountRow;

/// Receives the freshly computed count rows on every poll.
pub trait CountSink: Send + Sync {
    fn show_counts(&self, rows: &[CountRow]);
}

/// A count panel that keeps the latest rows for whoever draws them.
#[derive(Debug, Default)]
pub struct CountPanel {
    state: Mutex<PanelState>,
}

#[derive(Debug, Default)]
struct PanelState {
    rows: Vec<CountRow>,
    refreshed_at: Option<Instant>,
    refreshes: u64,
}

impl CountPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, PanelState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Latest published rows.
    pub fn rows(&self) -> Vec<CountRow> {
        self.state().rows.clone()
    }

    /// Number of refreshes received so far.
    pub fn refreshes(&self) -> u64 {
        self.state().refreshes
    }

    /// When the rows were last refreshed, if ever.
    pub fn refreshed_at(&self) -> Option<Instant> {
        self.state().refreshed_at
    }
}

impl CountSink for CountPanel {
    fn show_counts(&self, rows: &[CountRow]) {
        let mut state = self.state();
        if state.rows != rows {
            log::trace!("Count panel now shows {} groups", rows.len());
            state.rows = rows.to_vec();
        }
        state.refreshed_at = Some(Instant::now());
        state.refreshes += 1;
    }
}
