//! Runtime state around the annotation store: saved-state tracking, the
//! shared lock, and the periodic count refresh.

mod panel;
mod poller;
mod shared;
mod snapshot;

pub use panel::{CountPanel, CountSink};
pub use poller::{CountPoller, PollSchedule};
pub use shared::{Annotations, SharedAnnotations};
pub use snapshot::{DirtyTracker, Snapshot};
