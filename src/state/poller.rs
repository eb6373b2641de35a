//! Background thread that periodically refreshes the displayed counts.
//!
//! The poller only reads the store. Each iteration takes the annotation lock,
//! recomputes the count rows, releases the lock, then publishes the rows.
//! Stopping waits for the iteration in progress to finish.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::panel::CountSink;
use super::shared::SharedAnnotations;
use crate::table::panel_rows;

/// Message sent to the poller thread.
enum PollerMessage {
    /// Stop after the current iteration
    Shutdown,
}

/// Timing of the count poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    /// Delay before the first refresh
    pub initial_delay: Duration,
    /// Delay between the end of one refresh and the start of the next
    pub interval: Duration,
}

impl PollSchedule {
    pub fn from_millis(initial_delay_ms: u64, interval_ms: u64) -> Self {
        Self {
            initial_delay: Duration::from_millis(initial_delay_ms),
            interval: Duration::from_millis(interval_ms),
        }
    }
}

/// Handle to the running count poller.
pub struct CountPoller {
    /// Sender for control messages to the poller thread
    control_tx: Sender<PollerMessage>,
    /// Handle to the poller thread (for joining on stop)
    thread_handle: Option<JoinHandle<()>>,
}

impl CountPoller {
    /// Spawn the poller thread.
    ///
    /// Returns `Err` if the thread fails to spawn.
    pub fn spawn(
        annotations: SharedAnnotations,
        sink: Arc<dyn CountSink>,
        schedule: PollSchedule,
    ) -> Result<Self, String> {
        let (control_tx, control_rx) = mpsc::channel::<PollerMessage>();

        let thread_handle = thread::Builder::new()
            .name("count-poller".to_string())
            .spawn(move || {
                log::debug!("Count poller thread started");
                let mut delay = schedule.initial_delay;
                loop {
                    match control_rx.recv_timeout(delay) {
                        Err(RecvTimeoutError::Timeout) => {
                            Self::refresh(&annotations, sink.as_ref());
                            delay = schedule.interval;
                        }
                        Ok(PollerMessage::Shutdown) => {
                            log::debug!("Received shutdown signal");
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => {
                            log::debug!("Control channel closed, count poller exiting");
                            break;
                        }
                    }
                }
                log::debug!("Count poller thread exiting");
            })
            .map_err(|e| format!("Failed to spawn count poller thread: {}", e))?;

        log::info!(
            "Count poller started (first refresh after {:?}, then every {:?})",
            schedule.initial_delay,
            schedule.interval
        );

        Ok(Self {
            control_tx,
            thread_handle: Some(thread_handle),
        })
    }

    /// One read-only pass over every known group.
    fn refresh(annotations: &SharedAnnotations, sink: &dyn CountSink) {
        let rows = {
            let guard = annotations.lock();
            panel_rows(&guard.store)
        };
        log::trace!("Polled counts for {} groups", rows.len());
        sink.show_counts(&rows);
    }

    /// Stop the poller and wait for its current iteration to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(handle) = self.thread_handle.take() else {
            return;
        };
        log::debug!("Shutting down count poller");
        let _ = self.control_tx.send(PollerMessage::Shutdown);
        if let Err(e) = handle.join() {
            log::warn!("Count poller thread panicked: {:?}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for CountPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}
