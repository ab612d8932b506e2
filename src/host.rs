//! Headless host that reports rig side effects through the log

use camrig_rig::{RigEvent, RigHost};
use tracing::{debug, info};

/// Tracks pointer capture and logs every rig notification
#[derive(Debug, Default)]
pub struct LoggingHost {
    captured: bool,
    capture_changes: u32,
    events: u32,
}

impl LoggingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pointer is currently captured
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Number of capture requests received
    pub fn capture_changes(&self) -> u32 {
        self.capture_changes
    }

    /// Number of notifications received
    pub fn event_count(&self) -> u32 {
        self.events
    }
}

impl RigHost for LoggingHost {
    fn set_capture(&mut self, locked: bool) {
        self.captured = locked;
        self.capture_changes += 1;
        debug!(locked, "pointer capture changed");
    }

    fn notify(&mut self, event: &RigEvent) {
        self.events += 1;
        match serde_json::to_string(event) {
            Ok(json) => info!("rig event {}", json),
            Err(_) => info!(?event, "rig event"),
        }
    }
}
