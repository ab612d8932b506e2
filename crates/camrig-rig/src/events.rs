//! Host-facing side effects of the rig
//!
//! The rig never touches the cursor or a logger directly. Everything it wants
//! the outside world to know goes through a [`RigHost`].

use serde::Serialize;

use crate::camera::{LookMode, Zoom};

/// Notifications the rig raises for its owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RigEvent {
    /// The rig started running
    Activated,
    /// The rig stopped and released the pointer
    Deactivated,
    /// Look mode was entered or left
    ModeChanged { mode: LookMode },
    /// The zoom target changed
    ZoomChanged { zoom: Zoom },
    /// The orbit anchor went away; the pose is frozen until a new one is set
    AnchorLost,
    /// A live anchor is available again after a loss
    AnchorAcquired,
    /// Orientation, zoom and sensitivity went back to their defaults
    Reset,
}

/// Receiver for rig side effects
pub trait RigHost {
    /// Capture and hide the pointer (`true`) or release and show it (`false`)
    fn set_capture(&mut self, locked: bool);

    /// Observe a rig notification
    fn notify(&mut self, _event: &RigEvent) {}
}

/// Host that ignores every side effect
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl RigHost for NullHost {
    fn set_capture(&mut self, _locked: bool) {}
}

/// Host that records every side effect, for polling owners and tests
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    /// Capture requests in the order they were made
    pub captures: Vec<bool>,
    /// Notifications in the order they were raised
    pub events: Vec<RigEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest capture request, if any
    pub fn capture_state(&self) -> Option<bool> {
        self.captures.last().copied()
    }

    /// Count notifications matching a predicate
    pub fn count(&self, predicate: impl Fn(&RigEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }

    /// Take all recorded entries, leaving the log empty
    pub fn drain(&mut self) -> (Vec<bool>, Vec<RigEvent>) {
        (
            std::mem::take(&mut self.captures),
            std::mem::take(&mut self.events),
        )
    }
}

impl RigHost for EventLog {
    fn set_capture(&mut self, locked: bool) {
        self.captures.push(locked);
    }

    fn notify(&mut self, event: &RigEvent) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_records_in_order() {
        let mut log = EventLog::new();
        log.set_capture(true);
        log.notify(&RigEvent::AnchorLost);
        log.set_capture(false);

        assert_eq!(log.captures, vec![true, false]);
        assert_eq!(log.capture_state(), Some(false));
        assert_eq!(log.count(|e| matches!(e, RigEvent::AnchorLost)), 1);

        let (captures, events) = log.drain();
        assert_eq!(captures.len(), 2);
        assert_eq!(events.len(), 1);
        assert!(log.captures.is_empty());
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_string(&RigEvent::ModeChanged {
            mode: LookMode::Free,
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"mode_changed","mode":"free"}"#);
    }
}
