//! Weak handle to the pose an orbit rig follows

use std::sync::{Arc, Weak};

use camrig_core::{Pose, SharedPose};
use parking_lot::RwLock;

/// Non-owning reference to a host pose
///
/// The host keeps the [`SharedPose`] alive; once it is dropped the handle
/// reports the anchor as gone instead of dangling.
#[derive(Debug, Clone)]
pub struct AnchorHandle {
    pose: Weak<RwLock<Pose>>,
}

impl AnchorHandle {
    /// Observe a shared pose without keeping it alive
    pub fn new(pose: &SharedPose) -> Self {
        Self {
            pose: Arc::downgrade(pose),
        }
    }

    /// Check whether the host still owns the pose
    pub fn is_alive(&self) -> bool {
        self.pose.strong_count() > 0
    }

    /// Snapshot of the pose, or `None` if it has been released
    pub fn pose(&self) -> Option<Pose> {
        self.pose.upgrade().map(|pose| *pose.read())
    }
}
