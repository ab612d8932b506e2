//! Look-mode gating and pointer capture

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::RigHost;

use super::ModifierBehavior;

/// Whether pointer movement drives the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookMode {
    /// Look mode engaged, pointer captured
    #[default]
    Locked,
    /// Look mode disengaged, pointer released
    Free,
}

impl LookMode {
    /// Check if pointer movement drives orientation
    pub fn is_locked(&self) -> bool {
        matches!(self, LookMode::Locked)
    }

    fn from_active(active: bool) -> Self {
        if active {
            LookMode::Locked
        } else {
            LookMode::Free
        }
    }
}

/// Decides each frame whether look mode is active
///
/// Transitions are reported once, on the frame they happen.
#[derive(Debug, Clone)]
pub struct ModeGate {
    behavior: ModifierBehavior,
    /// Look mode switched off by the owner or by a toggle press
    suspended: bool,
    modifier_was_held: bool,
    mode: LookMode,
}

impl ModeGate {
    /// Create a gate in `Locked` mode
    pub fn new(behavior: ModifierBehavior) -> Self {
        Self {
            behavior,
            suspended: false,
            modifier_was_held: false,
            mode: LookMode::Locked,
        }
    }

    /// Change how the modifier is interpreted, keeping the current mode
    pub fn set_behavior(&mut self, behavior: ModifierBehavior) {
        self.behavior = behavior;
    }

    /// Current mode
    pub fn mode(&self) -> LookMode {
        self.mode
    }

    /// Check if look mode is active
    pub fn is_locked(&self) -> bool {
        self.mode.is_locked()
    }

    /// Feed this frame's modifier state, returning the new mode on a transition
    pub fn update(&mut self, modifier_held: bool) -> Option<LookMode> {
        let pressed = modifier_held && !self.modifier_was_held;
        self.modifier_was_held = modifier_held;

        let active = match self.behavior {
            ModifierBehavior::Hold => !modifier_held && !self.suspended,
            ModifierBehavior::Toggle => {
                if pressed {
                    self.suspended = !self.suspended;
                }
                !self.suspended
            }
        };

        let mode = LookMode::from_active(active);
        if mode == self.mode {
            return None;
        }

        debug!(?mode, modifier_held, "look mode changed");
        self.mode = mode;
        Some(mode)
    }

    /// Flip the owner's suspension of look mode; applied on the next update
    pub fn toggle(&mut self) {
        self.suspended = !self.suspended;
    }

    /// Request look mode on or off; applied on the next update
    ///
    /// With [`ModifierBehavior::Hold`] a held modifier still wins.
    pub fn set_active(&mut self, active: bool) {
        self.suspended = !active;
    }
}

/// Exclusive claim on the host's pointer capture
///
/// Acquire and release are idempotent; the host only hears about real
/// changes, so the capture is never doubly released or leaked.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureLease {
    held: bool,
}

impl CaptureLease {
    /// Check if the capture is currently held
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Capture the pointer if not already captured
    pub fn acquire(&mut self, host: &mut impl RigHost) -> bool {
        self.sync(true, host)
    }

    /// Release the pointer if currently captured
    pub fn release(&mut self, host: &mut impl RigHost) -> bool {
        self.sync(false, host)
    }

    /// Bring the capture in line with `wanted`, returning whether the host was told
    pub fn sync(&mut self, wanted: bool, host: &mut impl RigHost) -> bool {
        if self.held == wanted {
            return false;
        }
        self.held = wanted;
        host.set_capture(wanted);
        true
    }
}
