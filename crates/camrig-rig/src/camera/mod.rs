//! Camera rig module
//!
//! Provides the orbit (third-person) and direct (first-person) camera rig
//! with pointer look, look-mode gating and scroll zoom.

mod anchor;
mod config;
mod mode;
mod orientation;
mod positioner;
mod rig;
mod zoom;

pub use anchor::AnchorHandle;
pub use config::{DirectConfig, ModifierBehavior, OrbitConfig, RigConfig, RigVariant};
pub use mode::{CaptureLease, LookMode, ModeGate};
pub use orientation::OrientationIntegrator;
pub use positioner::{DirectPositioner, OrbitPositioner, Positioner};
pub use rig::{CameraRig, CameraRigState, RigFrame};
pub use zoom::{Zoom, ZoomController};
