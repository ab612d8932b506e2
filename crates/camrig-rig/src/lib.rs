//! camrig Rig - Camera rig control model
//!
//! Provides the mouse-orbit third-person rig and the mouse-look first-person
//! rig as one frame-driven state machine, plus the input and notification
//! seams a host uses to drive it.

pub mod camera;
pub mod error;
pub mod events;
pub mod input;

pub use camera::{
    AnchorHandle, CameraRig, CameraRigState, CaptureLease, DirectConfig, DirectPositioner,
    LookMode, ModeGate, ModifierBehavior, OrbitConfig, OrbitPositioner, OrientationIntegrator,
    Positioner, RigConfig, RigFrame, RigVariant, Zoom, ZoomController,
};
pub use error::RigError;
pub use events::{EventLog, NullHost, RigEvent, RigHost};
pub use input::{FrameInput, InputAccumulator, InputSample, ScrollDelta};
