//! camrig Core - Core types and utilities for the camera rig
//!
//! This crate provides the foundational types used by the rig and its hosts:
//! - Mathematical primitives (re-exported from glam)
//! - Pose type for camera and anchor placement
//! - Degree-based angle helpers (shortest-path interpolation)
//! - Frame clock for host-driven update loops

pub mod angle;
pub mod time;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3};
pub use time::{ClockConfig, FrameClock};
pub use types::{shared_pose, yaw_pitch_rotation, Pose, SharedPose};
