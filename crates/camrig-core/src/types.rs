//! Core types shared between the rig and its host

use std::sync::Arc;

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// A pose owned by the host and observed by the rig through a weak handle
pub type SharedPose = Arc<RwLock<Pose>>;

/// Wrap a pose so it can be shared with a rig as an anchor
pub fn shared_pose(pose: Pose) -> SharedPose {
    Arc::new(RwLock::new(pose))
}

/// Rotation for a yaw/pitch pair in degrees (roll is always zero)
///
/// Yaw grows clockwise when seen from above, pitch grows upward.
/// With zero yaw and pitch the camera looks down negative Z.
pub fn yaw_pitch_rotation(yaw_degrees: f32, pitch_degrees: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        -yaw_degrees.to_radians(),
        pitch_degrees.to_radians(),
        0.0,
    )
}

/// Position and orientation of a camera or anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    /// Create a new pose at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new pose with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose at `position` facing the given yaw/pitch (degrees)
    pub fn from_yaw_pitch(position: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        Self {
            position,
            rotation: yaw_pitch_rotation(yaw_degrees, pitch_degrees),
        }
    }

    /// Compute the world matrix for this pose
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y in local space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Translate by the given offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Yaw and pitch in degrees recovered from the forward direction
    ///
    /// Yaw is returned in `(-180, 180]`, pitch in `[-90, 90]`.
    pub fn yaw_pitch(&self) -> (f32, f32) {
        let forward = self.forward().normalize_or_zero();
        let pitch = forward.y.clamp(-1.0, 1.0).asin().to_degrees();
        let yaw = forward.x.atan2(-forward.z).to_degrees();
        (yaw, pitch)
    }

    /// Turn the pose to look at a target position
    ///
    /// Returns `false` and leaves the rotation untouched when the target
    /// coincides with the position or lies straight along `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) -> bool {
        let forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO {
            return false;
        }

        let right = forward.cross(up).normalize_or_zero();
        if right == Vec3::ZERO {
            return false;
        }
        let up = right.cross(forward);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_pose_matrix() {
        let pose = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = pose.matrix();
        let translation = matrix.col(3).truncate();
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_yaw_pitch_rotation_directions() {
        let ahead = Pose::from_yaw_pitch(Vec3::ZERO, 0.0, 0.0);
        assert!(approx(ahead.forward(), -Vec3::Z));

        let right = Pose::from_yaw_pitch(Vec3::ZERO, 90.0, 0.0);
        assert!(approx(right.forward(), Vec3::X));

        let up = Pose::from_yaw_pitch(Vec3::ZERO, 0.0, 45.0);
        assert!(up.forward().y > 0.7);
        assert!(approx(up.right(), Vec3::X));
    }

    #[test]
    fn test_yaw_pitch_recovered() {
        let pose = Pose::from_yaw_pitch(Vec3::ZERO, 30.0, -20.0);
        let (yaw, pitch) = pose.yaw_pitch();
        assert!((yaw - 30.0).abs() < 1e-3);
        assert!((pitch + 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_look_at_matches_yaw_pitch() {
        let expected = yaw_pitch_rotation(45.0, -30.0);
        let target = Vec3::new(3.0, 1.0, -2.0);
        let mut pose = Pose::from_position(target - (expected * -Vec3::Z) * 4.0);
        assert!(pose.look_at(target, Vec3::Y));
        assert!(approx(pose.forward(), expected * -Vec3::Z));
        assert!(approx(pose.up(), expected * Vec3::Y));
    }

    #[test]
    fn test_look_at_degenerate() {
        let mut pose = Pose::from_position(Vec3::ZERO);
        assert!(!pose.look_at(Vec3::ZERO, Vec3::Y));
        assert!(!pose.look_at(Vec3::Y * 5.0, Vec3::Y));
        assert_eq!(pose.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_shared_pose_is_observable() {
        let anchor = shared_pose(Pose::default());
        let weak = Arc::downgrade(&anchor);
        anchor.write().translate(Vec3::X);
        assert_eq!(weak.upgrade().map(|p| p.read().position), Some(Vec3::X));
        drop(anchor);
        assert!(weak.upgrade().is_none());
    }
}
