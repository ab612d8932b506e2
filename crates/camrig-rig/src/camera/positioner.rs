//! Turning smoothed angles into a camera pose

use camrig_core::{yaw_pitch_rotation, Pose};
use glam::Vec3;

use super::RigVariant;

/// Places the camera behind a pivot above the anchor, looking at the pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPositioner {
    /// Pivot height above the anchor
    pub height: f32,
}

impl OrbitPositioner {
    /// Point the camera orbits around
    pub fn pivot(&self, anchor: &Pose) -> Vec3 {
        anchor.position + Vec3::Y * self.height
    }

    /// Camera pose for the given anchor, angles (degrees) and distance
    pub fn place(&self, anchor: &Pose, yaw: f32, pitch: f32, distance: f32) -> Pose {
        let pivot = self.pivot(anchor);
        let rotation = yaw_pitch_rotation(yaw, pitch);
        let mut pose = Pose::from_position_rotation(pivot - (rotation * -Vec3::Z) * distance, rotation);

        // No-op at zero distance, where the orbit rotation already faces the pivot
        pose.look_at(pivot, Vec3::Y);
        pose
    }
}

/// Rotates the camera in place at a host-owned position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectPositioner {
    /// Where the camera sits
    pub position: Vec3,
}

impl DirectPositioner {
    /// Camera pose for the given angles (degrees)
    pub fn place(&self, yaw: f32, pitch: f32) -> Pose {
        Pose::from_yaw_pitch(self.position, yaw, pitch)
    }
}

/// Positioning strategy selected by the rig's variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Positioner {
    Orbit(OrbitPositioner),
    Direct(DirectPositioner),
}

impl Positioner {
    /// Build the positioner for a configured variant
    pub fn from_variant(variant: &RigVariant, position: Vec3) -> Self {
        match variant {
            RigVariant::Orbit(orbit) => Positioner::Orbit(OrbitPositioner {
                height: orbit.height,
            }),
            RigVariant::Direct(_) => Positioner::Direct(DirectPositioner { position }),
        }
    }

    /// Check if this positioner needs an anchor
    pub fn is_orbit(&self) -> bool {
        matches!(self, Positioner::Orbit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_orbit_places_camera_behind_pivot() {
        let orbit = OrbitPositioner { height: 2.0 };
        let anchor = Pose::from_position(Vec3::new(1.0, 0.0, 1.0));

        let pose = orbit.place(&anchor, 0.0, 0.0, 5.0);
        assert!(approx(pose.position, Vec3::new(1.0, 2.0, 6.0)));
        assert!(approx(pose.forward(), -Vec3::Z));
    }

    #[test]
    fn test_orbit_keeps_distance_and_faces_pivot() {
        let orbit = OrbitPositioner { height: 1.5 };
        let anchor = Pose::from_position(Vec3::new(-3.0, 2.0, 4.0));
        let pivot = orbit.pivot(&anchor);

        let pose = orbit.place(&anchor, 135.0, -40.0, 7.0);
        assert!(((pose.position - pivot).length() - 7.0).abs() < 1e-4);
        assert!(approx(pose.forward(), (pivot - pose.position).normalize()));
        // Pitching down puts the camera above the pivot
        assert!(pose.position.y > pivot.y);
    }

    #[test]
    fn test_orbit_zero_distance_keeps_rotation() {
        let orbit = OrbitPositioner { height: 0.0 };
        let pose = orbit.place(&Pose::default(), 90.0, 0.0, 0.0);
        assert!(approx(pose.position, Vec3::ZERO));
        assert!(approx(pose.forward(), Vec3::X));
    }

    #[test]
    fn test_direct_rotates_in_place() {
        let direct = DirectPositioner {
            position: Vec3::new(0.0, 1.7, 0.0),
        };
        let pose = direct.place(-90.0, 0.0);
        assert_eq!(pose.position, Vec3::new(0.0, 1.7, 0.0));
        assert!(approx(pose.forward(), -Vec3::X));
    }
}
