//! Yaw/pitch accumulation and smoothing

use camrig_core::angle::{delta_angle, lerp_angle, wrap_degrees};
use glam::Vec2;
use tracing::trace;

/// Turns pointer movement into smoothed yaw and pitch (degrees)
///
/// Yaw wraps into `[0, 360)`, pitch stays inside the vertical bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationIntegrator {
    target_yaw: f32,
    target_pitch: f32,
    current_yaw: f32,
    current_pitch: f32,
    min_pitch: f32,
    max_pitch: f32,
}

impl OrientationIntegrator {
    /// Create an integrator facing forward, level
    pub fn new(min_pitch: f32, max_pitch: f32) -> Self {
        let mut integrator = Self {
            target_yaw: 0.0,
            target_pitch: 0.0,
            current_yaw: 0.0,
            current_pitch: 0.0,
            min_pitch,
            max_pitch,
        };
        integrator.seed(0.0, 0.0);
        integrator
    }

    /// Jump both target and current to the given angles
    pub fn seed(&mut self, yaw: f32, pitch: f32) {
        let yaw = wrap_degrees(yaw);
        let pitch = pitch.clamp(self.min_pitch, self.max_pitch);
        self.target_yaw = yaw;
        self.current_yaw = yaw;
        self.target_pitch = pitch;
        self.current_pitch = pitch;
    }

    /// Face forward and level again
    pub fn reset(&mut self) {
        self.seed(0.0, 0.0);
    }

    /// Drop any pending target so nothing moves until new input arrives
    pub fn settle(&mut self) {
        self.target_yaw = self.current_yaw;
        self.target_pitch = self.current_pitch;
    }

    /// Change the vertical bounds, clamping both target and current
    pub fn set_pitch_bounds(&mut self, min_pitch: f32, max_pitch: f32) {
        self.min_pitch = min_pitch;
        self.max_pitch = max_pitch;
        self.target_pitch = self.target_pitch.clamp(min_pitch, max_pitch);
        self.current_pitch = self.current_pitch.clamp(min_pitch, max_pitch);
    }

    /// Add pointer movement to the targets
    ///
    /// Moving the pointer up (negative y) raises the pitch.
    /// A movement too large to represent is dropped.
    pub fn accumulate(&mut self, pointer_delta: Vec2, sensitivity: f32) {
        let delta = pointer_delta * sensitivity;
        let yaw = self.target_yaw + delta.x;
        let pitch = self.target_pitch - delta.y;
        if !yaw.is_finite() || !pitch.is_finite() {
            trace!(?pointer_delta, sensitivity, "pointer movement overflowed, ignored");
            return;
        }
        self.target_yaw = wrap_degrees(yaw);
        self.target_pitch = pitch.clamp(self.min_pitch, self.max_pitch);
    }

    /// Move current angles toward the targets by `factor` of the remaining gap
    pub fn smooth(&mut self, factor: f32) {
        self.current_yaw = wrap_degrees(lerp_angle(self.current_yaw, self.target_yaw, factor));
        // Both ends are inside the bounds, the clamp only absorbs rounding
        self.current_pitch = lerp_angle(self.current_pitch, self.target_pitch, factor)
            .clamp(self.min_pitch, self.max_pitch);
    }

    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    pub fn target_pitch(&self) -> f32 {
        self.target_pitch
    }

    pub fn current_yaw(&self) -> f32 {
        self.current_yaw
    }

    pub fn current_pitch(&self) -> f32 {
        self.current_pitch
    }

    /// Remaining shortest-path gap as `(yaw, pitch)` magnitudes
    pub fn remaining(&self) -> (f32, f32) {
        (
            delta_angle(self.current_yaw, self.target_yaw).abs(),
            (self.target_pitch - self.current_pitch).abs(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camrig_core::angle::smoothing_factor;

    #[test]
    fn test_accumulate_inverts_pitch_and_clamps() {
        let mut orientation = OrientationIntegrator::new(-80.0, 80.0);
        orientation.accumulate(Vec2::new(10.0, -5.0), 2.0);
        assert_eq!(orientation.target_yaw(), 20.0);
        assert_eq!(orientation.target_pitch(), 10.0);

        orientation.accumulate(Vec2::new(0.0, -1000.0), 2.0);
        assert_eq!(orientation.target_pitch(), 80.0);
        orientation.accumulate(Vec2::new(0.0, 1000.0), 2.0);
        assert_eq!(orientation.target_pitch(), -80.0);
    }

    #[test]
    fn test_overflowing_movement_is_dropped() {
        let mut orientation = OrientationIntegrator::new(-80.0, 80.0);
        orientation.accumulate(Vec2::new(10.0, 0.0), 1.0);
        orientation.accumulate(Vec2::new(f32::MAX, 0.0), 2.0);
        orientation.accumulate(Vec2::new(0.0, f32::MAX), 2.0);
        assert_eq!(orientation.target_yaw(), 10.0);
        assert_eq!(orientation.target_pitch(), 0.0);
    }

    #[test]
    fn test_smoothing_takes_shortest_path() {
        let mut orientation = OrientationIntegrator::new(-80.0, 80.0);
        orientation.seed(350.0, 0.0);
        orientation.accumulate(Vec2::new(20.0, 0.0), 1.0);
        assert!((orientation.target_yaw() - 10.0).abs() < 1e-4);

        orientation.smooth(0.5);
        let yaw = orientation.current_yaw();
        assert!(yaw < 1e-3 || yaw > 359.999, "yaw went the long way: {yaw}");
    }

    #[test]
    fn test_smoothing_converges_within_bounded_frames() {
        let mut orientation = OrientationIntegrator::new(-80.0, 80.0);
        orientation.accumulate(Vec2::new(45.0, -30.0), 1.0);

        let factor = smoothing_factor(5.0, 1.0 / 60.0);
        let epsilon = 0.01;
        let mut previous = orientation.remaining();
        let mut frames = 0;

        while previous.0 > epsilon || previous.1 > epsilon {
            orientation.smooth(factor);
            let gap = orientation.remaining();
            assert!(gap.0 < previous.0 || gap.0 == 0.0);
            assert!(gap.1 < previous.1 || gap.1 == 0.0);
            previous = gap;
            frames += 1;
            assert!(frames <= 120, "did not converge in 120 frames");
        }
    }

    #[test]
    fn test_settle_drops_pending_target() {
        let mut orientation = OrientationIntegrator::new(-80.0, 80.0);
        orientation.accumulate(Vec2::new(90.0, 0.0), 1.0);
        orientation.smooth(0.25);
        orientation.settle();
        assert_eq!(orientation.remaining(), (0.0, 0.0));
    }

    #[test]
    fn test_seed_clamps_pitch() {
        let mut orientation = OrientationIntegrator::new(-45.0, 45.0);
        orientation.seed(-90.0, 70.0);
        assert_eq!(orientation.current_pitch(), 45.0);
        assert_eq!(orientation.current_yaw(), 270.0);
    }
}
