//! Scroll-driven zoom

use camrig_core::angle::lerp;
use serde::{Deserialize, Serialize};

use super::{DirectConfig, OrbitConfig};

/// The rig's zoom parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Zoom {
    /// Orbit distance from the pivot
    Distance(f32),
    /// Field of view in degrees
    FieldOfView(f32),
}

impl Zoom {
    /// The raw value regardless of kind
    pub fn value(&self) -> f32 {
        match self {
            Zoom::Distance(value) | Zoom::FieldOfView(value) => *value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoomKind {
    Distance,
    FieldOfView,
}

/// Converts scroll input into a clamped zoom value
///
/// Distance zoom applies immediately; field-of-view zoom eases toward its
/// target at the rig's smoothing rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    kind: ZoomKind,
    current: f32,
    target: f32,
    default: f32,
    min: f32,
    max: f32,
    /// Zoom change per unit of scroll
    speed: f32,
    dead_zone: f32,
}

impl ZoomController {
    /// Distance zoom for the orbit rig
    pub fn orbit(config: &OrbitConfig, dead_zone: f32) -> Self {
        Self::build(
            ZoomKind::Distance,
            config.distance,
            config.min_distance,
            config.max_distance,
            config.zoom_speed * config.zoom_scale,
            dead_zone,
        )
    }

    /// Field-of-view zoom for the direct rig
    pub fn field_of_view(config: &DirectConfig, dead_zone: f32) -> Self {
        Self::build(
            ZoomKind::FieldOfView,
            config.default_zoom,
            config.min_zoom,
            config.max_zoom,
            config.zoom_speed,
            dead_zone,
        )
    }

    fn build(kind: ZoomKind, default: f32, min: f32, max: f32, speed: f32, dead_zone: f32) -> Self {
        let default = default.clamp(min, max);
        Self {
            kind,
            current: default,
            target: default,
            default,
            min,
            max,
            speed,
            dead_zone,
        }
    }

    /// Apply this frame's scroll, returning the new target if it changed
    ///
    /// Scrolling forward (positive) zooms in.
    pub fn apply_scroll(&mut self, scroll: f32) -> Option<Zoom> {
        if !scroll.is_finite() || scroll.abs() <= self.dead_zone {
            return None;
        }

        let target = (self.target - scroll * self.speed).clamp(self.min, self.max);
        if target == self.target {
            return None;
        }

        self.target = target;
        if self.kind == ZoomKind::Distance {
            self.current = target;
        }
        Some(self.wrap(target))
    }

    /// Ease the applied value toward the target
    pub fn smooth(&mut self, factor: f32) {
        self.current = match self.kind {
            ZoomKind::Distance => self.target,
            ZoomKind::FieldOfView => lerp(self.current, self.target, factor).clamp(self.min, self.max),
        };
    }

    /// Drop the pending target, keeping the applied value
    pub fn settle(&mut self) {
        self.target = self.current;
    }

    /// Jump straight to a value, clamped; returns the new zoom if it changed
    pub fn set(&mut self, value: f32) -> Option<Zoom> {
        if !value.is_finite() {
            return None;
        }
        let value = value.clamp(self.min, self.max);
        if value == self.target && value == self.current {
            return None;
        }
        self.target = value;
        self.current = value;
        Some(self.wrap(value))
    }

    /// Return to the configured default
    pub fn reset(&mut self) -> Option<Zoom> {
        self.set(self.default)
    }

    /// Value currently applied to the camera
    pub fn current(&self) -> Zoom {
        self.wrap(self.current)
    }

    /// Value the zoom is heading toward
    pub fn target(&self) -> Zoom {
        self.wrap(self.target)
    }

    fn wrap(&self, value: f32) -> Zoom {
        match self.kind {
            ZoomKind::Distance => Zoom::Distance(value),
            ZoomKind::FieldOfView => Zoom::FieldOfView(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_scroll_scenario() {
        let mut zoom = ZoomController::orbit(&OrbitConfig::default(), 0.1);
        assert_eq!(zoom.current(), Zoom::Distance(5.0));

        // 5 - (-20 * 2 * 0.1) = 9
        let changed = zoom.apply_scroll(-20.0);
        assert!(matches!(changed, Some(Zoom::Distance(d)) if (d - 9.0).abs() < 1e-5));
        assert!((zoom.current().value() - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_dead_zone_ignores_noise() {
        let mut zoom = ZoomController::orbit(&OrbitConfig::default(), 0.1);
        assert_eq!(zoom.apply_scroll(0.1), None);
        assert_eq!(zoom.apply_scroll(-0.05), None);
        assert_eq!(zoom.current(), Zoom::Distance(5.0));
    }

    #[test]
    fn test_distance_clamped() {
        let mut zoom = ZoomController::orbit(&OrbitConfig::default(), 0.1);
        zoom.apply_scroll(1000.0);
        assert_eq!(zoom.current(), Zoom::Distance(1.0));
        assert_eq!(zoom.apply_scroll(1000.0), None);
        zoom.apply_scroll(-1000.0);
        assert_eq!(zoom.current(), Zoom::Distance(10.0));
    }

    #[test]
    fn test_field_of_view_eases_toward_target() {
        let mut zoom = ZoomController::field_of_view(&DirectConfig::default(), 0.1);
        assert_eq!(zoom.apply_scroll(1.0), Some(Zoom::FieldOfView(50.0)));
        assert_eq!(zoom.current(), Zoom::FieldOfView(60.0));

        zoom.smooth(0.5);
        assert_eq!(zoom.current(), Zoom::FieldOfView(55.0));
        zoom.smooth(1.0);
        assert_eq!(zoom.current(), Zoom::FieldOfView(50.0));
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut zoom = ZoomController::field_of_view(&DirectConfig::default(), 0.1);
        assert_eq!(zoom.set(200.0), Some(Zoom::FieldOfView(90.0)));
        assert_eq!(zoom.set(200.0), None);
        assert_eq!(zoom.set(f32::NAN), None);
        assert_eq!(zoom.reset(), Some(Zoom::FieldOfView(60.0)));
        assert_eq!(zoom.reset(), None);
    }
}
