//! Degree-based angle helpers
//!
//! All functions work in degrees. Interpolation always takes the shortest
//! way around the circle, so 350° → 10° passes through 0°, never 180°.

/// Wrap `t` into `[0, length)`; non-finite input wraps to 0
pub fn repeat(t: f32, length: f32) -> f32 {
    if !t.is_finite() {
        return 0.0;
    }
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Wrap an angle into `[0, 360)`
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = repeat(angle, 360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest difference from `current` to `target`, in `(-180, 180]`
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = repeat(target - current, 360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Interpolate between two angles along the shortest path
///
/// `t` is clamped to `[0, 1]`.
pub fn lerp_angle(current: f32, target: f32, t: f32) -> f32 {
    current + delta_angle(current, target) * t.clamp(0.0, 1.0)
}

/// Linear interpolation with `t` clamped to `[0, 1]`
pub fn lerp(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t.clamp(0.0, 1.0)
}

/// Per-frame convergence fraction for an exponential smoothing rate
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat() {
        assert_eq!(repeat(370.0, 360.0), 10.0);
        assert_eq!(repeat(-10.0, 360.0), 350.0);
        assert_eq!(wrap_degrees(720.0), 0.0);
    }

    #[test]
    fn test_repeat_non_finite() {
        assert_eq!(repeat(f32::INFINITY, 360.0), 0.0);
        assert_eq!(wrap_degrees(f32::NEG_INFINITY), 0.0);
        assert_eq!(delta_angle(10.0, f32::NAN), 0.0);
    }

    #[test]
    fn test_delta_angle_shortest() {
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((delta_angle(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert!((delta_angle(0.0, 180.0) - 180.0).abs() < 1e-4);
        assert!((delta_angle(-170.0, 170.0) + 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_lerp_angle_never_long_way() {
        let halfway = lerp_angle(350.0, 10.0, 0.5);
        assert!((wrap_degrees(halfway) - 0.0).abs() < 1e-3 || (wrap_degrees(halfway) - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_lerp_clamps_factor() {
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
        assert_eq!(lerp_angle(0.0, 30.0, 5.0), 30.0);
    }

    #[test]
    fn test_smoothing_factor() {
        assert!((smoothing_factor(5.0, 1.0 / 60.0) - 1.0 / 12.0).abs() < 1e-6);
        assert_eq!(smoothing_factor(5.0, 1.0), 1.0);
        assert_eq!(smoothing_factor(5.0, -1.0), 0.0);
    }
}
