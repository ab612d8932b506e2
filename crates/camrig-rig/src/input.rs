//! Per-frame input for the rig
//!
//! The host reports raw pointer, scroll and modifier state once per frame as
//! an [`InputSample`]. [`InputAccumulator`] is a small helper for hosts that
//! receive input as a stream of events between frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Raw input for one frame
///
/// Each field is `None` when the corresponding device is absent this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    /// Pointer movement in screen units (positive y is downward)
    pub pointer_delta: Option<Vec2>,
    /// Scroll wheel movement (positive is away from the user)
    pub scroll_delta: Option<f32>,
    /// Whether the look-mode modifier is held
    pub modifier_held: Option<bool>,
}

/// Input after device gaps and invalid values have been resolved
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub pointer_delta: Vec2,
    pub scroll_delta: f32,
    pub modifier_held: bool,
    /// Some part of the sample was missing or non-finite
    pub gap: bool,
}

impl InputSample {
    /// A sample with every device present
    pub fn new(pointer_delta: Vec2, scroll_delta: f32, modifier_held: bool) -> Self {
        Self {
            pointer_delta: Some(pointer_delta),
            scroll_delta: Some(scroll_delta),
            modifier_held: Some(modifier_held),
        }
    }

    /// A frame with no input devices at all
    pub fn absent() -> Self {
        Self::default()
    }

    /// A frame with only pointer movement
    pub fn pointer(dx: f32, dy: f32) -> Self {
        Self::new(Vec2::new(dx, dy), 0.0, false)
    }

    /// A frame with only scroll movement
    pub fn scroll(delta: f32) -> Self {
        Self::new(Vec2::ZERO, delta, false)
    }

    /// Builder: set the modifier state
    pub fn with_modifier(mut self, held: bool) -> Self {
        self.modifier_held = Some(held);
        self
    }

    /// Builder: set the scroll delta
    pub fn with_scroll(mut self, delta: f32) -> Self {
        self.scroll_delta = Some(delta);
        self
    }

    /// Resolve missing devices to zero movement and an unheld modifier
    pub fn resolve(&self) -> FrameInput {
        let mut gap = false;

        let pointer_delta = match self.pointer_delta {
            Some(delta) if delta.is_finite() => delta,
            _ => {
                gap = true;
                Vec2::ZERO
            }
        };

        let scroll_delta = match self.scroll_delta {
            Some(delta) if delta.is_finite() => delta,
            _ => {
                gap = true;
                0.0
            }
        };

        let modifier_held = match self.modifier_held {
            Some(held) => held,
            None => {
                gap = true;
                false
            }
        };

        if gap {
            trace!(sample = ?self, "input gap, treating missing values as zero");
        }

        FrameInput {
            pointer_delta,
            scroll_delta,
            modifier_held,
            gap,
        }
    }
}

/// Scroll wheel movement as reported by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollDelta {
    /// Movement in lines (one wheel notch is usually 1.0)
    Lines(f32),
    /// Movement in pixels, as reported by touchpads
    Pixels(f64),
}

/// Collects input events between frames into one [`InputSample`]
#[derive(Debug, Clone)]
pub struct InputAccumulator {
    pointer_delta: Vec2,
    scroll_delta: f32,
    modifier_held: bool,
    /// Whether a pointing device is connected
    pub pointer_connected: bool,
    /// Whether a keyboard is connected
    pub keyboard_connected: bool,
    /// Pointer movement multiplier
    pub pointer_multiplier: f32,
    /// Invert Y axis
    pub invert_y: bool,
}

impl Default for InputAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputAccumulator {
    /// Create a new accumulator with both devices connected
    pub fn new() -> Self {
        Self {
            pointer_delta: Vec2::ZERO,
            scroll_delta: 0.0,
            modifier_held: false,
            pointer_connected: true,
            keyboard_connected: true,
            pointer_multiplier: 1.0,
            invert_y: false,
        }
    }

    /// Handle raw pointer motion
    pub fn handle_pointer_motion(&mut self, delta: (f64, f64)) {
        let y_mult = if self.invert_y { -1.0 } else { 1.0 };
        self.pointer_delta += Vec2::new(
            delta.0 as f32 * self.pointer_multiplier,
            delta.1 as f32 * self.pointer_multiplier * y_mult,
        );
    }

    /// Handle scroll wheel
    pub fn handle_scroll(&mut self, delta: ScrollDelta) {
        let scroll = match delta {
            ScrollDelta::Lines(y) => y,
            ScrollDelta::Pixels(y) => y as f32 / 120.0,
        };
        self.scroll_delta += scroll;
    }

    /// Handle a press or release of the modifier key
    pub fn handle_modifier(&mut self, pressed: bool) {
        self.modifier_held = pressed;
    }

    /// Produce the sample for this frame and clear frame-specific data
    pub fn take_sample(&mut self) -> InputSample {
        let sample = InputSample {
            pointer_delta: self.pointer_connected.then_some(self.pointer_delta),
            scroll_delta: self.pointer_connected.then_some(self.scroll_delta),
            modifier_held: self.keyboard_connected.then_some(self.modifier_held),
        };
        self.end_frame();
        sample
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.pointer_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sample_resolves_to_zero() {
        let input = InputSample::absent().resolve();
        assert_eq!(input.pointer_delta, Vec2::ZERO);
        assert_eq!(input.scroll_delta, 0.0);
        assert!(!input.modifier_held);
        assert!(input.gap);
    }

    #[test]
    fn test_non_finite_values_are_dropped() {
        let sample = InputSample::new(Vec2::new(f32::NAN, 1.0), f32::INFINITY, true);
        let input = sample.resolve();
        assert_eq!(input.pointer_delta, Vec2::ZERO);
        assert_eq!(input.scroll_delta, 0.0);
        assert!(input.modifier_held);
        assert!(input.gap);
    }

    #[test]
    fn test_complete_sample_has_no_gap() {
        let input = InputSample::pointer(3.0, -2.0).with_scroll(1.0).resolve();
        assert_eq!(input.pointer_delta, Vec2::new(3.0, -2.0));
        assert_eq!(input.scroll_delta, 1.0);
        assert!(!input.gap);
    }

    #[test]
    fn test_accumulator_sums_events() {
        let mut acc = InputAccumulator::new();
        acc.handle_pointer_motion((2.0, 1.0));
        acc.handle_pointer_motion((1.0, -3.0));
        acc.handle_scroll(ScrollDelta::Lines(1.0));
        acc.handle_scroll(ScrollDelta::Pixels(240.0));
        acc.handle_modifier(true);

        let sample = acc.take_sample();
        assert_eq!(sample.pointer_delta, Some(Vec2::new(3.0, -2.0)));
        assert_eq!(sample.scroll_delta, Some(3.0));
        assert_eq!(sample.modifier_held, Some(true));

        // Deltas are per frame, the modifier is held until released
        let sample = acc.take_sample();
        assert_eq!(sample.pointer_delta, Some(Vec2::ZERO));
        assert_eq!(sample.modifier_held, Some(true));
    }

    #[test]
    fn test_accumulator_invert_and_multiplier() {
        let mut acc = InputAccumulator::new();
        acc.invert_y = true;
        acc.pointer_multiplier = 2.0;
        acc.handle_pointer_motion((1.0, 1.0));
        assert_eq!(acc.take_sample().pointer_delta, Some(Vec2::new(2.0, -2.0)));
    }

    #[test]
    fn test_disconnected_devices_report_gaps() {
        let mut acc = InputAccumulator::new();
        acc.pointer_connected = false;
        acc.keyboard_connected = false;
        acc.handle_pointer_motion((5.0, 5.0));

        let sample = acc.take_sample();
        assert_eq!(sample, InputSample::absent());
    }
}
