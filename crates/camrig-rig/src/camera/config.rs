//! Camera rig configuration

use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// Pitch may not reach straight up or down, where yaw becomes undefined
const PITCH_LIMIT: f32 = 90.0;

/// Widest field of view the look variant accepts, in degrees
const FOV_LIMIT: f32 = 180.0;

/// How the modifier key drives look mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierBehavior {
    /// Look mode is off only while the modifier is held
    #[default]
    Hold,
    /// Each press of the modifier flips look mode
    Toggle,
}

/// Settings for the third-person rig orbiting an anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// Starting and reset distance from the pivot
    pub distance: f32,
    /// Closest allowed distance
    pub min_distance: f32,
    /// Farthest allowed distance
    pub max_distance: f32,
    /// Pivot height above the anchor position
    pub height: f32,
    /// Scroll sensitivity
    pub zoom_speed: f32,
    /// Extra scale applied to scroll before it changes the distance
    pub zoom_scale: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            min_distance: 1.0,
            max_distance: 10.0,
            height: 2.0,
            zoom_speed: 2.0,
            zoom_scale: 0.1,
        }
    }
}

/// Settings for the first-person rig rotating in place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectConfig {
    /// Starting and reset field of view in degrees
    pub default_zoom: f32,
    /// Narrowest field of view
    pub min_zoom: f32,
    /// Widest field of view
    pub max_zoom: f32,
    /// Degrees of field of view per unit of scroll
    pub zoom_speed: f32,
}

impl Default for DirectConfig {
    fn default() -> Self {
        Self {
            default_zoom: 60.0,
            min_zoom: 20.0,
            max_zoom: 90.0,
            zoom_speed: 10.0,
        }
    }
}

/// Positioning strategy, fixed at configuration time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RigVariant {
    /// Orbit around an external anchor
    Orbit(OrbitConfig),
    /// Rotate in place, zooming the field of view
    Direct(DirectConfig),
}

impl RigVariant {
    /// Short name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            RigVariant::Orbit(_) => "orbit",
            RigVariant::Direct(_) => "direct",
        }
    }

    /// Check if this is the orbit variant
    pub fn is_orbit(&self) -> bool {
        matches!(self, RigVariant::Orbit(_))
    }
}

/// Camera rig configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigConfig {
    /// Degrees of rotation per unit of pointer movement
    pub sensitivity: f32,
    /// Exponential smoothing rate (per second)
    pub smoothing: f32,
    /// Lowest pitch in degrees
    pub min_vertical_angle: f32,
    /// Highest pitch in degrees
    pub max_vertical_angle: f32,
    /// Scroll magnitudes at or below this are treated as noise
    pub scroll_dead_zone: f32,
    /// How the modifier key drives look mode
    #[serde(default)]
    pub modifier: ModifierBehavior,
    /// Release the pointer while an orbit anchor is missing
    #[serde(default)]
    pub release_capture_on_anchor_loss: bool,
    /// Positioning strategy
    pub variant: RigVariant,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self::orbit()
    }
}

impl RigConfig {
    /// Third-person preset: orbit an anchor, hold the modifier to free the pointer
    pub fn orbit() -> Self {
        Self {
            sensitivity: 2.0,
            smoothing: 5.0,
            min_vertical_angle: -80.0,
            max_vertical_angle: 80.0,
            scroll_dead_zone: 0.1,
            modifier: ModifierBehavior::Hold,
            release_capture_on_anchor_loss: false,
            variant: RigVariant::Orbit(OrbitConfig::default()),
        }
    }

    /// First-person preset: look around in place, tap the modifier to pause
    pub fn first_person() -> Self {
        Self {
            modifier: ModifierBehavior::Toggle,
            variant: RigVariant::Direct(DirectConfig::default()),
            ..Self::orbit()
        }
    }

    /// Check every field, reporting the first invalid one
    pub fn validate(&self) -> Result<(), RigError> {
        non_negative("sensitivity", self.sensitivity)?;
        positive("smoothing", self.smoothing)?;
        non_negative("scroll_dead_zone", self.scroll_dead_zone)?;

        let (min, max) = (self.min_vertical_angle, self.max_vertical_angle);
        if !(min.is_finite() && max.is_finite() && -PITCH_LIMIT < min && min <= max && max < PITCH_LIMIT) {
            return Err(RigError::InvalidBounds {
                name: "vertical_angle",
                min,
                max,
            });
        }

        match &self.variant {
            RigVariant::Orbit(orbit) => {
                bounds("distance", orbit.min_distance, orbit.max_distance, 0.0, f32::MAX)?;
                within("distance", orbit.distance, orbit.min_distance, orbit.max_distance)?;
                finite("height", orbit.height)?;
                non_negative("zoom_speed", orbit.zoom_speed)?;
                non_negative("zoom_scale", orbit.zoom_scale)?;
            }
            RigVariant::Direct(direct) => {
                bounds("zoom", direct.min_zoom, direct.max_zoom, f32::MIN_POSITIVE, FOV_LIMIT)?;
                within("default_zoom", direct.default_zoom, direct.min_zoom, direct.max_zoom)?;
                non_negative("zoom_speed", direct.zoom_speed)?;
            }
        }

        Ok(())
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), RigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RigError::InvalidValue { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), RigError> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(RigError::InvalidValue { name, value });
    }
    Ok(())
}

fn positive(name: &'static str, value: f32) -> Result<(), RigError> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(RigError::InvalidValue { name, value });
    }
    Ok(())
}

fn bounds(name: &'static str, min: f32, max: f32, lowest: f32, highest: f32) -> Result<(), RigError> {
    if min.is_finite() && max.is_finite() && lowest <= min && min <= max && max <= highest {
        Ok(())
    } else {
        Err(RigError::InvalidBounds { name, min, max })
    }
}

fn within(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), RigError> {
    finite(name, value)?;
    if value < min || value > max {
        return Err(RigError::InvalidValue { name, value });
    }
    Ok(())
}
