//! Scripted input playback
//!
//! A script is a JSON list of segments. Each segment repeats the same
//! per-frame input for a number of frames, so a recorded session can be
//! described in a handful of lines.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use camrig_rig::InputSample;
use glam::Vec3;
use serde::{Deserialize, Serialize};

fn default_present() -> bool {
    true
}

/// Owner-side calls made on the first frame of a segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentActions {
    /// Flip look mode as the owner would from a menu
    pub toggle_look: bool,
    /// Jump the zoom to this value
    pub set_zoom: Option<f32>,
    /// Change pointer sensitivity
    pub set_sensitivity: Option<f32>,
    /// Return orientation, zoom and sensitivity to defaults
    pub reset: bool,
    /// Drop the orbit anchor, as if its object were destroyed
    pub release_anchor: bool,
    /// Spawn a fresh anchor at this position
    pub spawn_anchor: Option<[f32; 3]>,
}

/// A run of identical frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub frames: u32,
    /// Pointer movement per frame, `[dx, dy]`, dy positive downward
    #[serde(default)]
    pub pointer: [f32; 2],
    /// Scroll per frame, positive zooms in
    #[serde(default)]
    pub scroll: f32,
    /// Modifier key state for the whole segment
    #[serde(default)]
    pub modifier: bool,
    /// `false` simulates a frame with no input devices reporting
    #[serde(default = "default_present")]
    pub present: bool,
    /// Anchor movement per frame
    #[serde(default)]
    pub anchor_velocity: [f32; 3],
    #[serde(default)]
    pub actions: SegmentActions,
}

impl Segment {
    /// Input sample fed to the rig on every frame of this segment
    pub fn sample(&self) -> InputSample {
        if !self.present {
            return InputSample::absent();
        }
        InputSample::pointer(self.pointer[0], self.pointer[1])
            .with_scroll(self.scroll)
            .with_modifier(self.modifier)
    }

    pub fn anchor_velocity(&self) -> Vec3 {
        Vec3::from_array(self.anchor_velocity)
    }
}

/// Ordered list of segments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub segments: Vec<Segment>,
}

impl InputScript {
    /// Load a script from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input script {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse input script {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(content)?;
        if script.segments.iter().any(|s| s.frames == 0) {
            anyhow::bail!("segments must cover at least one frame");
        }
        Ok(script)
    }

    /// Built-in session: look around, hold the modifier, zoom, lose the anchor
    pub fn demo() -> Self {
        let segment = |frames: u32| Segment {
            frames,
            pointer: [0.0, 0.0],
            scroll: 0.0,
            modifier: false,
            present: true,
            anchor_velocity: [0.0, 0.0, 0.0],
            actions: SegmentActions::default(),
        };

        Self {
            segments: vec![
                Segment {
                    pointer: [3.0, -1.0],
                    ..segment(60)
                },
                Segment {
                    anchor_velocity: [0.0, 0.0, -0.05],
                    ..segment(60)
                },
                Segment {
                    modifier: true,
                    pointer: [10.0, 10.0],
                    ..segment(30)
                },
                Segment {
                    scroll: -1.0,
                    ..segment(10)
                },
                Segment {
                    present: false,
                    ..segment(5)
                },
                Segment {
                    actions: SegmentActions {
                        release_anchor: true,
                        ..Default::default()
                    },
                    pointer: [2.0, 0.0],
                    ..segment(20)
                },
                Segment {
                    actions: SegmentActions {
                        spawn_anchor: Some([0.0, 0.0, 0.0]),
                        reset: true,
                        ..Default::default()
                    },
                    ..segment(60)
                },
            ],
        }
    }

    /// Number of frames the script plays for
    pub fn total_frames(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// Iterate `(segment, first_frame_of_segment)` for every frame
    pub fn frames(&self) -> impl Iterator<Item = (&Segment, bool)> {
        self.segments
            .iter()
            .flat_map(|segment| (0..segment.frames).map(move |i| (segment, i == 0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_parse_minimal_segment() {
        let script = InputScript::parse(r#"{"segments":[{"frames":3,"pointer":[1.0,2.0]}]}"#).unwrap();
        let segment = &script.segments[0];
        assert!(segment.present);
        assert!(!segment.modifier);
        assert_eq!(segment.actions, SegmentActions::default());

        let input = segment.sample().resolve();
        assert_eq!(input.pointer_delta, Vec2::new(1.0, 2.0));
        assert!(!input.gap);
    }

    #[test]
    fn test_absent_segment_is_a_gap() {
        let script = InputScript::parse(r#"{"segments":[{"frames":1,"present":false,"scroll":4.0}]}"#).unwrap();
        let input = script.segments[0].sample().resolve();
        assert!(input.gap);
        assert_eq!(input.scroll_delta, 0.0);
    }

    #[test]
    fn test_zero_frame_segment_rejected() {
        assert!(InputScript::parse(r#"{"segments":[{"frames":0}]}"#).is_err());
        assert!(InputScript::parse("not json").is_err());
    }

    #[test]
    fn test_frames_marks_segment_starts() {
        let script = InputScript::demo();
        let starts = script.frames().filter(|(_, first)| *first).count();
        assert_eq!(starts, script.segments.len());
        assert_eq!(script.frames().count() as u64, script.total_frames());
    }

    #[test]
    fn test_demo_round_trips_through_json() {
        let script = InputScript::demo();
        let text = serde_json::to_string(&script).unwrap();
        assert_eq!(InputScript::parse(&text).unwrap(), script);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = InputScript::load(Path::new("/nonexistent/script.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("script.json"));
    }
}
