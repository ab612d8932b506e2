//! camrig - headless driver for the orbit and free-look camera rig
//!
//! Replays an input script against a rig at a fixed 60 Hz and logs what the
//! camera does. Usage: `camrig [orbit|look] [script.json]`

mod host;
mod script;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use camrig_core::{shared_pose, FrameClock, Pose, SharedPose};
use camrig_rig::{CameraRig, InputAccumulator, ScrollDelta};
use glam::Vec3;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use host::LoggingHost;
use script::{InputScript, Segment, SegmentActions};
use settings::Settings;

const FRAME_TIME: f32 = 1.0 / 60.0;

/// Which rig to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RigKind {
    Orbit,
    Look,
}

struct Args {
    kind: RigKind,
    script: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let kind = match args.next().as_deref() {
            None | Some("orbit") => RigKind::Orbit,
            Some("look") => RigKind::Look,
            Some(other) => anyhow::bail!("unknown rig '{}', expected 'orbit' or 'look'", other),
        };
        let script = args.next().map(PathBuf::from);
        if let Some(extra) = args.next() {
            anyhow::bail!("unexpected argument '{}'", extra);
        }
        Ok(Self { kind, script })
    }
}

/// Playback state: the rig, its host and the anchor it follows
struct Session {
    rig: CameraRig,
    host: LoggingHost,
    input: InputAccumulator,
    clock: FrameClock,
    anchor: Option<SharedPose>,
    pose_log_interval: u64,
}

impl Session {
    fn new(kind: RigKind, settings: &Settings) -> Result<Self> {
        let (rig, anchor) = match kind {
            RigKind::Orbit => {
                let anchor = shared_pose(Pose::from_position(Vec3::ZERO));
                let rig = CameraRig::with_anchor(settings.orbit.clone(), &anchor)
                    .context("Failed to create orbit rig")?;
                (rig, Some(anchor))
            }
            RigKind::Look => {
                let rig = CameraRig::new(settings.first_person.clone())
                    .context("Failed to create first-person rig")?;
                (rig, None)
            }
        };

        let mut input = InputAccumulator::new();
        input.pointer_multiplier = settings.input.pointer_multiplier;
        input.invert_y = settings.input.invert_y;

        Ok(Self {
            rig,
            host: LoggingHost::new(),
            input,
            clock: FrameClock::new(settings.clock.clone()),
            anchor,
            pose_log_interval: u64::from(settings.debug.pose_log_interval),
        })
    }

    fn start(&mut self, kind: RigKind) -> Result<()> {
        let initial = match kind {
            RigKind::Orbit => Pose::from_yaw_pitch(Vec3::new(0.0, 2.0, 5.0), 0.0, -10.0),
            RigKind::Look => Pose::from_position(Vec3::new(0.0, 1.7, 0.0)),
        };
        self.rig
            .activate(initial, &mut self.host)
            .context("Failed to activate camera rig")
    }

    fn apply_actions(&mut self, actions: &SegmentActions) {
        if actions.release_anchor && self.anchor.take().is_some() {
            info!("anchor released");
        }
        if let Some(position) = actions.spawn_anchor {
            let position = Vec3::from_array(position);
            if self.rig.config().variant.is_orbit() {
                let anchor = shared_pose(Pose::from_position(position));
                if let Err(e) = self.rig.set_anchor(&anchor) {
                    warn!("Failed to set anchor: {}", e);
                }
                self.anchor = Some(anchor);
            } else if let Err(e) = self.rig.set_position(position) {
                warn!("Failed to move camera: {}", e);
            }
        }
        if actions.toggle_look {
            self.rig.toggle_look_mode();
        }
        if let Some(zoom) = actions.set_zoom {
            self.rig.set_zoom(zoom);
        }
        if let Some(sensitivity) = actions.set_sensitivity {
            if let Err(e) = self.rig.set_sensitivity(sensitivity) {
                warn!("Ignoring sensitivity change: {}", e);
            }
        }
        if actions.reset {
            self.rig.reset_to_defaults();
        }
    }

    /// Replay the segment's input through the accumulator, as a device would
    fn feed(&mut self, segment: &Segment) {
        let sample = segment.sample();
        self.input.pointer_connected = sample.pointer_delta.is_some();
        self.input.keyboard_connected = sample.modifier_held.is_some();

        if let Some(delta) = sample.pointer_delta {
            self.input
                .handle_pointer_motion((f64::from(delta.x), f64::from(delta.y)));
        }
        if let Some(scroll) = sample.scroll_delta {
            self.input.handle_scroll(ScrollDelta::Lines(scroll));
        }
        if let Some(held) = sample.modifier_held {
            self.input.handle_modifier(held);
        }
    }

    fn step(&mut self, segment: &Segment, first: bool) {
        if first {
            self.apply_actions(&segment.actions);
        }
        if let Some(anchor) = &self.anchor {
            anchor.write().translate(segment.anchor_velocity());
        }
        self.feed(segment);

        let dt = self.clock.update(FRAME_TIME);
        let sample = self.input.take_sample();
        let frame = self.rig.tick(dt, &sample, &mut self.host);

        let frame_index = self.clock.frame_count;
        if self.pose_log_interval > 0 && frame_index % self.pose_log_interval == 0 {
            let (yaw, pitch) = frame.pose.yaw_pitch();
            let position = frame.pose.position;
            info!(
                frame = frame_index,
                x = position.x,
                y = position.y,
                z = position.z,
                yaw,
                pitch,
                zoom = frame.zoom.value(),
                mode = ?frame.look_mode,
                "camera pose"
            );
        }
    }

    fn finish(mut self) {
        self.rig.deactivate(&mut self.host);
        let state = self.rig.state();
        info!(
            frames = self.clock.frame_count,
            seconds = self.clock.total_time,
            yaw = state.current_yaw,
            pitch = state.current_pitch,
            zoom = state.zoom.value(),
            captured = self.host.is_captured(),
            capture_changes = self.host.capture_changes(),
            events = self.host.event_count(),
            "playback finished"
        );
    }
}

fn main() -> Result<()> {
    // Initialize logging; the settings file may lower or raise the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_filter_reloading();
    let reload = builder.reload_handle();
    tracing::subscriber::set_global_default(builder.finish())
        .context("Failed to set subscriber")?;

    let args = Args::parse(std::env::args().skip(1))?;
    let settings = Settings::load();

    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        match EnvFilter::try_new(&settings.debug.log_level) {
            Ok(filter) => reload.reload(filter).context("Failed to apply log level")?,
            Err(e) => warn!("Invalid log level '{}': {}", settings.debug.log_level, e),
        }
    }

    let script = match &args.script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::demo(),
    };

    info!(
        rig = ?args.kind,
        segments = script.segments.len(),
        frames = script.total_frames(),
        "Starting camrig playback..."
    );

    let mut session = Session::new(args.kind, &settings)?;
    session.start(args.kind)?;

    for (segment, first) in script.frames() {
        session.step(segment, first);
    }

    session.finish();
    Ok(())
}
