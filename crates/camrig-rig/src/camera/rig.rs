//! The camera rig state machine

use camrig_core::angle::smoothing_factor;
use camrig_core::{Pose, SharedPose};
use glam::Vec3;
use tracing::{debug, error, info, warn};

use crate::error::RigError;
use crate::events::{RigEvent, RigHost};
use crate::input::InputSample;

use super::{
    AnchorHandle, CaptureLease, LookMode, ModeGate, OrientationIntegrator, Positioner, RigConfig,
    RigVariant, Zoom, ZoomController,
};

/// Snapshot of the rig's mutable state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRigState {
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub current_yaw: f32,
    pub current_pitch: f32,
    /// Zoom applied to the camera
    pub zoom: Zoom,
    /// Zoom being eased toward
    pub target_zoom: Zoom,
    pub sensitivity: f32,
    pub look_mode: LookMode,
    /// The orbit anchor is gone and the pose is frozen
    pub anchor_lost: bool,
}

/// Result of one rig update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigFrame {
    /// Pose to write into the camera transform
    pub pose: Pose,
    /// Distance or field of view to apply
    pub zoom: Zoom,
    pub look_mode: LookMode,
    /// Point the orbit rig looks at, for debug drawing
    pub pivot: Option<Vec3>,
}

/// Orbit or free-look camera rig driven once per frame
///
/// Call [`CameraRig::activate`] once, [`CameraRig::tick`] every frame and
/// [`CameraRig::deactivate`] when the camera is disabled; the latter is the
/// only way the pointer capture is handed back.
#[derive(Debug)]
pub struct CameraRig {
    config: RigConfig,
    sensitivity: f32,
    gate: ModeGate,
    orientation: OrientationIntegrator,
    zoom: ZoomController,
    positioner: Positioner,
    anchor: Option<AnchorHandle>,
    anchor_lost: bool,
    capture: CaptureLease,
    pose: Pose,
    pivot: Option<Vec3>,
    /// Notifications raised between frames, delivered on the next tick
    pending: Vec<RigEvent>,
    active: bool,
}

impl CameraRig {
    /// Create an inactive rig from a validated configuration
    pub fn new(config: RigConfig) -> Result<Self, RigError> {
        config.validate()?;
        debug!(variant = config.variant.name(), "camera rig configured");

        Ok(Self {
            sensitivity: config.sensitivity,
            gate: ModeGate::new(config.modifier),
            orientation: OrientationIntegrator::new(config.min_vertical_angle, config.max_vertical_angle),
            zoom: zoom_for(&config),
            positioner: Positioner::from_variant(&config.variant, Vec3::ZERO),
            anchor: None,
            anchor_lost: false,
            capture: CaptureLease::default(),
            pose: Pose::default(),
            pivot: None,
            pending: Vec::new(),
            active: false,
            config,
        })
    }

    /// Create an orbit rig already pointed at an anchor
    pub fn with_anchor(config: RigConfig, anchor: &SharedPose) -> Result<Self, RigError> {
        let mut rig = Self::new(config)?;
        rig.set_anchor(anchor)?;
        Ok(rig)
    }

    /// Start running from the camera's current pose
    ///
    /// Yaw and pitch are seeded from `initial` so the first frame does not
    /// snap. Captures the pointer. An orbit rig without a live anchor stays
    /// inactive and reports [`RigError::MissingAnchor`].
    pub fn activate(&mut self, initial: Pose, host: &mut impl RigHost) -> Result<(), RigError> {
        if self.positioner.is_orbit() && !self.anchor.as_ref().is_some_and(AnchorHandle::is_alive) {
            error!("orbit camera rig activated without a live anchor");
            return Err(RigError::MissingAnchor);
        }

        let (yaw, pitch) = initial.yaw_pitch();
        self.gate = ModeGate::new(self.config.modifier);
        self.orientation.seed(yaw, pitch);
        self.zoom.reset();
        self.pending.clear();
        self.anchor_lost = false;
        self.pose = initial;
        self.pivot = None;
        if let Positioner::Direct(direct) = &mut self.positioner {
            direct.position = initial.position;
        }
        self.active = true;

        info!(
            variant = self.config.variant.name(),
            yaw = self.orientation.current_yaw(),
            pitch = self.orientation.current_pitch(),
            "camera rig activated"
        );
        host.notify(&RigEvent::Activated);
        self.capture.acquire(host);
        Ok(())
    }

    /// Stop running, release the pointer and drop pending targets
    pub fn deactivate(&mut self, host: &mut impl RigHost) {
        if !self.active {
            return;
        }

        self.capture.release(host);
        self.orientation.settle();
        self.zoom.settle();
        self.pending.clear();
        self.active = false;

        info!("camera rig deactivated");
        host.notify(&RigEvent::Deactivated);
    }

    /// Check if the rig is running
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the rig by one frame
    ///
    /// Never fails: missing input counts as no input and a lost anchor freezes
    /// the pose. An inactive rig returns its last frame unchanged.
    pub fn tick(&mut self, dt: f32, input: &InputSample, host: &mut impl RigHost) -> RigFrame {
        if !self.active {
            return self.frame();
        }

        for event in self.pending.drain(..) {
            host.notify(&event);
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let input = input.resolve();

        if let Some(mode) = self.gate.update(input.modifier_held) {
            host.notify(&RigEvent::ModeChanged { mode });
        }

        if self.gate.is_locked() {
            self.orientation.accumulate(input.pointer_delta, self.sensitivity);
        }
        let factor = smoothing_factor(self.config.smoothing, dt);
        self.orientation.smooth(factor);

        if let Some(zoom) = self.zoom.apply_scroll(input.scroll_delta) {
            debug!(?zoom, "zoom changed");
            host.notify(&RigEvent::ZoomChanged { zoom });
        }
        self.zoom.smooth(factor);

        self.place(host);
        self.sync_capture(host);
        self.frame()
    }

    fn place(&mut self, host: &mut impl RigHost) {
        let yaw = self.orientation.current_yaw();
        let pitch = self.orientation.current_pitch();

        match self.positioner {
            Positioner::Orbit(orbit) => {
                match self.anchor.as_ref().and_then(AnchorHandle::pose) {
                    Some(anchor) => {
                        if self.anchor_lost {
                            self.anchor_lost = false;
                            info!("orbit anchor acquired");
                            host.notify(&RigEvent::AnchorAcquired);
                        }
                        self.pose = orbit.place(&anchor, yaw, pitch, self.zoom.current().value());
                        self.pivot = Some(orbit.pivot(&anchor));
                    }
                    None => {
                        if !self.anchor_lost {
                            self.anchor_lost = true;
                            warn!("orbit anchor lost, holding last camera pose");
                            host.notify(&RigEvent::AnchorLost);
                        }
                    }
                }
            }
            Positioner::Direct(direct) => {
                self.pose = direct.place(yaw, pitch);
            }
        }
    }

    fn sync_capture(&mut self, host: &mut impl RigHost) {
        let anchor_blocks = self.positioner.is_orbit()
            && self.anchor_lost
            && self.config.release_capture_on_anchor_loss;
        let wanted = self.active && self.gate.is_locked() && !anchor_blocks;
        self.capture.sync(wanted, host);
    }

    /// Follow a new anchor (orbit rigs only)
    pub fn set_anchor(&mut self, anchor: &SharedPose) -> Result<(), RigError> {
        if !self.positioner.is_orbit() {
            return Err(self.unsupported("set_anchor"));
        }
        self.anchor = Some(AnchorHandle::new(anchor));
        debug!("orbit anchor set");
        Ok(())
    }

    /// Stop following the anchor; a running orbit rig freezes on the next tick
    pub fn clear_anchor(&mut self) {
        self.anchor = None;
    }

    /// Check if an anchor is set and still alive
    pub fn has_live_anchor(&self) -> bool {
        self.anchor.as_ref().is_some_and(AnchorHandle::is_alive)
    }

    /// Move the camera of a direct rig
    pub fn set_position(&mut self, position: Vec3) -> Result<(), RigError> {
        match &mut self.positioner {
            Positioner::Direct(direct) => {
                direct.position = position;
                Ok(())
            }
            Positioner::Orbit(_) => Err(self.unsupported("set_position")),
        }
    }

    /// Jump the zoom to a value, clamped to the configured bounds
    pub fn set_zoom(&mut self, value: f32) {
        if let Some(zoom) = self.zoom.set(value) {
            self.queue_zoom_changed(zoom);
        }
    }

    /// Change the pointer sensitivity
    pub fn set_sensitivity(&mut self, value: f32) -> Result<(), RigError> {
        if !value.is_finite() || value < 0.0 {
            return Err(RigError::InvalidValue {
                name: "sensitivity",
                value,
            });
        }
        self.sensitivity = value;
        Ok(())
    }

    /// Current pointer sensitivity
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Flip look mode on the next tick
    pub fn toggle_look_mode(&mut self) {
        self.gate.toggle();
    }

    /// Request look mode on or off from the next tick
    pub fn set_look_mode(&mut self, active: bool) {
        self.gate.set_active(active);
    }

    /// Face forward, restore default zoom and sensitivity
    pub fn reset_to_defaults(&mut self) {
        self.orientation.reset();
        self.zoom.reset();
        self.sensitivity = self.config.sensitivity;
        if !self.pending.contains(&RigEvent::Reset) {
            self.pending.push(RigEvent::Reset);
        }
        info!("camera rig reset to defaults");
    }

    /// Apply a new configuration, keeping orientation and zoom where possible
    pub fn reconfigure(&mut self, config: RigConfig) -> Result<(), RigError> {
        config.validate()?;

        let previous_zoom = self.zoom.current();
        let mut zoom = zoom_for(&config);
        if std::mem::discriminant(&previous_zoom) == std::mem::discriminant(&zoom.current()) {
            zoom.set(previous_zoom.value());
        }
        if zoom.current() != previous_zoom {
            self.queue_zoom_changed(zoom.current());
        }

        if config.variant.is_orbit() != self.positioner.is_orbit() {
            self.positioner = Positioner::from_variant(&config.variant, self.pose.position);
            self.anchor = None;
            self.anchor_lost = false;
            self.pivot = None;
        } else if let (Positioner::Orbit(orbit), RigVariant::Orbit(settings)) =
            (&mut self.positioner, &config.variant)
        {
            orbit.height = settings.height;
        }

        self.zoom = zoom;
        self.orientation
            .set_pitch_bounds(config.min_vertical_angle, config.max_vertical_angle);
        self.gate.set_behavior(config.modifier);
        self.sensitivity = config.sensitivity;
        self.config = config;

        debug!(variant = self.config.variant.name(), "camera rig reconfigured");
        Ok(())
    }

    /// Active configuration
    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Snapshot of the rig's state
    pub fn state(&self) -> CameraRigState {
        CameraRigState {
            target_yaw: self.orientation.target_yaw(),
            target_pitch: self.orientation.target_pitch(),
            current_yaw: self.orientation.current_yaw(),
            current_pitch: self.orientation.current_pitch(),
            zoom: self.zoom.current(),
            target_zoom: self.zoom.target(),
            sensitivity: self.sensitivity,
            look_mode: self.gate.mode(),
            anchor_lost: self.anchor_lost,
        }
    }

    /// Current look mode
    pub fn look_mode(&self) -> LookMode {
        self.gate.mode()
    }

    /// Last computed camera pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Zoom applied to the camera
    pub fn zoom(&self) -> Zoom {
        self.zoom.current()
    }

    /// Last computed frame
    pub fn frame(&self) -> RigFrame {
        RigFrame {
            pose: self.pose,
            zoom: self.zoom.current(),
            look_mode: self.gate.mode(),
            pivot: self.pivot,
        }
    }

    /// Only the latest zoom change waits for the next tick
    fn queue_zoom_changed(&mut self, zoom: Zoom) {
        self.pending
            .retain(|event| !matches!(event, RigEvent::ZoomChanged { .. }));
        self.pending.push(RigEvent::ZoomChanged { zoom });
    }

    fn unsupported(&self, operation: &'static str) -> RigError {
        RigError::Unsupported {
            operation,
            variant: self.config.variant.name(),
        }
    }
}

fn zoom_for(config: &RigConfig) -> ZoomController {
    match &config.variant {
        RigVariant::Orbit(orbit) => ZoomController::orbit(orbit, config.scroll_dead_zone),
        RigVariant::Direct(direct) => ZoomController::field_of_view(direct, config.scroll_dead_zone),
    }
}
