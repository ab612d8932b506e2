/// Errors reported by the camera rig.
///
/// All of these surface at setup or from an explicit host call. A running
/// `tick` never fails; runtime degradation is reported through `RigEvent`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RigError {
    #[error("orbit rig has no live anchor to follow")]
    MissingAnchor,

    #[error("invalid bounds for {name}: [{min}, {max}]")]
    InvalidBounds {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: f32 },

    #[error("{operation} is not supported by the {variant} rig")]
    Unsupported {
        operation: &'static str,
        variant: &'static str,
    },
}
