use thiserror::Error;

/// Configuration-time validation failures. The simulation itself never
/// returns errors; everything it is handed has already passed through here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffectError {
    #[error("{name}: range [{min}, {max}] is invalid, min must be <= max and both finite")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{0} must be finite and non-negative, got {1}")]
    InvalidValue(&'static str, f32),
    #[error("got {colors} colors but {stops} color stops")]
    ColorStopMismatch { colors: usize, stops: usize },
    #[error("first color stop must be 0, got {0}")]
    FirstStopNotZero(f32),
    #[error("color stop {index} ({value}) must lie in [0, 1] and not decrease")]
    InvalidColorStop { index: usize, value: f32 },
}
