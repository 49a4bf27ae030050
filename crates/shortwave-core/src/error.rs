use thiserror::Error;

/// Rejected tuning values. Only raised at construction; nothing on the
/// audio path or in the per-tick flow returns errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("voice weights sum to {sum:.3}, output would clip above 1.0")]
    NoHeadroom { sum: f32 },
    #[error("{name} range is empty or inverted: {min} .. {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("wobble depth {0} must be within [0, 1)")]
    WobbleDepth(f32),
    #[error("a trace needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}
