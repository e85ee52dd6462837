use thiserror::Error;

/// Per-frame failures inside the gesture pipeline.
///
/// None of these stop the stream: the controller turns them into an idle
/// frame and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GestureError {
    #[error("no hand detected in this frame")]
    NoHandDetected,
    #[error("landmark index {0} is outside 0..=20")]
    InvalidLandmarkIndex(usize),
    #[error("non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f32, y: f32 },
}

/// Startup configuration problems. These are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("smoothing factor must be positive, got {0}")]
    NonPositiveSmoothing(f32),
    #[error("screen size must be positive, got {width}x{height}")]
    NonPositiveScreen { width: f32, height: f32 },
    #[error("active region margin must be non-negative, got {0}")]
    NegativeMargin(f32),
    #[error("margin {margin} leaves no active region in a {width}x{height} camera frame")]
    RegionTooLarge { margin: f32, width: f32, height: f32 },
    #[error("click distance threshold must be non-negative, got {0}")]
    NegativeThreshold(f32),
}

/// Failures reported by a pointer actuator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActuatorError {
    #[error("pointer target ({x}, {y}) is outside the {width}x{height} screen")]
    OutOfBounds {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    #[error("actuator transport failed: {0}")]
    Transport(String),
    #[error("actuator rejected the command: {0}")]
    Rejected(String),
}
