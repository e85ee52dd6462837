//! Gesture interpretation for a hand-driven virtual mouse.
//!
//! Landmark frames go in, pointer intents come out:
//! finger states pick a mode, the index fingertip steers a smoothed pointer,
//! and pinching index and middle fingers together clicks.

pub mod actuator;
pub mod config;
pub mod controller;
pub mod distance;
pub mod error;
pub mod feedback;
pub mod fingers;
pub mod mapper;
pub mod sequence;

pub use actuator::{actuate, ActuatorCall, PointerActuator, RecordingActuator};
pub use config::MouseConfig;
pub use controller::{FrameReport, GestureController, Mode};
pub use distance::{measure, Measurement};
pub use error::{ActuatorError, ConfigError, GestureError};
pub use feedback::{annotations, Annotation, FeedbackSink};
pub use fingers::{classify_frame, Finger, FingerState};
pub use mapper::{interp, ActiveRegion, BoundaryPolicy, CoordinateMapper, SmoothedPointer};
pub use sequence::FrameSequencer;

pub use vmouse_shared;
