use vmouse_shared::{GestureIntent, LandmarkFrame, Position, INDEX_TIP, MIDDLE_TIP};

use crate::actuator::{actuate, PointerActuator};
use crate::config::MouseConfig;
use crate::distance::{measure, Measurement};
use crate::error::{ActuatorError, ConfigError, GestureError};
use crate::fingers::{Finger, FingerState};
use crate::mapper::{CoordinateMapper, SmoothedPointer};

/// Interaction mode, chosen from scratch every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    /// Index up, middle down: the index fingertip steers the pointer
    Moving,
    /// Index and middle up: pinching them together clicks
    Clicking,
}

impl Mode {
    pub fn select(fingers: Option<FingerState>) -> Mode {
        let Some(fingers) = fingers else {
            return Mode::Idle;
        };
        match (fingers.is_up(Finger::Index), fingers.is_up(Finger::Middle)) {
            (true, false) => Mode::Moving,
            (true, true) => Mode::Clicking,
            _ => Mode::Idle,
        }
    }
}

/// Everything decided about one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub mode: Mode,
    pub intent: GestureIntent,
    pub fingers: Option<FingerState>,
    /// Smoothed screen position before mirroring (Moving only)
    pub smoothed: Option<Position>,
    /// Index-to-middle measurement (Clicking only)
    pub measurement: Option<Measurement>,
}

impl FrameReport {
    fn idle(fingers: Option<FingerState>) -> Self {
        Self {
            mode: Mode::Idle,
            intent: GestureIntent::Idle,
            fingers,
            smoothed: None,
            measurement: None,
        }
    }
}

/// Turns landmark frames into pointer intents.
///
/// Owns the only state that survives between frames: the smoothed pointer.
pub struct GestureController {
    config: MouseConfig,
    mapper: CoordinateMapper,
    hand_lost: bool,
}

impl GestureController {
    pub fn new(config: MouseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mapper = CoordinateMapper::new(
            config.active_region(),
            config.screen_size(),
            config.smoothing_factor,
            config.boundary_policy,
        );
        Ok(Self {
            config,
            mapper,
            hand_lost: true,
        })
    }

    /// Decide the intent for one frame without actuating it.
    ///
    /// Only the selected mode's computation runs: a clicking frame never
    /// touches the smoothed pointer.
    pub fn step(&mut self, frame: Option<&LandmarkFrame>) -> Result<FrameReport, GestureError> {
        let Some(frame) = frame else {
            self.hand_lost = true;
            return Ok(FrameReport::idle(None));
        };

        let fingers = FingerState::classify(frame);
        match Mode::select(Some(fingers)) {
            Mode::Idle => Ok(FrameReport::idle(Some(fingers))),
            Mode::Moving => self.move_pointer(frame, fingers),
            Mode::Clicking => self.check_click(frame, fingers),
        }
    }

    fn move_pointer(
        &mut self,
        frame: &LandmarkFrame,
        fingers: FingerState,
    ) -> Result<FrameReport, GestureError> {
        let tip = frame
            .landmark(INDEX_TIP)
            .ok_or(GestureError::InvalidLandmarkIndex(INDEX_TIP))?;

        if self.hand_lost && self.config.reset_on_reacquire {
            let target = self.mapper.target(tip)?;
            self.mapper.snap_to(target);
        }
        let smoothed = self.mapper.map(tip)?;
        self.hand_lost = false;

        // Camera image is mirrored relative to the screen
        let pointer = Position::new(self.config.screen_width - smoothed.x, smoothed.y);

        Ok(FrameReport {
            mode: Mode::Moving,
            intent: GestureIntent::MoveTo(pointer),
            fingers: Some(fingers),
            smoothed: Some(smoothed),
            measurement: None,
        })
    }

    fn check_click(
        &self,
        frame: &LandmarkFrame,
        fingers: FingerState,
    ) -> Result<FrameReport, GestureError> {
        let measurement = measure(frame, INDEX_TIP, MIDDLE_TIP)?;
        let intent = if measurement.distance < self.config.click_distance_threshold {
            GestureIntent::Click
        } else {
            GestureIntent::Idle
        };

        Ok(FrameReport {
            mode: Mode::Clicking,
            intent,
            fingers: Some(fingers),
            smoothed: None,
            measurement: Some(measurement),
        })
    }

    /// Decide and actuate one frame.
    ///
    /// A frame that cannot be interpreted is logged and treated as idle. An
    /// actuator failure is returned; the controller stays usable either way.
    pub fn process<A>(
        &mut self,
        frame: Option<&LandmarkFrame>,
        actuator: &mut A,
    ) -> Result<FrameReport, ActuatorError>
    where
        A: PointerActuator + ?Sized,
    {
        let report = match self.step(frame) {
            Ok(report) => report,
            Err(e) => {
                log::warn!("Rejected frame: {}", e);
                FrameReport::idle(None)
            }
        };

        if !report.intent.is_idle() {
            log::debug!("{:?} -> {:?}", report.mode, report.intent);
        }
        actuate(&report.intent, actuator)?;

        Ok(report)
    }

    pub fn smoothed(&self) -> SmoothedPointer {
        self.mapper.smoothed()
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }
}
