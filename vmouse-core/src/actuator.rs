use vmouse_shared::GestureIntent;

use crate::error::ActuatorError;

/// Something that can move and click the pointer
pub trait PointerActuator {
    /// Called before the intent of frame `sequence` is actuated
    fn begin_frame(&mut self, _sequence: u64) {}
    fn move_to(&mut self, x: f32, y: f32) -> Result<(), ActuatorError>;
    fn click(&mut self) -> Result<(), ActuatorError>;
}

impl<A: PointerActuator + ?Sized> PointerActuator for Box<A> {
    fn begin_frame(&mut self, sequence: u64) {
        (**self).begin_frame(sequence)
    }

    fn move_to(&mut self, x: f32, y: f32) -> Result<(), ActuatorError> {
        (**self).move_to(x, y)
    }

    fn click(&mut self) -> Result<(), ActuatorError> {
        (**self).click()
    }
}

/// Hand an intent to the actuator. Idle issues no call; the other intents
/// issue exactly one.
pub fn actuate<A>(intent: &GestureIntent, actuator: &mut A) -> Result<(), ActuatorError>
where
    A: PointerActuator + ?Sized,
{
    match intent {
        GestureIntent::Idle => Ok(()),
        GestureIntent::MoveTo(p) => actuator.move_to(p.x, p.y),
        GestureIntent::Click => actuator.click(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    MoveTo(f32, f32),
    Click,
}

/// Actuator that remembers every call, optionally failing each one
#[derive(Debug, Default)]
pub struct RecordingActuator {
    pub calls: Vec<ActuatorCall>,
    pub fail_with: Option<ActuatorError>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: ActuatorError) -> Self {
        Self {
            calls: Vec::new(),
            fail_with: Some(err),
        }
    }

    fn record(&mut self, call: ActuatorCall) -> Result<(), ActuatorError> {
        self.calls.push(call);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl PointerActuator for RecordingActuator {
    fn move_to(&mut self, x: f32, y: f32) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::MoveTo(x, y))
    }

    fn click(&mut self) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::Click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmouse_shared::Position;

    #[test]
    fn test_idle_issues_no_call() {
        let mut actuator = RecordingActuator::new();
        actuate(&GestureIntent::Idle, &mut actuator).unwrap();
        assert!(actuator.calls.is_empty());
    }

    #[test]
    fn test_each_intent_issues_one_call() {
        let mut actuator = RecordingActuator::new();
        actuate(
            &GestureIntent::MoveTo(Position::new(12.0, 34.0)),
            &mut actuator,
        )
        .unwrap();
        actuate(&GestureIntent::Click, &mut actuator).unwrap();
        assert_eq!(
            actuator.calls,
            vec![ActuatorCall::MoveTo(12.0, 34.0), ActuatorCall::Click]
        );
    }

    #[test]
    fn test_boxed_actuator_forwards() {
        let mut boxed: Box<dyn PointerActuator> = Box::new(RecordingActuator::failing(
            ActuatorError::Transport("down".into()),
        ));
        let err = actuate(&GestureIntent::Click, &mut boxed).unwrap_err();
        assert_eq!(err, ActuatorError::Transport("down".into()));
    }
}
