use anyhow::Result;
use std::time::Duration;
use vmouse_core::{ActuatorError, PointerActuator};
use vmouse_shared::{GestureIntent, PointerCommand, Position};

/// Logs pointer calls instead of performing them.
///
/// Coordinates are still checked against the screen so an off-screen target
/// fails the same way a real injection backend would.
pub struct DryRunActuator {
    screen: (f32, f32),
    last_position: Option<Position>,
}

impl DryRunActuator {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen: (screen_width, screen_height),
            last_position: None,
        }
    }

    pub fn last_position(&self) -> Option<Position> {
        self.last_position
    }
}

impl PointerActuator for DryRunActuator {
    fn move_to(&mut self, x: f32, y: f32) -> Result<(), ActuatorError> {
        let (width, height) = self.screen;
        if !(0.0..=width).contains(&x) || !(0.0..=height).contains(&y) {
            return Err(ActuatorError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        log::debug!("Pointer move to ({:.1}, {:.1})", x, y);
        self.last_position = Some(Position::new(x, y));
        Ok(())
    }

    fn click(&mut self) -> Result<(), ActuatorError> {
        log::info!("Pointer click at {:?}", self.last_position);
        Ok(())
    }
}

/// Posts every pointer command as JSON to `{server}/api/pointer`
pub struct HttpActuator {
    endpoint: String,
    http_client: reqwest::blocking::Client,
    sequence: u64,
}

impl HttpActuator {
    pub fn new(server_url: &str) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()?;

        Ok(Self {
            endpoint: format!("{}/api/pointer", server_url.trim_end_matches('/')),
            http_client,
            sequence: 0,
        })
    }

    fn send(&self, intent: GestureIntent) -> Result<(), ActuatorError> {
        let command = PointerCommand {
            sequence: self.sequence,
            intent,
        };

        match self.http_client.post(&self.endpoint).json(&command).send() {
            Ok(response) if response.status().is_success() => {
                log::debug!("Pointer command sent: {:?}", command);
                Ok(())
            }
            Ok(response) => Err(ActuatorError::Rejected(response.status().to_string())),
            Err(e) => Err(ActuatorError::Transport(e.to_string())),
        }
    }
}

impl PointerActuator for HttpActuator {
    fn begin_frame(&mut self, sequence: u64) {
        self.sequence = sequence;
    }

    fn move_to(&mut self, x: f32, y: f32) -> Result<(), ActuatorError> {
        self.send(GestureIntent::MoveTo(Position::new(x, y)))
    }

    fn click(&mut self) -> Result<(), ActuatorError> {
        self.send(GestureIntent::Click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_accepts_on_screen_points() {
        let mut actuator = DryRunActuator::new(1920.0, 1080.0);
        actuator.move_to(0.0, 0.0).unwrap();
        actuator.move_to(1920.0, 1080.0).unwrap();
        assert_eq!(
            actuator.last_position(),
            Some(Position::new(1920.0, 1080.0))
        );
        actuator.click().unwrap();
    }

    #[test]
    fn test_dry_run_rejects_off_screen_points() {
        let mut actuator = DryRunActuator::new(1920.0, 1080.0);
        actuator.move_to(10.0, 10.0).unwrap();

        let err = actuator.move_to(-5.0, 10.0).unwrap_err();
        assert!(matches!(err, ActuatorError::OutOfBounds { .. }));
        assert!(actuator.move_to(10.0, 1200.0).is_err());
        assert!(actuator.move_to(f32::NAN, 10.0).is_err());
        assert_eq!(actuator.last_position(), Some(Position::new(10.0, 10.0)));
    }

    #[test]
    fn test_http_endpoint_normalises_trailing_slash() {
        let actuator = HttpActuator::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(actuator.endpoint, "http://127.0.0.1:8080/api/pointer");
    }
}
