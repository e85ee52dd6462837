use std::time::{Duration, Instant};

/// Frames-per-second figure refreshed about once a second
pub struct FpsMeter {
    frame_count: u32,
    last_fps_time: Instant,
    fps: f64,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            last_fps_time: Instant::now(),
            fps: 0.0,
        }
    }

    /// Count a frame; returns the new figure when a second has passed
    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = now.duration_since(self.last_fps_time);
        if elapsed < Duration::from_secs(1) {
            return None;
        }

        self.fps = self.frame_count as f64 / elapsed.as_secs_f64();
        self.frame_count = 0;
        self.last_fps_time = now;
        Some(self.fps)
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_once_per_second() {
        let mut meter = FpsMeter::new();
        let start = meter.last_fps_time;

        for i in 1..30 {
            assert!(meter
                .tick_at(start + Duration::from_millis(i * 30))
                .is_none());
        }
        let fps = meter.tick_at(start + Duration::from_secs(1)).unwrap();
        assert!((fps - 30.0).abs() < 1e-9);
        assert_eq!(meter.fps(), fps);

        assert!(meter
            .tick_at(start + Duration::from_millis(1_100))
            .is_none());
    }
}
