use crate::error::ConfigError;
use crate::mapper::{ActiveRegion, BoundaryPolicy};

/// Configuration for the gesture pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseConfig {
    pub camera_width: f32,
    pub camera_height: f32,
    /// Margin on every side of the camera frame; the rectangle inside it
    /// maps onto the whole screen
    pub active_region_margin: f32,
    /// Denominator of the exponential smoothing step
    pub smoothing_factor: f32,
    /// Index-to-middle fingertip distance (camera pixels) below which a click fires
    pub click_distance_threshold: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub boundary_policy: BoundaryPolicy,
    /// Snap the smoothed pointer to the first target after the hand reappears
    pub reset_on_reacquire: bool,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            camera_width: 640.0,
            camera_height: 480.0,
            active_region_margin: 100.0,
            smoothing_factor: 7.0,
            click_distance_threshold: 40.0,
            screen_width: 1920.0,
            screen_height: 1080.0,
            boundary_policy: BoundaryPolicy::Extrapolate,
            reset_on_reacquire: false,
        }
    }
}

impl MouseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing_factor > 0.0) {
            return Err(ConfigError::NonPositiveSmoothing(self.smoothing_factor));
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::NonPositiveScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if !(self.active_region_margin >= 0.0) {
            return Err(ConfigError::NegativeMargin(self.active_region_margin));
        }
        if !(self.camera_width - 2.0 * self.active_region_margin > 0.0
            && self.camera_height - 2.0 * self.active_region_margin > 0.0)
        {
            return Err(ConfigError::RegionTooLarge {
                margin: self.active_region_margin,
                width: self.camera_width,
                height: self.camera_height,
            });
        }
        if !(self.click_distance_threshold >= 0.0) {
            return Err(ConfigError::NegativeThreshold(
                self.click_distance_threshold,
            ));
        }
        Ok(())
    }

    pub fn active_region(&self) -> ActiveRegion {
        ActiveRegion::new(
            self.active_region_margin,
            self.camera_width,
            self.camera_height,
        )
    }

    pub fn screen_size(&self) -> (f32, f32) {
        (self.screen_width, self.screen_height)
    }
}
