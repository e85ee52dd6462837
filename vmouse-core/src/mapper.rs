//! Camera-to-screen coordinate mapping with exponential smoothing.
//!
//! A point inside the active region (the camera frame minus a margin on each
//! side) is scaled linearly onto the full screen, then eased toward from the
//! previous pointer position so the cursor does not jitter with every small
//! landmark wobble.

use vmouse_shared::Position;

use crate::error::GestureError;

/// What to do with inputs that fall outside the active region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Keep scaling past the edges; the target may land off-screen
    #[default]
    Extrapolate,
    /// Pin the target to the screen edge
    Clamp,
}

/// Linear interpolation of `value` from `from` onto `to`
pub fn interp(value: f32, from: (f32, f32), to: (f32, f32), policy: BoundaryPolicy) -> f32 {
    let t = (value - from.0) / (from.1 - from.0);
    let t = match policy {
        BoundaryPolicy::Extrapolate => t,
        BoundaryPolicy::Clamp => t.clamp(0.0, 1.0),
    };
    to.0 + t * (to.1 - to.0)
}

/// Sub-rectangle of the camera frame that maps onto the whole screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveRegion {
    pub margin: f32,
    pub camera_width: f32,
    pub camera_height: f32,
}

impl ActiveRegion {
    pub fn new(margin: f32, camera_width: f32, camera_height: f32) -> Self {
        Self {
            margin,
            camera_width,
            camera_height,
        }
    }

    pub fn x_range(&self) -> (f32, f32) {
        (self.margin, self.camera_width - self.margin)
    }

    pub fn y_range(&self) -> (f32, f32) {
        (self.margin, self.camera_height - self.margin)
    }
}

/// Pointer position carried from one frame to the next
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SmoothedPointer {
    pub x: f32,
    pub y: f32,
}

impl SmoothedPointer {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

pub struct CoordinateMapper {
    region: ActiveRegion,
    screen: (f32, f32),
    smoothing_factor: f32,
    policy: BoundaryPolicy,
    state: SmoothedPointer,
}

impl CoordinateMapper {
    pub fn new(
        region: ActiveRegion,
        screen: (f32, f32),
        smoothing_factor: f32,
        policy: BoundaryPolicy,
    ) -> Self {
        Self {
            region,
            screen,
            smoothing_factor,
            policy,
            state: SmoothedPointer::default(),
        }
    }

    /// Scale a camera point onto the screen without smoothing
    pub fn scale(&self, p: Position) -> Position {
        Position::new(
            interp(p.x, self.region.x_range(), (0.0, self.screen.0), self.policy),
            interp(p.y, self.region.y_range(), (0.0, self.screen.1), self.policy),
        )
    }

    /// Scale and smooth a camera point, advancing the pointer state.
    ///
    /// Non-finite input is rejected before the state is touched.
    pub fn map(&mut self, p: Position) -> Result<Position, GestureError> {
        let target = self.target(p)?;

        let k = self.smoothing_factor;
        self.state.x += (target.x - self.state.x) / k;
        self.state.y += (target.y - self.state.y) / k;

        Ok(self.state.position())
    }

    /// Scaled target for `p`, checked for finiteness
    pub fn target(&self, p: Position) -> Result<Position, GestureError> {
        if !p.is_finite() {
            return Err(GestureError::NonFiniteCoordinate { x: p.x, y: p.y });
        }
        let target = self.scale(p);
        if !target.is_finite() {
            return Err(GestureError::NonFiniteCoordinate {
                x: target.x,
                y: target.y,
            });
        }
        Ok(target)
    }

    /// Jump the smoothed pointer straight to a screen position
    pub fn snap_to(&mut self, p: Position) {
        self.state = SmoothedPointer { x: p.x, y: p.y };
    }

    pub fn smoothed(&self) -> SmoothedPointer {
        self.state
    }

    pub fn region(&self) -> ActiveRegion {
        self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            ActiveRegion::new(100.0, 640.0, 480.0),
            (1920.0, 1080.0),
            7.0,
            BoundaryPolicy::Extrapolate,
        )
    }

    #[test]
    fn test_interp_endpoints() {
        let from = (100.0, 540.0);
        let to = (0.0, 1920.0);
        assert_eq!(interp(100.0, from, to, BoundaryPolicy::Extrapolate), 0.0);
        assert_eq!(interp(540.0, from, to, BoundaryPolicy::Extrapolate), 1920.0);
        assert_eq!(interp(320.0, from, to, BoundaryPolicy::Extrapolate), 960.0);
    }

    #[test]
    fn test_interp_extrapolates_past_region() {
        let from = (100.0, 540.0);
        let to = (0.0, 1920.0);
        let left = interp(56.0, from, to, BoundaryPolicy::Extrapolate);
        assert!((left - -192.0).abs() < 1e-3);
        let right = interp(584.0, from, to, BoundaryPolicy::Extrapolate);
        assert!((right - 2112.0).abs() < 1e-3);
    }

    #[test]
    fn test_interp_clamp_policy() {
        let from = (100.0, 540.0);
        let to = (0.0, 1920.0);
        assert_eq!(interp(0.0, from, to, BoundaryPolicy::Clamp), 0.0);
        assert_eq!(interp(640.0, from, to, BoundaryPolicy::Clamp), 1920.0);
    }

    #[test]
    fn test_frame_centre_scales_to_screen_centre() {
        let mapper = reference_mapper();
        let target = mapper.scale(Position::new(320.0, 240.0));
        assert!((target.x - 960.0).abs() < 1e-3);
        assert!((target.y - 540.0).abs() < 1e-3);

        let off_centre = mapper.scale(Position::new(370.0, 280.0));
        assert!((off_centre.x - 1178.1818).abs() < 1e-2);
        assert!((off_centre.y - 694.2857).abs() < 1e-2);
    }

    #[test]
    fn test_first_step_moves_one_seventh() {
        let mut mapper = reference_mapper();
        let p = mapper.map(Position::new(320.0, 240.0)).unwrap();
        assert!((p.x - 960.0 / 7.0).abs() < 1e-3);
        assert!((p.y - 540.0 / 7.0).abs() < 1e-3);
        assert_eq!(mapper.smoothed().position(), p);
    }

    #[test]
    fn test_smoothing_converges_monotonically() {
        let mut mapper = reference_mapper();
        let input = Position::new(320.0, 240.0);
        let target = mapper.scale(input);
        let ratio = 1.0 - 1.0 / 7.0;

        let mut previous_gap = target.x.hypot(target.y);
        for _ in 0..60 {
            let p = mapper.map(input).unwrap();
            let gap = (target.x - p.x).hypot(target.y - p.y);
            assert!(gap < previous_gap, "gap must shrink every frame");
            assert!(p.x <= target.x && p.y <= target.y, "no overshoot");
            assert!((gap - previous_gap * ratio).abs() < 1e-2);
            previous_gap = gap;
        }
        assert!(previous_gap < 1.0);
    }

    #[test]
    fn test_non_finite_input_leaves_state_alone() {
        let mut mapper = reference_mapper();
        mapper.map(Position::new(200.0, 200.0)).unwrap();
        let before = mapper.smoothed();

        let err = mapper.map(Position::new(f32::NAN, 10.0)).unwrap_err();
        assert!(matches!(err, GestureError::NonFiniteCoordinate { .. }));
        let err = mapper.map(Position::new(10.0, f32::INFINITY)).unwrap_err();
        assert!(matches!(err, GestureError::NonFiniteCoordinate { .. }));

        assert_eq!(mapper.smoothed(), before);
    }

    #[test]
    fn test_snap_to_overrides_state() {
        let mut mapper = reference_mapper();
        mapper.snap_to(Position::new(500.0, 400.0));
        assert_eq!(mapper.smoothed(), SmoothedPointer { x: 500.0, y: 400.0 });
    }
}
