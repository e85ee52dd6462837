use vmouse_shared::{LandmarkFrame, Position, LANDMARK_COUNT};

use crate::error::GestureError;

/// Distance between two landmarks plus the points needed to draw it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub distance: f32,
    /// Whole-pixel midpoint, floored
    pub midpoint: (i32, i32),
    pub point1: Position,
    pub point2: Position,
}

pub fn measure(
    frame: &LandmarkFrame,
    id1: usize,
    id2: usize,
) -> Result<Measurement, GestureError> {
    debug_assert!(
        id1 < LANDMARK_COUNT && id2 < LANDMARK_COUNT,
        "landmark ids {} and {} must be below {}",
        id1,
        id2,
        LANDMARK_COUNT
    );

    let point1 = frame
        .landmark(id1)
        .ok_or(GestureError::InvalidLandmarkIndex(id1))?;
    let point2 = frame
        .landmark(id2)
        .ok_or(GestureError::InvalidLandmarkIndex(id2))?;

    let mid = point1.midpoint(&point2);

    Ok(Measurement {
        distance: point1.distance_to(&point2),
        midpoint: (mid.x.floor() as i32, mid.y.floor() as i32),
        point1,
        point2,
    })
}
