#![cfg_attr(not(feature = "std"), no_std)]

//! Data carriers shared by the gesture pipeline and its collaborators.
//! Everything here is plain data: landmark frames coming in from a pose
//! estimator and pointer commands going out to an actuator.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of keypoints a hand-pose estimator reports per hand
pub const LANDMARK_COUNT: usize = 21;

pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// Fingertip identifiers, thumb first
pub const TIP_IDS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Padding added around the landmark extent when deriving a bounding box
pub const BBOX_PADDING: f32 = 20.0;

/// Represents a 2D position in pixel coordinates (camera or screen)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        libm::hypotf(other.x - self.x, other.y - self.y)
    }

    pub fn midpoint(&self, other: &Position) -> Position {
        Position::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned box around a detected hand, padded by [`BBOX_PADDING`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

impl BoundingBox {
    fn around(points: &[Position]) -> Self {
        let mut xmin = f32::MAX;
        let mut ymin = f32::MAX;
        let mut xmax = f32::MIN;
        let mut ymax = f32::MIN;

        for p in points {
            xmin = xmin.min(p.x);
            ymin = ymin.min(p.y);
            xmax = xmax.max(p.x);
            ymax = ymax.max(p.y);
        }

        Self {
            xmin: xmin - BBOX_PADDING,
            ymin: ymin - BBOX_PADDING,
            xmax: xmax + BBOX_PADDING,
            ymax: ymax + BBOX_PADDING,
        }
    }
}

/// Why a set of points could not become a [`LandmarkFrame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    WrongLandmarkCount { found: usize },
    NonFiniteCoordinate { index: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::WrongLandmarkCount { found } => write!(
                f,
                "expected {} landmarks, found {}",
                LANDMARK_COUNT, found
            ),
            FrameError::NonFiniteCoordinate { index } => {
                write!(f, "landmark {} has a non-finite coordinate", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// All 21 keypoints of one detected hand, indexed by landmark id.
///
/// A frame is only constructible when every landmark is present and finite;
/// "no hand" is expressed as the absence of a frame.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LandmarkFrame {
    points: [Position; LANDMARK_COUNT],
    bbox: BoundingBox,
}

impl LandmarkFrame {
    pub fn from_points(points: &[Position]) -> Result<Self, FrameError> {
        let points: [Position; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| FrameError::WrongLandmarkCount {
                    found: points.len(),
                })?;

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(FrameError::NonFiniteCoordinate { index });
        }

        let bbox = BoundingBox::around(&points);
        Ok(Self { points, bbox })
    }

    /// Landmark position by id, `None` when the id is outside 0..=20
    pub fn landmark(&self, id: usize) -> Option<Position> {
        self.points.get(id).copied()
    }

    pub fn points(&self) -> &[Position; LANDMARK_COUNT] {
        &self.points
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }
}

/// The single decision made for a frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GestureIntent {
    #[default]
    Idle,
    MoveTo(Position),
    Click,
}

impl GestureIntent {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureIntent::Idle)
    }
}

/// Message sent to a remote pointer actuator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointerCommand {
    /// Sequence number of the frame that produced the intent
    pub sequence: u64,
    pub intent: GestureIntent,
}

/// One hand as reported by the landmark provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandObservation {
    pub landmarks: Vec<Position>,
}

/// One provider frame: zero or more hands in a `width` x `height` image.
///
/// When `normalized` is set the landmark coordinates are fractions of the
/// image size and must be scaled to pixels before use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandmarkPacket {
    #[serde(default)]
    pub sequence: Option<u64>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub normalized: bool,
    #[serde(default)]
    pub hands: Vec<HandObservation>,
}

impl LandmarkPacket {
    /// Pixel-space landmarks for hand `hand_no`, `None` if that hand is absent.
    /// Normalized coordinates are truncated to whole pixels.
    pub fn hand_pixels(&self, hand_no: usize) -> Option<Vec<Position>> {
        let hand = self.hands.get(hand_no)?;
        if !self.normalized {
            return Some(hand.landmarks.clone());
        }

        let (w, h) = (self.width as f32, self.height as f32);
        Some(
            hand.landmarks
                .iter()
                .map(|lm| Position::new(libm::truncf(lm.x * w), libm::truncf(lm.y * h)))
                .collect(),
        )
    }

    #[cfg(feature = "std")]
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
