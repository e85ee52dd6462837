use vmouse_shared::{LandmarkFrame, TIP_IDS};

use crate::error::GestureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn tip_id(self) -> usize {
        TIP_IDS[self as usize]
    }
}

/// Up/down flag per finger, thumb first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerState([bool; 5]);

impl FingerState {
    pub fn new(up: [bool; 5]) -> Self {
        Self(up)
    }

    /// Classify every finger of a detected hand.
    ///
    /// The thumb extends sideways, so it counts as up when its tip lies to the
    /// right of the joint below it (right hand facing a front camera). The
    /// other fingers count as up when the tip is above the second joint below
    /// it; pixel y grows downward.
    pub fn classify(frame: &LandmarkFrame) -> Self {
        let points = frame.points();
        let mut up = [false; 5];

        for finger in Finger::ALL {
            let tip_id = finger.tip_id();
            let tip = points[tip_id];
            up[finger as usize] = match finger {
                Finger::Thumb => tip.x > points[tip_id - 1].x,
                _ => tip.y < points[tip_id - 2].y,
            };
        }

        Self(up)
    }

    pub fn is_up(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    pub fn count_up(&self) -> usize {
        self.0.iter().filter(|&&up| up).count()
    }

    /// The classification as a 0/1 vector
    pub fn as_bits(&self) -> [u8; 5] {
        self.0.map(u8::from)
    }
}

/// Classify a frame that may not contain a hand
pub fn classify_frame(frame: Option<&LandmarkFrame>) -> Result<FingerState, GestureError> {
    frame
        .map(FingerState::classify)
        .ok_or(GestureError::NoHandDetected)
}
