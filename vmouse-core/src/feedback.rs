use vmouse_shared::{BoundingBox, GestureIntent, LandmarkFrame, Position, INDEX_TIP};

use crate::controller::{FrameReport, Mode};
use crate::mapper::ActiveRegion;

pub const MARKER_RADIUS: u32 = 15;
pub const LINE_THICKNESS: u32 = 3;

/// Something a viewer may draw over the camera image. Never read back by
/// the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Annotation {
    BoundingBox(BoundingBox),
    ActiveRegion {
        top_left: Position,
        bottom_right: Position,
    },
    Fingertip {
        at: Position,
        radius: u32,
    },
    DistanceLine {
        from: Position,
        to: Position,
        midpoint: (i32, i32),
        radius: u32,
        thickness: u32,
        /// The pinch was close enough to click
        engaged: bool,
    },
}

pub trait FeedbackSink {
    fn present(&mut self, sequence: u64, annotations: &[Annotation]);
}

/// Annotations describing what the controller saw and decided
pub fn annotations(
    report: &FrameReport,
    frame: Option<&LandmarkFrame>,
    region: &ActiveRegion,
) -> Vec<Annotation> {
    let Some(frame) = frame else {
        return Vec::new();
    };

    let (x0, x1) = region.x_range();
    let (y0, y1) = region.y_range();
    let mut out = vec![
        Annotation::BoundingBox(frame.bbox()),
        Annotation::ActiveRegion {
            top_left: Position::new(x0, y0),
            bottom_right: Position::new(x1, y1),
        },
    ];

    match report.mode {
        Mode::Moving => {
            if let Some(at) = frame.landmark(INDEX_TIP) {
                out.push(Annotation::Fingertip {
                    at,
                    radius: MARKER_RADIUS,
                });
            }
        }
        Mode::Clicking => {
            if let Some(m) = report.measurement {
                out.push(Annotation::DistanceLine {
                    from: m.point1,
                    to: m.point2,
                    midpoint: m.midpoint,
                    radius: MARKER_RADIUS,
                    thickness: LINE_THICKNESS,
                    engaged: report.intent == GestureIntent::Click,
                });
            }
        }
        Mode::Idle => {}
    }

    out
}
