use vmouse_core::{Annotation, FeedbackSink};

/// Writes annotations to the debug log in place of drawing them
#[derive(Debug, Default)]
pub struct LogFeedbackSink {
    presented: u64,
}

impl LogFeedbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames that carried at least one annotation
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl FeedbackSink for LogFeedbackSink {
    fn present(&mut self, sequence: u64, annotations: &[Annotation]) {
        self.presented += 1;
        for annotation in annotations {
            match annotation {
                Annotation::DistanceLine {
                    midpoint,
                    engaged: true,
                    ..
                } => log::debug!("Frame {}: click marker at {:?}", sequence, midpoint),
                other => log::debug!("Frame {}: {:?}", sequence, other),
            }
        }
    }
}
