/// Admits frames in strictly increasing sequence order.
///
/// When capture and processing run on different threads a slow frame may be
/// overtaken; its intent must not be actuated after a newer one.
#[derive(Debug, Default)]
pub struct FrameSequencer {
    last: Option<u64>,
    rejected: u64,
}

impl FrameSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, sequence: u64) -> bool {
        match self.last {
            Some(last) if sequence <= last => {
                self.rejected += 1;
                log::warn!(
                    "Dropping stale frame {} (already at {})",
                    sequence,
                    last
                );
                false
            }
            _ => {
                self.last = Some(sequence);
                true
            }
        }
    }

    pub fn last(&self) -> Option<u64> {
        self.last
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
