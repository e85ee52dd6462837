use anyhow::{Context, Result};
use std::io::BufRead;
use vmouse_shared::{LandmarkFrame, LandmarkPacket};

/// One frame as handed to the pipeline
#[derive(Debug, Clone)]
pub struct ProvidedFrame {
    /// Arrival order, assigned locally and strictly increasing
    pub sequence: u64,
    /// Frame number reported by the pose estimator, if any
    pub source_sequence: Option<u64>,
    /// `None` when no usable hand was detected
    pub hand: Option<LandmarkFrame>,
}

impl ProvidedFrame {
    pub fn new(sequence: u64, hand: Option<LandmarkFrame>) -> Self {
        Self {
            sequence,
            source_sequence: None,
            hand,
        }
    }

    /// Number stamped on outgoing pointer commands: the estimator's own
    /// frame number when it sent one
    pub fn wire_sequence(&self) -> u64 {
        self.source_sequence.unwrap_or(self.sequence)
    }
}

/// Source of landmark frames, typically backed by a hand-pose estimator
pub trait LandmarkProvider {
    /// Next frame, or `None` once the stream is finished
    fn next_frame(&mut self) -> Result<Option<ProvidedFrame>>;
}

/// Reads one JSON [`LandmarkPacket`] per line.
///
/// A line that cannot be used (bad JSON, partial hand, wrong image size)
/// becomes a no-hand frame; only I/O errors end the stream.
pub struct JsonLinesProvider<R> {
    reader: R,
    hand_no: usize,
    camera_size: (u32, u32),
    next_sequence: u64,
    line: String,
    line_no: usize,
}

impl<R: BufRead> JsonLinesProvider<R> {
    pub fn new(reader: R, camera_size: (u32, u32)) -> Self {
        Self {
            reader,
            hand_no: 0,
            camera_size,
            next_sequence: 0,
            line: String::new(),
            line_no: 0,
        }
    }

    /// Which detected hand to follow when several are reported
    pub fn with_hand(mut self, hand_no: usize) -> Self {
        self.hand_no = hand_no;
        self
    }

    fn hand_from(&self, packet: &LandmarkPacket) -> Option<LandmarkFrame> {
        if (packet.width, packet.height) != self.camera_size {
            log::warn!(
                "Line {}: {}x{} image does not match the {}x{} camera, ignoring hand",
                self.line_no,
                packet.width,
                packet.height,
                self.camera_size.0,
                self.camera_size.1
            );
            return None;
        }

        let points = packet.hand_pixels(self.hand_no)?;
        match LandmarkFrame::from_points(&points) {
            Ok(frame) => Some(frame),
            Err(e) => {
                log::warn!("Line {}: rejected hand: {}", self.line_no, e);
                None
            }
        }
    }
}

impl<R: BufRead> LandmarkProvider for JsonLinesProvider<R> {
    fn next_frame(&mut self) -> Result<Option<ProvidedFrame>> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .context("Failed to read landmark stream")?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }

            // Packet numbers are untrusted; ordering uses the arrival count
            let sequence = self.next_sequence;
            self.next_sequence += 1;

            let frame = match LandmarkPacket::from_json_line(text) {
                Ok(packet) => ProvidedFrame {
                    sequence,
                    source_sequence: packet.sequence,
                    hand: self.hand_from(&packet),
                },
                Err(e) => {
                    log::warn!("Line {}: malformed landmark packet: {}", self.line_no, e);
                    ProvidedFrame::new(sequence, None)
                }
            };

            return Ok(Some(frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vmouse_shared::{HandObservation, Position, LANDMARK_COUNT};

    fn packet_line(sequence: Option<u64>, width: u32, points: Vec<Position>) -> String {
        let packet = LandmarkPacket {
            sequence,
            width,
            height: 480,
            normalized: false,
            hands: vec![HandObservation { landmarks: points }],
        };
        serde_json::to_string(&packet).unwrap()
    }

    fn provider(text: &str) -> JsonLinesProvider<Cursor<Vec<u8>>> {
        JsonLinesProvider::new(Cursor::new(text.as_bytes().to_vec()), (640, 480))
    }

    fn full_hand() -> Vec<Position> {
        vec![Position::new(320.0, 300.0); LANDMARK_COUNT]
    }

    #[test]
    fn test_reads_frames_until_eof() {
        let text = format!(
            "{}\n\n{}\n",
            packet_line(None, 640, full_hand()),
            packet_line(None, 640, full_hand())
        );
        let mut p = provider(&text);

        let first = p.next_frame().unwrap().unwrap();
        assert_eq!(first.sequence, 0);
        assert!(first.hand.is_some());
        let second = p.next_frame().unwrap().unwrap();
        assert_eq!(second.sequence, 1);
        assert!(p.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_unusable_lines_become_no_hand_frames() {
        let text = format!(
            "not json\n{}\n{}\n",
            packet_line(None, 640, full_hand()[..5].to_vec()),
            packet_line(None, 1280, full_hand())
        );
        let mut p = provider(&text);

        for expected_sequence in 0..3 {
            let frame = p.next_frame().unwrap().unwrap();
            assert_eq!(frame.sequence, expected_sequence);
            assert!(frame.hand.is_none());
        }
        assert!(p.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_packet_numbers_do_not_drive_ordering() {
        let text = format!(
            "{}\n{}\n{}\n",
            packet_line(Some(u64::MAX), 640, full_hand()),
            r#"{"width":640,"height":480}"#,
            packet_line(Some(3), 640, full_hand())
        );
        let mut p = provider(&text);

        let first = p.next_frame().unwrap().unwrap();
        assert_eq!(first.sequence, 0);
        assert_eq!(first.source_sequence, Some(u64::MAX));
        assert_eq!(first.wire_sequence(), u64::MAX);

        let second = p.next_frame().unwrap().unwrap();
        assert_eq!(second.sequence, 1);
        assert_eq!(second.wire_sequence(), 1);

        let third = p.next_frame().unwrap().unwrap();
        assert_eq!(third.sequence, 2);
        assert_eq!(third.wire_sequence(), 3);
    }

    #[test]
    fn test_selects_requested_hand() {
        let mut second = full_hand();
        second[8] = Position::new(10.0, 20.0);
        let packet = LandmarkPacket {
            sequence: None,
            width: 640,
            height: 480,
            normalized: false,
            hands: vec![
                HandObservation {
                    landmarks: full_hand(),
                },
                HandObservation { landmarks: second },
            ],
        };
        let text = serde_json::to_string(&packet).unwrap();

        let mut p = provider(&text).with_hand(1);
        let frame = p.next_frame().unwrap().unwrap();
        assert_eq!(
            frame.hand.unwrap().landmark(8),
            Some(Position::new(10.0, 20.0))
        );

        let mut p = provider(&text).with_hand(2);
        assert!(p.next_frame().unwrap().unwrap().hand.is_none());
    }
}
