use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Receiver, TrySendError};
use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};
use vmouse_core::{annotations, FeedbackSink, FrameSequencer, GestureController, PointerActuator};
use vmouse_shared::GestureIntent;

use crate::fps::FpsMeter;
use crate::provider::{LandmarkProvider, ProvidedFrame};

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Processing time above which a frame is reported as slow
    pub frame_budget: Duration,
    /// Stop after this many processed frames
    pub max_frames: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frame_budget: Duration::from_millis(50),
            max_frames: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub hands: u64,
    pub moves: u64,
    pub clicks: u64,
    pub actuator_failures: u64,
    /// Frames overtaken by a newer one
    pub stale: u64,
    /// Frames dropped because the processor was busy
    pub dropped: u64,
    pub slow: u64,
}

/// Drives the controller frame by frame and keeps the run statistics
pub struct Runner<A, S> {
    controller: GestureController,
    actuator: A,
    sink: S,
    sequencer: FrameSequencer,
    fps: FpsMeter,
    options: RunOptions,
    summary: RunSummary,
}

impl<A: PointerActuator, S: FeedbackSink> Runner<A, S> {
    pub fn new(controller: GestureController, actuator: A, sink: S, options: RunOptions) -> Self {
        Self {
            controller,
            actuator,
            sink,
            sequencer: FrameSequencer::new(),
            fps: FpsMeter::new(),
            options,
            summary: RunSummary::default(),
        }
    }

    /// Classify, decide and actuate one frame. Never fails: every problem is
    /// confined to the frame it happened in.
    pub fn handle(&mut self, frame: ProvidedFrame) {
        if !self.sequencer.admit(frame.sequence) {
            self.summary.stale += 1;
            return;
        }

        let started = Instant::now();
        self.summary.frames += 1;
        if frame.hand.is_some() {
            self.summary.hands += 1;
        }

        self.actuator.begin_frame(frame.wire_sequence());
        match self
            .controller
            .process(frame.hand.as_ref(), &mut self.actuator)
        {
            Ok(report) => {
                match report.intent {
                    GestureIntent::MoveTo(_) => self.summary.moves += 1,
                    GestureIntent::Click => self.summary.clicks += 1,
                    GestureIntent::Idle => {}
                }

                let notes = annotations(
                    &report,
                    frame.hand.as_ref(),
                    &self.controller.mapper().region(),
                );
                if !notes.is_empty() {
                    self.sink.present(frame.sequence, &notes);
                }
            }
            Err(e) => {
                self.summary.actuator_failures += 1;
                log::warn!("Actuator failed on frame {}: {}", frame.sequence, e);
            }
        }

        let elapsed = started.elapsed();
        if elapsed > self.options.frame_budget {
            self.summary.slow += 1;
            log::warn!(
                "Frame {} took {:?}, over the {:?} budget",
                frame.sequence,
                elapsed,
                self.options.frame_budget
            );
        }

        if let Some(fps) = self.fps.tick() {
            log::info!("FPS: {:.1}", fps);
        }
    }

    fn finished(&self) -> bool {
        self.options
            .max_frames
            .is_some_and(|max| self.summary.frames >= max)
    }

    /// Pull and process frames on the calling thread until the provider is
    /// exhausted
    pub fn run<P: LandmarkProvider>(&mut self, provider: &mut P) -> Result<RunSummary> {
        while !self.finished() {
            match provider.next_frame()? {
                Some(frame) => self.handle(frame),
                None => break,
            }
        }
        Ok(self.summary.clone())
    }

    /// Capture on a background thread and process here.
    ///
    /// The hand-off queue holds a single frame. The capture side replaces a
    /// frame the processor has not picked up yet, so after a burst the
    /// newest frame is the one actuated.
    pub fn run_threaded<P>(&mut self, provider: P) -> Result<RunSummary>
    where
        P: LandmarkProvider + Send + 'static,
    {
        let (frame_tx, frame_rx) = bounded::<ProvidedFrame>(1);
        let stop = Arc::new(AtomicBool::new(false));
        let dropped = Arc::new(AtomicU64::new(0));

        let capture = {
            let stop = Arc::clone(&stop);
            let dropped = Arc::clone(&dropped);
            let evict_rx = frame_rx.clone();
            let mut provider = provider;
            thread::spawn(move || -> Result<()> {
                while !stop.load(Ordering::SeqCst) {
                    let Some(frame) = provider.next_frame()? else {
                        break;
                    };
                    let mut pending = frame;
                    loop {
                        match frame_tx.try_send(pending) {
                            Ok(()) => break,
                            Err(TrySendError::Full(frame)) => {
                                if let Ok(stale) = evict_rx.try_recv() {
                                    dropped.fetch_add(1, Ordering::Relaxed);
                                    log::debug!(
                                        "Processor busy, replacing frame {} with {}",
                                        stale.sequence,
                                        frame.sequence
                                    );
                                }
                                pending = frame;
                            }
                            Err(TrySendError::Disconnected(_)) => return Ok(()),
                        }
                    }
                }
                Ok(())
            })
        };

        let mut exhausted = true;
        while let Some(frame) = self.recv_latest_frame(&frame_rx) {
            self.handle(frame);
            if self.finished() {
                exhausted = false;
                break;
            }
        }
        stop.store(true, Ordering::SeqCst);
        drop(frame_rx);

        if exhausted {
            capture
                .join()
                .map_err(|_| anyhow!("Capture thread panicked"))??;
        } else {
            // The capture thread may be parked in a blocking read; it exits
            // on its own once that read returns
            log::info!("Frame limit reached, leaving the capture thread to finish its read");
        }

        self.summary.dropped += dropped.load(Ordering::Relaxed);
        Ok(self.summary.clone())
    }

    fn recv_latest_frame(&mut self, frame_rx: &Receiver<ProvidedFrame>) -> Option<ProvidedFrame> {
        let mut frame = frame_rx.recv().ok()?;
        while let Ok(newer) = frame_rx.try_recv() {
            self.summary.dropped += 1;
            frame = newer;
        }
        Some(frame)
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn controller(&self) -> &GestureController {
        &self.controller
    }
}
