use crate::config::TimingConfig;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{AsciiGifError, AsciiGifResult};
use crate::render::SharedFrame;
use crate::sequence::FrameSequence;

/// How many times the animation plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCount {
    /// Loop forever (written as a loop count of 0).
    Infinite,
    /// Repeat this many extra times.
    Finite(u16),
}

/// Configuration provided to a [`FrameSink`] before any frame is pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Display time of every frame, in hundredths of a second.
    pub delay_centis: u16,
    /// Loop metadata.
    pub repeat: LoopCount,
}

impl SinkConfig {
    /// Config for encoding `seq` with `timing`, looping forever.
    pub fn for_sequence(seq: &FrameSequence, timing: &TimingConfig) -> Self {
        let (width, height) = seq.last().dimensions();
        Self {
            width,
            height,
            delay_centis: timing.gif_delay_centis(),
            repeat: LoopCount::Infinite,
        }
    }

    pub(crate) fn check_frame(&self, frame: &SharedFrame) -> AsciiGifResult<()> {
        if frame.dimensions() != (self.width, self.height) {
            return Err(AsciiGifError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// Sink contract for consuming frames in playback order.
///
/// `push_frame` is called with strictly increasing indices starting at 0. Nothing a sink
/// produces is considered complete until `end` returns `Ok`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> AsciiGifResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &SharedFrame) -> AsciiGifResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> AsciiGifResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, SharedFrame)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, SharedFrame)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> AsciiGifResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &SharedFrame) -> AsciiGifResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| AsciiGifError::encode("push_frame called before begin"))?;
        cfg.check_frame(frame)?;
        self.frames.push((idx, SharedFrame::clone(frame)));
        Ok(())
    }

    fn end(&mut self) -> AsciiGifResult<()> {
        self.finished = true;
        Ok(())
    }
}
