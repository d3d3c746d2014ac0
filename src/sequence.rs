use std::sync::Arc;

use crate::config::TimingConfig;
use crate::foundation::error::{AsciiGifError, AsciiGifResult};
use crate::render::SharedFrame;

/// Rendered frames in playback order, followed by the hold frames.
///
/// Hold entries are extra `Arc` handles to the last rendered frame, so a long hold costs
/// one pointer per entry rather than one canvas.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    frames: Vec<SharedFrame>,
    source_len: usize,
}

impl FrameSequence {
    /// Wrap the rendered frames. Fails when there are none (there is no last frame to hold).
    pub fn new(frames: Vec<SharedFrame>) -> AsciiGifResult<Self> {
        if frames.is_empty() {
            return Err(AsciiGifError::encode(
                "cannot assemble an animation from zero frames",
            ));
        }
        let source_len = frames.len();
        Ok(Self { frames, source_len })
    }

    /// Append the hold implied by `timing` (`end / frame` copies of the last frame).
    pub fn with_hold(mut self, timing: &TimingConfig) -> Self {
        self.push_hold(timing.hold_frames());
        self
    }

    /// Append `count` handles to the last rendered frame.
    pub fn push_hold(&mut self, count: usize) {
        let last = Arc::clone(self.last());
        self.frames.reserve(count);
        self.frames.extend(std::iter::repeat_n(last, count));
    }

    /// The last rendered frame (also every hold entry).
    pub fn last(&self) -> &SharedFrame {
        // `new` rejects empty input and frames are never removed.
        &self.frames[self.frames.len() - 1]
    }

    /// Total number of frames, hold included.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Never `true` for a constructed sequence.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of rendered (non-hold) frames.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Number of hold entries.
    pub fn hold_len(&self) -> usize {
        self.frames.len() - self.source_len
    }

    /// Frames in playback order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedFrame> {
        self.frames.iter()
    }

    /// Frames in playback order, as a slice.
    pub fn frames(&self) -> &[SharedFrame] {
        &self.frames
    }
}
