//! Encoding sinks.
//!
//! Sinks consume assembled frames in playback order.

/// Animated GIF output.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

use crate::config::TimingConfig;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::AsciiGifResult;
use crate::sequence::FrameSequence;
use sink::{FrameSink, SinkConfig};

/// Push every frame of `seq` (hold included) into `sink`, then finish it.
#[tracing::instrument(skip_all, fields(frames = seq.len(), hold = seq.hold_len()))]
pub fn encode_sequence(
    seq: &FrameSequence,
    timing: &TimingConfig,
    sink: &mut dyn FrameSink,
) -> AsciiGifResult<()> {
    sink.begin(SinkConfig::for_sequence(seq, timing))?;
    for (i, frame) in seq.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()
}
