use std::sync::Arc;

use crate::foundation::error::AsciiGifResult;

/// A rendered frame: opaque RGB8, row-major.
///
/// Frames are shared, never mutated after rasterization. Hold frames at the end of an
/// animation are extra handles to the same allocation.
pub type SharedFrame = Arc<image::RgbImage>;

/// Turns the text of one frame into pixels.
///
/// Implementations must be deterministic: the same text always yields the same pixels.
pub trait FrameRasterizer {
    /// Rasterize one frame's raw text onto a fresh canvas.
    fn rasterize(&mut self, text: &str) -> AsciiGifResult<SharedFrame>;

    /// Output `(width, height)` of every frame.
    fn frame_size(&self) -> (u32, u32);
}
