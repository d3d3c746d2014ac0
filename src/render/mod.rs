//! Frame rasterization.

/// Rasterizer trait and the shared frame type.
pub mod backend;
/// CPU text rasterizer.
pub mod cpu;
pub(crate) mod text;

pub use backend::{FrameRasterizer, SharedFrame};
pub use cpu::CpuTextRasterizer;
pub use text::FontAsset;

use crate::foundation::error::{AsciiGifError, AsciiGifResult};
use crate::source::FrameSource;

/// Read and rasterize every frame of `source`, in order.
///
/// The first unreadable frame aborts the whole run.
#[tracing::instrument(skip_all, fields(frames = source.len()))]
pub fn rasterize_source(
    source: &FrameSource,
    rasterizer: &mut dyn FrameRasterizer,
) -> AsciiGifResult<Vec<SharedFrame>> {
    let expected = rasterizer.frame_size();
    let mut frames = Vec::with_capacity(source.len());
    for i in 0..source.len() {
        let text = source.read_frame(i)?;
        let frame = rasterizer.rasterize(&text)?;
        if frame.dimensions() != expected {
            return Err(AsciiGifError::validation(format!(
                "rasterizer produced {}x{} for frame {i}, expected {}x{}",
                frame.width(),
                frame.height(),
                expected.0,
                expected.1
            )));
        }
        frames.push(frame);
        if (i + 1) % 100 == 0 {
            tracing::debug!(done = i + 1, "rasterized frames");
        }
    }
    Ok(frames)
}
