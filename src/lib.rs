//! asciigif renders a directory of ASCII-art text frames into a looping animated GIF.
//!
//! The pipeline is strictly sequential:
//!
//! - [`FrameSource`] lists the frame files matching a glob, in file-name order
//! - a [`FrameRasterizer`] draws each frame's text onto a fixed canvas
//! - [`FrameSequence`] appends the end hold (extra handles to the last frame)
//! - a [`FrameSink`] encodes the result, e.g. [`GifSink`]
//!
//! [`render_to_gif`] wires these together from a [`PipelineConfig`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod config;
pub mod encode;
/// Pipeline entry points.
pub mod pipeline;
pub mod render;
/// Frame sequence assembly.
pub mod sequence;
pub mod source;

pub use crate::config::{ConfigFile, PipelineConfig, RasterConfig, TimingConfig};
pub use crate::encode::encode_sequence;
pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, LoopCount, SinkConfig};
pub use crate::foundation::core::{Canvas, FrameIndex, Rgb8};
pub use crate::foundation::error::{AsciiGifError, AsciiGifResult};
pub use crate::pipeline::{RenderStats, render_source_to_sink, render_to_gif, render_to_sink};
pub use crate::render::{
    CpuTextRasterizer, FontAsset, FrameRasterizer, SharedFrame, rasterize_source,
};
pub use crate::sequence::FrameSequence;
pub use crate::source::{FrameSource, glob_match};
