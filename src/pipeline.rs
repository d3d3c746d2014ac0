use crate::config::PipelineConfig;
use crate::encode::encode_sequence;
use crate::encode::gif::GifSink;
use crate::encode::sink::FrameSink;
use crate::foundation::error::AsciiGifResult;
use crate::render::{CpuTextRasterizer, FrameRasterizer, rasterize_source};
use crate::sequence::FrameSequence;
use crate::source::FrameSource;

/// Frame counts of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames discovered and rasterized.
    pub frames_source: u64,
    /// Copies of the last frame appended as the end hold.
    pub frames_hold: u64,
    /// Frames handed to the sink.
    pub frames_total: u64,
}

/// Discover, rasterize, assemble and encode with caller-provided stages.
///
/// Discovery runs first, so an empty frame directory fails before the rasterizer or the sink are
/// touched. All frames are rasterized before the sink is started.
pub fn render_to_sink(
    cfg: &PipelineConfig,
    rasterizer: &mut dyn FrameRasterizer,
    sink: &mut dyn FrameSink,
) -> AsciiGifResult<RenderStats> {
    cfg.validate()?;
    let source = FrameSource::discover(&cfg.pattern, cfg.max_frames)?;
    render_source_to_sink(cfg, &source, rasterizer, sink)
}

/// Same as [`render_to_sink`] for an already discovered source.
pub fn render_source_to_sink(
    cfg: &PipelineConfig,
    source: &FrameSource,
    rasterizer: &mut dyn FrameRasterizer,
    sink: &mut dyn FrameSink,
) -> AsciiGifResult<RenderStats> {
    let frames = rasterize_source(source, rasterizer)?;
    let seq = FrameSequence::new(frames)?.with_hold(&cfg.timing);
    encode_sequence(&seq, &cfg.timing, sink)?;

    Ok(RenderStats {
        frames_source: seq.source_len() as u64,
        frames_hold: seq.hold_len() as u64,
        frames_total: seq.len() as u64,
    })
}

/// Run the whole pipeline: text frames matching `cfg.pattern` become `cfg.out_path`.
///
/// Nothing is written to `cfg.out_path` unless every stage succeeds.
#[tracing::instrument(skip_all, fields(pattern = %cfg.pattern, out = %cfg.out_path.display()))]
pub fn render_to_gif(cfg: &PipelineConfig) -> AsciiGifResult<RenderStats> {
    cfg.validate()?;
    let source = FrameSource::discover(&cfg.pattern, cfg.max_frames)?;
    let mut rasterizer = CpuTextRasterizer::new(&cfg.raster)?;
    tracing::info!(
        family = rasterizer.font_family(),
        font = %cfg.raster.font_path.display(),
        "loaded frame font"
    );
    let mut sink = GifSink::new(&cfg.out_path, cfg.gif_speed)?;
    render_source_to_sink(cfg, &source, &mut rasterizer, &mut sink)
}
