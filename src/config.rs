//! Pipeline configuration.
//!
//! All knobs are resolved once into a [`PipelineConfig`] before the pipeline starts. The `debug`
//! switch only picks defaults: a pure black background and a 10-frame cap instead of `#181818`
//! and 1600 frames.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{AsciiGifError, AsciiGifResult};

/// Default frame file pattern, relative to the working directory.
pub const DEFAULT_PATTERN: &str = "part2/*.txt";
/// Default output path, relative to the working directory.
pub const DEFAULT_OUT_PATH: &str = "output.gif";
/// Default monospace font.
pub const DEFAULT_FONT_PATH: &str = "/System/Library/Fonts/SFNSMono.ttf";
/// Frame cap outside debug mode.
pub const MAX_FRAMES: usize = 1600;
/// Frame cap in debug mode.
pub const MAX_FRAMES_DEBUG: usize = 10;

/// Rasterization parameters shared by every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterConfig {
    /// Font file (TTF/OTF) used for every frame.
    pub font_path: PathBuf,
    /// Canvas size in pixels.
    pub canvas: Canvas,
    /// Font size in pixels per em.
    pub font_size_px: f32,
    /// Top-left of the text block, in pixels from the canvas origin.
    pub origin: (f32, f32),
    /// Canvas fill.
    pub background: Rgb8,
    /// Text color.
    pub foreground: Rgb8,
}

impl RasterConfig {
    /// Defaults for the given debug mode.
    pub fn new(debug: bool) -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            canvas: Canvas {
                width: 720,
                height: 820,
            },
            font_size_px: 12.0,
            origin: (10.0, 10.0),
            background: if debug { Rgb8::BLACK } else { Rgb8::NEAR_BLACK },
            foreground: Rgb8::WHITE,
        }
    }

    /// Validate canvas and font size.
    pub fn validate(&self) -> AsciiGifResult<()> {
        self.canvas.validate()?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(AsciiGifError::validation(
                "font size must be finite and > 0",
            ));
        }
        if !self.origin.0.is_finite() || !self.origin.1.is_finite() {
            return Err(AsciiGifError::validation("text origin must be finite"));
        }
        Ok(())
    }
}

/// Animation timing, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Display time of every frame.
    pub frame_duration_ms: u32,
    /// How long the last frame stays up before the loop restarts.
    pub end_duration_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_duration_ms: 25,
            end_duration_ms: 1000,
        }
    }
}

impl TimingConfig {
    /// Validate timing values.
    pub fn validate(&self) -> AsciiGifResult<()> {
        if self.frame_duration_ms == 0 {
            return Err(AsciiGifError::validation(
                "frame duration must be non-zero",
            ));
        }
        if self.frame_duration_ms / 10 > u32::from(u16::MAX) {
            return Err(AsciiGifError::validation(format!(
                "frame duration {} ms exceeds the GIF delay limit of {} ms",
                self.frame_duration_ms,
                u32::from(u16::MAX) * 10 + 9
            )));
        }
        Ok(())
    }

    /// Number of extra copies of the last frame, `end / frame` rounded down.
    pub fn hold_frames(&self) -> usize {
        if self.frame_duration_ms == 0 {
            return 0;
        }
        (self.end_duration_ms / self.frame_duration_ms) as usize
    }

    /// Per-frame delay in GIF units (hundredths of a second), truncated. Saturates for durations
    /// that [`TimingConfig::validate`] rejects.
    pub fn gif_delay_centis(&self) -> u16 {
        u16::try_from(self.frame_duration_ms / 10).unwrap_or(u16::MAX)
    }
}

/// Everything the pipeline needs, resolved up front.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Debug mode, already folded into `max_frames` and `raster.background`.
    pub debug: bool,
    /// Glob selecting the frame files, e.g. `part2/*.txt`.
    pub pattern: String,
    /// Only the first `max_frames` files (in name order) are used.
    pub max_frames: usize,
    /// Rasterization parameters.
    pub raster: RasterConfig,
    /// Timing parameters.
    pub timing: TimingConfig,
    /// Output GIF path. Overwritten without confirmation.
    pub out_path: PathBuf,
    /// NeuQuant speed passed to the GIF quantizer (1 = best, 30 = fastest).
    pub gif_speed: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

impl PipelineConfig {
    /// Defaults for the given debug mode.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            pattern: DEFAULT_PATTERN.to_owned(),
            max_frames: if debug { MAX_FRAMES_DEBUG } else { MAX_FRAMES },
            raster: RasterConfig::new(debug),
            timing: TimingConfig::default(),
            out_path: PathBuf::from(DEFAULT_OUT_PATH),
            gif_speed: 10,
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> AsciiGifResult<()> {
        if self.pattern.trim().is_empty() {
            return Err(AsciiGifError::validation("frame pattern must be non-empty"));
        }
        if self.max_frames == 0 {
            return Err(AsciiGifError::validation("max_frames must be > 0"));
        }
        if !(1..=30).contains(&self.gif_speed) {
            return Err(AsciiGifError::validation(
                "gif speed must be within 1..=30",
            ));
        }
        if self.out_path.as_os_str().is_empty() {
            return Err(AsciiGifError::validation("output path must be non-empty"));
        }
        self.raster.validate()?;
        self.timing.validate()
    }

    /// Load a [`ConfigFile`] from JSON and resolve it.
    pub fn from_json_path(path: impl AsRef<Path>) -> AsciiGifResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let file: ConfigFile = serde_json::from_reader(std::io::BufReader::new(f))
            .map_err(|e| AsciiGifError::validation(format!("parse config JSON: {e}")))?;
        let cfg = file.into_config();
        cfg.validate()?;
        Ok(cfg)
    }
}

/// On-disk form of the documented options. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Debug mode.
    pub debug: bool,
    /// Frame file glob.
    pub pattern: Option<String>,
    /// Frame cap.
    pub max_frames: Option<usize>,
    /// Font file.
    pub font_path: Option<PathBuf>,
    /// Canvas `[width, height]`.
    pub image_size: Option<(u32, u32)>,
    /// Font size in pixels.
    pub font_size: Option<f32>,
    /// Per-frame duration in milliseconds.
    pub frame_duration: Option<u32>,
    /// Hold duration in milliseconds.
    pub end_duration: Option<u32>,
}

impl ConfigFile {
    /// Start from the debug-mode defaults and apply overrides.
    pub fn into_config(self) -> PipelineConfig {
        let mut cfg = PipelineConfig::new(self.debug);
        if let Some(p) = self.pattern {
            cfg.pattern = p;
        }
        if let Some(n) = self.max_frames {
            cfg.max_frames = n;
        }
        if let Some(p) = self.font_path {
            cfg.raster.font_path = p;
        }
        if let Some((width, height)) = self.image_size {
            cfg.raster.canvas = Canvas { width, height };
        }
        if let Some(s) = self.font_size {
            cfg.raster.font_size_px = s;
        }
        if let Some(ms) = self.frame_duration {
            cfg.timing.frame_duration_ms = ms;
        }
        if let Some(ms) = self.end_duration {
            cfg.timing.end_duration_ms = ms;
        }
        cfg
    }
}
