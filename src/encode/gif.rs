use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::encode::sink::{FrameSink, LoopCount, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{AsciiGifError, AsciiGifResult};
use crate::render::SharedFrame;

/// Creates the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> AsciiGifResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AsciiGifError::encode_io("failed to create output directory", parent, e))?;
    }
    Ok(())
}

/// Removes the wrapped file on drop unless disarmed.
struct TempFileGuard(Option<PathBuf>);

impl TempFileGuard {
    fn disarm(&mut self) {
        self.0 = None;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

struct Active {
    // Declared before `tmp` so the file handle closes before the guard deletes it.
    encoder: ::gif::Encoder<BufWriter<File>>,
    tmp: TempFileGuard,
    tmp_path: PathBuf,
    cfg: SinkConfig,
    next: u64,
    last: Option<(SharedFrame, ::gif::Frame<'static>)>,
}

/// Animated GIF sink.
///
/// Frames are streamed into a hidden temporary file next to the output. `end` flushes it and
/// renames it over the output path, so the output is either the complete new animation or
/// whatever was there before. A frame that is the same allocation as the previous one reuses
/// the already quantized GIF frame.
pub struct GifSink {
    out_path: PathBuf,
    speed: i32,
    active: Option<Active>,
    frames_written: u64,
    frames_reused: u64,
}

impl GifSink {
    /// `speed` is the NeuQuant speed (1 = best quality, 30 = fastest).
    pub fn new(out_path: impl Into<PathBuf>, speed: i32) -> AsciiGifResult<Self> {
        if !(1..=30).contains(&speed) {
            return Err(AsciiGifError::validation(
                "gif speed must be within 1..=30",
            ));
        }
        Ok(Self {
            out_path: out_path.into(),
            speed,
            active: None,
            frames_written: 0,
            frames_reused: 0,
        })
    }

    /// Frames written so far (including reused ones).
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Frames that reused the previous frame's quantized data.
    pub fn frames_reused(&self) -> u64 {
        self.frames_reused
    }

    fn tmp_path(&self) -> AsciiGifResult<PathBuf> {
        let name = self
            .out_path
            .file_name()
            .ok_or_else(|| AsciiGifError::validation("output path has no file name"))?;
        let tmp_name = format!(
            ".{}.{}.partial",
            name.to_string_lossy(),
            std::process::id()
        );
        Ok(self.out_path.with_file_name(tmp_name))
    }
}

fn gif_repeat(repeat: LoopCount) -> ::gif::Repeat {
    match repeat {
        LoopCount::Infinite => ::gif::Repeat::Infinite,
        LoopCount::Finite(n) => ::gif::Repeat::Finite(n),
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> AsciiGifResult<()> {
        if self.active.is_some() {
            return Err(AsciiGifError::encode("gif sink already started"));
        }
        let width = u16::try_from(cfg.width)
            .map_err(|_| AsciiGifError::encode("gif width exceeds 65535"))?;
        let height = u16::try_from(cfg.height)
            .map_err(|_| AsciiGifError::encode("gif height exceeds 65535"))?;
        if width == 0 || height == 0 {
            return Err(AsciiGifError::encode("gif width/height must be non-zero"));
        }

        ensure_parent_dir(&self.out_path)?;
        let tmp_path = self.tmp_path()?;
        let file = File::create(&tmp_path)
            .map_err(|e| AsciiGifError::encode_io("failed to create", &tmp_path, e))?;
        let tmp = TempFileGuard(Some(tmp_path.clone()));

        let mut encoder = ::gif::Encoder::new(BufWriter::new(file), width, height, &[])
            .map_err(|e| AsciiGifError::encode_io("failed to start gif", &tmp_path, e))?;
        encoder
            .set_repeat(gif_repeat(cfg.repeat))
            .map_err(|e| AsciiGifError::encode_io("failed to write loop count", &tmp_path, e))?;

        tracing::debug!(
            out = %self.out_path.display(),
            width,
            height,
            delay_centis = cfg.delay_centis,
            "gif encoding started"
        );

        self.frames_written = 0;
        self.frames_reused = 0;
        self.active = Some(Active {
            encoder,
            tmp,
            tmp_path,
            cfg,
            next: 0,
            last: None,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &SharedFrame) -> AsciiGifResult<()> {
        let speed = self.speed;
        let Some(active) = self.active.as_mut() else {
            return Err(AsciiGifError::encode("push_frame called before begin"));
        };
        if idx.0 != active.next {
            return Err(AsciiGifError::encode(format!(
                "frames must be pushed in order: got {}, expected {}",
                idx.0, active.next
            )));
        }
        active.cfg.check_frame(frame)?;

        let reuse = matches!(&active.last, Some((prev, _)) if Arc::ptr_eq(prev, frame));
        if !reuse {
            let (w, h) = (active.cfg.width as u16, active.cfg.height as u16);
            let mut gif_frame = ::gif::Frame::from_rgb_speed(w, h, frame.as_raw(), speed);
            gif_frame.delay = active.cfg.delay_centis;
            active.last = Some((Arc::clone(frame), gif_frame));
        } else {
            self.frames_reused += 1;
        }

        let Some((_, gif_frame)) = active.last.as_ref() else {
            return Err(AsciiGifError::encode("no quantized frame to write"));
        };
        active
            .encoder
            .write_frame(gif_frame)
            .map_err(|e| AsciiGifError::encode_io("failed to write frame to", &active.tmp_path, e))?;

        active.next += 1;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> AsciiGifResult<()> {
        let Some(active) = self.active.take() else {
            return Err(AsciiGifError::encode("end called before begin"));
        };
        let Active {
            encoder,
            mut tmp,
            tmp_path,
            ..
        } = active;

        let writer = encoder
            .into_inner()
            .map_err(|e| AsciiGifError::encode_io("failed to finish", &tmp_path, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| AsciiGifError::encode_io("failed to flush", &tmp_path, e))?;
        file.sync_all()
            .map_err(|e| AsciiGifError::encode_io("failed to sync", &tmp_path, e))?;
        drop(file);

        std::fs::rename(&tmp_path, &self.out_path)
            .map_err(|e| AsciiGifError::encode_io("failed to move gif into", &self.out_path, e))?;
        tmp.disarm();

        tracing::debug!(
            out = %self.out_path.display(),
            frames = self.frames_written,
            reused = self.frames_reused,
            "wrote gif"
        );
        Ok(())
    }
}
