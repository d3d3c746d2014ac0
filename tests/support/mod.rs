#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use asciigif::{AsciiGifResult, FrameRasterizer, PipelineConfig, SharedFrame};
use image::AnimationDecoder as _;

/// Fresh scratch directory under `target/`.
pub fn scratch_dir(group: &str, name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join(group).join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write `(file name, contents)` pairs into `dir`.
pub fn write_frames(dir: &Path, frames: &[(&str, &str)]) {
    for (name, body) in frames {
        std::fs::write(dir.join(name), body).unwrap();
    }
}

/// First monospace font found in the usual system locations.
pub fn system_mono_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
        "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
        "/System/Library/Fonts/SFNSMono.ttf",
        "/System/Library/Fonts/Menlo.ttc",
        "C:\\Windows\\Fonts\\consola.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .find(|p| p.is_file())
}

/// Pipeline config reading `dir/*.txt` and writing `dir/output.gif`, with a small canvas.
pub fn small_config(dir: &Path) -> PipelineConfig {
    let mut cfg = PipelineConfig::new(false);
    cfg.pattern = format!("{}/*.txt", dir.display());
    cfg.out_path = dir.join("output.gif");
    cfg.raster.canvas = asciigif::Canvas {
        width: 16,
        height: 12,
    };
    cfg
}

/// Font-free rasterizer: byte `i` of the text lights the pixel at column `byte % width`,
/// row `i % height`.
pub struct StubRasterizer {
    width: u32,
    height: u32,
    bg: [u8; 3],
    pub calls: usize,
}

impl StubRasterizer {
    pub fn new(cfg: &PipelineConfig) -> Self {
        let bg = cfg.raster.background;
        Self {
            width: cfg.raster.canvas.width,
            height: cfg.raster.canvas.height,
            bg: [bg.r, bg.g, bg.b],
            calls: 0,
        }
    }
}

impl FrameRasterizer for StubRasterizer {
    fn rasterize(&mut self, text: &str) -> AsciiGifResult<SharedFrame> {
        self.calls += 1;
        let mut img = image::RgbImage::from_pixel(self.width, self.height, image::Rgb(self.bg));
        for (i, b) in text.bytes().enumerate() {
            let x = u32::from(b) % self.width;
            let y = i as u32 % self.height;
            img.put_pixel(x, y, image::Rgb([255, 255, 255]));
        }
        Ok(Arc::new(img))
    }

    fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Decoded GIF frames (fully composited RGBA).
pub fn decode_gif(path: &Path) -> Vec<image::Frame> {
    let f = std::fs::File::open(path).unwrap();
    let decoder = image::codecs::gif::GifDecoder::new(std::io::BufReader::new(f)).unwrap();
    decoder.into_frames().collect_frames().unwrap()
}

/// `true` if the file carries a NETSCAPE2.0 loop extension with loop count 0.
pub fn loops_forever(bytes: &[u8]) -> bool {
    let needle: &[u8] = b"NETSCAPE2.0\x03\x01\x00\x00";
    bytes.windows(needle.len()).any(|w| w == needle)
}
