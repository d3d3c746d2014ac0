use std::sync::Arc;

use crate::config::RasterConfig;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{AsciiGifError, AsciiGifResult};
use crate::render::backend::{FrameRasterizer, SharedFrame};
use crate::render::text::{FontAsset, TextBrushRgba8, TextLayoutEngine};

/// CPU text rasterizer: Parley layout, `vello_cpu` drawing.
///
/// The font is loaded once. Each frame gets a solid background and the text block drawn with its
/// top-left corner at `origin`. Glyphs outside the canvas are clipped.
pub struct CpuTextRasterizer {
    width: u16,
    height: u16,
    font_size_px: f32,
    origin: (f32, f32),
    background: Rgb8,
    brush: TextBrushRgba8,
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: vello_cpu::Pixmap,
}

impl CpuTextRasterizer {
    /// Load the font named by `cfg`. The config is validated by [`CpuTextRasterizer::with_font`].
    pub fn new(cfg: &RasterConfig) -> AsciiGifResult<Self> {
        let font = FontAsset::load(&cfg.font_path)?;
        Self::with_font(cfg, &font)
    }

    /// Like [`CpuTextRasterizer::new`] with an already loaded font.
    pub fn with_font(cfg: &RasterConfig, font: &FontAsset) -> AsciiGifResult<Self> {
        cfg.validate()?;
        let (width, height) = cfg.canvas.as_u16()?;
        let engine = TextLayoutEngine::new(font)?;

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );

        Ok(Self {
            width,
            height,
            font_size_px: cfg.font_size_px,
            origin: cfg.origin,
            background: cfg.background,
            brush: cfg.foreground.into(),
            engine,
            font: font_data,
            ctx: None,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Family name of the registered font.
    pub fn font_family(&self) -> &str {
        self.engine.family_name()
    }

    fn draw(&mut self, text: &str) -> AsciiGifResult<()> {
        let layout = self
            .engine
            .layout_plain(text, self.font_size_px, self.brush)?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) => ctx,
            None => vello_cpu::RenderContext::new(self.width, self.height),
        };
        ctx.reset();

        let bg = self.background;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(self.origin.0),
            f64::from(self.origin.1),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let baseline = run.baseline();
                let mut pen_x = run.offset();
                let glyphs = run
                    .glyphs()
                    .map(|g| {
                        let glyph = vello_cpu::Glyph {
                            id: g.id,
                            x: pen_x + g.x,
                            y: baseline - g.y,
                        };
                        pen_x += g.advance;
                        glyph
                    })
                    .collect::<Vec<_>>();

                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs.into_iter());
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx = Some(ctx);
        Ok(())
    }

    fn read_back(&self) -> AsciiGifResult<image::RgbImage> {
        // The background is opaque, so premultiplied RGBA equals straight RGBA here.
        let rgba = self.pixmap.data_as_u8_slice();
        let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
        for px in rgba.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        image::RgbImage::from_raw(u32::from(self.width), u32::from(self.height), rgb)
            .ok_or_else(|| AsciiGifError::validation("pixmap size does not match the canvas"))
    }
}

impl FrameRasterizer for CpuTextRasterizer {
    fn rasterize(&mut self, text: &str) -> AsciiGifResult<SharedFrame> {
        self.draw(text)?;
        Ok(Arc::new(self.read_back()?))
    }

    fn frame_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }
}
