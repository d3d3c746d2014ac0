use std::path::{Path, PathBuf};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{AsciiGifError, AsciiGifResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Raw bytes of the font file every frame is drawn with.
#[derive(Clone)]
pub struct FontAsset {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("path", &self.path)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FontAsset {
    /// Read a font file. Parsing happens when it is registered with a [`TextLayoutEngine`].
    pub fn load(path: impl AsRef<Path>) -> AsciiGifResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            AsciiGifError::asset(format!("failed to read font '{}': {e}", path.display()))
        })?;
        if bytes.is_empty() {
            return Err(AsciiGifError::asset(format!(
                "font '{}' is empty",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    /// Path the font was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Font file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Parley contexts with exactly one registered font family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` and remember its family name.
    ///
    /// Fails when the bytes contain no usable font family.
    pub(crate) fn new(font: &FontAsset) -> AsciiGifResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            AsciiGifError::asset(format!(
                "no font families found in '{}'",
                font.path().display()
            ))
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| {
                AsciiGifError::asset(format!(
                    "font family in '{}' has no name",
                    font.path().display()
                ))
            })?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Lay out `text` with hard line breaks only. Lines are never wrapped, so anything wider
    /// than the canvas is clipped at draw time.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> AsciiGifResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AsciiGifError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
