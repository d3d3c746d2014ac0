use crate::foundation::error::{AsciiGifError, AsciiGifResult};

/// 0-based position of a frame in the assembled animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(pub u64);

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> AsciiGifResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Both dimensions must be non-zero and fit the raster backend and the GIF
    /// logical screen (16-bit).
    pub fn validate(&self) -> AsciiGifResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AsciiGifError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(AsciiGifError::validation(format!(
                "canvas {}x{} exceeds the 16-bit limit of {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// `(width, height)` as `u16`, valid once [`Canvas::validate`] passed.
    pub(crate) fn as_u16(&self) -> AsciiGifResult<(u16, u16)> {
        let w = u16::try_from(self.width)
            .map_err(|_| AsciiGifError::validation("canvas width exceeds u16"))?;
        let h = u16::try_from(self.height)
            .map_err(|_| AsciiGifError::validation("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// `#000000`
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// `#181818`
    pub const NEAR_BLACK: Self = Self::new(0x18, 0x18, 0x18);
    /// `#ffffff`
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
