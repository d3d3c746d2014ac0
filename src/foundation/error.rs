use std::path::Path;

/// Result alias used across the crate.
pub type AsciiGifResult<T> = Result<T, AsciiGifError>;

/// Errors raised by the pipeline.
///
/// Every variant aborts the run. The display prefix names the stage that failed.
#[derive(thiserror::Error, Debug)]
pub enum AsciiGifError {
    /// Invalid configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Frame discovery found nothing usable.
    #[error("discovery error: {0}")]
    Discovery(String),

    /// The font asset could not be read or parsed.
    #[error("font asset error: {0}")]
    Asset(String),

    /// A single frame file could not be read as text.
    #[error("frame read error: {0}")]
    FrameRead(String),

    /// The animation could not be assembled or written.
    #[error("encode error: {0}")]
    Encode(String),

    /// Anything else, with the original source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AsciiGifError {
    /// Build a [`AsciiGifError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AsciiGifError::Discovery`].
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Build a [`AsciiGifError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`AsciiGifError::FrameRead`].
    pub fn frame_read(msg: impl Into<String>) -> Self {
        Self::FrameRead(msg.into())
    }

    /// Build a [`AsciiGifError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub(crate) fn encode_io(what: &str, path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Encode(format!("{what} '{}': {err}", path.display()))
    }
}
