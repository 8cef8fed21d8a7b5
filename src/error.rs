//! Error types for the `frametier` crate.
//!
//! This module defines [`ExportError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry enough context (file paths,
//! tier names, upstream messages) to diagnose a failure without additional
//! logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `frametier` operations.
///
/// Every public method that can fail returns `Result<T, ExportError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// The video source could not be opened.
    ///
    /// This is the only error tolerated at the batch level: the affected
    /// source is skipped and subsequent sources still run.
    #[error("Failed to open video source at {path}: {reason}")]
    SourceOpen {
        /// Path that was passed to [`crate::VideoDecoder::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// A video frame could not be decoded or converted.
    #[error("Failed to decode video frame: {0}")]
    FrameDecode(String),

    /// A quality tier was constructed with a scale factor outside `(0, 1]`.
    #[error("Invalid scale factor {scale} for tier '{name}' (must be in (0, 1])")]
    InvalidTierScale {
        /// Name of the offending tier.
        name: String,
        /// The rejected scale factor.
        scale: f64,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// An I/O error occurred while writing frame images.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// An error from the `image` crate during JPEG encoding.
    #[error("Image encoding error: {0}")]
    Image(#[from] ImageError),
}

impl From<FfmpegError> for ExportError {
    fn from(error: FfmpegError) -> Self {
        ExportError::Ffmpeg(error.to_string())
    }
}
