//! Export configuration.
//!
//! [`ExportOptions`] is a builder that carries the quality-tier list, JPEG
//! quality, and progress settings through the exporter without polluting
//! every function signature. [`VideoSource`] and [`QualityTier`] are the
//! static inputs of a batch run.
//!
//! # Example
//!
//! ```no_run
//! use frametier::{ExportOptions, QualityTier, VideoSource};
//!
//! let options = ExportOptions::new()
//!     .with_jpeg_quality(90)
//!     .with_tiers(vec![
//!         QualityTier::new("full", 1.0).unwrap(),
//!         QualityTier::new("half", 0.5).unwrap(),
//!     ]);
//!
//! let source = VideoSource::new("vids/idle.mp4", "frames/idle");
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ExportError;
use crate::progress::{NoOpProgress, ProgressCallback};

/// Default JPEG quality, on the encoder's 1–100 scale.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Default progress-callback cadence, in frames.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 30;

/// One video to process: an input path and the base directory that will
/// receive one subdirectory per quality tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSource {
    /// Path to the input media file.
    pub path: PathBuf,
    /// Base directory for this video's tier subdirectories.
    pub output_dir: PathBuf,
}

impl VideoSource {
    /// Create a new source entry.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(path: P, output_dir: Q) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

/// A named resolution tier.
///
/// Each tier produces one output subdirectory named after the tier. The
/// scale factor is applied to both source dimensions with integer
/// truncation; a factor of exactly `1.0` skips resampling entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityTier {
    /// Tier name, used as the output subdirectory name.
    pub name: String,
    /// Scale factor in `(0, 1]`.
    pub scale: f64,
}

impl QualityTier {
    /// Create a tier, validating that `scale` lies in `(0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidTierScale`] for zero, negative,
    /// non-finite, or greater-than-one scales.
    pub fn new<S: Into<String>>(name: S, scale: f64) -> Result<Self, ExportError> {
        let name = name.into();
        if !scale.is_finite() || scale <= 0.0 || scale > 1.0 {
            return Err(ExportError::InvalidTierScale { name, scale });
        }
        Ok(Self { name, scale })
    }

    /// Whether this tier reuses the decoded frame without resampling.
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0
    }
}

/// The default three-tier ladder: `full` 1.0, `demi` 0.5, `quart` 0.25.
pub fn default_tiers() -> Vec<QualityTier> {
    vec![
        QualityTier {
            name: "full".to_string(),
            scale: 1.0,
        },
        QualityTier {
            name: "demi".to_string(),
            scale: 0.5,
        },
        QualityTier {
            name: "quart".to_string(),
            scale: 0.25,
        },
    ]
}

/// Configuration for a batch export run.
///
/// Tier list order is processing order. All fields have defaults matching
/// the stock three-tier export at JPEG quality 80.
#[derive(Clone)]
pub struct ExportOptions {
    /// Ordered list of quality tiers.
    pub(crate) tiers: Vec<QualityTier>,
    /// JPEG quality on the encoder's 1–100 scale.
    pub(crate) jpeg_quality: u8,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// How often the progress callback fires (every N frames).
    pub(crate) progress_interval: u64,
}

impl Debug for ExportOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExportOptions")
            .field("tiers", &self.tiers)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("progress_interval", &self.progress_interval)
            .finish_non_exhaustive()
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportOptions {
    /// Create options with the default tier ladder, JPEG quality 80, and a
    /// progress cadence of every 30 frames.
    pub fn new() -> Self {
        Self {
            tiers: default_tiers(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            progress: Arc::new(NoOpProgress),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Replace the tier list. Order is preserved and determines processing
    /// order. An empty list produces no output files.
    #[must_use]
    pub fn with_tiers(mut self, tiers: Vec<QualityTier>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Set the JPEG quality. Clamped to `1..=100`.
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Attach a progress callback, fired every
    /// [`progress_interval`](ExportOptions::with_progress_interval) frames.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_progress_interval(mut self, frames: u64) -> Self {
        self.progress_interval = frames.max(1);
        self
    }

    /// The configured tiers, in processing order.
    pub fn tiers(&self) -> &[QualityTier] {
        &self.tiers
    }

    /// The configured JPEG quality.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}
