//! # frametier
//!
//! Batch-extract video frames as JPEG sequences at multiple resolution
//! tiers.
//!
//! `frametier` decodes each video in a source list exactly once and writes
//! every frame at several quality tiers (by default `full` 1.0, `demi` 0.5,
//! `quart` 0.25) into a per-video, per-tier directory layout:
//!
//! ```text
//! {output_dir}/full/frame_0000.jpg
//! {output_dir}/demi/frame_0000.jpg
//! {output_dir}/quart/frame_0000.jpg
//! ```
//!
//! Decoding is powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; downscaling
//! uses swscale's area-averaging interpolation and JPEG encoding uses the
//! [`image`](https://crates.io/crates/image) crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use frametier::{BatchFrameExporter, ExportOptions, VideoSource};
//!
//! let exporter = BatchFrameExporter::new(ExportOptions::new());
//! let report = exporter.run(&[
//!     VideoSource::new("vids/idle.mp4", "frames/idle"),
//!     VideoSource::new("vids/speak.mp4", "frames/speak"),
//! ]);
//!
//! // One summary line per successfully exported source.
//! print!("{report}");
//! ```
//!
//! ## Custom tiers and quality
//!
//! ```no_run
//! use frametier::{BatchFrameExporter, ExportOptions, QualityTier, VideoSource};
//!
//! let options = ExportOptions::new()
//!     .with_jpeg_quality(92)
//!     .with_tiers(vec![
//!         QualityTier::new("full", 1.0)?,
//!         QualityTier::new("thumb", 0.125)?,
//!     ]);
//!
//! let exporter = BatchFrameExporter::new(options);
//! let stats = exporter.export_video(&VideoSource::new("clip.mp4", "frames/clip"))?;
//! println!("{} frames at {:.2} fps", stats.frame_count, stats.frames_per_second);
//! # Ok::<(), frametier::ExportError>(())
//! ```
//!
//! ## Behavior notes
//!
//! - Tier output directories are created if absent; existing frame files
//!   are overwritten silently, so re-runs are idempotent.
//! - A source that cannot be opened is skipped with a logged error; the
//!   rest of the batch still runs.
//! - End of stream and mid-stream decode corruption are distinguished by
//!   the decoder ([`DecodeOutcome`]); corruption truncates that video's
//!   output with a warning instead of failing the batch.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the system.

pub mod configuration;
pub mod decoder;
pub mod error;
pub mod export;
pub mod progress;
pub mod report;
pub mod scale;

pub use configuration::{
    DEFAULT_JPEG_QUALITY, DEFAULT_PROGRESS_INTERVAL, ExportOptions, QualityTier, VideoSource,
    default_tiers,
};
pub use decoder::{
    ClipMetadata, DecodeOutcome, FfmpegLogLevel, RawFrame, VideoDecoder, set_ffmpeg_log_level,
};
pub use error::ExportError;
pub use export::{BatchFrameExporter, frame_filename};
pub use progress::{ProgressCallback, ProgressInfo};
pub use report::{BatchReport, VideoStats};
pub use scale::{TierScaler, scaled_dimensions};
