//! The batch frame exporter.
//!
//! [`BatchFrameExporter`] is the main entry point of the crate. It walks an
//! ordered list of [`VideoSource`] entries, decodes each video once, and
//! writes every frame as a JPEG into one subdirectory per configured
//! quality tier:
//!
//! ```text
//! {output_dir}/{tier}/frame_{index:04}.jpg
//! ```
//!
//! # Example
//!
//! ```no_run
//! use frametier::{BatchFrameExporter, ExportOptions, VideoSource};
//!
//! let exporter = BatchFrameExporter::new(ExportOptions::new());
//! let report = exporter.run(&[
//!     VideoSource::new("vids/idle.mp4", "frames/idle"),
//!     VideoSource::new("vids/speak.mp4", "frames/speak"),
//! ]);
//! print!("{report}");
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{RgbImage, codecs::jpeg::JpegEncoder};

use crate::configuration::{ExportOptions, VideoSource};
use crate::decoder::{DecodeOutcome, VideoDecoder};
use crate::error::ExportError;
use crate::progress::ProgressTracker;
use crate::report::{BatchReport, VideoStats};
use crate::scale::TierScaler;

/// Output filename for a given frame index.
///
/// Zero-padded to four digits; indices of 10000 and above simply widen the
/// field, so lexicographic ordering is only guaranteed below 10000 frames.
pub fn frame_filename(frame_index: u64) -> String {
    format!("frame_{frame_index:04}.jpg")
}

/// Exports image sequences from a batch of video sources.
///
/// Processing is strictly sequential: one frame is fully handled (all tiers
/// scaled, encoded, written) before the next is decoded, and one source is
/// fully closed before the next is opened.
#[derive(Debug)]
pub struct BatchFrameExporter {
    options: ExportOptions,
}

impl BatchFrameExporter {
    /// Create an exporter with the given options.
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// The options this exporter was built with.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export every frame of one video at every configured tier.
    ///
    /// Tier output directories are created if absent. Existing frame files
    /// are silently overwritten, so re-running on the same source is
    /// idempotent. The decoder is released on every exit path.
    ///
    /// A clean end of stream finishes the export normally. A mid-stream
    /// decode failure logs a truncation warning and also finishes normally:
    /// the frames written so far are valid, and the returned
    /// [`VideoStats::frame_count`] reflects exactly what is on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::SourceOpen`] when the source cannot be opened
    /// (nothing is written), or an I/O / encoding error if a frame write
    /// fails mid-export.
    pub fn export_video(&self, source: &VideoSource) -> Result<VideoStats, ExportError> {
        let mut decoder = VideoDecoder::open(&source.path)?;
        let metadata = decoder.metadata().clone();

        let tier_dirs: Vec<PathBuf> = self
            .options
            .tiers
            .iter()
            .map(|tier| source.output_dir.join(&tier.name))
            .collect();
        for dir in &tier_dirs {
            fs::create_dir_all(dir)?;
        }

        let mut scalers: Vec<TierScaler> = self
            .options
            .tiers
            .iter()
            .map(|tier| TierScaler::for_decoder(&decoder, tier))
            .collect::<Result<_, _>>()?;

        let total_hint = (metadata.frame_count > 0).then_some(metadata.frame_count);
        let mut tracker = ProgressTracker::new(
            self.options.progress.clone(),
            total_hint,
            self.options.progress_interval,
        );

        let mut frame_index: u64 = 0;
        loop {
            match decoder.read_frame() {
                DecodeOutcome::Frame(raw) => {
                    // Same index across all tiers: tier outputs for frame i
                    // always correspond to the same decoded frame.
                    let filename = frame_filename(frame_index);
                    for (scaler, dir) in scalers.iter_mut().zip(&tier_dirs) {
                        let rgb = scaler.run(&raw)?;
                        write_jpeg(&rgb, &dir.join(&filename), self.options.jpeg_quality)?;
                    }
                    frame_index += 1;
                    tracker.advance();
                }
                DecodeOutcome::EndOfStream => break,
                DecodeOutcome::Failed(detail) => {
                    log::warn!(
                        "{}: decoding failed after {} frame(s), output truncated: {}",
                        source.path.display(),
                        frame_index,
                        detail,
                    );
                    break;
                }
            }
        }
        tracker.finish();

        log::info!(
            "Exported {} frame(s) from {} across {} tier(s)",
            frame_index,
            source.path.display(),
            tier_dirs.len(),
        );

        Ok(VideoStats {
            frame_count: frame_index,
            frames_per_second: metadata.frames_per_second,
        })
    }

    /// Process all sources sequentially, in the given order.
    ///
    /// A source that fails to export is logged and skipped; it gets no
    /// report entry and does not abort the batch. Successful sources are
    /// recorded in the returned [`BatchReport`] keyed by their full path.
    pub fn run(&self, sources: &[VideoSource]) -> BatchReport {
        let mut report = BatchReport::new();

        for source in sources {
            log::info!("Processing {}", source.path.display());
            match self.export_video(source) {
                Ok(stats) => report.record(&source.path, stats),
                Err(error) => {
                    log::error!("Skipping {}: {error}", source.path.display());
                }
            }
        }

        report
    }
}

/// Encode an RGB image as JPEG at the given quality and write it to `path`.
///
/// Overwrites silently if the path already exists.
fn write_jpeg(image: &RgbImage, path: &Path, quality: u8) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    encoder.encode_image(image)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::frame_filename;

    #[test]
    fn filename_zero_padded() {
        assert_eq!(frame_filename(0), "frame_0000.jpg");
        assert_eq!(frame_filename(7), "frame_0007.jpg");
        assert_eq!(frame_filename(9999), "frame_9999.jpg");
    }

    #[test]
    fn filename_widens_past_four_digits() {
        assert_eq!(frame_filename(10000), "frame_10000.jpg");
        assert_eq!(frame_filename(123456), "frame_123456.jpg");
    }
}
