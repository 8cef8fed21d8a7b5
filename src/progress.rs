//! Progress reporting for long-running exports.
//!
//! [`ProgressCallback`] lets callers observe a batch export without changing
//! its behavior — callbacks are infallible and cannot halt the run.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use frametier::{ExportOptions, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("{pct:.1}% complete");
//!         }
//!     }
//! }
//!
//! let options = ExportOptions::new().with_progress(Arc::new(PrintProgress));
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// A snapshot of export progress for one video.
///
/// Delivered to [`ProgressCallback::on_progress`] at a cadence controlled by
/// [`ExportOptions::with_progress_interval`](crate::ExportOptions::with_progress_interval).
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames fully exported (all tiers written) so far.
    pub frames_exported: u64,
    /// The decoder's advisory total frame count, if it reported one.
    ///
    /// Container metadata can be absent or wrong, so this is a hint for
    /// display purposes only.
    pub total_hint: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total_hint` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since this video's export started.
    pub elapsed: Duration,
}

/// Trait for receiving progress updates during an export.
///
/// Implementations must be [`Send`] and [`Sync`] so a single callback can be
/// shared across option clones.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals while frames are being exported.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Internal helper that tracks timing and fires the callback on cadence.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total_hint: Option<u64>,
    interval: u64,
    frames_exported: u64,
    frames_since_report: u64,
    start_time: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        total_hint: Option<u64>,
        interval: u64,
    ) -> Self {
        Self {
            callback,
            total_hint,
            interval: interval.max(1),
            frames_exported: 0,
            frames_since_report: 0,
            start_time: Instant::now(),
        }
    }

    /// Record one exported frame and fire the callback if the cadence
    /// threshold is reached.
    pub(crate) fn advance(&mut self) {
        self.frames_exported += 1;
        self.frames_since_report += 1;

        if self.frames_since_report >= self.interval {
            self.report();
            self.frames_since_report = 0;
        }
    }

    /// Unconditionally emit a final report.
    pub(crate) fn finish(&mut self) {
        self.report();
    }

    fn report(&self) {
        let percentage = self
            .total_hint
            .filter(|&total| total > 0)
            .map(|total| (self.frames_exported as f32 / total as f32) * 100.0);

        let info = ProgressInfo {
            frames_exported: self.frames_exported,
            total_hint: self.total_hint,
            percentage,
            elapsed: self.start_time.elapsed(),
        };

        self.callback.on_progress(&info);
    }
}
