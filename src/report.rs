//! Batch run statistics.
//!
//! [`VideoStats`] summarizes one exported video; [`BatchReport`] collects
//! the stats of every successfully processed source, keyed by the full
//! source path so that two sources whose output directories share a basename
//! can never overwrite each other's entry.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

/// Summary statistics for one exported video.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct VideoStats {
    /// Number of frames actually decoded and exported. Counts successful
    /// reads, never the container's advisory frame count.
    pub frame_count: u64,
    /// Decoder-reported frame rate, captured at open time.
    pub frames_per_second: f64,
}

/// Insertion-ordered mapping from source path to [`VideoStats`].
///
/// Re-exporting the same path replaces its entry; distinct paths always get
/// distinct entries. The [`Display`] implementation renders the console
/// summary, one line per source in processing order.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct BatchReport {
    entries: Vec<(PathBuf, VideoStats)>,
}

impl BatchReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record stats for a source, replacing any previous entry for the
    /// same path.
    pub fn record<P: AsRef<Path>>(&mut self, source_path: P, stats: VideoStats) {
        let source_path = source_path.as_ref();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(path, _)| path == source_path)
        {
            entry.1 = stats;
        } else {
            self.entries.push((source_path.to_path_buf(), stats));
        }
    }

    /// Look up stats by source path.
    pub fn get<P: AsRef<Path>>(&self, source_path: P) -> Option<&VideoStats> {
        let source_path = source_path.as_ref();
        self.entries
            .iter()
            .find(|(path, _)| path == source_path)
            .map(|(_, stats)| stats)
    }

    /// Iterate entries in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &VideoStats)> {
        self.entries
            .iter()
            .map(|(path, stats)| (path.as_path(), stats))
    }

    /// Number of recorded sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no source was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (path, stats) in &self.entries {
            writeln!(
                f,
                "{}: {} frames à {:.2} FPS",
                path.display(),
                stats.frame_count,
                stats.frames_per_second,
            )?;
        }
        Ok(())
    }
}
