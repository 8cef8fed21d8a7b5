//! Sequential video decoding.
//!
//! [`VideoDecoder`] opens a media file via FFmpeg, caches the clip metadata
//! the exporter needs, and yields decoded frames one at a time through
//! [`read_frame`](VideoDecoder::read_frame). Each call reads and decodes just
//! enough packets to produce the next frame, so no frame set is ever
//! buffered in memory.
//!
//! The read API is a tagged [`DecodeOutcome`] rather than a bare
//! `Option<Frame>`: end of stream and mid-stream decode failure are
//! distinguishable, so callers can report a truncated export instead of
//! silently treating corruption as a clean finish.
//!
//! # Example
//!
//! ```no_run
//! use frametier::{DecodeOutcome, VideoDecoder};
//!
//! let mut decoder = VideoDecoder::open("input.mp4")?;
//! println!("{}x{} @ {:.2} fps", decoder.metadata().width,
//!     decoder.metadata().height, decoder.metadata().frames_per_second);
//!
//! loop {
//!     match decoder.read_frame() {
//!         DecodeOutcome::Frame(_raw) => { /* scale and encode */ }
//!         DecodeOutcome::EndOfStream => break,
//!         DecodeOutcome::Failed(detail) => {
//!             eprintln!("stream truncated: {detail}");
//!             break;
//!         }
//!     }
//! }
//! # Ok::<(), frametier::ExportError>(())
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use ffmpeg_next::{
    Error as FfmpegError, Packet, codec::context::Context as CodecContext,
    decoder::Video as FfmpegVideoDecoder, format::Pixel, format::context::Input,
    frame::Video as VideoFrame, media::Type, util::log::Level,
};

use crate::error::ExportError;

/// Clip properties captured once at open time.
///
/// The frame count is an estimate derived from container duration and frame
/// rate; it can be zero or wrong for some containers and must never be used
/// to decide when decoding ends.
#[derive(Debug, Clone)]
#[must_use]
pub struct ClipMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Advisory total frame count. Zero when unknown.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`).
    pub codec: String,
}

/// An undecoded-pixel-format frame borrowed from the decoder.
///
/// Opaque outside the crate; pass it to the tier scalers to obtain RGB
/// pixels. The borrow ends before the next
/// [`read_frame`](VideoDecoder::read_frame) call.
pub struct RawFrame<'a>(pub(crate) &'a VideoFrame);

/// The result of one [`VideoDecoder::read_frame`] call.
pub enum DecodeOutcome<'a> {
    /// A frame was decoded.
    Frame(RawFrame<'a>),
    /// The stream ended cleanly; no further frames will be produced.
    EndOfStream,
    /// Decoding failed mid-stream. No further frames will be produced;
    /// the detail describes the underlying FFmpeg error.
    Failed(String),
}

/// Sequential decoder for the best video stream of a media file.
///
/// The demuxer and codec contexts are released when the value is dropped,
/// on every exit path.
pub struct VideoDecoder {
    input_context: Input,
    decoder: FfmpegVideoDecoder,
    stream_index: usize,
    metadata: ClipMetadata,
    pixel_format: Pixel,
    decoded_frame: VideoFrame,
    eof_sent: bool,
    finished: bool,
    path: PathBuf,
}

impl std::fmt::Debug for VideoDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDecoder")
            .field("stream_index", &self.stream_index)
            .field("metadata", &self.metadata)
            .field("pixel_format", &self.pixel_format)
            .field("eof_sent", &self.eof_sent)
            .field("finished", &self.finished)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl VideoDecoder {
    /// Open a media file and locate its best video stream.
    ///
    /// Initializes FFmpeg (idempotent) and captures [`ClipMetadata`] before
    /// any frame is read.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::SourceOpen`] if the file cannot be opened, or
    /// if it opens but contains no decodable video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening video source: {}", path.display());

        ffmpeg_next::init().map_err(|error| ExportError::SourceOpen {
            path: path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| ExportError::SourceOpen {
                path: path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or_else(|| ExportError::SourceOpen {
                path: path.clone(),
                reason: "no video stream found".to_string(),
            })?;
        let stream_index = stream.index();

        // Frames per second from the stream's average frame rate, falling
        // back to the raw rate field for containers that omit it.
        let average_rate = stream.avg_frame_rate();
        let frames_per_second = if average_rate.denominator() != 0 {
            average_rate.numerator() as f64 / average_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        let decoder_context =
            CodecContext::from_parameters(stream.parameters()).map_err(|error| {
                ExportError::SourceOpen {
                    path: path.clone(),
                    reason: format!("failed to read video codec parameters: {error}"),
                }
            })?;
        let decoder =
            decoder_context
                .decoder()
                .video()
                .map_err(|error| ExportError::SourceOpen {
                    path: path.clone(),
                    reason: format!("failed to create video decoder: {error}"),
                })?;

        let width = decoder.width();
        let height = decoder.height();
        let pixel_format = decoder.format();

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        // Advisory frame count from container duration. May be zero.
        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };
        let frame_count = if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let metadata = ClipMetadata {
            width,
            height,
            frames_per_second,
            frame_count,
            codec,
        };

        log::info!(
            "Opened {}: {}x{}, {:.2} fps, codec={}, ~{} frames",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.codec,
            metadata.frame_count,
        );

        Ok(Self {
            input_context,
            decoder,
            stream_index,
            metadata,
            pixel_format,
            decoded_frame: VideoFrame::empty(),
            eof_sent: false,
            finished: false,
            path,
        })
    }

    /// Clip metadata captured at open time.
    pub fn metadata(&self) -> &ClipMetadata {
        &self.metadata
    }

    /// The path this decoder was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source pixel format, needed to build scaling contexts.
    pub(crate) fn pixel_format(&self) -> Pixel {
        self.pixel_format
    }

    /// Decode and return the next frame.
    ///
    /// Feeds demuxed packets to the decoder until a frame is produced, the
    /// stream ends, or decoding fails. After [`DecodeOutcome::EndOfStream`]
    /// or [`DecodeOutcome::Failed`] the decoder is exhausted and every
    /// subsequent call returns [`DecodeOutcome::EndOfStream`].
    pub fn read_frame(&mut self) -> DecodeOutcome<'_> {
        if self.finished {
            return DecodeOutcome::EndOfStream;
        }

        loop {
            // Drain any frame the decoder has already produced.
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                return DecodeOutcome::Frame(RawFrame(&self.decoded_frame));
            }

            if self.eof_sent {
                // EOF flushed and the decoder is drained.
                self.finished = true;
                return DecodeOutcome::EndOfStream;
            }

            // The decoder is hungry. Feed it the next video packet.
            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() == self.stream_index
                        && let Err(error) = self.decoder.send_packet(&packet)
                    {
                        self.finished = true;
                        return DecodeOutcome::Failed(error.to_string());
                    }
                    // Non-video packets are skipped.
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.decoder.send_eof() {
                        self.finished = true;
                        return DecodeOutcome::Failed(error.to_string());
                    }
                    self.eof_sent = true;
                }
                Err(error) => {
                    // A demux error mid-file is corruption, not EOF.
                    self.finished = true;
                    return DecodeOutcome::Failed(error.to_string());
                }
            }
        }
    }
}

/// FFmpeg internal log verbosity.
///
/// FFmpeg prints its own diagnostics to stderr, separate from the Rust-side
/// `log` crate output. The default is `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfmpegLogLevel {
    /// Print nothing at all.
    Quiet,
    /// Recoverable and unrecoverable errors.
    Error,
    /// Warnings and errors (FFmpeg's default).
    Warning,
    /// Informational messages and above.
    Info,
    /// Debugging output and above.
    Debug,
}

/// Set FFmpeg's internal log verbosity.
///
/// Controls what FFmpeg itself prints to stderr; Rust-side `log` output is
/// configured separately (e.g. via `env_logger`).
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    let level = match level {
        FfmpegLogLevel::Quiet => Level::Quiet,
        FfmpegLogLevel::Error => Level::Error,
        FfmpegLogLevel::Warning => Level::Warning,
        FfmpegLogLevel::Info => Level::Info,
        FfmpegLogLevel::Debug => Level::Debug,
    };
    ffmpeg_next::util::log::set_level(level);
}
