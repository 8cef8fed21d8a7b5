//! Per-tier frame scaling.
//!
//! Each [`TierScaler`] wraps one FFmpeg software-scaling context configured
//! for a single quality tier. Downscaling tiers use swscale's area-averaging
//! interpolation, which averages all source pixels covered by each target
//! pixel and is the appropriate choice for reduction. The identity tier
//! (scale 1.0) keeps the source dimensions and only converts pixel format,
//! so no resampling artifact is ever introduced.

use ffmpeg_next::{
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::configuration::QualityTier;
use crate::decoder::{RawFrame, VideoDecoder};
use crate::error::ExportError;

/// Compute a tier's output dimensions from the source dimensions.
///
/// Uses integer truncation (`floor`), not rounding, and floors the result at
/// one pixel so a tiny scale on a tiny source cannot produce a zero-sized
/// image.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let scaled_width = ((width as f64 * scale) as u32).max(1);
    let scaled_height = ((height as f64 * scale) as u32).max(1);
    (scaled_width, scaled_height)
}

/// A reusable scaling pipeline for one quality tier.
///
/// Converts decoded frames to tightly-packed RGB at the tier's target
/// dimensions. The internal FFmpeg frame buffer is reused across calls.
pub struct TierScaler {
    context: ScalingContext,
    scaled_frame: VideoFrame,
    width: u32,
    height: u32,
}

impl TierScaler {
    /// Build a scaler for `tier` against the decoder's source geometry.
    pub fn for_decoder(decoder: &VideoDecoder, tier: &QualityTier) -> Result<Self, ExportError> {
        let source_width = decoder.metadata().width;
        let source_height = decoder.metadata().height;

        let (width, height, flags) = if tier.is_identity() {
            // Format conversion only; POINT is a no-op at equal dimensions.
            (source_width, source_height, ScalingFlags::POINT)
        } else {
            let (width, height) = scaled_dimensions(source_width, source_height, tier.scale);
            (width, height, ScalingFlags::AREA)
        };

        log::debug!(
            "Tier '{}': {}x{} -> {}x{}",
            tier.name,
            source_width,
            source_height,
            width,
            height,
        );

        let context = ScalingContext::get(
            decoder.pixel_format(),
            source_width,
            source_height,
            Pixel::RGB24,
            width,
            height,
            flags,
        )?;

        Ok(Self {
            context,
            scaled_frame: VideoFrame::empty(),
            width,
            height,
        })
    }

    /// Target width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Target height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Scale a decoded frame to this tier's dimensions as packed RGB.
    pub fn run(&mut self, frame: &RawFrame<'_>) -> Result<RgbImage, ExportError> {
        self.context.run(frame.0, &mut self.scaled_frame)?;

        let buffer = strip_row_padding(&self.scaled_frame, self.width, self.height);
        RgbImage::from_raw(self.width, self.height, buffer).ok_or_else(|| {
            ExportError::FrameDecode(
                "failed to construct RGB image from scaled frame data".to_string(),
            )
        })
    }
}

/// Copy pixel data from an FFmpeg frame into a tightly-packed RGB buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3); the
/// padding must be stripped before handing the buffer to
/// [`image::RgbImage::from_raw`].
fn strip_row_padding(frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = frame.stride(0);
    let row_bytes = (width as usize) * 3;
    let data = frame.data(0);

    if stride == row_bytes {
        // No padding: copy the whole plane at once.
        data[..row_bytes * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_bytes * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_bytes]);
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::scaled_dimensions;

    #[test]
    fn dimensions_truncate_not_round() {
        assert_eq!(scaled_dimensions(101, 101, 0.5), (50, 50));
        assert_eq!(scaled_dimensions(101, 101, 0.25), (25, 25));
        assert_eq!(scaled_dimensions(1919, 1079, 0.5), (959, 539));
    }

    #[test]
    fn dimensions_identity_scale() {
        assert_eq!(scaled_dimensions(1920, 1080, 1.0), (1920, 1080));
    }

    #[test]
    fn dimensions_never_zero() {
        assert_eq!(scaled_dimensions(2, 2, 0.25), (1, 1));
        assert_eq!(scaled_dimensions(1, 1, 0.5), (1, 1));
    }
}
