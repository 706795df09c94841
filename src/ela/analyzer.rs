//! ELA residual construction.
//!
//! Error Level Analysis exposes regions with a different compression
//! history than the rest of an image: recompress, diff against the
//! reference, then amplify the difference so the largest deviation reaches
//! full intensity.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use tracing::debug;

use crate::core::errors::{ForensicsError, ForensicsResult, ProcessingStage};

/// Computes amplified recompression residuals between two images.
#[derive(Debug, Clone, Copy)]
pub struct ElaAnalyzer {
    /// JPEG quality for the residual's final encode (1-100).
    quality: u8,
}

/// The amplified, recompressed difference between two images.
#[derive(Debug, Clone)]
pub struct ElaResidual {
    /// JPEG-encoded residual at the analyzer's quality. This is the primary
    /// wire payload.
    pub jpeg: Vec<u8>,
    /// The decoded residual that statistics and region extraction consume.
    /// Decoding the freshly encoded bytes keeps the analysis input in the
    /// same quantized space a caller receiving `jpeg` would see.
    pub image: DynamicImage,
    /// Amplification applied to the raw difference. Exactly 1.0 when the
    /// inputs were identical.
    pub scale: f32,
}

impl ElaAnalyzer {
    /// Creates an analyzer. Quality is clamped to 1..=100.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// The JPEG quality this analyzer encodes residuals at.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Builds the residual for a reference/candidate pair.
    ///
    /// The candidate is resampled (Lanczos) to the reference's dimensions
    /// when they differ, so the residual always matches the reference. Both
    /// images are compared in RGB.
    pub fn residual(
        &self,
        reference: &DynamicImage,
        candidate: &DynamicImage,
    ) -> ForensicsResult<ElaResidual> {
        let reference_rgb = reference.to_rgb8();

        let same_dimensions = candidate.width() == reference.width()
            && candidate.height() == reference.height();
        let candidate_rgb = if same_dimensions {
            candidate.to_rgb8()
        } else {
            debug!(
                from_width = candidate.width(),
                from_height = candidate.height(),
                to_width = reference.width(),
                to_height = reference.height(),
                "resampling candidate to reference dimensions"
            );
            candidate
                .resize_exact(reference.width(), reference.height(), FilterType::Lanczos3)
                .to_rgb8()
        };

        let (amplified, scale) = amplified_difference(&reference_rgb, &candidate_rgb);
        debug!(scale, "amplified pixel difference");

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.quality)
            .encode_image(&amplified)
            .map_err(|e| {
                ForensicsError::processing(ProcessingStage::Encoding, "residual jpeg encode", e)
            })?;

        let image = image::load_from_memory(&jpeg)?;

        Ok(ElaResidual { jpeg, image, scale })
    }
}

/// Per-pixel, per-channel absolute difference, rescaled so the maximum
/// difference approaches 255.
///
/// When the images are identical the scale stays 1 (no amplification, no
/// division by zero) and the output is all zeros. Scaled samples truncate
/// toward zero after clamping.
fn amplified_difference(reference: &RgbImage, candidate: &RgbImage) -> (RgbImage, f32) {
    let mut diff: Vec<u8> = reference
        .as_raw()
        .iter()
        .zip(candidate.as_raw().iter())
        .map(|(a, b)| a.abs_diff(*b))
        .collect();

    let max_diff = diff.iter().copied().max().unwrap_or(0);
    let scale = if max_diff == 0 {
        1.0
    } else {
        255.0 / f32::from(max_diff)
    };

    if max_diff != 0 {
        for sample in &mut diff {
            *sample = (f32::from(*sample) * scale).min(255.0) as u8;
        }
    }

    let amplified = RgbImage::from_raw(reference.width(), reference.height(), diff)
        .expect("diff buffer has reference dimensions");
    (amplified, scale)
}
