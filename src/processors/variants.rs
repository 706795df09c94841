//! Preprocessed renderings for multi-variant text recognition.
//!
//! A single noisy scan rarely recognizes well under one preprocessing
//! recipe: global thresholding wins on clean flatbed scans, adaptive
//! thresholding on unevenly lit photographs, median filtering on sensor
//! noise. [`VariantGenerator`] therefore produces a fixed, ordered set of
//! five renderings and lets the selection policy downstream pick whichever
//! the engine scored best.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::filter::{gaussian_blur_f32, median_filter};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sigma of the 5-tap Gaussian applied before global thresholding.
///
/// Matches the value a 5x5 kernel implies when the blur is specified by
/// kernel size alone (0.3 * ((5 - 1) * 0.5 - 1) + 0.8).
const OTSU_BLUR_SIGMA: f32 = 1.1;

/// Sigma of the 11-tap Gaussian used as the adaptive threshold's local mean.
const ADAPTIVE_BLUR_SIGMA: f32 = 2.0;

/// Offset subtracted from the local mean before comparing a pixel.
const ADAPTIVE_OFFSET: i16 = 2;

/// Identifies one of the five fixed preprocessing renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Plain grayscale conversion of the source.
    Original,
    /// Gaussian blur followed by global Otsu binarization.
    OtsuThreshold,
    /// Per-pixel Gaussian-weighted local-mean binarization.
    AdaptiveThreshold,
    /// Morphological closing of the Otsu rendering, merging broken strokes.
    Morphological,
    /// 3x3 median filter over the grayscale, removing salt-and-pepper noise.
    Denoised,
}

impl VariantKind {
    /// All kinds in generation order.
    pub const ALL: [VariantKind; 5] = [
        VariantKind::Original,
        VariantKind::OtsuThreshold,
        VariantKind::AdaptiveThreshold,
        VariantKind::Morphological,
        VariantKind::Denoised,
    ];

    /// Stable name used in result payloads and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::Original => "original",
            VariantKind::OtsuThreshold => "otsu_threshold",
            VariantKind::AdaptiveThreshold => "adaptive_threshold",
            VariantKind::Morphological => "morphological",
            VariantKind::Denoised => "denoised",
        }
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One preprocessing outcome: a rendering and the recipe that produced it.
#[derive(Debug, Clone)]
pub struct ImageVariant {
    /// Which recipe produced this rendering.
    pub kind: VariantKind,
    /// The rendering itself. Owned; later stages never mutate it.
    pub image: GrayImage,
}

/// Produces the fixed, ordered set of renderings fed to recognition.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariantGenerator;

impl VariantGenerator {
    /// Creates a generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates exactly five variants, always in the same order:
    /// `original`, `otsu_threshold`, `adaptive_threshold`, `morphological`,
    /// `denoised`.
    ///
    /// Every variant is an independent buffer; the source is not modified.
    pub fn generate(&self, source: &DynamicImage) -> Vec<ImageVariant> {
        let gray = source.to_luma8();

        let blurred = gaussian_blur_f32(&gray, OTSU_BLUR_SIGMA);
        let otsu = threshold(&blurred, otsu_level(&blurred), ThresholdType::Binary);
        let adaptive = gaussian_adaptive_threshold(&gray, ADAPTIVE_BLUR_SIGMA, ADAPTIVE_OFFSET);
        let morphological = close_2x2(&otsu);
        let denoised = median_filter(&gray, 1, 1);

        debug!(
            width = gray.width(),
            height = gray.height(),
            "generated preprocessing variants"
        );

        vec![
            ImageVariant {
                kind: VariantKind::Original,
                image: gray,
            },
            ImageVariant {
                kind: VariantKind::OtsuThreshold,
                image: otsu,
            },
            ImageVariant {
                kind: VariantKind::AdaptiveThreshold,
                image: adaptive,
            },
            ImageVariant {
                kind: VariantKind::Morphological,
                image: morphological,
            },
            ImageVariant {
                kind: VariantKind::Denoised,
                image: denoised,
            },
        ]
    }
}

/// Binarizes with a per-pixel threshold of the Gaussian-weighted
/// neighborhood mean minus a fixed offset.
///
/// Robust to uneven illumination: each pixel competes against its local
/// surroundings instead of one global level.
fn gaussian_adaptive_threshold(gray: &GrayImage, sigma: f32, offset: i16) -> GrayImage {
    let local_mean = gaussian_blur_f32(gray, sigma);
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        let mean = i16::from(local_mean.get_pixel(x, y)[0]);
        let value = if i16::from(pixel[0]) > mean - offset {
            255
        } else {
            0
        };
        out.put_pixel(x, y, Luma([value]));
    }
    out
}

/// Morphological closing (dilation then erosion) with a 2x2 structuring
/// element, merging strokes the thresholding broke apart.
///
/// Implemented directly since radius-based morphology only offers odd-sized
/// elements. Borders replicate the nearest pixel.
fn close_2x2(binary: &GrayImage) -> GrayImage {
    erode_2x2(&dilate_2x2(binary))
}

fn dilate_2x2(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut value = 0u8;
            for dy in 0..2 {
                for dx in 0..2 {
                    let sx = x.saturating_sub(dx);
                    let sy = y.saturating_sub(dy);
                    value = value.max(image.get_pixel(sx, sy)[0]);
                }
            }
            out.put_pixel(x, y, Luma([value]));
        }
    }
    out
}

fn erode_2x2(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut value = 255u8;
            for dy in 0..2 {
                for dx in 0..2 {
                    let sx = (x + dx).min(width - 1);
                    let sy = (y + dy).min(height - 1);
                    value = value.min(image.get_pixel(sx, sy)[0]);
                }
            }
            out.put_pixel(x, y, Luma([value]));
        }
    }
    out
}
