//! The ELA pipeline runtime.

use image::DynamicImage;
use tracing::debug;

use crate::core::config::{ConfigValidator, ElaConfig};
use crate::core::errors::ForensicsResult;

use super::analyzer::ElaAnalyzer;
use super::result::ElaAnalysis;
use super::statistics::ElaStatistics;
use super::tamper::{LabelingStrategy, TamperRegionDetector};

/// The ELA forgery-detection pipeline.
///
/// Stateless across requests: residual construction, statistics, and region
/// extraction are pure functions of the two input images, so one instance
/// can serve many threads.
#[derive(Debug, Clone, Copy)]
pub struct ElaPipeline {
    analyzer: ElaAnalyzer,
    detector: TamperRegionDetector,
}

impl ElaPipeline {
    /// Validates the configuration and builds the pipeline with the default
    /// (connected-components) region strategy.
    pub fn new(config: ElaConfig) -> ForensicsResult<Self> {
        config.validate()?;
        Ok(Self {
            analyzer: ElaAnalyzer::new(config.quality),
            detector: TamperRegionDetector::new(config.tamper_threshold, config.min_region_pixels),
        })
    }

    /// Selects the tamper-region grouping strategy. Fixed for the lifetime
    /// of the pipeline.
    pub fn with_strategy(mut self, strategy: LabelingStrategy) -> Self {
        self.detector = self.detector.with_strategy(strategy);
        self
    }

    /// Analyzes a reference/candidate pair.
    ///
    /// The residual is built against the reference's dimensions (the
    /// candidate is resampled when they differ), statistics run over every
    /// residual sample, and tamper regions are extracted from the residual's
    /// intensity channel.
    pub fn analyze(
        &self,
        reference: &DynamicImage,
        candidate: &DynamicImage,
    ) -> ForensicsResult<ElaAnalysis> {
        let residual = self.analyzer.residual(reference, candidate)?;
        let statistics = ElaStatistics::compute(&residual.image);
        let tampering_regions = self.detector.detect(&residual.image);

        debug!(
            scale = residual.scale,
            mean = statistics.mean,
            peaks = statistics.peaks.len(),
            regions = tampering_regions.len(),
            "ela analysis complete"
        );

        Ok(ElaAnalysis {
            residual_jpeg: residual.jpeg,
            scale: residual.scale,
            statistics,
            tampering_regions,
        })
    }

    /// Analyzes a pair supplied as encoded byte buffers.
    ///
    /// Either buffer failing to decode aborts the request with an
    /// image-load error.
    pub fn analyze_bytes(&self, reference: &[u8], candidate: &[u8]) -> ForensicsResult<ElaAnalysis> {
        let reference = image::load_from_memory(reference)?;
        let candidate = image::load_from_memory(candidate)?;
        self.analyze(&reference, &candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn pipeline() -> ElaPipeline {
        ElaPipeline::new(ElaConfig::default()).expect("default config is valid")
    }

    /// Creates a solid-gray test image with specified dimensions.
    fn gray_image(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([value; 3])))
    }

    #[test]
    fn test_identical_images_yield_silent_analysis() {
        let image = gray_image(100, 100, 128);
        let analysis = pipeline().analyze(&image, &image).expect("analysis");

        assert_eq!(analysis.scale, 1.0);
        assert_eq!(analysis.statistics.mean, 0.0);
        assert_eq!(analysis.statistics.std, 0.0);
        assert!(analysis.statistics.peaks.is_empty());
        assert!(analysis.tampering_regions.is_empty());
        assert_eq!(analysis.statistics.sample_count(), 100 * 100 * 3);
    }

    #[test]
    fn test_altered_block_is_localized() {
        let reference = gray_image(100, 100, 128);
        let mut tampered = reference.to_rgb8();
        for y in 25..75 {
            for x in 25..75 {
                tampered.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let candidate = DynamicImage::ImageRgb8(tampered);

        let analysis = pipeline().analyze(&reference, &candidate).expect("analysis");

        assert!(analysis.statistics.max > 200);
        assert!(!analysis.tampering_regions.is_empty());

        // The dominant region approximates the altered 50x50 block; JPEG
        // ringing may spread it by a few pixels.
        let region = analysis
            .tampering_regions
            .iter()
            .max_by_key(|r| r.area)
            .expect("at least one region");
        assert!(region.area >= 100);
        assert!(region.x >= 17 && region.x <= 33, "x = {}", region.x);
        assert!(region.y >= 17 && region.y <= 33, "y = {}", region.y);
        assert!(region.right() >= 67 && region.right() <= 82);
        assert!(region.bottom() >= 67 && region.bottom() <= 82);
    }

    #[test]
    fn test_dimension_mismatch_resamples_to_reference() {
        let reference = gray_image(120, 80, 90);
        let candidate = gray_image(60, 40, 90);

        let analysis = pipeline().analyze(&reference, &candidate).expect("analysis");
        assert_eq!(analysis.statistics.sample_count(), 120 * 80 * 3);
    }

    #[test]
    fn test_analyze_bytes_rejects_garbage() {
        let good = {
            let mut bytes = Vec::new();
            gray_image(10, 10, 50)
                .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
                .expect("encode");
            bytes
        };

        let result = pipeline().analyze_bytes(&good, b"not an image");
        assert!(result.is_err());
    }

    #[test]
    fn test_coarse_strategy_is_sticky() {
        let pipeline = pipeline().with_strategy(LabelingStrategy::CoarseBoundingBox);
        let reference = gray_image(100, 100, 128);

        let mut tampered = reference.to_rgb8();
        for y in 10..40 {
            for x in 10..40 {
                tampered.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let analysis = pipeline
            .analyze(&reference, &DynamicImage::ImageRgb8(tampered))
            .expect("analysis");
        assert_eq!(analysis.tampering_regions.len(), 1);
    }
}
