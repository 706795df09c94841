//! The multi-variant OCR pipeline runtime and its builder.
//!
//! [`DocOCR`] runs one document image through five preprocessing variants,
//! recognizes each with the configured engine, picks the winner under the
//! (confidence, word count) policy, normalizes its text, and attaches
//! independently detected text regions.

use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::core::config::{ConfigValidator, OcrConfig, ParallelPolicy};
use crate::core::errors::{ForensicsError, ForensicsResult};
use crate::core::traits::{RecognitionEngine, RecognizedPage};
use crate::processors::normalization::TextNormalizer;
use crate::processors::regions::TextRegionDetector;
use crate::processors::variants::{ImageVariant, VariantGenerator, VariantKind};

use super::result::{DocOCRResult, VariantExtraction};

/// Builder for the OCR pipeline runtime.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use doc_forensics::core::{OcrConfig, RecognitionEngine};
/// use doc_forensics::dococr::DocOCRBuilder;
///
/// fn build(engine: Arc<dyn RecognitionEngine>) {
///     let ocr = DocOCRBuilder::new(engine)
///         .ocr_config(OcrConfig::default())
///         .build()
///         .expect("valid configuration");
///     let _response = ocr.process_path("scans/invoice.png");
/// }
/// ```
#[derive(Debug)]
pub struct DocOCRBuilder {
    engine: Arc<dyn RecognitionEngine>,
    config: Option<OcrConfig>,
    parallel_policy: Option<ParallelPolicy>,
}

impl DocOCRBuilder {
    /// Creates a builder around a recognition engine.
    pub fn new(engine: Arc<dyn RecognitionEngine>) -> Self {
        Self {
            engine,
            config: None,
            parallel_policy: None,
        }
    }

    /// Sets the engine configuration (languages, whitelist, DPI).
    pub fn ocr_config(mut self, config: OcrConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the policy governing per-variant recognition fan-out.
    pub fn parallel_policy(mut self, policy: ParallelPolicy) -> Self {
        self.parallel_policy = Some(policy);
        self
    }

    /// Validates the configuration and builds the runtime.
    pub fn build(self) -> ForensicsResult<DocOCR> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(DocOCR {
            engine: self.engine,
            config,
            parallel_policy: self.parallel_policy.unwrap_or_default(),
            generator: VariantGenerator::new(),
            normalizer: TextNormalizer::new(),
            region_detector: TextRegionDetector::new(),
        })
    }
}

/// The OCR pipeline runtime.
///
/// Stateless across requests: every call recomputes from its input image
/// and shares nothing with concurrent calls, so one instance can serve many
/// threads.
#[derive(Debug)]
pub struct DocOCR {
    engine: Arc<dyn RecognitionEngine>,
    config: OcrConfig,
    parallel_policy: ParallelPolicy,
    generator: VariantGenerator,
    normalizer: TextNormalizer,
    region_detector: TextRegionDetector,
}

impl DocOCR {
    /// Processes a document image read from disk.
    ///
    /// An unreadable or undecodable file fails the whole request with an
    /// image-load error.
    pub fn process_path(&self, path: impl AsRef<Path>) -> ForensicsResult<DocOCRResult> {
        let image = image::open(path.as_ref())?;
        self.process(&image)
    }

    /// Processes a document image from an in-memory encoded buffer.
    pub fn process_bytes(&self, bytes: &[u8]) -> ForensicsResult<DocOCRResult> {
        let image = image::load_from_memory(bytes)?;
        self.process(&image)
    }

    /// Processes an already-decoded document image with the configured
    /// language set.
    pub fn process(&self, image: &DynamicImage) -> ForensicsResult<DocOCRResult> {
        self.process_with_config(image, &self.config)
    }

    /// Processes a document image with a per-request configuration, e.g. a
    /// language-set override.
    pub fn process_with_config(
        &self,
        image: &DynamicImage,
        config: &OcrConfig,
    ) -> ForensicsResult<DocOCRResult> {
        let variants = self.generator.generate(image);
        let attempted = variants.len();

        let extractions = self.extract_all(&variants, config);
        if extractions.is_empty() {
            return Err(ForensicsError::AllVariantsFailed { attempted });
        }

        let best = select_best(&extractions);
        debug!(
            method = %best.method,
            confidence = best.confidence,
            word_count = best.word_count,
            "selected preprocessing variant"
        );

        let text = self.normalizer.normalize(&best.text);
        let text_regions = self.region_detector.detect(&image.to_luma8());

        Ok(DocOCRResult {
            text,
            confidence: best.confidence,
            method: best.method,
            word_count: best.word_count,
            text_regions,
            raw_words: best.words.clone(),
        })
    }

    /// Runs recognition over every variant, skipping the ones whose engine
    /// call fails.
    ///
    /// Output order follows generation order in both the sequential and the
    /// parallel path, which the selection tie-break relies on.
    fn extract_all(&self, variants: &[ImageVariant], config: &OcrConfig) -> Vec<VariantExtraction> {
        let run = |variant: &ImageVariant| -> Option<VariantExtraction> {
            match self.engine.recognize(&variant.image, config) {
                Ok(page) => Some(summarize(variant.kind, page)),
                Err(error) => {
                    warn!(variant = %variant.kind, %error, "recognition failed, skipping variant");
                    None
                }
            }
        };

        if variants.len() > self.parallel_policy.sequential_threshold {
            variants.par_iter().filter_map(run).collect()
        } else {
            variants.iter().filter_map(run).collect()
        }
    }
}

/// Aggregates one engine page into the variant's scoring summary.
fn summarize(kind: VariantKind, page: RecognizedPage) -> VariantExtraction {
    let positive: Vec<i32> = page
        .words
        .iter()
        .map(|word| word.confidence)
        .filter(|confidence| *confidence > 0)
        .collect();
    let confidence = if positive.is_empty() {
        0.0
    } else {
        f64::from(positive.iter().sum::<i32>()) / positive.len() as f64
    };

    let word_count = page
        .words
        .iter()
        .filter(|word| !word.text.trim().is_empty())
        .count();

    VariantExtraction {
        method: kind,
        text: page.text.trim().to_string(),
        confidence,
        word_count,
        words: page.words,
    }
}

/// Stable maximization over (confidence, word count).
///
/// Confidence compares first, word count breaks ties, and any remaining tie
/// keeps the earlier variant in generation order. A plain `max_by` would
/// keep the last maximum instead.
fn select_best(extractions: &[VariantExtraction]) -> &VariantExtraction {
    let mut best = &extractions[0];
    for candidate in &extractions[1..] {
        let better = candidate.confidence > best.confidence
            || (candidate.confidence == best.confidence && candidate.word_count > best.word_count);
        if better {
            best = candidate;
        }
    }
    best
}
