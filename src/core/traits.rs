//! Interfaces for external text-recognition engines.
//!
//! The forensic pipelines never talk to a concrete OCR implementation
//! directly. They consume the narrow [`RecognitionEngine`] contract, which
//! keeps the pipelines independently testable with deterministic fakes and
//! lets deployments swap engines without touching pipeline logic.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::core::config::OcrConfig;
use crate::core::errors::ForensicsResult;

/// Axis-aligned box of a single recognized word, in image pixel coordinates
/// with the origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBox {
    /// Left edge of the word.
    pub x: u32,
    /// Top edge of the word.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// One recognized word with its engine confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    /// The recognized token. May be empty or whitespace for layout markers
    /// some engines emit.
    pub text: String,
    /// Engine confidence in 0..=100. Engines report a non-positive sentinel
    /// (commonly -1) for tokens they could not score.
    pub confidence: i32,
    /// Where the word sits in the input image.
    pub bounding_box: WordBox,
}

/// Full-page output of one recognition call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedPage {
    /// The page text as the engine assembled it, reading order preserved.
    pub text: String,
    /// Word-level tokens with confidences and boxes.
    pub words: Vec<RecognizedWord>,
}

/// A text-recognition engine.
///
/// Implementations receive one preprocessed grayscale rendering per call and
/// the configuration (languages, character whitelist, DPI hint) to apply.
/// Calls are independent and may run concurrently, hence the `Send + Sync`
/// bounds. A failed call affects only the variant that made it.
pub trait RecognitionEngine: Send + Sync + std::fmt::Debug {
    /// Runs recognition over a single rendering.
    fn recognize(&self, image: &GrayImage, config: &OcrConfig) -> ForensicsResult<RecognizedPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_page_serializes_words() {
        let page = RecognizedPage {
            text: "Invoice".to_string(),
            words: vec![RecognizedWord {
                text: "Invoice".to_string(),
                confidence: 87,
                bounding_box: WordBox {
                    x: 4,
                    y: 10,
                    width: 60,
                    height: 14,
                },
            }],
        };
        let json = serde_json::to_value(&page).expect("serialize");
        assert_eq!(json["words"][0]["confidence"], 87);
        assert_eq!(json["words"][0]["bounding_box"]["width"], 60);
    }
}
