//! Result types for the multi-variant OCR pipeline.

use serde::{Deserialize, Serialize};

use crate::core::errors::ForensicsError;
use crate::core::traits::RecognizedWord;
use crate::processors::geometry::Region;
use crate::processors::variants::VariantKind;

/// Recognition outcome for a single preprocessing variant.
///
/// The two counts are deliberately defined over different populations:
/// `confidence` averages only per-word confidences strictly greater than
/// zero, while `word_count` counts every non-empty trimmed token regardless
/// of its confidence. Conflating them changes which variant wins selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantExtraction {
    /// Which rendering produced this outcome.
    pub method: VariantKind,
    /// Raw engine text, trimmed.
    pub text: String,
    /// Mean of per-word confidences strictly greater than zero, in
    /// [0, 100]. Zero when no word scored positive.
    pub confidence: f64,
    /// Number of non-empty word tokens, independent of confidence.
    pub word_count: usize,
    /// The engine's word-level output for this variant.
    pub words: Vec<RecognizedWord>,
}

/// Final output of the OCR pipeline for one document image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocOCRResult {
    /// Normalized text of the winning variant.
    pub text: String,
    /// The winning variant's average confidence.
    pub confidence: f64,
    /// Which preprocessing variant won selection.
    pub method: VariantKind,
    /// The winning variant's word count.
    pub word_count: usize,
    /// Candidate text-bearing regions on the page, largest first.
    pub text_regions: Vec<Region>,
    /// Word-level engine output backing the winning variant.
    pub raw_words: Vec<RecognizedWord>,
}

/// Wire-shaped envelope for the OCR pipeline.
///
/// Callers always receive a well-formed payload: successes carry the full
/// result with `success: true`, failures carry empty text, zero confidence
/// and the error message with `success: false`. A thin transport layer can
/// serialize this directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocOCRResponse {
    /// Normalized text, empty on failure.
    pub text: String,
    /// Winning confidence, zero on failure.
    pub confidence: f64,
    /// Winning variant, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<VariantKind>,
    /// Winning word count, zero on failure.
    #[serde(default)]
    pub word_count: usize,
    /// Candidate text regions, empty on failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_regions: Vec<Region>,
    /// Word-level engine output, empty on failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_words: Vec<RecognizedWord>,
    /// Human-readable failure message, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the pipeline produced a usable result.
    pub success: bool,
}

impl DocOCRResponse {
    /// Builds the envelope from a pipeline outcome.
    pub fn from_result(result: Result<DocOCRResult, ForensicsError>) -> Self {
        match result {
            Ok(result) => Self {
                text: result.text,
                confidence: result.confidence,
                method: Some(result.method),
                word_count: result.word_count,
                text_regions: result.text_regions,
                raw_words: result.raw_words,
                error: None,
                success: true,
            },
            Err(error) => Self {
                text: String::new(),
                confidence: 0.0,
                method: None,
                word_count: 0,
                text_regions: Vec::new(),
                raw_words: Vec::new(),
                error: Some(error.to_string()),
                success: false,
            },
        }
    }
}

impl From<Result<DocOCRResult, ForensicsError>> for DocOCRResponse {
    fn from(result: Result<DocOCRResult, ForensicsError>) -> Self {
        Self::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope_shape() {
        let response =
            DocOCRResponse::from_result(Err(ForensicsError::AllVariantsFailed { attempted: 5 }));

        assert!(!response.success);
        assert_eq!(response.text, "");
        assert_eq!(response.confidence, 0.0);
        assert!(response.method.is_none());

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["success"], false);
        assert_eq!(json["confidence"], 0.0);
        assert!(
            json["error"]
                .as_str()
                .expect("error message")
                .contains("all 5 variants")
        );
        assert!(json.get("method").is_none());
    }

    #[test]
    fn test_success_envelope_carries_method_name() {
        let result = DocOCRResult {
            text: "Government of India".to_string(),
            confidence: 82.5,
            method: VariantKind::AdaptiveThreshold,
            word_count: 3,
            text_regions: Vec::new(),
            raw_words: Vec::new(),
        };
        let json =
            serde_json::to_value(DocOCRResponse::from_result(Ok(result))).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["method"], "adaptive_threshold");
        assert_eq!(json["word_count"], 3);
    }
}
