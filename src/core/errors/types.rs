//! Core error types for the forensic pipelines.
//!
//! This module defines the fundamental error types used throughout the
//! document-forensics system, including the main ForensicsError enum and the
//! ProcessingStage enum that gives failures their pipeline context.

use thiserror::Error;

/// Enum representing different stages of processing in the forensic pipelines.
///
/// This enum is used to identify which stage an error occurred in, providing
/// context for debugging and error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Error occurred while generating preprocessing variants.
    VariantGeneration,
    /// Error occurred during a recognition-engine call.
    Recognition,
    /// Error occurred during text normalization.
    Normalization,
    /// Error occurred during text-region detection.
    RegionDetection,
    /// Error occurred while differencing two images.
    Differencing,
    /// Error occurred while computing residual statistics.
    Statistics,
    /// Error occurred while extracting tamper regions.
    TamperDetection,
    /// Error occurred while encoding or decoding image bytes.
    Encoding,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::VariantGeneration => write!(f, "variant generation"),
            ProcessingStage::Recognition => write!(f, "recognition"),
            ProcessingStage::Normalization => write!(f, "text normalization"),
            ProcessingStage::RegionDetection => write!(f, "region detection"),
            ProcessingStage::Differencing => write!(f, "image differencing"),
            ProcessingStage::Statistics => write!(f, "residual statistics"),
            ProcessingStage::TamperDetection => write!(f, "tamper detection"),
            ProcessingStage::Encoding => write!(f, "image encoding"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur in the forensic pipelines.
///
/// Fatal errors abort the request that produced them; the response envelopes
/// in the pipeline modules convert them into structured failure payloads so
/// callers always receive a well-formed response.
#[derive(Error, Debug)]
pub enum ForensicsError {
    /// Error occurred while loading or decoding an image.
    ///
    /// Fatal: without a decoded source image neither pipeline can proceed.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A recognition-engine call failed for one preprocessing variant.
    ///
    /// Recoverable: the pipeline skips the variant and continues with the
    /// remaining ones.
    #[error("recognition failed on variant '{variant}': {context}")]
    Recognition {
        /// The variant whose engine call failed.
        variant: String,
        /// Additional context about the failure.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Every preprocessing variant's recognition call failed.
    #[error("recognition failed on all {attempted} variants")]
    AllVariantsFailed {
        /// How many variants were attempted.
        attempted: usize,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Convenient result alias used throughout the crate.
pub type ForensicsResult<T> = Result<T, ForensicsError>;

impl From<image::ImageError> for ForensicsError {
    /// Converts an image::ImageError to ForensicsError::ImageLoad.
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl ForensicsError {
    /// Wraps an error that occurred in a specific processing stage.
    pub fn processing(
        kind: ProcessingStage,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Wraps an engine failure for a single preprocessing variant.
    pub fn recognition(
        variant: impl Into<String>,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Recognition {
            variant: variant.into(),
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates an invalid-input error from a message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
