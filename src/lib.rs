//! Forensic analysis of scanned document images.
//!
//! Two independent pipelines share this crate:
//!
//! - [`dococr`] extracts text from noisy, multi-script scans by generating
//!   five preprocessed renderings of the source image, recognizing each
//!   with an external engine, and selecting the best outcome by average
//!   confidence and word count.
//! - [`ela`] detects signs of digital tampering through Error Level
//!   Analysis: recompress, diff, amplify, then extract statistically
//!   significant regions via connected-component analysis.
//!
//! Both pipelines are pure functions of their inputs (plus the recognition
//! engine's behavior for OCR), hold no cross-request state, and produce
//! serializable results with `success`/`error` envelopes a thin transport
//! layer can forward unchanged.
//!
//! The text-recognition engine itself is not part of this crate: implement
//! [`core::RecognitionEngine`] over whatever engine a deployment uses and
//! hand it to [`dococr::DocOCRBuilder`].

pub mod core;
pub mod dococr;
pub mod ela;
pub mod processors;

pub use crate::core::{
    ElaConfig, ForensicsError, ForensicsResult, OcrConfig, ParallelPolicy, ProcessingStage,
    RecognitionEngine, RecognizedPage, RecognizedWord, WordBox,
};
pub use dococr::{DocOCR, DocOCRBuilder, DocOCRResponse, DocOCRResult};
pub use ela::{ElaAnalysis, ElaPipeline, ElaResponse, ElaStatistics, LabelingStrategy};
pub use processors::{ImageEnhancer, Region, TextNormalizer, TextRegionDetector, VariantKind};
