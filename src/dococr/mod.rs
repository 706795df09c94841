//! The multi-variant OCR pipeline.
//!
//! This module provides the high-level API for extracting text from scanned
//! document images: generate five preprocessing variants, recognize each
//! with the configured engine, select the best outcome by (confidence, word
//! count), normalize its text, and report candidate text regions.
//!
//! # Main APIs
//!
//! - [`DocOCRBuilder`] - configures and constructs the pipeline runtime
//! - [`DocOCR`] - processes document images
//! - [`DocOCRResponse`] - wire-shaped success/failure envelope

pub mod pipeline;
pub mod result;

pub use pipeline::{DocOCR, DocOCRBuilder};
pub use result::{DocOCRResponse, DocOCRResult, VariantExtraction};
