//! Error Level Analysis forgery detection.
//!
//! Recompressing an image and diffing it against a reference exposes
//! regions whose compression history differs from the rest of the image,
//! which is often the footprint of a localized edit. This module builds the
//! amplified residual, summarizes its distribution, and extracts suspected
//! tampering regions.
//!
//! # Main APIs
//!
//! - [`ElaPipeline`] - full analysis of a reference/candidate pair
//! - [`ElaAnalyzer`] - residual construction alone
//! - [`TamperRegionDetector`] - region extraction from a residual
//! - [`ElaResponse`] - wire-shaped success/failure envelope

pub mod analyzer;
pub mod pipeline;
pub mod result;
pub mod statistics;
pub mod tamper;

pub use analyzer::{ElaAnalyzer, ElaResidual};
pub use pipeline::ElaPipeline;
pub use result::{ElaAnalysis, ElaResponse};
pub use statistics::{ElaStatistics, HISTOGRAM_BINS};
pub use tamper::{LabelingStrategy, TamperRegionDetector};
