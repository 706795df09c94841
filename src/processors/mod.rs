//! Image and text processors shared by the forensic pipelines.
//!
//! Everything here is a pure function of its input buffers: each processor
//! allocates its own output and never mutates what it was given, so stages
//! compose safely across concurrent requests.

pub mod enhancement;
pub mod geometry;
pub mod normalization;
pub mod regions;
pub mod variants;

pub use enhancement::ImageEnhancer;
pub use geometry::Region;
pub use normalization::TextNormalizer;
pub use regions::TextRegionDetector;
pub use variants::{ImageVariant, VariantGenerator, VariantKind};
