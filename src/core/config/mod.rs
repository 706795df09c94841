//! Configuration management for the forensic pipelines.
//!
//! This module provides configuration types with serde support, defaults
//! matching the production service, and a validation trait the pipeline
//! builders run before constructing a runtime.

pub mod ela;
pub mod errors;
pub mod ocr;
pub mod parallel;

pub use ela::ElaConfig;
pub use errors::{ConfigError, ConfigValidator};
pub use ocr::{DEFAULT_CHAR_WHITELIST, OcrConfig};
pub use parallel::ParallelPolicy;
