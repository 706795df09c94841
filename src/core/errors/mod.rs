//! Error handling for the forensic pipelines.
//!
//! All fallible operations in this crate return [`ForensicsResult`]; the
//! [`ForensicsError`] enum distinguishes fatal failures (image load,
//! all-variants-failed) from recoverable ones (a single variant's
//! recognition call), and [`ProcessingStage`] records where in a pipeline a
//! failure happened.

mod types;

pub use types::{ForensicsError, ForensicsResult, ProcessingStage};
