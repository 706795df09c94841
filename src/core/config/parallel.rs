//! Shared parallel processing configuration.

use serde::{Deserialize, Serialize};

/// Controls how the OCR pipeline fans recognition calls out over variants.
///
/// Recognition is CPU-bound and each variant holds a full-resolution buffer,
/// so parallelism is bounded rather than unconditional: small variant sets
/// run sequentially, and the global worker pool can be capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Maximum number of threads for the global rayon pool.
    /// If None, rayon's default pool size (number of CPU cores) is used.
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Variant counts at or below this run sequentially.
    ///
    /// The default of 4 means the standard five-variant set fans out while
    /// anything smaller is not worth the scheduling overhead.
    #[serde(default = "ParallelPolicy::default_sequential_threshold")]
    pub sequential_threshold: usize,
}

impl ParallelPolicy {
    /// Creates a policy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of worker threads.
    pub fn with_max_threads(mut self, max_threads: Option<usize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Sets the sequential-execution threshold.
    pub fn with_sequential_threshold(mut self, threshold: usize) -> Self {
        self.sequential_threshold = threshold;
        self
    }

    /// Installs the global rayon thread pool with the configured size.
    ///
    /// Call once at application startup, before any pipeline invocation.
    /// Returns `Ok(false)` when `max_threads` is None (nothing to do) and an
    /// error if the pool was already initialized.
    pub fn install_global_thread_pool(&self) -> Result<bool, rayon::ThreadPoolBuildError> {
        match self.max_threads {
            Some(num_threads) => {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build_global()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn default_sequential_threshold() -> usize {
        4
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            max_threads: None,
            sequential_threshold: Self::default_sequential_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fans_out_five_variants() {
        let policy = ParallelPolicy::default();
        assert!(5 > policy.sequential_threshold);
        assert!(policy.max_threads.is_none());
    }

    #[test]
    fn test_builder_style_setters() {
        let policy = ParallelPolicy::new()
            .with_max_threads(Some(2))
            .with_sequential_threshold(8);
        assert_eq!(policy.max_threads, Some(2));
        assert_eq!(policy.sequential_threshold, 8);
    }
}
