//! Configuration for the multi-variant OCR pipeline.

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigValidator};

/// Characters the recognition engine is allowed to emit.
///
/// Scanned identity and billing documents carry alphanumerics plus a small
/// set of separators; restricting the engine to these cuts down on
/// punctuation hallucinations in low-contrast scans.
pub const DEFAULT_CHAR_WHITELIST: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 .,:-/()";

/// Configuration handed to the recognition engine for every variant call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Languages requested from the engine, in preference order.
    ///
    /// The default pairs a Latin-script and a Devanagari-script model so
    /// bilingual documents recognize both scripts in a single pass.
    #[serde(default = "OcrConfig::default_languages")]
    pub languages: Vec<String>,

    /// Characters the engine may emit; everything else is suppressed.
    #[serde(default = "OcrConfig::default_char_whitelist")]
    pub char_whitelist: String,

    /// Scan resolution hint passed to the engine.
    #[serde(default = "OcrConfig::default_dpi")]
    pub dpi: u32,
}

impl OcrConfig {
    fn default_languages() -> Vec<String> {
        vec!["eng".to_string(), "hin".to_string()]
    }

    fn default_char_whitelist() -> String {
        DEFAULT_CHAR_WHITELIST.to_string()
    }

    fn default_dpi() -> u32 {
        300
    }

    /// Returns a copy of this configuration with a different language set.
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: Self::default_languages(),
            char_whitelist: Self::default_char_whitelist(),
            dpi: Self::default_dpi(),
        }
    }
}

impl ConfigValidator for OcrConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::MissingField { field: "languages" });
        }
        if self.languages.iter().any(|l| l.trim().is_empty()) {
            return Err(ConfigError::invalid_value(
                "languages",
                "language identifiers must be non-empty",
            ));
        }
        if self.dpi == 0 {
            return Err(ConfigError::invalid_value("dpi", "must be positive"));
        }
        Ok(())
    }
}
