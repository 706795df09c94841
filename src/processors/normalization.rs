//! Text cleanup for recognized document text.

/// Ordered literal corrections for common engine misreadings of domain
/// terms on Indian identity and billing documents.
///
/// Entries apply in declaration order and each one runs against the
/// already-substituted text. The table is non-overlapping: no replacement
/// output re-triggers a later entry, which keeps normalization idempotent.
const CORRECTIONS: &[(&str, &str)] = &[
    ("Govemment", "Government"),
    ("lndia", "India"),
    ("Aadhar", "Aadhaar"),
    ("Adhaar", "Aadhaar"),
];

/// Applies the fixed correction table and canonicalizes whitespace.
///
/// All runs of whitespace (spaces, tabs, newlines) collapse to single
/// spaces and the result is trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Creates a normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalizes one block of recognized text.
    ///
    /// Empty input stays empty.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut corrected = text.to_string();
        for (wrong, correct) in CORRECTIONS {
            if corrected.contains(wrong) {
                corrected = corrected.replace(wrong, correct);
            }
        }

        corrected.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrects_common_misreadings() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize("Govemment lndia Adhaar"),
            "Government India Aadhaar"
        );
    }

    #[test]
    fn test_collapses_whitespace_and_trims() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize("  Name:\tRavi\n\nKumar  "),
            "Name: Ravi Kumar"
        );
    }

    #[test]
    fn test_is_idempotent() {
        let normalizer = TextNormalizer::new();
        let once = normalizer.normalize("Govemment of lndia  issued Aadhar \n card");
        let twice = normalizer.normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_earlier_substitution_does_not_retrigger_later_entry() {
        // "Aadhar" becomes "Aadhaar"; the "Adhaar" rule must not touch it.
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("Aadhar"), "Aadhaar");
        assert_eq!(normalizer.normalize("Aadhaar"), "Aadhaar");
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(TextNormalizer::new().normalize(""), "");
    }
}
