//! Approximate string matching for typo tolerance.
//!
//! Normalized edit-distance scoring via `strsim`, with a configurable
//! threshold. Used only after exact alias lookup misses.

/// Default similarity threshold.
///
/// Calibrated so a single transposed or substituted character in a
/// 4–10 character word still matches, while unrelated short words do
/// not. Tunable per matcher, never hard-coded at call sites.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.75;

/// A candidate that cleared the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch<'a> {
    pub candidate: &'a str,
    pub score: f64,
}

/// Edit-distance-based similarity scorer.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    /// Matcher at the default threshold.
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    /// Matcher with a custom threshold in [0, 1].
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Similarity ratio between two strings, in [0, 1].
    pub fn ratio(a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }

    /// Highest-scoring candidate at or above the threshold.
    ///
    /// Tie-break: the first candidate in iteration order wins at equal
    /// score, so results are deterministic for a stable candidate order.
    pub fn best_match<'a>(
        &self,
        text: &str,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Option<FuzzyMatch<'a>> {
        let mut best: Option<FuzzyMatch<'a>> = None;

        for candidate in candidates {
            let score = Self::ratio(text, candidate);
            if score < self.threshold {
                continue;
            }
            let beats = best.as_ref().map(|b| score > b.score).unwrap_or(true);
            if beats {
                best = Some(FuzzyMatch { candidate, score });
            }
        }

        best
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_scores_one() {
        assert!((FuzzyMatcher::ratio("richmond", "richmond") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_typo_clears_default_threshold() {
        let matcher = FuzzyMatcher::new();
        let m = matcher
            .best_match("richmnd", ["richmond", "geelong", "carlton"])
            .expect("one dropped letter should still match");
        assert_eq!(m.candidate, "richmond");
        assert!(m.score >= DEFAULT_FUZZY_THRESHOLD);
    }

    #[test]
    fn test_unrelated_words_do_not_match() {
        let matcher = FuzzyMatcher::new();
        assert!(matcher.best_match("zebra", ["richmond", "geelong"]).is_none());
    }

    #[test]
    fn test_tie_break_prefers_first_candidate() {
        // Both candidates are one substitution from the input
        let matcher = FuzzyMatcher::with_threshold(0.5);
        let m = matcher.best_match("cart", ["cars", "carp"]).unwrap();
        assert_eq!(m.candidate, "cars");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // "abcd" vs "abce": distance 1 over length 4 -> 0.75 exactly
        let matcher = FuzzyMatcher::new();
        let m = matcher.best_match("abcd", ["abce"]).unwrap();
        assert!((m.score - 0.75).abs() < 1e-9);
    }
}
