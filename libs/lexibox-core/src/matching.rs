//! Answer grading for typed exercises.

use serde::{Deserialize, Serialize};

/// Result of grading a typed answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized expected answer (for display).
    pub expected_normalized: String,
}

/// Compare a typed word against the expected spelling. Case and
/// surrounding/duplicate whitespace are ignored.
pub fn compare_spelling(typed: &str, expected: &str) -> MatchResult {
    let typed_normalized = normalize(typed);
    let expected_normalized = normalize(expected);
    MatchResult {
        is_correct: typed_normalized == expected_normalized,
        typed_normalized,
        expected_normalized,
    }
}

/// Compare a reconstructed word or phrase against the expected text.
/// Beyond spelling normalization, terminal punctuation and interior spaces
/// are ignored: token order matters, spacing and punctuation do not.
pub fn compare_assembly(typed: &str, expected: &str) -> MatchResult {
    let typed_normalized = normalize_assembly(typed);
    let expected_normalized = normalize_assembly(expected);
    MatchResult {
        is_correct: typed_normalized == expected_normalized,
        typed_normalized,
        expected_normalized,
    }
}

/// Trim, collapse whitespace runs and lowercase.
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn normalize_assembly(s: &str) -> String {
    normalize(s)
        .trim_end_matches(['.', '!', '?', ',', ';'])
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spelling_ignores_case_and_whitespace() {
        assert!(compare_spelling("  Hello   World ", "hello world").is_correct);
        assert!(compare_spelling("HELLO", "hello").is_correct);
    }

    #[test]
    fn spelling_rejects_different_words() {
        let result = compare_spelling("helo", "hello");
        assert!(!result.is_correct);
        assert_eq!(result.typed_normalized, "helo");
        assert_eq!(result.expected_normalized, "hello");
    }

    #[test]
    fn assembly_ignores_spacing_and_terminal_punctuation() {
        assert!(compare_assembly("the red dog", "The red dog.").is_correct);
        assert!(compare_assembly("thereddog", "the red dog").is_correct);
        assert!(compare_assembly("to eat!", "to eat").is_correct);
    }

    #[test]
    fn assembly_keeps_token_order_significant() {
        assert!(!compare_assembly("red the dog", "the red dog").is_correct);
    }

    #[test]
    fn assembly_keeps_interior_punctuation() {
        assert!(!compare_assembly("dont", "don't").is_correct);
    }

    #[test]
    fn empty_answers_only_match_empty() {
        assert!(compare_spelling("", "").is_correct);
        assert!(!compare_spelling("", "hello").is_correct);
    }
}
