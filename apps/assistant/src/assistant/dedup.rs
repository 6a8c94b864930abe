//! Content Deduplication.
//!
//! Prevents showing the same informational paragraph twice in one session.
//! Pure comparison over the session's shown-content set; the caller inserts
//! into the set after deciding to actually emit, so speculative checks are
//! safe.

use std::collections::HashSet;

/// Two blocks whose word-overlap ratio exceeds this are duplicates.
const OVERLAP_THRESHOLD: f32 = 0.7;

/// Normalize a content block for comparison: lowercase, punctuation stripped,
/// whitespace collapsed.
pub fn normalize_block(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word-overlap ratio between two normalized blocks:
/// shared unique words / the smaller unique word count.
pub fn word_overlap(a: &str, b: &str) -> f32 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let shared = words_a.intersection(&words_b).count();
    shared as f32 / words_a.len().min(words_b.len()) as f32
}

/// Has an equivalent of `candidate` already been shown?
///
/// True when the normalized form exactly matches a shown entry, or its
/// word-overlap ratio against any entry exceeds 0.7. Entries in `shown` are
/// expected to already be normalized.
pub fn is_duplicate(candidate: &str, shown: &HashSet<String>) -> bool {
    let normalized = normalize_block(candidate);
    if normalized.is_empty() {
        return false;
    }
    if shown.contains(&normalized) {
        return true;
    }
    shown
        .iter()
        .any(|entry| word_overlap(&normalized, entry) > OVERLAP_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(entries: &[&str]) -> HashSet<String> {
        entries.iter().map(|e| normalize_block(e)).collect()
    }

    #[test]
    fn test_normalize_block() {
        assert_eq!(
            normalize_block("  Dr. Ali's   clinic, in Austin!  "),
            "dr ali s clinic in austin"
        );
    }

    #[test]
    fn test_exact_match_is_duplicate() {
        let set = shown(&["He treats POTS and dysautonomia."]);
        assert!(is_duplicate("he treats pots and dysautonomia", &set));
    }

    #[test]
    fn test_high_overlap_is_duplicate() {
        let set = shown(&["Dr. Ali treats POTS dysautonomia and related autonomic disorders"]);
        // Same words, one dropped: overlap well above 0.7
        assert!(is_duplicate(
            "Dr. Ali treats POTS dysautonomia and related disorders",
            &set
        ));
    }

    #[test]
    fn test_low_overlap_is_not_duplicate() {
        let set = shown(&["His research focuses on autonomic nervous system disorders"]);
        assert!(!is_duplicate(
            "The clinic offers telehealth appointments every weekday morning",
            &set
        ));
    }

    #[test]
    fn test_empty_candidate_is_not_duplicate() {
        let set = shown(&["anything at all"]);
        assert!(!is_duplicate("", &set));
        assert!(!is_duplicate("?!.,", &set));
    }

    #[test]
    fn test_overlap_ratio_uses_smaller_set() {
        // 3 of the 4 words in the smaller block appear in the larger one
        let overlap = word_overlap(
            "pots treatment exercise protocol",
            "pots treatment exercise hydration compression salt intake",
        );
        assert!((overlap - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_check_is_side_effect_free() {
        let set = shown(&["block one"]);
        let before = set.len();
        let _ = is_duplicate("a totally different block", &set);
        assert_eq!(set.len(), before);
    }
}
