//! Special-Case Detectors.
//!
//! Short-circuit classifiers consulted before generic intent scoring, for
//! interaction patterns that need a different handling strategy than
//! informational lookup. Each detector is a pure predicate over the
//! normalized utterance; evaluation order is fixed.

use regex::Regex;
use std::sync::LazyLock;

use super::intent::Intent;
use super::patterns;
use super::suggestions;

/// Utterances shorter than this, with no subject reference and no question
/// template, default to off-topic.
const SHORT_UTTERANCE_CHARS: usize = 15;
/// A greeting longer than this is treated as a content question instead.
const GREETING_MAX_CHARS: usize = 30;
/// Minimum length before a first-person narrative counts as overly complex.
const NARRATIVE_MIN_CHARS: usize = 120;

static HELP_SEEKING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(what\s+should\s+i\s+do|can\s+(you|anyone)\s+help|any\s+advice|help\s+me)\b")
        .expect("Invalid regex: help seeking pattern")
});

static CONDITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = patterns::CONDITION_TERMS
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("Invalid regex: condition pattern")
});

/// Interaction pattern that bypasses generic classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCase {
    /// Exact match against the curated table of suggestible questions.
    SuggestedQuestion(Intent),
    /// Casual greeting.
    Greeting,
    /// Not about the subject at all.
    OffTopic,
    /// Long personalized medical narrative; a canned answer would be unsafe.
    ComplexNarrative,
    /// A named condition plus a treatment verb.
    SpecificClinical { condition: String },
    /// Personal or biographical question outside the knowledge scope.
    PersonalUnanswerable,
}

/// Lightweight text metrics backing the complex-narrative decision.
#[derive(Debug, Clone)]
pub struct NarrativeMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub first_person_count: usize,
    pub symptom_count: usize,
}

/// Compute narrative metrics over normalized text.
pub fn narrative_metrics(text: &str) -> NarrativeMetrics {
    let word_count = text.split_whitespace().count();

    // Approximation based on terminal punctuation; at least 1 for any text
    let sentence_count = text
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?' | '\n'))
        .count()
        .max(usize::from(!text.is_empty()));

    let first_person_count = patterns::FIRST_PERSON_PATTERN.find_iter(text).count();
    let symptom_count = patterns::SYMPTOM_TERMS
        .iter()
        .filter(|term| text.contains(**term))
        .count();

    NarrativeMetrics {
        word_count,
        sentence_count,
        first_person_count,
        symptom_count,
    }
}

/// Named conditions mentioned in the text, in catalog order.
pub fn extract_conditions(text: &str) -> Vec<String> {
    patterns::CONDITION_TERMS
        .iter()
        .filter(|term| {
            CONDITION_PATTERN
                .find_iter(text)
                .any(|m| m.as_str().eq_ignore_ascii_case(term))
        })
        .map(|term| term.to_string())
        .collect()
}

/// Run the detector pipeline over a normalized utterance. Returns the first
/// case that fires, or `None` when generic classification should proceed.
pub fn detect(normalized: &str) -> Option<SpecialCase> {
    if normalized.is_empty() {
        return None;
    }

    // 1. Previously suggested question, answered from the curated table
    if let Some(intent) = suggestions::canned_intent_for(normalized) {
        return Some(SpecialCase::SuggestedQuestion(intent));
    }

    let chars = normalized.chars().count();
    let has_subject = patterns::references_subject(normalized);

    // 2. Casual greeting
    if patterns::starts_with_greeting(normalized) && chars <= GREETING_MAX_CHARS {
        return Some(SpecialCase::Greeting);
    }

    // 3. Off-topic
    if !has_subject {
        let keyword_hit = patterns::OFF_TOPIC_KEYWORDS
            .iter()
            .any(|k| normalized.contains(k));
        let pattern_hit = patterns::OFF_TOPIC_PATTERNS
            .iter()
            .any(|p| p.is_match(normalized));
        let short_default =
            chars < SHORT_UTTERANCE_CHARS && !patterns::has_question_template(normalized);

        if keyword_hit || pattern_hit || short_default {
            return Some(SpecialCase::OffTopic);
        }
    }

    // 4. Overly-complex personal narrative
    let metrics = narrative_metrics(normalized);
    let personal_narrative = metrics.first_person_count >= 2
        && metrics.symptom_count >= 2
        && chars >= NARRATIVE_MIN_CHARS;
    let help_seeking = metrics.first_person_count >= 3
        && metrics.word_count >= 35
        && HELP_SEEKING_PATTERN.is_match(normalized);
    if personal_narrative || help_seeking {
        return Some(SpecialCase::ComplexNarrative);
    }

    // 5. Specific clinical sub-question
    if patterns::TREATMENT_VERB_PATTERN.is_match(normalized) {
        if let Some(condition) = extract_conditions(normalized).into_iter().next() {
            return Some(SpecialCase::SpecificClinical { condition });
        }
    }

    // 6. Personal/biographical-unanswerable
    if has_subject
        && patterns::PERSONAL_QUESTION_PATTERNS
            .iter()
            .any(|p| p.is_match(normalized))
    {
        return Some(SpecialCase::PersonalUnanswerable);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::patterns::normalize;

    #[test]
    fn test_greeting_fires() {
        assert_eq!(detect(&normalize("Hello")), Some(SpecialCase::Greeting));
        assert_eq!(
            detect(&normalize("good morning!")),
            Some(SpecialCase::Greeting)
        );
    }

    #[test]
    fn test_long_greeting_does_not_fire() {
        let result = detect(&normalize(
            "hello, i would like to know all about the research program",
        ));
        assert_ne!(result, Some(SpecialCase::Greeting));
    }

    #[test]
    fn test_off_topic_keyword() {
        assert_eq!(
            detect(&normalize("What's your favorite color?")),
            Some(SpecialCase::OffTopic)
        );
        assert_eq!(
            detect(&normalize("tell me a joke")),
            Some(SpecialCase::OffTopic)
        );
    }

    #[test]
    fn test_short_unrecognized_defaults_off_topic() {
        assert_eq!(detect(&normalize("bananas")), Some(SpecialCase::OffTopic));
    }

    #[test]
    fn test_short_subject_question_is_not_off_topic() {
        // Short, but refers to the subject
        assert_ne!(
            detect(&normalize("his clinic?")),
            Some(SpecialCase::OffTopic)
        );
    }

    #[test]
    fn test_specific_clinical() {
        let result = detect(&normalize("How does Dr. Ali treat POTS?"));
        assert_eq!(
            result,
            Some(SpecialCase::SpecificClinical {
                condition: "pots".to_string()
            })
        );
    }

    #[test]
    fn test_condition_word_boundaries() {
        // "pots" must not match inside other words
        assert!(extract_conditions("he collects teapots and spots birds").is_empty());
        assert_eq!(extract_conditions("is pots treatable"), vec!["pots"]);
    }

    #[test]
    fn test_complex_narrative() {
        let narrative = "I've been dealing with dizziness, a racing heart whenever I stand \
                         up, brain fog and constant fatigue for about eight months now, my \
                         doctor has run out of ideas and I am exhausted every single day, \
                         what should I do?";
        assert_eq!(
            detect(&normalize(narrative)),
            Some(SpecialCase::ComplexNarrative)
        );
    }

    #[test]
    fn test_personal_unanswerable() {
        assert_eq!(
            detect(&normalize("How old is Dr. Ali?")),
            Some(SpecialCase::PersonalUnanswerable)
        );
        assert_eq!(
            detect(&normalize("Is he married?")),
            Some(SpecialCase::PersonalUnanswerable)
        );
    }

    #[test]
    fn test_content_question_passes_through() {
        assert_eq!(detect(&normalize("What research has Dr. Ali published?")), None);
        assert_eq!(detect(&normalize("Where is his office located?")), None);
    }

    #[test]
    fn test_narrative_metrics() {
        let m = narrative_metrics("i feel dizzy. my fatigue is constant!");
        assert_eq!(m.word_count, 7);
        assert_eq!(m.sentence_count, 2);
        assert!(m.first_person_count >= 2);
        assert!(m.symptom_count >= 2);
    }
}
