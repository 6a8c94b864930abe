//! Suggestion Engine.
//!
//! After each turn, proposes up to a handful of follow-up questions. Built
//! from independent strategies, each with an applicability predicate over the
//! session, a fixed priority, and a generator. The highest-priority
//! applicable strategy fills the slots first; the next applicable one covers
//! any remainder. Candidates similar to an already-chosen suggestion or to a
//! recent user utterance are skipped.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::SuggestedQuestion;

use super::context::SessionContext;
use super::dedup;
use super::intent::Intent;

/// Similarity threshold over shared significant words.
const SHARED_WORD_RATIO: f32 = 0.5;
/// Words this short are ignored by the similarity test.
const MIN_SIGNIFICANT_WORD_LEN: usize = 3;
/// Recent utterances a candidate must not echo.
const RECENT_UTTERANCE_WINDOW: usize = 3;

// --- Question pools -------------------------------------------------------

/// Suggestible questions per content intent. Doubles as the curated table
/// the special-case detectors answer from on an exact match.
const QUESTION_POOLS: &[(Intent, &[&str])] = &[
    (
        Intent::Clinical,
        &[
            "What conditions does Dr. Ali treat?",
            "What does a typical treatment plan look like?",
            "How does the clinic approach dysautonomia care?",
            "What is Dr. Ali's clinical specialty?",
        ],
    ),
    (
        Intent::Research,
        &[
            "Tell me about Dr. Ali's research",
            "What has Dr. Ali published recently?",
            "How does his lab design its studies?",
            "Does Dr. Ali run clinical trials?",
        ],
    ),
    (
        Intent::Ventures,
        &[
            "What companies has Dr. Ali founded?",
            "Tell me about his ventures",
            "How are his companies connected to the clinic?",
        ],
    ),
    (
        Intent::Technology,
        &[
            "What technology does Dr. Ali work on?",
            "How does the remote monitoring platform work?",
            "Where does machine learning fit into his work?",
        ],
    ),
    (
        Intent::Speaking,
        &[
            "Does Dr. Ali speak at conferences?",
            "How can I book Dr. Ali for a talk?",
        ],
    ),
    (
        Intent::Media,
        &[
            "Where has Dr. Ali appeared in the media?",
            "Has Dr. Ali been on any podcasts?",
        ],
    ),
    (
        Intent::Contact,
        &[
            "How can I get in touch with Dr. Ali?",
            "How do I request an appointment?",
        ],
    ),
    (
        Intent::Location,
        &[
            "Where is Dr. Ali's clinic?",
            "Does the clinic offer telehealth visits?",
        ],
    ),
    (
        Intent::About,
        &["Who is Dr. Ali?", "What is Dr. Ali's background?"],
    ),
    (
        Intent::Resume,
        &[
            "What are Dr. Ali's credentials?",
            "Is Dr. Ali board certified?",
        ],
    ),
];

/// Fixed cross-category set offered on the very first turn.
const INITIAL_SET: &[(Intent, &str)] = &[
    (Intent::Clinical, "What conditions does Dr. Ali treat?"),
    (Intent::Research, "Tell me about Dr. Ali's research"),
    (Intent::About, "Who is Dr. Ali?"),
];

/// Category order used when sampling across topics.
const CATEGORY_PRIORITY: &[Intent] = &[
    Intent::Clinical,
    Intent::Research,
    Intent::Ventures,
    Intent::Technology,
    Intent::Speaking,
    Intent::Contact,
    Intent::About,
];

/// Fallback set for late-conversation suggestions.
const POPULAR_SET: &[(Intent, &str)] = &[
    (Intent::Clinical, "What conditions does Dr. Ali treat?"),
    (Intent::Contact, "How can I get in touch with Dr. Ali?"),
];

/// Generic catch-all used to pad when everything else is filtered out.
const CATCH_ALL: (Intent, &str) = (Intent::About, "What else can you tell me about Dr. Ali?");

/// Static diversification map: where to send the conversation when a topic's
/// own pool is spent.
const RELATED_INTENTS: &[(Intent, &[Intent])] = &[
    (Intent::Clinical, &[Intent::Research, Intent::Technology, Intent::Contact]),
    (Intent::Research, &[Intent::Clinical, Intent::Technology, Intent::Speaking]),
    (Intent::Ventures, &[Intent::Technology, Intent::Research, Intent::Media]),
    (Intent::Technology, &[Intent::Ventures, Intent::Research, Intent::Clinical]),
    (Intent::Speaking, &[Intent::Media, Intent::Contact, Intent::Research]),
    (Intent::Media, &[Intent::Speaking, Intent::About, Intent::Contact]),
    (Intent::Contact, &[Intent::Location, Intent::Clinical, Intent::About]),
    (Intent::Location, &[Intent::Contact, Intent::Clinical, Intent::About]),
    (Intent::About, &[Intent::Resume, Intent::Clinical, Intent::Research]),
    (Intent::Resume, &[Intent::About, Intent::Research, Intent::Speaking]),
    (Intent::Identity, &[Intent::About, Intent::Contact, Intent::Clinical]),
];

/// Pool of suggestible questions for one intent.
fn pool_for(intent: Intent) -> &'static [&'static str] {
    QUESTION_POOLS
        .iter()
        .find(|(i, _)| *i == intent)
        .map(|(_, qs)| *qs)
        .unwrap_or(&[])
}

fn related_for(intent: Intent) -> &'static [Intent] {
    RELATED_INTENTS
        .iter()
        .find(|(i, _)| *i == intent)
        .map(|(_, r)| *r)
        .unwrap_or(&[Intent::Clinical, Intent::Research, Intent::About])
}

/// Curated-table lookup: the intent behind a previously suggested question,
/// matched on normalized equality.
pub fn canned_intent_for(text: &str) -> Option<Intent> {
    let normalized = dedup::normalize_block(text);
    if normalized.is_empty() {
        return None;
    }
    for (intent, questions) in QUESTION_POOLS {
        for q in *questions {
            if dedup::normalize_block(q) == normalized {
                return Some(*intent);
            }
        }
    }
    if dedup::normalize_block(CATCH_ALL.1) == normalized {
        return Some(CATCH_ALL.0);
    }
    None
}

// --- Similarity -----------------------------------------------------------

/// Leading interrogative phrases, longest first so the longest match strips.
const INTERROGATIVE_PREFIXES: &[&str] = &[
    "tell me more about",
    "tell me about",
    "tell me",
    "what does",
    "what has",
    "what are",
    "what is",
    "what s",
    "what",
    "how does",
    "how can",
    "how do",
    "how",
    "which",
    "who is",
    "who",
    "where is",
    "where",
    "when",
    "why",
    "does",
    "do",
    "can",
    "is",
    "are",
    "has",
    "have",
];

/// Subject tokens removed before comparing questions. Includes the leftover
/// possessive "s" produced by punctuation stripping.
const SUBJECT_TOKENS: &[&str] = &[
    "dr", "doctor", "ali", "he", "him", "his", "she", "her", "hers", "you", "your", "i", "s",
];

/// Normalize a question for the similarity test: strip a leading
/// interrogative phrase, drop subject tokens, strip punctuation, collapse
/// whitespace.
pub fn normalize_question(text: &str) -> String {
    let mut normalized = dedup::normalize_block(text);

    for prefix in INTERROGATIVE_PREFIXES {
        if normalized == *prefix {
            normalized.clear();
            break;
        }
        if let Some(rest) = normalized.strip_prefix(&format!("{prefix} ")) {
            normalized = rest.to_string();
            break;
        }
    }

    normalized
        .split_whitespace()
        .filter(|w| !SUBJECT_TOKENS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Are two question strings near-duplicates?
///
/// Similar when the normalized forms are equal, one contains the other, or
/// more than half of the significant words (longer than 3 characters) are
/// shared, relative to the smaller word set.
pub fn questions_similar(a: &str, b: &str) -> bool {
    let na = normalize_question(a);
    let nb = normalize_question(b);

    if na.is_empty() || nb.is_empty() {
        return na.is_empty() && nb.is_empty();
    }
    if na == nb || na.contains(&nb) || nb.contains(&na) {
        return true;
    }

    let words_a: Vec<&str> = na
        .split_whitespace()
        .filter(|w| w.len() > MIN_SIGNIFICANT_WORD_LEN)
        .collect();
    let words_b: Vec<&str> = nb
        .split_whitespace()
        .filter(|w| w.len() > MIN_SIGNIFICANT_WORD_LEN)
        .collect();
    if words_a.is_empty() || words_b.is_empty() {
        return false;
    }

    let shared = words_a.iter().filter(|w| words_b.contains(w)).count();
    shared as f32 / words_a.len().min(words_b.len()) as f32 > SHARED_WORD_RATIO
}

// --- Strategies -----------------------------------------------------------

/// A self-contained rule set for proposing follow-up questions.
pub trait SuggestionStrategy: Send {
    fn name(&self) -> &'static str;

    /// Higher priorities run first.
    fn priority(&self) -> u8;

    /// May this strategy run against the current session state?
    fn applicable(&self, ctx: &SessionContext) -> bool;

    /// Upper bound on slots when this strategy leads the turn.
    fn max_slots(&self) -> usize {
        usize::MAX
    }

    /// Candidate questions, best first. The engine filters near-duplicates.
    fn generate(&self, ctx: &SessionContext) -> Vec<SuggestedQuestion>;
}

fn question(text: &str, intent: Intent, priority: u8) -> SuggestedQuestion {
    SuggestedQuestion::new(text, intent, priority)
}

/// Turns 0-1: a fixed curated opener, then a cross-category sample avoiding
/// whatever the visitor already asked about.
struct InitialConversation;

impl SuggestionStrategy for InitialConversation {
    fn name(&self) -> &'static str {
        "initial_conversation"
    }

    fn priority(&self) -> u8 {
        100
    }

    fn applicable(&self, ctx: &SessionContext) -> bool {
        ctx.question_count() <= 2
    }

    fn generate(&self, ctx: &SessionContext) -> Vec<SuggestedQuestion> {
        if ctx.question_count() <= 1 {
            return INITIAL_SET
                .iter()
                .map(|(intent, text)| question(text, *intent, self.priority()))
                .collect();
        }

        let first = ctx.first_intent();
        CATEGORY_PRIORITY
            .iter()
            .filter(|intent| Some(**intent) != first)
            .filter_map(|intent| {
                pool_for(*intent)
                    .first()
                    .map(|text| question(text, *intent, self.priority()))
            })
            .collect()
    }
}

/// Turns 1-5: dig further into the most recent topic; once its pool is
/// spent, diversify along the related-intents map.
struct TopicExploration;

impl SuggestionStrategy for TopicExploration {
    fn name(&self) -> &'static str {
        "topic_exploration"
    }

    fn priority(&self) -> u8 {
        80
    }

    fn applicable(&self, ctx: &SessionContext) -> bool {
        (1..=5).contains(&ctx.question_count()) && ctx.last_intent().is_some()
    }

    fn generate(&self, ctx: &SessionContext) -> Vec<SuggestedQuestion> {
        let Some(last) = ctx.last_intent() else {
            return vec![];
        };
        let recent = ctx.recent_utterances(2);

        let mut out: Vec<SuggestedQuestion> = pool_for(last)
            .iter()
            .filter(|text| !recent.iter().any(|u| questions_similar(u, text)))
            .map(|text| question(text, last, self.priority()))
            .collect();

        if out.is_empty() {
            out = related_for(last)
                .iter()
                .filter_map(|intent| {
                    pool_for(*intent)
                        .first()
                        .map(|text| question(text, *intent, self.priority()))
                })
                .collect();
        }
        out
    }
}

/// Turns 4-6: steer toward the contact channel once real interest is shown,
/// unless contact just came up.
struct ContactNudge;

impl SuggestionStrategy for ContactNudge {
    fn name(&self) -> &'static str {
        "contact_nudge"
    }

    fn priority(&self) -> u8 {
        90
    }

    fn applicable(&self, ctx: &SessionContext) -> bool {
        (4..=6).contains(&ctx.question_count())
            && !ctx.intent_in_recent(Intent::Contact, 3)
    }

    fn generate(&self, ctx: &SessionContext) -> Vec<SuggestedQuestion> {
        let mut out = Vec::new();
        if let Some(text) = pool_for(Intent::Contact).first() {
            out.push(question(text, Intent::Contact, self.priority()));
        }

        let last = ctx.last_intent();
        for intent in CATEGORY_PRIORITY {
            if out.len() >= 3 {
                break;
            }
            if *intent == Intent::Contact || Some(*intent) == last {
                continue;
            }
            if let Some(text) = pool_for(*intent).first() {
                out.push(question(text, *intent, self.priority()));
            }
        }
        out
    }
}

/// Turns past 8: wind down to at most two suggestions, preferring ground not
/// covered recently.
struct LimitedSuggestions;

impl SuggestionStrategy for LimitedSuggestions {
    fn name(&self) -> &'static str {
        "limited_suggestions"
    }

    fn priority(&self) -> u8 {
        70
    }

    fn applicable(&self, ctx: &SessionContext) -> bool {
        ctx.question_count() > 8
    }

    fn max_slots(&self) -> usize {
        2
    }

    fn generate(&self, ctx: &SessionContext) -> Vec<SuggestedQuestion> {
        let recent = ctx.recent_intents(5);

        let mut out: Vec<SuggestedQuestion> = CATEGORY_PRIORITY
            .iter()
            .filter(|intent| !recent.contains(intent))
            .filter_map(|intent| {
                pool_for(*intent)
                    .first()
                    .map(|text| question(text, *intent, self.priority()))
            })
            .take(2)
            .collect();

        if out.is_empty() {
            out = POPULAR_SET
                .iter()
                .map(|(intent, text)| question(text, *intent, self.priority()))
                .collect();
        }
        if out.len() < 2 {
            out.push(question(CATCH_ALL.1, CATCH_ALL.0, self.priority()));
        }
        out
    }
}

static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\d+[.)]\s*(.+)$").expect("Invalid regex: numbered list item")
});

static LINK_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[LINK:[^\]]*\]").expect("Invalid regex: link directive")
});

/// Key phrases worth following up on when they appear in an answer.
const KEY_PHRASES: &[(&str, Intent)] = &[
    ("research", Intent::Research),
    ("publications", Intent::Research),
    ("clinic", Intent::Clinical),
    ("patients", Intent::Clinical),
    ("ventures", Intent::Ventures),
    ("companies", Intent::Ventures),
    ("telehealth", Intent::Technology),
    ("wearable", Intent::Technology),
    ("conferences", Intent::Speaking),
    ("podcasts", Intent::Media),
];

/// Whenever an assistant turn exists: mine the last answer itself for things
/// the visitor might want expanded.
struct ContextualFollowup;

impl SuggestionStrategy for ContextualFollowup {
    fn name(&self) -> &'static str {
        "contextual_followup"
    }

    fn priority(&self) -> u8 {
        40
    }

    fn applicable(&self, ctx: &SessionContext) -> bool {
        ctx.last_assistant_text().is_some()
    }

    fn generate(&self, ctx: &SessionContext) -> Vec<SuggestedQuestion> {
        let Some(answer) = ctx.last_assistant_text() else {
            return vec![];
        };
        let recent = ctx.recent_utterances(RECENT_UTTERANCE_WINDOW);
        let mut out = Vec::new();

        // Numbered-list items become direct follow-ups
        for caps in NUMBERED_ITEM.captures_iter(answer) {
            let raw = LINK_DIRECTIVE.replace_all(&caps[1], "");
            let item = raw.trim().trim_end_matches(['.', ',', ';']);
            if item.is_empty() || item.chars().count() > 60 {
                continue;
            }
            let intent = KEY_PHRASES
                .iter()
                .find(|(phrase, _)| item.to_lowercase().contains(phrase))
                .map(|(_, i)| *i)
                .unwrap_or(Intent::About);
            out.push(question(
                &format!("Tell me more about {item}"),
                intent,
                self.priority(),
            ));
        }

        // Category key-phrases mentioned in passing
        let lowered = answer.to_lowercase();
        for (phrase, intent) in KEY_PHRASES {
            if lowered.contains(phrase) {
                out.push(question(
                    &format!("Tell me more about the {phrase}"),
                    *intent,
                    self.priority(),
                ));
            }
        }

        out.retain(|q| !recent.iter().any(|u| questions_similar(u, &q.text)));
        out
    }
}

// --- Engine ---------------------------------------------------------------

/// Selects and runs strategies to fill the turn's suggestion slots.
pub struct SuggestionEngine {
    strategies: Vec<Box<dyn SuggestionStrategy>>,
    limit: usize,
}

impl SuggestionEngine {
    /// Engine with the full built-in strategy set.
    pub fn new(limit: usize) -> Self {
        Self {
            strategies: vec![
                Box::new(InitialConversation),
                Box::new(ContactNudge),
                Box::new(TopicExploration),
                Box::new(LimitedSuggestions),
                Box::new(ContextualFollowup),
            ],
            limit,
        }
    }

    /// Propose follow-up questions for the session's current state.
    pub fn suggest(&self, ctx: &SessionContext) -> Vec<SuggestedQuestion> {
        let mut applicable: Vec<&dyn SuggestionStrategy> = self
            .strategies
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| s.applicable(ctx))
            .collect();
        applicable.sort_by(|a, b| b.priority().cmp(&a.priority()));

        let Some(top) = applicable.first() else {
            return vec![];
        };
        let slots = self.limit.min(top.max_slots());
        let recent = ctx.recent_utterances(RECENT_UTTERANCE_WINDOW);

        let mut chosen: Vec<SuggestedQuestion> = Vec::with_capacity(slots);
        for strategy in &applicable {
            if chosen.len() >= slots {
                break;
            }
            for candidate in strategy.generate(ctx) {
                if chosen.len() >= slots {
                    break;
                }
                if chosen
                    .iter()
                    .any(|c| questions_similar(&c.text, &candidate.text))
                {
                    continue;
                }
                if recent.iter().any(|u| questions_similar(u, &candidate.text)) {
                    continue;
                }
                chosen.push(candidate);
            }
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_question_strips_interrogatives_and_subject() {
        assert_eq!(
            normalize_question("Tell me more about his research"),
            "research"
        );
        assert_eq!(
            normalize_question("What conditions does Dr. Ali treat?"),
            "conditions does treat"
        );
    }

    #[test]
    fn test_similarity_equal_after_normalization() {
        assert!(questions_similar(
            "Tell me about Dr. Ali's research",
            "What is his research?"
        ));
    }

    #[test]
    fn test_similarity_containment() {
        assert!(questions_similar(
            "Tell me more about the clinic",
            "the clinic"
        ));
    }

    #[test]
    fn test_dissimilar_questions() {
        assert!(!questions_similar(
            "What companies has Dr. Ali founded?",
            "Where is Dr. Ali's clinic?"
        ));
    }

    #[test]
    fn test_canned_lookup_exact_match() {
        assert_eq!(
            canned_intent_for("what conditions does dr ali treat"),
            Some(Intent::Clinical)
        );
        assert_eq!(
            canned_intent_for("Tell me about Dr. Ali's research"),
            Some(Intent::Research)
        );
        assert_eq!(canned_intent_for("how do birds fly"), None);
    }

    #[test]
    fn test_turn_zero_returns_initial_set() {
        let mut ctx = SessionContext::new();
        ctx.record_user_message("Hello");

        let engine = SuggestionEngine::new(3);
        let suggestions = engine.suggest(&ctx);

        assert_eq!(suggestions.len(), 3);
        let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
        for (_, expected) in INITIAL_SET {
            assert!(texts.contains(expected));
        }
    }

    #[test]
    fn test_second_turn_avoids_first_intent() {
        let mut ctx = SessionContext::new();
        ctx.record_user_message("What conditions does Dr. Ali treat?");
        ctx.note_intent(Intent::Clinical);
        ctx.record_assistant_message("answer one");
        ctx.record_user_message("and what else?");

        let engine = SuggestionEngine::new(3);
        let suggestions = engine.suggest(&ctx);

        assert!(!suggestions.is_empty());
        assert!(suggestions.iter().all(|s| s.intent != Intent::Clinical));
    }

    #[test]
    fn test_no_similar_pairs_in_output() {
        let mut ctx = SessionContext::new();
        ctx.record_user_message("Tell me about his research");
        ctx.note_intent(Intent::Research);
        ctx.record_assistant_message("research overview text");
        ctx.record_user_message("more please");
        ctx.note_intent(Intent::Research);

        let engine = SuggestionEngine::new(3);
        let suggestions = engine.suggest(&ctx);

        for (i, a) in suggestions.iter().enumerate() {
            for b in suggestions.iter().skip(i + 1) {
                assert!(
                    !questions_similar(&a.text, &b.text),
                    "'{}' and '{}' are similar",
                    a.text,
                    b.text
                );
            }
        }
    }

    #[test]
    fn test_suggestions_avoid_recent_utterances() {
        let mut ctx = SessionContext::new();
        ctx.record_user_message("Tell me about Dr. Ali's research");
        ctx.note_intent(Intent::Research);

        let engine = SuggestionEngine::new(3);
        let suggestions = engine.suggest(&ctx);

        for s in &suggestions {
            assert!(
                !questions_similar(&s.text, "Tell me about Dr. Ali's research"),
                "'{}' echoes the user's question",
                s.text
            );
        }
    }

    #[test]
    fn test_contact_nudge_includes_exactly_one_contact() {
        let mut ctx = SessionContext::new();
        for i in 0..5 {
            ctx.record_user_message(format!("question number {i}").as_str());
            ctx.note_intent(Intent::Research);
            ctx.record_assistant_message("an answer");
        }
        assert_eq!(ctx.question_count(), 5);

        let engine = SuggestionEngine::new(3);
        let suggestions = engine.suggest(&ctx);

        let contact_count = suggestions
            .iter()
            .filter(|s| s.intent == Intent::Contact)
            .count();
        assert_eq!(contact_count, 1);
    }

    #[test]
    fn test_contact_nudge_skipped_after_recent_contact() {
        let mut ctx = SessionContext::new();
        for i in 0..4 {
            ctx.record_user_message(format!("question number {i}").as_str());
            ctx.note_intent(Intent::Research);
        }
        ctx.record_user_message("how do I reach him?");
        ctx.note_intent(Intent::Contact);

        let engine = SuggestionEngine::new(3);
        let suggestions = engine.suggest(&ctx);

        // Contact came up within the last 3 turns, so the nudge must not lead
        assert!(suggestions.iter().all(|s| s.priority != 90));
    }

    #[test]
    fn test_limited_suggestions_caps_at_two() {
        let mut ctx = SessionContext::new();
        for i in 0..9 {
            ctx.record_user_message(format!("question number {i}").as_str());
            ctx.note_intent(Intent::Clinical);
            ctx.record_assistant_message("an answer");
        }
        assert!(ctx.question_count() > 8);

        let engine = SuggestionEngine::new(3);
        let suggestions = engine.suggest(&ctx);

        assert!(suggestions.len() <= 2);
    }

    #[test]
    fn test_contextual_followup_mines_numbered_lists() {
        let mut ctx = SessionContext::new();
        ctx.record_user_message("first question text");
        ctx.note_intent(Intent::About);
        ctx.record_assistant_message(
            "Here is what we can cover:\n1. his research [LINK:/research:research]\n2. his ventures\n",
        );

        let strategy = ContextualFollowup;
        assert!(strategy.applicable(&ctx));
        let out = strategy.generate(&ctx);

        assert!(out.iter().any(|q| q.text.contains("his research")));
        assert!(out.iter().any(|q| q.text.contains("his ventures")));
        // Link directives never leak into suggestion text
        assert!(out.iter().all(|q| !q.text.contains("[LINK:")));
    }
}
