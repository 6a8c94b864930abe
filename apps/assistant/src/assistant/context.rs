//! Session Context.
//!
//! Mutable per-conversation state, exclusively owned by one conversation and
//! passed explicitly into every classification and response call. Nothing here
//! is shared between sessions; distinct sessions are fully independent.
//!
//! Topic depth forms a small state machine per deep-divable topic: states
//! `0..=max_tier`, then `Exhausted`. Depth values only increase while a
//! conversation is open; `shown_content` only grows.

use std::collections::{HashMap, HashSet};

use crate::models::{Message, Role, SuggestedQuestion};

use super::dedup;
use super::intent::Intent;

/// Progression state of a deep-divable topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthState {
    /// The next content tier to show.
    Tier(usize),
    /// All defined tiers have been shown.
    Exhausted,
}

/// Per-conversation state. Created empty at conversation start, mutated only
/// by the turn pipeline, discarded at conversation end.
#[derive(Debug, Default)]
pub struct SessionContext {
    /// Ordered message history.
    messages: Vec<Message>,
    /// Number of user turns so far.
    question_count: usize,
    /// Intent of the most recent classified user turn.
    last_intent: Option<Intent>,
    /// One entry per classified user turn, oldest first.
    intent_history: Vec<Intent>,
    /// Entities (condition names etc.) mentioned so far.
    entities: HashSet<String>,
    /// Normalized phrasing variants already used.
    used_phrases: HashSet<String>,
    /// Off-topic responses already issued, in order, for rotation.
    used_off_topic: Vec<String>,
    /// Raw past utterances, oldest first.
    search_history: Vec<String>,
    /// Topics already introduced.
    shown_topics: HashSet<Intent>,
    /// Normalized content blocks already shown.
    shown_content: HashSet<String>,
    /// Depth counter per deep-divable topic. Values only increase.
    topic_depth: HashMap<Intent, usize>,
    /// Suggestions issued with the previous response.
    last_suggestions: Vec<SuggestedQuestion>,
}

impl SessionContext {
    /// Fresh context: all collections empty, counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // --- history ----------------------------------------------------------

    /// Append a user message and record the raw utterance.
    pub fn record_user_message(&mut self, text: &str) {
        self.messages.push(Message::user(text));
        self.search_history.push(text.to_string());
        self.question_count += 1;
    }

    /// Append an assistant message.
    pub fn record_assistant_message(&mut self, text: &str) {
        self.messages.push(Message::assistant(text));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of user turns processed so far.
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// The most recent assistant message, if any.
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.text.as_str())
    }

    /// Up to `n` most recent raw user utterances, newest first.
    pub fn recent_utterances(&self, n: usize) -> Vec<&str> {
        self.search_history
            .iter()
            .rev()
            .take(n)
            .map(|s| s.as_str())
            .collect()
    }

    // --- intents ----------------------------------------------------------

    /// Record the intent a user turn resolved to.
    pub fn note_intent(&mut self, intent: Intent) {
        self.last_intent = Some(intent);
        self.intent_history.push(intent);
    }

    pub fn last_intent(&self) -> Option<Intent> {
        self.last_intent
    }

    /// Intent of the very first classified turn, if any.
    pub fn first_intent(&self) -> Option<Intent> {
        self.intent_history.first().copied()
    }

    /// Up to `n` most recent turn intents, newest first.
    pub fn recent_intents(&self, n: usize) -> Vec<Intent> {
        self.intent_history.iter().rev().take(n).copied().collect()
    }

    /// Was `intent` resolved within the last `n` turns?
    pub fn intent_in_recent(&self, intent: Intent, n: usize) -> bool {
        self.recent_intents(n).contains(&intent)
    }

    // --- entities ---------------------------------------------------------

    pub fn record_entity(&mut self, entity: impl Into<String>) {
        self.entities.insert(entity.into());
    }

    pub fn entities(&self) -> &HashSet<String> {
        &self.entities
    }

    // --- phrasing variants ------------------------------------------------

    /// Has this phrasing variant been used already? Compared in normalized
    /// form.
    pub fn phrase_used(&self, text: &str) -> bool {
        self.used_phrases.contains(&dedup::normalize_block(text))
    }

    pub fn mark_phrase_used(&mut self, text: &str) {
        self.used_phrases.insert(dedup::normalize_block(text));
    }

    /// Off-topic responses rotate through their pool without immediate
    /// repeats; the rotation resets once the pool is exhausted.
    pub fn off_topic_used(&self, text: &str) -> bool {
        let normalized = dedup::normalize_block(text);
        self.used_off_topic.contains(&normalized)
    }

    pub fn record_off_topic(&mut self, text: &str) {
        self.used_off_topic.push(dedup::normalize_block(text));
    }

    pub fn reset_off_topic_rotation(&mut self) {
        self.used_off_topic.clear();
    }

    // --- topics and depth -------------------------------------------------

    /// Current depth counter for a topic (0 if never advanced).
    pub fn depth_of(&self, topic: Intent) -> usize {
        self.topic_depth.get(&topic).copied().unwrap_or(0)
    }

    /// Where the topic's progression stands given its highest tier index.
    pub fn depth_state(&self, topic: Intent, max_tier: usize) -> DepthState {
        let depth = self.depth_of(topic);
        if depth > max_tier {
            DepthState::Exhausted
        } else {
            DepthState::Tier(depth)
        }
    }

    /// Advance the topic's depth by one. Depth only ever increases.
    pub fn advance_depth(&mut self, topic: Intent) {
        *self.topic_depth.entry(topic).or_insert(0) += 1;
    }

    /// Has this topic genuinely been introduced this session? A depth counter
    /// alone is not proof: depth may have been queried defensively without any
    /// content being shown.
    pub fn topic_introduced(&self, topic: Intent) -> bool {
        self.shown_topics.contains(&topic)
    }

    pub fn mark_topic_shown(&mut self, topic: Intent) {
        self.shown_topics.insert(topic);
    }

    pub fn shown_topics(&self) -> &HashSet<Intent> {
        &self.shown_topics
    }

    // --- shown content ----------------------------------------------------

    /// Would this block repeat something already shown?
    pub fn is_duplicate_content(&self, candidate: &str) -> bool {
        dedup::is_duplicate(candidate, &self.shown_content)
    }

    /// Record an emitted block. Stored normalized.
    pub fn record_shown_content(&mut self, text: &str) {
        self.shown_content.insert(dedup::normalize_block(text));
    }

    pub fn shown_content(&self) -> &HashSet<String> {
        &self.shown_content
    }

    // --- suggestions ------------------------------------------------------

    pub fn set_last_suggestions(&mut self, suggestions: Vec<SuggestedQuestion>) {
        self.last_suggestions = suggestions;
    }

    pub fn last_suggestions(&self) -> &[SuggestedQuestion] {
        &self.last_suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = SessionContext::new();
        assert_eq!(ctx.question_count(), 0);
        assert!(ctx.messages().is_empty());
        assert!(ctx.last_intent().is_none());
        assert!(ctx.shown_topics().is_empty());
        assert!(ctx.shown_content().is_empty());
    }

    #[test]
    fn test_question_count_tracks_user_turns() {
        let mut ctx = SessionContext::new();
        ctx.record_user_message("first");
        ctx.record_assistant_message("reply");
        ctx.record_user_message("second");
        assert_eq!(ctx.question_count(), 2);
        assert_eq!(ctx.messages().len(), 3);
    }

    #[test]
    fn test_depth_progression() {
        let mut ctx = SessionContext::new();
        assert_eq!(ctx.depth_state(Intent::Research, 2), DepthState::Tier(0));

        ctx.advance_depth(Intent::Research);
        ctx.advance_depth(Intent::Research);
        assert_eq!(ctx.depth_state(Intent::Research, 2), DepthState::Tier(2));

        ctx.advance_depth(Intent::Research);
        assert_eq!(ctx.depth_state(Intent::Research, 2), DepthState::Exhausted);
    }

    #[test]
    fn test_depth_only_increases() {
        let mut ctx = SessionContext::new();
        let mut last = ctx.depth_of(Intent::Clinical);
        for _ in 0..5 {
            ctx.advance_depth(Intent::Clinical);
            let now = ctx.depth_of(Intent::Clinical);
            assert!(now > last);
            last = now;
        }
    }

    #[test]
    fn test_recent_intents_newest_first() {
        let mut ctx = SessionContext::new();
        ctx.note_intent(Intent::Clinical);
        ctx.note_intent(Intent::Research);
        ctx.note_intent(Intent::Contact);
        assert_eq!(
            ctx.recent_intents(2),
            vec![Intent::Contact, Intent::Research]
        );
        assert!(ctx.intent_in_recent(Intent::Contact, 1));
        assert!(!ctx.intent_in_recent(Intent::Clinical, 2));
    }

    #[test]
    fn test_off_topic_rotation() {
        let mut ctx = SessionContext::new();
        ctx.record_off_topic("variant one");
        assert!(ctx.off_topic_used("Variant one!"));
        ctx.reset_off_topic_rotation();
        assert!(!ctx.off_topic_used("variant one"));
    }

    #[test]
    fn test_shown_content_grows_only() {
        let mut ctx = SessionContext::new();
        ctx.record_shown_content("Dr. Ali runs a dysautonomia clinic.");
        assert!(ctx.is_duplicate_content("dr ali runs a dysautonomia clinic"));
        assert_eq!(ctx.shown_content().len(), 1);
    }
}
