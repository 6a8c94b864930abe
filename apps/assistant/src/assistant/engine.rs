//! Assistant Engine.
//!
//! Orchestrates one turn end to end: utterance in, response plus follow-up
//! suggestions out. Control flow per turn: special-case detectors first; if
//! none fire, generic classification; then response generation against the
//! session context, then the suggestion engine. Processing is synchronous and
//! allocation-bounded; no operation blocks on I/O.

use tracing::{debug, info, warn};

use crate::models::AssistantResponse;

use super::content;
use super::context::SessionContext;
use super::detectors::{self, SpecialCase};
use super::intent::{Intent, IntentClassifier, IntentResult};
use super::patterns;
use super::responder::ResponseGenerator;
use super::suggestions::SuggestionEngine;
use super::variants::VariantChooser;

/// Engine tunables that are not part of the scoring contract.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum follow-up suggestions per turn.
    pub suggestion_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: 3,
        }
    }
}

/// The assistant core. One engine serves one session at a time; engines are
/// cheap to construct, so concurrent sessions simply each get their own.
pub struct AssistantEngine {
    classifier: IntentClassifier,
    responder: ResponseGenerator,
    suggestions: SuggestionEngine,
}

impl Default for AssistantEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantEngine {
    /// Engine with default configuration and the random variant chooser.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            responder: ResponseGenerator::new(),
            suggestions: SuggestionEngine::new(config.suggestion_limit),
        }
    }

    /// Engine with an injected variant chooser, for reproducible runs.
    pub fn with_chooser(chooser: Box<dyn VariantChooser>) -> Self {
        let config = EngineConfig::default();
        Self {
            classifier: IntentClassifier::new(),
            responder: ResponseGenerator::with_chooser(chooser),
            suggestions: SuggestionEngine::new(config.suggestion_limit),
        }
    }

    /// Process one visitor utterance against the caller-held session.
    ///
    /// Total over all inputs: every possible string produces a response.
    pub fn process(&mut self, utterance: &str, ctx: &mut SessionContext) -> AssistantResponse {
        ctx.record_user_message(utterance);
        let normalized = patterns::normalize(utterance);

        let conditions = detectors::extract_conditions(&normalized);
        for condition in &conditions {
            ctx.record_entity(condition.clone());
        }

        let (intent, confidence, text) = match detectors::detect(&normalized) {
            Some(case) => {
                debug!(?case, "special-case detector fired");
                self.handle_special(case, ctx)
            }
            None => {
                let result = self.classifier.classify(&normalized);
                debug!(
                    intent = %result.primary,
                    confidence = result.confidence,
                    secondary = result.secondary.len(),
                    "classified utterance"
                );
                let text = self.respond_classified(&result, &conditions, ctx);
                (result.primary, result.confidence, text)
            }
        };

        ctx.note_intent(intent);
        ctx.record_assistant_message(&text);

        let suggestions = self.suggestions.suggest(ctx);
        ctx.set_last_suggestions(suggestions.clone());

        info!(
            intent = %intent,
            question = ctx.question_count(),
            suggestions = suggestions.len(),
            "turn complete"
        );

        AssistantResponse {
            text,
            suggestions,
            intent,
            confidence,
        }
    }

    /// Resolve a fired special case into an intent and response text.
    fn handle_special(
        &mut self,
        case: SpecialCase,
        ctx: &mut SessionContext,
    ) -> (Intent, f32, String) {
        match case {
            SpecialCase::SuggestedQuestion(intent) => {
                (intent, 100.0, self.respond_for_intent(intent, ctx))
            }
            SpecialCase::Greeting => (Intent::Greeting, 100.0, self.responder.greeting(ctx)),
            SpecialCase::OffTopic => (Intent::OffTopic, 100.0, self.responder.off_topic(ctx)),
            SpecialCase::ComplexNarrative => {
                (Intent::Complex, 100.0, self.responder.complex_redirect(ctx))
            }
            SpecialCase::SpecificClinical { condition } => {
                let text = match self.responder.condition_response(&condition, ctx) {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(%err, condition = %condition, "condition lookup failed");
                        self.responder.clarify(ctx)
                    }
                };
                (Intent::Clinical, 100.0, text)
            }
            SpecialCase::PersonalUnanswerable => {
                (Intent::About, 100.0, self.responder.personal_unanswerable(ctx))
            }
        }
    }

    /// Response for a classified result, with the medical disclaimer appended
    /// when a clinical answer was triggered by a named condition.
    fn respond_classified(
        &mut self,
        result: &IntentResult,
        conditions: &[String],
        ctx: &mut SessionContext,
    ) -> String {
        let mut text = self.respond_for_intent(result.primary, ctx);
        if result.primary == Intent::Clinical
            && !conditions.is_empty()
            && !text.ends_with(content::MEDICAL_DISCLAIMER)
        {
            text.push_str(content::MEDICAL_DISCLAIMER);
        }
        text
    }

    /// Route an intent to its handler. Catalog-integrity failures degrade to
    /// the clarifying response rather than aborting the turn.
    fn respond_for_intent(&mut self, intent: Intent, ctx: &mut SessionContext) -> String {
        let routed = if intent.is_tiered() {
            self.responder.tiered(intent, ctx)
        } else if intent.is_single_answer() {
            self.responder.canonical(intent, ctx)
        } else {
            return match intent {
                Intent::Greeting => self.responder.greeting(ctx),
                Intent::OffTopic => self.responder.off_topic(ctx),
                Intent::Complex => self.responder.complex_redirect(ctx),
                _ => self.responder.clarify(ctx),
            };
        };

        match routed {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, intent = %intent, "content lookup failed");
                self.responder.clarify(ctx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::variants::FixedChooser;

    fn engine() -> AssistantEngine {
        AssistantEngine::with_chooser(Box::new(FixedChooser(0)))
    }

    #[test]
    fn test_hello_on_turn_zero_is_greeting() {
        let mut engine = engine();
        let mut ctx = SessionContext::new();

        let response = engine.process("Hello", &mut ctx);

        assert_eq!(response.intent, Intent::Greeting);
        assert!(content::GREETING_VARIANTS.contains(&response.text.as_str()));
    }

    #[test]
    fn test_every_input_gets_a_response() {
        let mut engine = engine();
        let mut ctx = SessionContext::new();

        for input in ["", "   ", "?!", "a", "🤖", "\n\n", "x".repeat(5000).as_str()] {
            let response = engine.process(input, &mut ctx);
            assert!(!response.text.is_empty(), "empty response for {input:?}");
        }
    }

    #[test]
    fn test_turn_updates_context() {
        let mut engine = engine();
        let mut ctx = SessionContext::new();

        engine.process("Tell me about his research", &mut ctx);

        assert_eq!(ctx.question_count(), 1);
        assert_eq!(ctx.last_intent(), Some(Intent::Research));
        assert_eq!(ctx.messages().len(), 2);
        assert!(ctx.topic_introduced(Intent::Research));
    }

    #[test]
    fn test_clinical_with_condition_carries_disclaimer() {
        let mut engine = engine();
        let mut ctx = SessionContext::new();

        let response = engine.process("What does his clinic do about dysautonomia?", &mut ctx);

        assert_eq!(response.intent, Intent::Clinical);
        assert!(response.text.contains("not medical advice"));
        assert!(ctx.entities().contains("dysautonomia"));
    }

    #[test]
    fn test_generic_clinical_overview_omits_disclaimer() {
        let mut engine = engine();
        let mut ctx = SessionContext::new();

        let response = engine.process("Tell me about Dr. Ali's clinical practice", &mut ctx);

        assert_eq!(response.intent, Intent::Clinical);
        assert!(!response.text.contains("not medical advice"));
    }

    #[test]
    fn test_suggested_question_routes_to_canned_answer() {
        let mut engine = engine();
        let mut ctx = SessionContext::new();

        let response = engine.process("Tell me about Dr. Ali's research", &mut ctx);

        assert_eq!(response.intent, Intent::Research);
        let tier0 = content::tiers(Intent::Research).unwrap()[0];
        assert_eq!(response.text, tier0);
    }
}
