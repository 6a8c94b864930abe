//! Single-turn scenarios: detector priority, disclaimer rules, variant
//! rotation, and the user-visible error taxonomy.

use crate::assistant::content;
use crate::{AssistantEngine, FixedChooser, Intent, IntentClassifier, SessionContext};

fn engine() -> AssistantEngine {
    AssistantEngine::with_chooser(Box::new(FixedChooser(0)))
}

#[test]
fn test_classifier_is_deterministic() {
    let classifier = IntentClassifier::new();

    let inputs = [
        "Hello",
        "What conditions does Dr. Ali treat?",
        "Tell me about his startups",
        "Is he board certified?",
        "random words that mean nothing",
    ];

    for input in inputs {
        let a = classifier.classify(input);
        let b = classifier.classify(input);
        assert_eq!(a.primary, b.primary, "primary differs for '{input}'");
        assert_eq!(a.confidence, b.confidence, "confidence differs for '{input}'");
        assert_eq!(a.secondary, b.secondary, "secondary differs for '{input}'");
    }
}

#[test]
fn test_engine_is_deterministic_with_stubbed_chooser() {
    let mut first_engine = engine();
    let mut first_ctx = SessionContext::new();
    let mut second_engine = engine();
    let mut second_ctx = SessionContext::new();

    let a = first_engine.process("Tell me about his research", &mut first_ctx);
    let b = second_engine.process("Tell me about his research", &mut second_ctx);

    assert_eq!(a.text, b.text);
    assert_eq!(a.intent, b.intent);
    assert_eq!(a.confidence, b.confidence);
    let texts_a: Vec<&str> = a.suggestions.iter().map(|s| s.text.as_str()).collect();
    let texts_b: Vec<&str> = b.suggestions.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts_a, texts_b);
}

#[test]
fn test_hello_scenario() {
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    let response = engine.process("Hello", &mut ctx);

    assert_eq!(response.intent, Intent::Greeting);
    assert!(content::GREETING_VARIANTS.contains(&response.text.as_str()));
    // Suggestions are the fixed initial-conversation set, not topic-derived
    assert!(!response.suggestions.is_empty());
    assert!(response
        .suggestions
        .iter()
        .all(|s| s.priority == 100));
}

#[test]
fn test_hello_beats_coincidental_keywords() {
    // "Hello" opens the utterance; even with topical words close behind, the
    // greeting detector wins on turn 0 for a short text
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    let response = engine.process("Hello doctor", &mut ctx);
    assert_eq!(response.intent, Intent::Greeting);
}

#[test]
fn test_pots_treatment_scenario() {
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    let response = engine.process("How does Dr. Ali treat POTS?", &mut ctx);

    assert_eq!(response.intent, Intent::Clinical);
    assert_eq!(response.confidence, 100.0);
    // Protocol content plus the fixed disclaimer
    assert!(response.text.contains("POTS"));
    assert!(response.text.contains("stand test"));
    assert!(response.text.contains("not medical advice"));
    assert!(ctx.entities().contains("pots"));
}

#[test]
fn test_favorite_color_scenario() {
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    let first = engine.process("What's your favorite color?", &mut ctx);
    let second = engine.process("What's your favorite color?", &mut ctx);

    assert_eq!(first.intent, Intent::OffTopic);
    assert_eq!(second.intent, Intent::OffTopic);
    // No immediate repeat while the variant pool lasts
    assert_ne!(first.text, second.text);
}

#[test]
fn test_off_topic_pool_resets_after_exhaustion() {
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    let pool_len = content::OFF_TOPIC_VARIANTS.len();
    let mut seen = Vec::new();
    for _ in 0..pool_len {
        let response = engine.process("tell me a joke", &mut ctx);
        assert!(!seen.contains(&response.text));
        seen.push(response.text);
    }

    // Pool exhausted: the rotation resets instead of going silent
    let after = engine.process("tell me a joke", &mut ctx);
    assert!(content::OFF_TOPIC_VARIANTS.contains(&after.text.as_str()));
}

#[test]
fn test_complex_narrative_scenario() {
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    let narrative = "I've been dealing with constant dizziness, a racing heart every \
                     time I stand up, brain fog that will not lift, and crushing \
                     fatigue for the last eight months, and my doctor seems to have \
                     run out of ideas entirely, what should I do?";
    assert!(narrative.len() > 200);

    let response = engine.process(narrative, &mut ctx);

    assert_eq!(response.intent, Intent::Complex);
    // Redirects to the contact channel
    assert!(response.text.contains("[LINK:/contact:"));
    // And issues no direct clinical recommendation
    assert!(!response.text.contains("exercise"));
    assert!(!response.text.contains("medication"));
    assert!(!response.text.contains("sodium"));
}

#[test]
fn test_personal_question_rotates_variants() {
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    let first = engine.process("How old is Dr. Ali?", &mut ctx);
    let second = engine.process("Is Dr. Ali married?", &mut ctx);

    assert!(content::PERSONAL_UNANSWERABLE_VARIANTS.contains(&first.text.as_str()));
    assert!(content::PERSONAL_UNANSWERABLE_VARIANTS.contains(&second.text.as_str()));
    assert_ne!(first.text, second.text);
}

#[test]
fn test_unclassifiable_input_asks_to_narrow() {
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    // Long enough to dodge the short-utterance off-topic default, but
    // matching no category
    let response = engine.process("please ponder the question concerning items", &mut ctx);

    assert_eq!(response.intent, Intent::Unknown);
    assert_eq!(response.confidence, 0.0);
    assert!(content::CLARIFY_VARIANTS.contains(&response.text.as_str()));
}

#[test]
fn test_identity_question() {
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    let response = engine.process("Are you a real person?", &mut ctx);

    assert_eq!(response.intent, Intent::Identity);
    assert!(response.text.contains("assistant"));
}

#[test]
fn test_response_serializes_for_the_host_page() {
    let mut engine = engine();
    let mut ctx = SessionContext::new();

    let response = engine.process("How can I get in touch with Dr. Ali?", &mut ctx);
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["intent"], "contact");
    assert!(json["text"].as_str().unwrap().contains("[LINK:/contact:"));
    assert!(json["suggestions"].is_array());
}
