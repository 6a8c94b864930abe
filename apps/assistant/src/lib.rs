//! # AskAli Assistant Core
//!
//! Rule-based conversational assistant for Dr. Ali's professional site.
//! Answers visitor questions about the biography using pattern matching.
//! No ML model required - pure Rust keyword and regex scoring.
//!
//! ## Components
//! - `assistant::patterns`: per-topic keyword lists and regex templates
//! - `assistant::detectors`: special-case detectors (greeting, off-topic, ...)
//! - `assistant::intent`: table-driven intent classification with confidence
//! - `assistant::context`: per-session state and topic-depth progression
//! - `assistant::dedup`: content deduplication over shown blocks
//! - `assistant::content`: the biographical content catalog
//! - `assistant::responder`: per-intent, per-depth response generation
//! - `assistant::suggestions`: follow-up question strategies
//! - `assistant::engine`: main orchestrator, one turn end to end

pub mod assistant;
pub mod error;
pub mod models;

pub use assistant::context::SessionContext;
pub use assistant::engine::{AssistantEngine, EngineConfig};
pub use assistant::intent::{Intent, IntentClassifier, IntentResult};
pub use assistant::variants::{FixedChooser, RandomChooser, VariantChooser};
pub use error::AssistantError;
pub use models::{AssistantResponse, Message, Role, SuggestedQuestion};

#[cfg(test)]
mod tests;
