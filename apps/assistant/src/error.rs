use thiserror::Error;

/// Errors raised by the content catalog and response pipeline.
///
/// The turn pipeline itself is total: the engine converts any of these into a
/// user-visible fallback response instead of letting a turn fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssistantError {
    /// A topic was requested that the content catalog does not know about.
    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    /// A tiered topic was asked for a tier beyond its authored content.
    #[error("Missing content tier {tier} for topic {topic}")]
    MissingTier { topic: String, tier: usize },

    /// A phrasing pool was empty, which indicates a catalog authoring bug.
    #[error("Empty variant pool: {0}")]
    EmptyVariantPool(String),
}
