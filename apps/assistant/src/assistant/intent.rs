//! Intent Classification.
//!
//! Deterministic weighted rule engine over the site's topic taxonomy. Scores
//! normalized input against the pattern tables and returns a primary intent
//! with an explainable 0-100 confidence, plus up to three secondary intents.
//! The same input always reproduces the same scores and labels.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::patterns;

/// Weight of the keyword score in the combined score.
const KEYWORD_MIX: f32 = 0.4;
/// Weight of the pattern score in the combined score.
const PATTERN_MIX: f32 = 0.6;
/// Points contributed by each matching pattern rule, capped at 100.
const PATTERN_MATCH_UNIT: f32 = 50.0;
/// Multiplier applied when the utterance never references the subject.
const SUBJECT_PENALTY: f32 = 0.5;
/// Scores below this floor resolve to `Intent::Unknown`.
const CONFIDENCE_FLOOR: f32 = 20.0;
/// Secondary intents must reach this fraction of the primary score.
const SECONDARY_RATIO: f32 = 0.7;
/// Maximum number of secondary intents reported.
const MAX_SECONDARY: usize = 3;
/// Greeting scores are damped beyond this utterance length.
const GREETING_MAX_CHARS: usize = 30;
/// Complex scores are damped below this utterance length.
const COMPLEX_MIN_CHARS: usize = 100;
const GREETING_DAMPING: f32 = 0.3;
const COMPLEX_DAMPING: f32 = 0.4;

/// Topic taxonomy for the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Clinical practice, conditions treated, protocols.
    Clinical,
    /// Research, publications, methodology.
    Research,
    /// Founded companies and business ventures.
    Ventures,
    /// Health-technology work (telehealth, wearables, analytics).
    Technology,
    /// Conference talks, keynotes, workshops.
    Speaking,
    /// Press, podcasts, interviews.
    Media,
    /// How to get in touch.
    Contact,
    /// Where the practice is located.
    Location,
    /// Biography and background.
    About,
    /// Credentials, CV, certifications.
    Resume,
    /// Casual greeting.
    Greeting,
    /// Not about the subject at all.
    OffTopic,
    /// Long personalized narrative that needs a human.
    Complex,
    /// Questions about the assistant itself.
    Identity,
    /// Nothing reached the confidence floor.
    Unknown,
}

impl Intent {
    /// All scorable categories, in tie-breaking order. `Unknown` is the
    /// fallback and never scored directly.
    pub const SCORED: &'static [Intent] = &[
        Intent::Clinical,
        Intent::Research,
        Intent::Ventures,
        Intent::Technology,
        Intent::Speaking,
        Intent::Media,
        Intent::Contact,
        Intent::Location,
        Intent::About,
        Intent::Resume,
        Intent::Greeting,
        Intent::OffTopic,
        Intent::Complex,
        Intent::Identity,
    ];

    /// Returns a stable label for the intent.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Clinical => "clinical",
            Intent::Research => "research",
            Intent::Ventures => "ventures",
            Intent::Technology => "technology",
            Intent::Speaking => "speaking",
            Intent::Media => "media",
            Intent::Contact => "contact",
            Intent::Location => "location",
            Intent::About => "about",
            Intent::Resume => "resume",
            Intent::Greeting => "greeting",
            Intent::OffTopic => "off_topic",
            Intent::Complex => "complex",
            Intent::Identity => "identity",
            Intent::Unknown => "unknown",
        }
    }

    /// Topics with progressively deeper content tiers.
    pub fn is_tiered(&self) -> bool {
        matches!(
            self,
            Intent::Clinical | Intent::Research | Intent::Ventures | Intent::Technology
        )
    }

    /// Topics answered by a single canonical block with phrasing variants.
    pub fn is_single_answer(&self) -> bool {
        matches!(
            self,
            Intent::Speaking
                | Intent::Media
                | Intent::Contact
                | Intent::Location
                | Intent::About
                | Intent::Resume
                | Intent::Identity
        )
    }

    /// Interaction categories that are exempt from the subject-reference
    /// penalty. They describe the utterance itself, not the subject.
    fn is_interactional(&self) -> bool {
        matches!(self, Intent::Greeting | Intent::OffTopic | Intent::Complex)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of intent classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    /// Highest-scoring intent.
    pub primary: Intent,
    /// Confidence score (0-100).
    pub confidence: f32,
    /// Runners-up scoring at least 70% of the primary, ordered by score,
    /// at most three.
    pub secondary: Vec<Intent>,
}

impl IntentResult {
    /// The result used when nothing scores above the floor.
    pub fn unknown() -> Self {
        Self {
            primary: Intent::Unknown,
            confidence: 0.0,
            secondary: vec![],
        }
    }
}

/// Score adjustment applied after the combined score is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Adjustment {
    None,
    /// Damp unless the text is short and opens with a greeting.
    Greeting,
    /// Damp unless the text is long enough to be a real narrative.
    Complex,
}

/// One category's rule set: keyword list plus pattern library.
struct CategoryRule {
    intent: Intent,
    keywords: &'static [&'static str],
    patterns: Vec<Regex>,
    adjustment: Adjustment,
}

/// Table-driven intent classifier over the full taxonomy.
pub struct IntentClassifier {
    rules: Vec<CategoryRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with one rule entry per scored category.
    pub fn new() -> Self {
        let rules = vec![
            CategoryRule {
                intent: Intent::Clinical,
                keywords: patterns::CLINICAL_KEYWORDS,
                patterns: patterns::CLINICAL_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Research,
                keywords: patterns::RESEARCH_KEYWORDS,
                patterns: patterns::RESEARCH_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Ventures,
                keywords: patterns::VENTURES_KEYWORDS,
                patterns: patterns::VENTURES_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Technology,
                keywords: patterns::TECHNOLOGY_KEYWORDS,
                patterns: patterns::TECHNOLOGY_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Speaking,
                keywords: patterns::SPEAKING_KEYWORDS,
                patterns: patterns::SPEAKING_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Media,
                keywords: patterns::MEDIA_KEYWORDS,
                patterns: patterns::MEDIA_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Contact,
                keywords: patterns::CONTACT_KEYWORDS,
                patterns: patterns::CONTACT_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Location,
                keywords: patterns::LOCATION_KEYWORDS,
                patterns: patterns::LOCATION_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::About,
                keywords: patterns::ABOUT_KEYWORDS,
                patterns: patterns::ABOUT_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Resume,
                keywords: patterns::RESUME_KEYWORDS,
                patterns: patterns::RESUME_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Greeting,
                keywords: patterns::GREETING_KEYWORDS,
                patterns: patterns::GREETING_PATTERNS.clone(),
                adjustment: Adjustment::Greeting,
            },
            CategoryRule {
                intent: Intent::OffTopic,
                keywords: patterns::OFF_TOPIC_KEYWORDS,
                patterns: patterns::OFF_TOPIC_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
            CategoryRule {
                intent: Intent::Complex,
                keywords: patterns::COMPLEX_KEYWORDS,
                patterns: patterns::COMPLEX_PATTERNS.clone(),
                adjustment: Adjustment::Complex,
            },
            CategoryRule {
                intent: Intent::Identity,
                keywords: patterns::IDENTITY_KEYWORDS,
                patterns: patterns::IDENTITY_PATTERNS.clone(),
                adjustment: Adjustment::None,
            },
        ];

        Self { rules }
    }

    /// Weighted fraction of the keyword list present as substrings of the
    /// normalized text. Longer keywords are rarer and count more.
    fn keyword_score(text: &str, keywords: &[&str]) -> f32 {
        if keywords.is_empty() {
            return 0.0;
        }
        let weight = |k: &str| (0.3 + k.chars().count() as f32 / 20.0).min(1.0);

        let total: f32 = keywords.iter().map(|k| weight(k)).sum();
        let matched: f32 = keywords
            .iter()
            .filter(|k| text.contains(**k))
            .map(|k| weight(k))
            .sum();

        if total == 0.0 {
            0.0
        } else {
            matched / total * 100.0
        }
    }

    /// Count of matching pattern rules, each worth a fixed unit, capped.
    /// Patterns are a stronger signal than bag-of-keywords.
    fn pattern_score(text: &str, rules: &[Regex]) -> f32 {
        let hits = rules.iter().filter(|p| p.is_match(text)).count();
        (hits as f32 * PATTERN_MATCH_UNIT).min(100.0)
    }

    /// Classify a free-text utterance.
    pub fn classify(&self, text: &str) -> IntentResult {
        let normalized = patterns::normalize(text);
        if normalized.is_empty() {
            return IntentResult::unknown();
        }

        let chars = normalized.chars().count();
        let has_subject = patterns::references_subject(&normalized);

        let mut scores: Vec<(Intent, f32)> = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let kw = Self::keyword_score(&normalized, rule.keywords);
            let pat = Self::pattern_score(&normalized, &rule.patterns);
            let mut combined = KEYWORD_MIX * kw + PATTERN_MIX * pat;

            // Generic vocabulary must not hijack classification when the
            // question is not actually about the subject.
            if !rule.intent.is_interactional() && !has_subject {
                combined *= SUBJECT_PENALTY;
            }

            match rule.adjustment {
                Adjustment::Greeting => {
                    if chars > GREETING_MAX_CHARS || !patterns::starts_with_greeting(&normalized) {
                        combined *= GREETING_DAMPING;
                    }
                }
                Adjustment::Complex => {
                    if chars < COMPLEX_MIN_CHARS {
                        combined *= COMPLEX_DAMPING;
                    }
                }
                Adjustment::None => {}
            }

            scores.push((rule.intent, combined));
        }

        // Argmax; ties resolve to the earliest category in table order.
        let (primary, best) = scores
            .iter()
            .copied()
            .fold((Intent::Unknown, 0.0_f32), |(bi, bs), (i, s)| {
                if s > bs {
                    (i, s)
                } else {
                    (bi, bs)
                }
            });

        if best < CONFIDENCE_FLOOR {
            return IntentResult::unknown();
        }

        let mut secondary: Vec<(Intent, f32)> = scores
            .into_iter()
            .filter(|(i, s)| *i != primary && *s >= SECONDARY_RATIO * best)
            .collect();
        secondary.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        IntentResult {
            primary,
            confidence: best.min(100.0),
            secondary: secondary
                .into_iter()
                .take(MAX_SECONDARY)
                .map(|(i, _)| i)
                .collect(),
        }
    }
}
