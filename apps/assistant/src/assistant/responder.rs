//! Response Generation.
//!
//! Maps each intent to pre-authored content blocks: tiered topics advance
//! through the depth state machine, single-answer topics pick a phrasing
//! variant. Consults the session's shown-content set so nothing is repeated,
//! and records everything it emits.

use crate::error::AssistantError;

use super::content;
use super::context::{DepthState, SessionContext};
use super::intent::Intent;
use super::variants::{RandomChooser, VariantChooser};

/// Per-intent, per-depth content selection.
pub struct ResponseGenerator {
    chooser: Box<dyn VariantChooser>,
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseGenerator {
    /// Generator with the default random variant chooser.
    pub fn new() -> Self {
        Self {
            chooser: Box::new(RandomChooser::new()),
        }
    }

    /// Generator with an injected chooser (seeded or fixed in tests).
    pub fn with_chooser(chooser: Box<dyn VariantChooser>) -> Self {
        Self { chooser }
    }

    /// Pick a phrasing variant, preferring ones not used yet this session.
    fn pick_variant(&mut self, pool: &'static [&'static str], ctx: &SessionContext) -> String {
        let unused: Vec<&'static str> = pool
            .iter()
            .copied()
            .filter(|v| !ctx.phrase_used(v))
            .collect();
        let candidates: &[&'static str] = if unused.is_empty() { pool } else { &unused };
        let idx = self.chooser.choose(candidates.len());
        candidates[idx].to_string()
    }

    /// Greeting response.
    pub fn greeting(&mut self, ctx: &mut SessionContext) -> String {
        let text = self.pick_variant(content::GREETING_VARIANTS, ctx);
        ctx.mark_phrase_used(&text);
        text
    }

    /// Off-topic response. Rotates through the pool without immediate
    /// repeats; once the pool is exhausted the rotation resets.
    pub fn off_topic(&mut self, ctx: &mut SessionContext) -> String {
        let unused: Vec<&'static str> = content::OFF_TOPIC_VARIANTS
            .iter()
            .copied()
            .filter(|v| !ctx.off_topic_used(v))
            .collect();

        let candidates: Vec<&'static str> = if unused.is_empty() {
            ctx.reset_off_topic_rotation();
            content::OFF_TOPIC_VARIANTS.to_vec()
        } else {
            unused
        };

        let idx = self.chooser.choose(candidates.len());
        let text = candidates[idx].to_string();
        ctx.record_off_topic(&text);
        text
    }

    /// "I don't have that information" response for personal questions,
    /// rotated to avoid immediate repetition.
    pub fn personal_unanswerable(&mut self, ctx: &mut SessionContext) -> String {
        let text = self.pick_variant(content::PERSONAL_UNANSWERABLE_VARIANTS, ctx);
        ctx.mark_phrase_used(&text);
        text
    }

    /// Clarifying response when nothing classified confidently.
    pub fn clarify(&mut self, ctx: &mut SessionContext) -> String {
        let text = self.pick_variant(content::CLARIFY_VARIANTS, ctx);
        ctx.mark_phrase_used(&text);
        text
    }

    /// Redirect to the human-contact path for overly complex narratives.
    /// Deliberately contains no clinical recommendation.
    pub fn complex_redirect(&mut self, ctx: &mut SessionContext) -> String {
        let text = self.pick_variant(content::COMPLEX_REDIRECT_VARIANTS, ctx);
        ctx.mark_phrase_used(&text);
        text
    }

    /// Protocol answer for a named condition, with the medical disclaimer
    /// appended. Unknown conditions fall back to the clinical overview tier.
    pub fn condition_response(
        &mut self,
        condition: &str,
        ctx: &mut SessionContext,
    ) -> Result<String, AssistantError> {
        let base = match content::condition_answer(condition) {
            Some(answer) => answer,
            None => content::tiers(Intent::Clinical)?
                .first()
                .copied()
                .ok_or_else(|| AssistantError::MissingTier {
                    topic: Intent::Clinical.label().to_string(),
                    tier: 0,
                })?,
        };
        ctx.record_entity(condition);
        ctx.record_shown_content(base);

        let mut text = base.to_string();
        text.push_str(content::MEDICAL_DISCLAIMER);
        Ok(text)
    }

    /// Canonical answer for a single-answer topic, phrasing varied.
    pub fn canonical(
        &mut self,
        topic: Intent,
        ctx: &mut SessionContext,
    ) -> Result<String, AssistantError> {
        let pool = content::canonical_variants(topic)?;
        let text = self.pick_variant(pool, ctx);
        ctx.mark_phrase_used(&text);
        ctx.mark_topic_shown(topic);
        ctx.record_shown_content(&text);
        Ok(text)
    }

    /// Next content tier for a deep-divable topic, advancing the depth state
    /// machine. Tiers whose content was already shown through another path
    /// are skipped; past the last tier the exhausted fallback takes over.
    pub fn tiered(
        &mut self,
        topic: Intent,
        ctx: &mut SessionContext,
    ) -> Result<String, AssistantError> {
        let tiers = content::tiers(topic)?;
        let highest = tiers.len() - 1;

        loop {
            match ctx.depth_state(topic, highest) {
                DepthState::Tier(depth) => {
                    let block = tiers
                        .get(depth)
                        .copied()
                        .ok_or_else(|| AssistantError::MissingTier {
                            topic: topic.label().to_string(),
                            tier: depth,
                        })?;
                    ctx.advance_depth(topic);
                    if ctx.is_duplicate_content(block) {
                        continue;
                    }
                    ctx.mark_topic_shown(topic);
                    ctx.record_shown_content(block);
                    return Ok(block.to_string());
                }
                DepthState::Exhausted => return Ok(self.exhausted_fallback(topic, ctx)),
            }
        }
    }

    /// Fallback once a topic's tiers are spent.
    ///
    /// If the topic was never genuinely introduced (its depth was only ever
    /// queried defensively), the first real request still deserves content:
    /// emit tier 0 instead of an empty "nothing more to say" answer.
    /// Otherwise offer the topics not discussed yet.
    fn exhausted_fallback(&mut self, topic: Intent, ctx: &mut SessionContext) -> String {
        if !ctx.topic_introduced(topic) {
            if let Some(block) = content::tiers(topic).ok().and_then(|t| t.first().copied()) {
                ctx.mark_topic_shown(topic);
                ctx.record_shown_content(block);
                return block.to_string();
            }
        }

        let remaining: Vec<&(Intent, &str, &str)> = content::TOPIC_MENU
            .iter()
            .filter(|(t, _, _)| !ctx.topic_introduced(*t))
            .collect();

        if remaining.is_empty() {
            return content::EXHAUSTED_ALL_COVERED.to_string();
        }

        let mut out = String::from(content::EXHAUSTED_LEAD);
        out.push('\n');
        for (i, (_, label, path)) in remaining.iter().enumerate() {
            out.push_str(&format!("{}. {} [LINK:{}:{}]\n", i + 1, label, path, label));
        }
        out.push_str(content::EXHAUSTED_CLOSE);
        out
    }
}
