//! Test Module
//!
//! Scenario suite for the assistant core, exercising the full turn pipeline
//! the way the site embeds it.
//!
//! ## Test Categories
//! - `engine_tests`: single-turn behavior, detector priority, error taxonomy
//! - `conversation_tests`: multi-turn depth progression, dedup, suggestions

pub mod engine_tests;
