//! # Brain Module
//!
//! Deterministic, rule-based intent resolution for the chat assistant.
//! No ML model required - pure normalization, edit-distance matching, and
//! an ordered predicate cascade.
//!
//! ## Components
//! - `normalize`: canonical text form (diacritics, case, punctuation)
//! - `matcher`: Levenshtein distance and bounded fuzzy containment
//! - `destinations`: destination entity extraction from an alias table
//! - `rules`: the ordered intent cascade as a data table
//! - `context`: conversation lookback for short affirmative replies
//! - `compose`: intent to response-payload mapping
//! - `engine`: the orchestrator tying the pipeline together

pub mod compose;
pub mod context;
pub mod destinations;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod rules;

// Re-export main types for convenience
pub use compose::Localizer;
pub use destinations::{DestinationEntry, DestinationTable, Locale};
pub use engine::ConciergeEngine;
pub use matcher::{fuzzy_includes, levenshtein};
pub use normalize::normalize;
pub use rules::{IntentRule, NavTarget, RuleAction, RuleInput};
