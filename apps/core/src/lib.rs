//! # TripChat Concierge Brain
//!
//! The intent-resolution engine behind the TripChat storefront's chat
//! assistant. A message and the caller-owned conversation history go in;
//! a structured reply (localization key, recommended hotel ids, links,
//! suggestion chips) comes out. Pure, synchronous, and stateless across
//! calls - the surrounding app owns the widget, the history, the catalog
//! data, and the localization strings.

pub mod brain;
pub mod catalog;
pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use brain::compose::Localizer;
pub use brain::destinations::{DestinationEntry, DestinationTable, Locale};
pub use brain::engine::ConciergeEngine;
pub use brain::rules::{IntentRule, RuleAction, RuleInput};
pub use catalog::Catalog;
pub use error::CatalogLookupMiss;
pub use models::{CatalogEntry, ConversationTurn, Link, ResponsePayload, Sender};
