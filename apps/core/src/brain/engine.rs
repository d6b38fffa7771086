//! Concierge Engine
//!
//! Orchestrates the pipeline: normalize once, extract the destination
//! entity once, then walk the rule cascade and hand the first match to the
//! composer. Stateless across calls; the catalog, alias, and rule tables
//! are fixed at construction, so concurrent callers need no locking.

use std::sync::Arc;

use tracing::debug;

use super::compose::{Composer, Localizer};
use super::destinations::DestinationTable;
use super::normalize::normalize;
use super::rules::{default_rules, IntentRule, RuleAction, RuleInput};
use crate::catalog::Catalog;
use crate::models::{ConversationTurn, ResponsePayload};

/// Deterministic intent-resolution engine behind the chat assistant.
pub struct ConciergeEngine {
    catalog: Arc<Catalog>,
    destinations: DestinationTable,
    rules: Vec<IntentRule>,
    composer: Composer,
}

impl ConciergeEngine {
    /// Engine with the default cascade and destination table.
    ///
    /// `localize` resolves localization keys into display copy for
    /// suggestion chips and fixed-link labels; the reply copy itself is
    /// returned as an unresolved `text_key`.
    pub fn new(
        catalog: Catalog,
        localize: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::with_rules(catalog, localize, default_rules())
    }

    /// Engine with a caller-supplied rule table. Rules are sorted by
    /// ascending priority; ties keep their given order.
    pub fn with_rules(
        catalog: Catalog,
        localize: impl Fn(&str) -> String + Send + Sync + 'static,
        mut rules: Vec<IntentRule>,
    ) -> Self {
        rules.sort_by_key(|rule| rule.priority);
        let catalog = Arc::new(catalog);
        let localize: Localizer = Arc::new(localize);
        Self {
            composer: Composer::new(Arc::clone(&catalog), localize),
            destinations: DestinationTable::default(),
            rules,
            catalog,
        }
    }

    /// Replace the destination alias table.
    pub fn with_destinations(mut self, destinations: DestinationTable) -> Self {
        self.destinations = destinations;
        self
    }

    /// The injected catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve one user message against the conversation history.
    ///
    /// Total over its input domain: any string (empty, arbitrarily long,
    /// mixed-script) and any history yield a valid payload; no error ever
    /// propagates. History is read-only and consulted solely by the
    /// affirmative rule.
    pub fn classify(
        &self,
        message: &str,
        history: &[ConversationTurn],
    ) -> ResponsePayload {
        let normalized = normalize(message);
        let destination = self.destinations.extract(&normalized);
        let input = RuleInput {
            raw: message,
            normalized: &normalized,
            destination,
        };

        for rule in &self.rules {
            if (rule.predicate)(&input) {
                debug!(
                    rule = rule.name,
                    destination = input.destination,
                    "intent resolved"
                );
                return self.composer.produce(rule.action, &input, history);
            }
        }

        // The default table ends in a catch-all; a custom table may not.
        debug!("no rule matched; falling back to not-found");
        self.composer.produce(RuleAction::NotFound, &input, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::jordan_catalog;

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConciergeEngine>();
    }

    #[test]
    fn test_custom_rule_table_without_catch_all() {
        let rules = vec![IntentRule {
            name: "greeting",
            priority: 1,
            predicate: |input: &RuleInput<'_>| input.normalized == "hello",
            action: RuleAction::Greeting,
        }];
        let engine = ConciergeEngine::with_rules(jordan_catalog(), |k| k.to_string(), rules);

        let payload = engine.classify("hello", &[]);
        assert_eq!(payload.text_key, crate::brain::compose::keys::GREETING);

        // No rule matches; the engine still answers.
        let payload = engine.classify("anything else", &[]);
        assert_eq!(payload.text_key, crate::brain::compose::keys::NOT_FOUND);
        assert!(!payload.suggestions.is_empty());
    }
}
