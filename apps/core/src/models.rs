//! Boundary data model shared with the chat UI.
//!
//! Conversation history is owned by the caller and only ever read here;
//! the engine's sole output is [`ResponsePayload`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One message in a chat session, user or bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who authored the turn.
    pub sender: Sender,
    /// Raw message text as displayed.
    pub text: String,
    /// Catalog ids recommended in this turn (bot turns only).
    #[serde(default)]
    pub hotels: Vec<String>,
    /// Suggestion chips offered with this turn (bot turns only).
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// When the turn was appended to the session.
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// A user turn stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            hotels: vec![],
            suggestions: vec![],
            timestamp: Utc::now(),
        }
    }

    /// A bot turn carrying its recommendations and follow-up chips.
    pub fn bot(text: impl Into<String>, hotels: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            hotels,
            suggestions,
            timestamp: Utc::now(),
        }
    }
}

/// Navigation target attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Resolved label shown on the chip or button.
    pub label: String,
    /// In-app route, e.g. `/hotels/petra-marriott` or `/checkout`.
    pub to: String,
}

/// Structured reply produced by [`crate::ConciergeEngine::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// Localization key for the reply copy; the caller's resolver turns it
    /// into display text.
    pub text_key: String,
    /// Recommended catalog ids. Every id is guaranteed to exist in the
    /// injected catalog; unknown ids from static mappings are dropped.
    #[serde(default)]
    pub hotels: Vec<String>,
    /// Navigation links, one per hotel for hotel-bearing replies.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Follow-up suggestion chips. Always present, possibly empty.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ResponsePayload {
    pub(crate) fn new(text_key: impl Into<String>) -> Self {
        Self {
            text_key: text_key.into(),
            hotels: vec![],
            links: vec![],
            suggestions: vec![],
        }
    }

    /// True when the reply carries no recommendations or links.
    pub fn is_empty_handed(&self) -> bool {
        self.hotels.is_empty() && self.links.is_empty()
    }

    /// One-line form for log output.
    pub fn summary(&self) -> String {
        format!(
            "key={} hotels={} links={} suggestions={}",
            self.text_key,
            self.hotels.len(),
            self.links.len(),
            self.suggestions.len()
        )
    }
}

/// One bookable property in the injected catalog. Read-only after
/// construction; `id` is globally unique and stable across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable unique id, also used in `/hotels/{id}` routes.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Destination keys and themes, e.g. `"petra"`, `"spa"`.
    #[serde(default)]
    pub tags: HashSet<String>,
    /// Short selling points shown on property cards.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Search keywords matched by the booking and gallery rules.
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let user = ConversationTurn::user("hi");
        assert_eq!(user.sender, Sender::User);
        assert!(user.hotels.is_empty());

        let bot = ConversationTurn::bot(
            "chat.greeting",
            vec!["petra-marriott".to_string()],
            vec!["chat.suggest.deals".to_string()],
        );
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.hotels.len(), 1);
    }

    #[test]
    fn test_payload_helpers() {
        let payload = ResponsePayload::new("chat.not_found");
        assert!(payload.is_empty_handed());
        assert!(payload.summary().contains("key=chat.not_found"));
    }

    #[test]
    fn test_turn_deserializes_without_optional_fields() {
        let turn: ConversationTurn = serde_json::from_str(
            r#"{"sender":"user","text":"hello","timestamp":"2026-01-01T00:00:00Z"}"#,
        )
        .expect("turn should deserialize");
        assert_eq!(turn.sender, Sender::User);
        assert!(turn.hotels.is_empty());
        assert!(turn.suggestions.is_empty());
    }
}
