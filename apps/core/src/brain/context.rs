//! Conversation lookback.
//!
//! The one place history influences output: short affirmative replies are
//! resolved against the most recent bot turn. History is caller-owned and
//! passed explicitly; nothing here holds conversation state.

use crate::models::{ConversationTurn, Sender};

/// Most recent bot turn, scanning history from the end.
pub fn last_bot_turn(history: &[ConversationTurn]) -> Option<&ConversationTurn> {
    history.iter().rev().find(|turn| turn.sender == Sender::Bot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        assert!(last_bot_turn(&[]).is_none());
    }

    #[test]
    fn test_user_only_history() {
        let history = vec![
            ConversationTurn::user("hello"),
            ConversationTurn::user("any spa hotels?"),
        ];
        assert!(last_bot_turn(&history).is_none());
    }

    #[test]
    fn test_finds_most_recent_bot_turn() {
        let history = vec![
            ConversationTurn::bot("chat.greeting", vec![], vec![]),
            ConversationTurn::user("spa hotels"),
            ConversationTurn::bot(
                "chat.category.spa",
                vec!["hilton-dead-sea".to_string()],
                vec![],
            ),
            ConversationTurn::user("yes"),
        ];
        let turn = last_bot_turn(&history).expect("bot turn present");
        assert_eq!(turn.text, "chat.category.spa");
        assert_eq!(turn.hotels, vec!["hilton-dead-sea"]);
    }
}
