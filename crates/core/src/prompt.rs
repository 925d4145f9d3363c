use std::fmt::Write as _;

use crate::transcript::{Role, Turn};

/// Renders the history and the new input into a single completion prompt.
///
/// Every prior turn becomes a `"<Label>: <content>\n"` line, followed by
/// the new input as a human line and a bare `"Assistant:"` cue with no
/// trailing newline. The model was tuned against exactly this layout.
pub fn format_prompt(history: &[Turn], new_input: &str) -> String {
    let mut prompt = String::new();
    for turn in history {
        // Writing into a `String` never fails.
        let _ = writeln!(prompt, "{}: {}", turn.role().label(), turn.content());
    }
    let _ = write!(
        prompt,
        "{}: {new_input}\n{}:",
        Role::User.label(),
        Role::Assistant.label()
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_prior_turn() {
        let history = [Turn::new(Role::User, "hi")];
        assert_eq!(
            format_prompt(&history, "how are you"),
            "Human: hi\nHuman: how are you\nAssistant:"
        );
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(format_prompt(&[], "hello"), "Human: hello\nAssistant:");
    }

    #[test]
    fn test_alternating_turns() {
        let history = [
            Turn::new(Role::User, "What is 2+2?"),
            Turn::new(Role::Assistant, "4"),
            Turn::new(Role::User, "And 3+3?"),
            Turn::new(Role::Assistant, "6"),
        ];
        let prompt = format_prompt(&history, "Thanks");
        assert_eq!(
            prompt,
            "Human: What is 2+2?\n\
             Assistant: 4\n\
             Human: And 3+3?\n\
             Assistant: 6\n\
             Human: Thanks\n\
             Assistant:"
        );
        assert!(!prompt.ends_with('\n'));
    }

    #[test]
    fn test_deterministic() {
        let history = [
            Turn::new(Role::User, "a"),
            Turn::new(Role::Assistant, "b"),
        ];
        assert_eq!(format_prompt(&history, "c"), format_prompt(&history, "c"));
    }
}
