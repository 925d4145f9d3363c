//! Transcript-related types.

use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing.
    User,
    /// The model.
    Assistant,
}

impl Role {
    /// Returns the speaker label used when rendering the prompt.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "Human",
            Role::Assistant => "Assistant",
        }
    }
}

/// One message in the conversation.
///
/// Turns are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    /// Creates a new turn.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Returns the author of this turn.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text of this turn.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The ordered turns of one session.
///
/// The same list feeds both the prompt and the display, so the two can
/// never drift apart. It only grows by appending, and is only ever
/// emptied as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a turn to the end.
    pub fn append<S: Into<String>>(&mut self, role: Role, content: S) {
        let turn = Turn::new(role, content);
        trace!("appending turn: {turn:?}");
        self.turns.push(turn);
    }

    /// Removes every turn.
    #[inline]
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Returns a copy of the current turns. Later appends are not
    /// reflected in it.
    #[inline]
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Returns the current turns for rendering.
    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the latest turn, if any.
    #[inline]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Returns the number of turns.
    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if there are no turns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
