use banter_model::EnvelopeError;
use thiserror::Error;

/// The prefix every rendered error starts with.
///
/// Replies starting with it are never recorded in the transcript.
pub const ERROR_MARKER: &str = "Error:";

/// Errors surfaced to the user in place of an assistant reply.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The session is missing something it needs before calling out,
    /// typically the credential.
    #[error("Error: {0}")]
    Configuration(String),

    /// The completion call could not complete.
    #[error("Error: {0}")]
    Transport(String),

    /// The call completed, but the envelope was not what we expected.
    #[error("Error: {error}\nAPI response: {raw}")]
    ResponseFormat {
        /// What was wrong with the envelope.
        #[source]
        error: EnvelopeError,
        /// The envelope as received, for diagnosis.
        raw: String,
    },
}

impl ChatError {
    /// Creates a `Configuration` error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a `Transport` error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Returns `true` if this error was raised before any call was made.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
