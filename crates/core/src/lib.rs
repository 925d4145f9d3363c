//! Core logic of the chat front-end: the transcript, prompt rendering, the
//! completion client and the session that ties them together.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod completion;
mod error;
pub mod persist;
mod prompt;
mod session;
pub mod transcript;

pub use completion::{CompletionClient, sampling_params};
pub use error::{ChatError, ERROR_MARKER};
pub use prompt::format_prompt;
pub use session::{ChatSession, ChatSessionBuilder, Stage};
pub use transcript::{Role, Transcript, Turn};
