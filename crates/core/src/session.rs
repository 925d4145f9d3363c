mod builder;

use std::io;
use std::path::{Path, PathBuf};

use banter_model::ApiKey;
use chrono::Local;

use crate::completion::CompletionClient;
use crate::error::{ChatError, ERROR_MARKER};
use crate::persist;
use crate::prompt::format_prompt;
use crate::transcript::{Role, Transcript};
pub use builder::ChatSessionBuilder;

/// Where a session is within a submission.
///
/// A submission goes `Idle -> AwaitingResponse -> Rendered | ErrorShown`,
/// and then back to `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Ready for the next submission.
    #[default]
    Idle,
    /// The completion call is outstanding.
    AwaitingResponse,
    /// A reply was produced.
    Rendered,
    /// The submission failed, an error is shown instead of a reply.
    ErrorShown,
}

/// One interactive chat session.
///
/// The session exclusively owns its transcript and its credential, it is
/// created at session start and dropped at session end. Submissions take
/// `&mut self`, so there is never more than one call in flight.
pub struct ChatSession {
    client: CompletionClient,
    api_key: Option<ApiKey>,
    transcript: Transcript,
    stage: Stage,

    on_stage_change: Option<Box<dyn Fn(Stage) + Send + Sync>>,
}

impl ChatSession {
    /// Sends the user input and returns the reply to display.
    ///
    /// Without a credential nothing is recorded and no call is made. If the
    /// call fails, the user turn stays recorded but no assistant turn is
    /// added. A reply that starts with [`ERROR_MARKER`] is returned for
    /// display, but never recorded either.
    pub async fn submit(&mut self, input: &str) -> Result<String, ChatError> {
        let Some(api_key) = self.api_key.clone() else {
            warn!("rejecting submission, no API key configured");
            return Err(ChatError::configuration("no API key configured"));
        };

        // The prompt is rendered from the full history, which already
        // ends with this input, and then the input once more.
        self.transcript.append(Role::User, input);
        let prompt = format_prompt(self.transcript.turns(), input);
        self.set_stage(Stage::AwaitingResponse);

        let result = self.client.complete(prompt, &api_key).await;
        match &result {
            Ok(reply) => {
                if reply.starts_with(ERROR_MARKER) {
                    warn!("reply looks like an error, not recording it");
                } else {
                    self.transcript.append(Role::Assistant, reply.as_str());
                }
                self.set_stage(Stage::Rendered);
            }
            Err(err) => {
                debug!("submission failed: {err}");
                self.set_stage(Stage::ErrorShown);
            }
        }
        self.set_stage(Stage::Idle);

        result
    }

    /// Forgets the whole conversation.
    #[inline]
    pub fn reset(&mut self) {
        debug!("clearing {} turns", self.transcript.len());
        self.transcript.clear();
    }

    /// Saves the conversation into `dir`, see
    /// [`persist::save_conversation`].
    pub fn save(&self, dir: &Path) -> io::Result<Option<PathBuf>> {
        persist::save_conversation(self.transcript.turns(), dir, Local::now())
    }

    /// Returns the recorded conversation.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the current stage.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns `true` if the session can make calls at all.
    #[inline]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn set_stage(&mut self, stage: Stage) {
        trace!("stage: {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
        if let Some(on_stage_change) = &self.on_stage_change {
            on_stage_change(stage);
        }
    }
}
