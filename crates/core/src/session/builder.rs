use banter_model::{ApiKey, CompletionProvider};

use super::{ChatSession, Stage};
use crate::completion::CompletionClient;
use crate::transcript::Transcript;

/// [`ChatSession`] builder.
pub struct ChatSessionBuilder {
    client: CompletionClient,
    api_key: Option<ApiKey>,
    on_stage_change: Option<Box<dyn Fn(Stage) + Send + Sync>>,
}

impl ChatSessionBuilder {
    /// Creates a new builder with the specified completion provider.
    #[inline]
    pub fn with_provider<P: CompletionProvider + 'static>(provider: P) -> Self {
        Self {
            client: CompletionClient::new(provider),
            api_key: None,
            on_stage_change: None,
        }
    }

    /// Sets the credential sent with every call.
    #[inline]
    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Attaches a callback to be invoked whenever the stage changes.
    #[inline]
    pub fn on_stage_change(
        mut self,
        on_stage_change: impl Fn(Stage) + Send + Sync + 'static,
    ) -> Self {
        self.on_stage_change = Some(Box::new(on_stage_change));
        self
    }

    /// Builds the session.
    #[inline]
    pub fn build(self) -> ChatSession {
        let ChatSessionBuilder {
            client,
            api_key,
            on_stage_change,
        } = self;

        ChatSession {
            client,
            api_key,
            transcript: Transcript::new(),
            stage: Stage::Idle,
            on_stage_change,
        }
    }
}
