use std::pin::Pin;
use std::sync::Arc;

use banter_model::{
    ApiKey, CompletionEnvelope, CompletionProvider, CompletionRequest,
    EnvelopeError, ErrorKind, ProviderError, SamplingParams,
};
use tracing::Instrument;

use crate::error::ChatError;

const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.7;
const TOP_K: u32 = 50;
const REPETITION_PENALTY: f32 = 1.0;
// Stop before the model invents the next human line, or rambles on
// after a blank line.
const STOP_SEQUENCES: [&str; 2] = ["Human:", "\n\n"];

/// Returns the sampling parameters every chat request is sent with.
pub fn sampling_params() -> SamplingParams {
    SamplingParams {
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        top_p: TOP_P,
        top_k: TOP_K,
        repetition_penalty: REPETITION_PENALTY,
        stop: STOP_SEQUENCES.iter().map(|s| s.to_string()).collect(),
    }
}

type CompleteResult = Result<String, ChatError>;
type BoxedCompleteFuture = Pin<Box<dyn Future<Output = CompleteResult> + Send>>;
#[rustfmt::skip]
type HandlerFn = Arc<
    dyn Fn(CompletionRequest, ApiKey) -> BoxedCompleteFuture + Send + Sync
>;

/// A wrapper around a completion provider that turns a prompt into the
/// reply text, and provides a type-erased interface for the session.
///
/// Every call is made exactly once, failures are never retried.
#[derive(Clone)]
pub struct CompletionClient {
    handler_fn: HandlerFn,
}

impl CompletionClient {
    /// Creates a client on top of the given provider.
    #[inline]
    pub fn new<P: CompletionProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since the session doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req, api_key| {
            let fut = provider.complete(&req, &api_key);
            Box::pin(
                async move {
                    trace!("sent a request: {:?}", req);
                    let envelope_or_err = fut.await;
                    handle_envelope::<P>(envelope_or_err)
                }
                .instrument(debug_span!("completion req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends the prompt and returns the generated text, trimmed of
    /// surrounding whitespace.
    #[inline]
    pub async fn complete(
        &self,
        prompt: String,
        api_key: &ApiKey,
    ) -> Result<String, ChatError> {
        let req = CompletionRequest {
            prompt,
            sampling: sampling_params(),
        };
        (self.handler_fn)(req, api_key.clone()).await
    }
}

fn handle_envelope<P: CompletionProvider + 'static>(
    envelope_or_err: Result<CompletionEnvelope, P::Error>,
) -> CompleteResult {
    let envelope = match envelope_or_err {
        Ok(envelope) => envelope,
        Err(err) => {
            error!("got an error: {err:?}");
            return Err(match err.kind() {
                ErrorKind::Transport => ChatError::transport(err.to_string()),
                ErrorKind::InvalidResponse => ChatError::ResponseFormat {
                    error: EnvelopeError::Malformed,
                    raw: err.to_string(),
                },
            });
        }
    };

    match envelope.first_choice_text() {
        Ok(text) => {
            trace!("finished a request");
            Ok(text.trim().to_owned())
        }
        Err(err) => {
            warn!("unexpected envelope ({err}): {envelope}");
            Err(ChatError::ResponseFormat {
                error: err,
                raw: envelope.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use banter_test_model::{PresetReply, TestCompletionProvider};
    use serde_json::json;

    use super::*;

    fn api_key() -> ApiKey {
        ApiKey::new("sk-test").unwrap()
    }

    #[tokio::test]
    async fn test_trims_reply() {
        let provider = TestCompletionProvider::default();
        provider.add_reply(PresetReply::Envelope(json!({
            "choices": [{ "text": " Hello there! " }]
        })));
        let client = CompletionClient::new(provider.clone());

        let reply = client
            .complete("Human: hi\nAssistant:".to_owned(), &api_key())
            .await
            .unwrap();
        assert_eq!(reply, "Hello there!");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fixed_sampling_params() {
        let provider = TestCompletionProvider::default();
        provider.add_text_reply("ok");
        let client = CompletionClient::new(provider.clone());
        client.complete("prompt".to_owned(), &api_key()).await.unwrap();

        let req = provider.requests().pop().unwrap();
        assert_eq!(req.prompt, "prompt");
        assert_eq!(req.sampling.max_tokens, 1024);
        assert_eq!(req.sampling.temperature, 0.7);
        assert_eq!(req.sampling.top_p, 0.7);
        assert_eq!(req.sampling.top_k, 50);
        assert_eq!(req.sampling.repetition_penalty, 1.0);
        assert_eq!(req.sampling.stop, ["Human:", "\n\n"]);
        assert_eq!(provider.last_api_key().as_deref(), Some("sk-test"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let provider = TestCompletionProvider::default();
        provider.add_reply(PresetReply::TransportFailure(
            "HTTP 401 Unauthorized: invalid api key".to_owned(),
        ));
        let client = CompletionClient::new(provider);

        let err = client
            .complete("prompt".to_owned(), &api_key())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ChatError::transport("HTTP 401 Unauthorized: invalid api key")
        );
    }

    #[tokio::test]
    async fn test_unexpected_shape() {
        let provider = TestCompletionProvider::default();
        provider.add_reply(PresetReply::Envelope(json!({
            "error": "model not found"
        })));
        let client = CompletionClient::new(provider);

        let err = client
            .complete("prompt".to_owned(), &api_key())
            .await
            .unwrap_err();
        let ChatError::ResponseFormat { error, raw } = err else {
            panic!("expected a response format error");
        };
        assert!(matches!(error, EnvelopeError::UnexpectedShape(_)));
        assert!(raw.contains("model not found"));
    }

    #[tokio::test]
    async fn test_malformed_envelope() {
        let provider = TestCompletionProvider::default();
        provider.add_reply(PresetReply::Envelope(json!("plain string")));
        provider
            .add_reply(PresetReply::InvalidResponse("<html>".to_owned()));
        let client = CompletionClient::new(provider);

        for _ in 0..2 {
            let err = client
                .complete("prompt".to_owned(), &api_key())
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ChatError::ResponseFormat {
                    error: EnvelopeError::Malformed,
                    ..
                }
            ));
        }
    }
}
