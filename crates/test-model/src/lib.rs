//! A local fake completion provider for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use banter_model::{
    ApiKey, CompletionEnvelope, CompletionProvider, CompletionRequest,
    ErrorKind, ProviderError,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Inner {
    script: Mutex<VecDeque<PresetReply>>,
    requests: Mutex<Vec<(CompletionRequest, String)>>,
    calls: AtomicUsize,
}

/// A local fake provider for testing purpose.
///
/// Replies are scripted up front and handed out in order, one per request.
/// Once the script runs out, every further request fails. All clones share
/// the same script and bookkeeping, so a test can keep a clone around to
/// inspect what the code under test sent.
///
/// # Note
///
/// This type is not optimized for production use, requests are copied
/// for inspection. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestCompletionProvider {
    inner: Arc<Inner>,
    delay: Option<Duration>,
}

impl TestCompletionProvider {
    /// Appends a reply to the script.
    #[inline]
    pub fn add_reply(&self, reply: PresetReply) {
        self.inner.script.lock().unwrap().push_back(reply);
    }

    /// Appends a well-formed reply with the given text.
    #[inline]
    pub fn add_text_reply<S: Into<String>>(&self, text: S) {
        self.add_reply(PresetReply::with_text(text));
    }

    /// Delays every reply by `duration`.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns how many times `complete` was invoked.
    #[inline]
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Returns the requests received so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        let requests = self.inner.requests.lock().unwrap();
        requests.iter().map(|(req, _)| req.clone()).collect()
    }

    /// Returns the credential that came with the latest request.
    pub fn last_api_key(&self) -> Option<String> {
        let requests = self.inner.requests.lock().unwrap();
        requests.last().map(|(_, key)| key.clone())
    }
}

impl CompletionProvider for TestCompletionProvider {
    type Error = crate::Error;

    fn complete(
        &self,
        req: &CompletionRequest,
        api_key: &ApiKey,
    ) -> impl Future<Output = Result<CompletionEnvelope, Self::Error>>
    + Send
    + 'static {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .requests
            .lock()
            .unwrap()
            .push((req.clone(), api_key.expose().to_owned()));

        let reply = self.inner.script.lock().unwrap().pop_front();
        let result = match reply {
            Some(PresetReply::Envelope(value)) => Ok(value.into()),
            Some(PresetReply::TransportFailure(message)) => Err(Error {
                message,
                kind: ErrorKind::Transport,
            }),
            Some(PresetReply::InvalidResponse(message)) => Err(Error {
                message,
                kind: ErrorKind::InvalidResponse,
            }),
            None => Err(Error {
                message: "no enough replies".to_owned(),
                kind: ErrorKind::Transport,
            }),
        };

        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use banter_model::SamplingParams;
    use serde_json::json;

    use super::*;

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            prompt: prompt.to_owned(),
            sampling: SamplingParams {
                max_tokens: 8,
                temperature: 1.0,
                top_p: 1.0,
                top_k: 1,
                repetition_penalty: 1.0,
                stop: vec![],
            },
        }
    }

    #[tokio::test]
    async fn test_scripted_replies() {
        let provider = TestCompletionProvider::default();
        provider.add_text_reply("Hello, world!");
        provider.add_reply(PresetReply::Envelope(json!({ "oops": true })));
        provider.add_reply(PresetReply::TransportFailure("boom".to_owned()));
        let key = ApiKey::new("sk-test").unwrap();

        let envelope = provider.complete(&request("a"), &key).await.unwrap();
        assert_eq!(envelope.first_choice_text().unwrap(), "Hello, world!");

        let envelope = provider.complete(&request("b"), &key).await.unwrap();
        assert!(envelope.first_choice_text().is_err());

        let err = provider.complete(&request("c"), &key).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "boom");

        // The script is exhausted.
        let err = provider.complete(&request("d"), &key).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        assert_eq!(provider.call_count(), 4);
        let prompts: Vec<_> = provider
            .requests()
            .into_iter()
            .map(|req| req.prompt)
            .collect();
        assert_eq!(prompts, ["a", "b", "c", "d"]);
        assert_eq!(provider.last_api_key().as_deref(), Some("sk-test"));
    }

    #[tokio::test]
    async fn test_clones_share_bookkeeping() {
        let provider = TestCompletionProvider::default();
        let observer = provider.clone();
        provider.add_text_reply("ok");
        let key = ApiKey::new("sk-test").unwrap();

        provider.complete(&request("a"), &key).await.unwrap();
        assert_eq!(observer.call_count(), 1);
    }
}
