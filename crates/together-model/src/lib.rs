//! A completion provider for the Together AI `/completions` API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use banter_model::{
    ApiKey, CompletionEnvelope, CompletionProvider, CompletionRequest,
    ErrorKind, ProviderError,
};
use reqwest::{Client, header};
use serde_json::Value;

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, TogetherConfig, TogetherConfigBuilder,
};

/// Error type for [`TogetherProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Creates a `Transport` error that keeps every cause of `err`, since
    /// `reqwest` only prints the outermost one.
    fn transport(err: &reqwest::Error) -> Self {
        let message = std::iter::successors(
            Some(err as &(dyn StdError + 'static)),
            |&err| err.source(),
        )
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ");
        Self::new(message, ErrorKind::Transport)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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

/// Together AI completion provider.
#[derive(Clone, Debug)]
pub struct TogetherProvider {
    client: Client,
    config: Arc<TogetherConfig>,
}

impl TogetherProvider {
    /// Creates a new `TogetherProvider` with the given configuration.
    pub fn new(config: TogetherConfig) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| Error::transport(&err))?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration of this provider.
    #[inline]
    pub fn config(&self) -> &TogetherConfig {
        &self.config
    }
}

impl CompletionProvider for TogetherProvider {
    type Error = Error;

    fn complete(
        &self,
        req: &CompletionRequest,
        api_key: &ApiKey,
    ) -> impl Future<Output = Result<CompletionEnvelope, Self::Error>>
    + Send
    + 'static {
        let body = proto::create_request(req, &self.config);
        let url = self.config.completions_url();
        debug!("sending completion request to {url}");
        trace!("request body: {body:?}");
        let resp_fut = self
            .client
            .post(url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", api_key.expose()),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => return Err(Error::transport(&err)),
            };

            let status = resp.status();
            let text =
                resp.text().await.map_err(|err| Error::transport(&err))?;
            trace!("got response ({status}): {text}");

            // Auth rejections and bad requests carry the reason in the body.
            if !status.is_success() {
                return Err(Error::new(
                    format!("HTTP {status}: {}", text.trim()),
                    ErrorKind::Transport,
                ));
            }

            let value = serde_json::from_str::<Value>(&text).map_err(|err| {
                Error::new(
                    format!("{err}: {}", text.trim()),
                    ErrorKind::InvalidResponse,
                )
            })?;
            Ok(CompletionEnvelope::new(value))
        }
    }
}
