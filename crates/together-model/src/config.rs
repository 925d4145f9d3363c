use std::fmt::Debug;
use std::time::Duration;

/// The model used when none is configured.
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// The API root used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";

/// Builder for [`TogetherConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TogetherConfigBuilder {
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl TogetherConfigBuilder {
    /// Creates a builder with everything left at the defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model to use.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets a custom base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Bounds how long a single request may take. Without it a hung
    /// request waits forever.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> TogetherConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        TogetherConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout: self.timeout,
        }
    }
}

/// Configuration for the Together completions provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TogetherConfig {
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Option<Duration>,
}

impl TogetherConfig {
    /// Returns the model identifier.
    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the full URL of the completions endpoint.
    #[inline]
    pub fn completions_url(&self) -> String {
        format!("{}/completions", self.base_url)
    }
}
