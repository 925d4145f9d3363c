use std::error::Error;

use crate::credential::ApiKey;
use crate::error::ErrorKind;
use crate::request::CompletionRequest;
use crate::response::CompletionEnvelope;

/// The error type for a completion provider.
pub trait ProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a completion provider, the entry for sending a
/// prompt to a hosted model and getting the raw envelope back.
///
/// Once the provider is created, it should behave like a stateless object.
/// Credentials are not part of the provider, they are owned by the caller
/// and handed over on every request.
pub trait CompletionProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ProviderError;

    /// Sends a completion request to the model.
    ///
    /// The returned envelope is not interpreted by the provider. Use
    /// [`CompletionEnvelope::first_choice_text`] to extract the text.
    fn complete(
        &self,
        req: &CompletionRequest,
        api_key: &ApiKey,
    ) -> impl Future<Output = Result<CompletionEnvelope, Self::Error>>
    + Send
    + 'static;
}
