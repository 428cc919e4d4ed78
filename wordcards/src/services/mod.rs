//! External services which generate card content.

use async_trait::async_trait;

pub use self::oai::OpenAiProvider;

#[cfg(test)]
pub(crate) mod fake;
pub mod oai;

/// Errors returned by a [`ContentProvider`]. We don't care much about the
/// details here, because the caller wraps them with the term and operation.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A generative AI service which can write text and synthesize speech.
///
/// Each method is a single request. Implementations should not retry or
/// cache anything; the caller decides what to do about failures.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Run a single-turn chat completion, with `system_prompt` fixing the
    /// assistant's behavior, and return the text of the first choice.
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, ProviderError>;

    /// Synthesize speech for `text`, returning encoded audio.
    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, ProviderError>;
}
