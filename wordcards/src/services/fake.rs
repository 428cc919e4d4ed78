//! A deterministic [`ContentProvider`] for tests.

use std::{collections::HashMap, sync::Mutex, time::Duration};

use async_trait::async_trait;

use super::{ContentProvider, ProviderError};

/// Returns canned content derived from its input. Can be told to fail or to
/// slow down for specific terms.
#[derive(Default)]
pub(crate) struct FakeProvider {
    /// Fail any request mentioning this text.
    fail_on: Option<String>,
    /// Per-term latency.
    delays: HashMap<String, Duration>,
    /// Every request we've received, in order.
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_owned());
        self
    }

    pub(crate) fn with_delay(mut self, term: &str, delay: Duration) -> Self {
        self.delays.insert(term.to_owned(), delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, call: String, subject: &str) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(call);
        let delay = self
            .delays
            .iter()
            .find(|(term, _)| subject.contains(term.as_str()))
            .map(|(_, delay)| *delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match &self.fail_on {
            Some(bad) if subject.contains(bad.as_str()) => {
                Err(format!("simulated failure for {:?}", subject).into())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ContentProvider for FakeProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, ProviderError> {
        self.respond(format!("complete:{}", user_text), user_text)
            .await?;
        if system_prompt.contains("example sentence") {
            Ok(format!("This is an example with {}.", user_text))
        } else if system_prompt.contains("definition") {
            Ok(format!("definition of {}", user_text))
        } else if system_prompt.contains("Translate") {
            Ok(format!("translation of {}", user_text))
        } else {
            Ok(format!("completion of {}", user_text))
        }
    }

    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        self.respond(format!("speech:{}", text), text).await?;
        Ok(format!("audio:{}", text).into_bytes())
    }
}
