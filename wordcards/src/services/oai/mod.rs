//! OpenAI client.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateSpeechRequestArgs, SpeechModel, SpeechResponseFormat, Voice,
    },
    Client,
};
use async_trait::async_trait;
use log::{debug, trace};

use super::{ContentProvider, ProviderError};
use crate::{settings::OpenAiSettings, Error, Result};

/// A [`ContentProvider`] backed by OpenAI's chat and speech APIs.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    chat_model: String,
    speech_model: SpeechModel,
    voice: Voice,
}

impl OpenAiProvider {
    /// Create a new provider. If `settings.api_key` is missing, the client
    /// falls back to `OPENAI_API_KEY`.
    pub fn new(settings: &OpenAiSettings) -> Result<Self> {
        let mut config = OpenAIConfig::new();
        if let Some(api_key) = &settings.api_key {
            config = config.with_api_key(api_key);
        }
        Ok(Self {
            client: Client::with_config(config),
            chat_model: settings.chat_model.clone(),
            speech_model: parse_speech_model(&settings.speech_model)?,
            voice: parse_voice(&settings.voice)?,
        })
    }
}

#[async_trait]
impl ContentProvider for OpenAiProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, ProviderError> {
        debug!("OpenAI request (prompt): {:?} / {:?}", system_prompt, user_text);
        let req = CreateChatCompletionRequestArgs::default()
            .model(&self.chat_model)
            .messages(vec![system_message(system_prompt)?, user_message(user_text)?])
            .build()?;
        trace!("OpenAI request (full): {:?}", req);
        let resp = self.client.chat().create(req).await?;
        trace!("OpenAI response (full): {:?}", resp);
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or("OpenAI did not return any choices")?;
        let content = choice
            .message
            .content
            .ok_or("OpenAI returned a choice without any text")?;
        Ok(content.trim().to_owned())
    }

    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        debug!("OpenAI speech request: {:?}", text);
        let req = CreateSpeechRequestArgs::default()
            .input(text)
            .model(self.speech_model.clone())
            .voice(self.voice.clone())
            .response_format(SpeechResponseFormat::Mp3)
            .build()?;
        let resp = self.client.audio().speech(req).await?;
        trace!("OpenAI speech response: {} bytes", resp.bytes.len());
        Ok(resp.bytes.to_vec())
    }
}

/// Generate a system message.
fn system_message(content: &str) -> Result<ChatCompletionRequestMessage, ProviderError> {
    Ok(ChatCompletionRequestSystemMessageArgs::default()
        .content(content)
        .build()?
        .into())
}

/// Generate a user message.
fn user_message(content: &str) -> Result<ChatCompletionRequestMessage, ProviderError> {
    Ok(ChatCompletionRequestUserMessageArgs::default()
        .content(content)
        .build()?
        .into())
}

fn parse_speech_model(name: &str) -> Result<SpeechModel> {
    match name {
        "tts-1" => Ok(SpeechModel::Tts1),
        "tts-1-hd" => Ok(SpeechModel::Tts1Hd),
        _ => Err(unknown_setting("speech_model", name)),
    }
}

fn parse_voice(name: &str) -> Result<Voice> {
    match name {
        "alloy" => Ok(Voice::Alloy),
        "echo" => Ok(Voice::Echo),
        "fable" => Ok(Voice::Fable),
        "onyx" => Ok(Voice::Onyx),
        "nova" => Ok(Voice::Nova),
        "shimmer" => Ok(Voice::Shimmer),
        _ => Err(unknown_setting("voice", name)),
    }
}

fn unknown_setting(key: &str, value: &str) -> Error {
    Error::configuration(
        format!("openai.{}", key),
        format!("unsupported value {:?}", value),
    )
}
