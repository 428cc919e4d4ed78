//! Vocabulary notes, and the code which asks a [`ContentProvider`] to fill
//! them in.

use std::{future::Future, time::Duration};

use log::debug;
use tokio::time::timeout;

use crate::{
    errors::Operation,
    media::{sound_tag, MediaAsset, MediaDir},
    services::{ContentProvider, ProviderError},
    Error, Result,
};

/// The fields of a vocabulary note, in the order our note model declares
/// them. Anki matches note fields to model fields by position.
pub const FIELD_NAMES: [&str; 6] = [
    "Term",
    "TermAudio",
    "EnglishDefinition",
    "NativeLanguageTranslation",
    "ExampleSentence",
    "ExampleSentenceAudio",
];

/// One vocabulary flashcard's data.
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub struct Note {
    pub term: String,
    /// A `[sound:...]` tag.
    pub term_audio: String,
    pub english_definition: String,
    pub native_language_translation: String,
    pub example_sentence: String,
    /// A `[sound:...]` tag.
    pub example_sentence_audio: String,
}

impl Note {
    /// Our field values, in the same order as [`FIELD_NAMES`].
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.term,
            &self.term_audio,
            &self.english_definition,
            &self.native_language_translation,
            &self.example_sentence,
            &self.example_sentence_audio,
        ]
    }
}

/// Builds notes for individual terms.
pub struct NoteAssembler<'a> {
    provider: &'a dyn ContentProvider,
    media: &'a MediaDir,
    native_language: &'a str,
    request_timeout: Duration,
}

impl<'a> NoteAssembler<'a> {
    /// Create an assembler which writes audio to `media` and translates into
    /// `native_language`. Each provider request must finish within
    /// `request_timeout`.
    pub fn new(
        provider: &'a dyn ContentProvider,
        media: &'a MediaDir,
        native_language: &'a str,
        request_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            media,
            native_language,
            request_timeout,
        }
    }

    /// Generate a note for `term`, returning the note and the two audio
    /// files it refers to.
    ///
    /// If any request fails, we stop immediately. Audio written by earlier
    /// steps stays on disk.
    pub async fn assemble(&self, term: &str) -> Result<(Note, Vec<MediaAsset>)> {
        if term.trim().is_empty() {
            return Err(Error::EmptyTerm {});
        }
        debug!("assembling note for {:?}", term);

        let example_sentence = self
            .call(
                Operation::ExampleSentence,
                term,
                self.provider.complete(EXAMPLE_SENTENCE_PROMPT, term),
            )
            .await?;
        let english_definition = self
            .call(
                Operation::Definition,
                term,
                self.provider.complete(DEFINITION_PROMPT, term),
            )
            .await?;
        let translation_prompt = translation_prompt(self.native_language);
        let native_language_translation = self
            .call(
                Operation::Translation,
                term,
                self.provider.complete(&translation_prompt, term),
            )
            .await?;

        let term_audio = self
            .call(
                Operation::TermAudio,
                term,
                self.provider.synthesize_speech(term),
            )
            .await?;
        let term_asset = self.media.write_audio(term, &term_audio)?;

        let example_audio = self
            .call(
                Operation::ExampleAudio,
                term,
                self.provider.synthesize_speech(&example_sentence),
            )
            .await?;
        let example_asset = self.media.write_audio(&example_sentence, &example_audio)?;

        let note = Note {
            term: term.to_owned(),
            term_audio: sound_tag(&term_asset.file_name),
            english_definition,
            native_language_translation,
            example_sentence,
            example_sentence_audio: sound_tag(&example_asset.file_name),
        };
        Ok((note, vec![term_asset, example_asset]))
    }

    /// Run a provider request with our timeout, attaching the operation and
    /// term to any error.
    async fn call<T, F>(&self, operation: Operation, term: &str, request: F) -> Result<T>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        match timeout(self.request_timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Error::provider(operation, term, e)),
            Err(_) => Err(Error::ProviderTimeout {
                operation,
                term: term.to_owned(),
                timeout: self.request_timeout,
            }),
        }
    }
}

const EXAMPLE_SENTENCE_PROMPT: &str = "You are helping a language learner. \
The user will send you a word or phrase. Reply with only one short example \
sentence which uses it, and nothing else.";

const DEFINITION_PROMPT: &str = "You are helping a language learner. The user \
will send you a word or phrase. Reply with only a simple English definition \
of it, and nothing else. Never repeat the word or phrase itself in the \
definition.";

fn translation_prompt(native_language: &str) -> String {
    format!(
        "You are helping a language learner. Translate the word or phrase the \
         user sends you into {}. Reply with only the translation, and nothing \
         else.",
        native_language
    )
}
