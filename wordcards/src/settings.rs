//! User settings, loaded from a JSON file.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The settings file we look for when none is specified.
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Settings shared by all commands.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Where we keep one JSON metadata file per deck.
    pub decks_directory: PathBuf,

    /// Where we write finished `*.apkg` packages.
    pub output_directory: PathBuf,

    /// Where we write synthesized audio. Defaults to `media` inside
    /// `output_directory`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_directory: Option<PathBuf>,

    /// OpenAI models and request limits.
    #[serde(default)]
    pub openai: OpenAiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let decks_directory = dirs::data_dir()
            .map(|d| d.join("wordcards").join("decks"))
            .unwrap_or_else(|| PathBuf::from("decks"));
        Self {
            decks_directory,
            output_directory: PathBuf::from("output"),
            media_directory: None,
            openai: OpenAiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`. If the file does not exist, we fall back to
    /// the defaults, because a fresh install has no settings file yet.
    pub fn load(path: &Path) -> Result<Settings> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", path.display());
                return Ok(Settings::default());
            }
            Err(e) => return Err(Error::filesystem(path, e)),
        };
        let settings: Settings =
            serde_json::from_str(&json).map_err(|e| Error::configuration(path, e))?;
        Ok(settings.expand_home())
    }

    /// The directory for synthesized audio.
    pub fn media_directory(&self) -> PathBuf {
        self.media_directory
            .clone()
            .unwrap_or_else(|| self.output_directory.join("media"))
    }

    /// Replace a leading `~` in every path with the user's home directory.
    fn expand_home(mut self) -> Self {
        self.decks_directory = expand_home(&self.decks_directory);
        self.output_directory = expand_home(&self.output_directory);
        self.media_directory = self.media_directory.as_deref().map(expand_home);
        self
    }
}

/// Settings for our OpenAI content provider.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// The chat model used for definitions, translations and examples.
    pub chat_model: String,

    /// The text-to-speech model.
    pub speech_model: String,

    /// The text-to-speech voice.
    pub voice: String,

    /// How long to wait for any single request.
    pub timeout_secs: u64,

    /// API key. If missing, `OPENAI_API_KEY` is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            chat_model: "gpt-3.5-turbo".to_owned(),
            speech_model: "tts-1".to_owned(),
            voice: "alloy".to_owned(),
            timeout_secs: 60,
            api_key: None,
        }
    }
}

impl OpenAiSettings {
    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Expand `~` at the start of `path`.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_file_uses_defaults() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&tmp_dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.output_directory, PathBuf::from("output"));
        assert_eq!(settings.media_directory(), PathBuf::from("output/media"));
        assert_eq!(settings.openai.speech_model, "tts-1");
    }

    #[test]
    fn settings_are_parsed_and_partial_openai_settings_are_filled_in() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
                "decks_directory": "/tmp/decks",
                "output_directory": "/tmp/out",
                "media_directory": "/tmp/media",
                "openai": { "voice": "nova", "timeout_secs": 5 }
            }"#,
        )
        .unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.decks_directory, PathBuf::from("/tmp/decks"));
        assert_eq!(settings.media_directory(), PathBuf::from("/tmp/media"));
        assert_eq!(settings.openai.voice, "nova");
        assert_eq!(settings.openai.chat_model, "gpt-3.5-turbo");
        assert_eq!(settings.openai.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn malformed_settings_are_a_configuration_error() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("settings.json");
        fs::write(&path, r#"{ "decks_directory": "#).unwrap();
        match Settings::load(&path) {
            Err(Error::Configuration { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn tilde_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/decks")), home.join("decks"));
        }
        assert_eq!(expand_home(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
