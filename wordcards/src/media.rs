//! Synthesized audio files and their names.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{Error, Result};

/// The extension for synthesized speech. OpenAI returns MP3 by default.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Map `text` to the file name we use for its synthesized audio.
///
/// This is deterministic, so regenerating the same text overwrites the old
/// file. All whitespace and path separators become underscores, so that
/// the name fits in a `[sound:...]` tag and can never point outside the
/// media directory.
///
/// ```
/// use wordcards::media::name_for;
/// assert_eq!(name_for("Hello World."), "hello_world.mp3");
/// ```
pub fn name_for(text: &str) -> String {
    let mut name = text
        .to_lowercase()
        .chars()
        .filter(|&c| c != '.')
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect::<String>();
    name.push('.');
    name.push_str(AUDIO_EXTENSION);
    name
}

/// The `[sound:...]` tag Anki uses to play a media file from a note field.
pub fn sound_tag(file_name: &str) -> String {
    format!("[sound:{}]", file_name)
}

/// A media file we wrote, which must be bundled into the package.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MediaAsset {
    /// The file name, as referenced by a note's `[sound:...]` tag.
    pub file_name: String,
    /// Where the file lives on disk.
    pub path: PathBuf,
}

/// A directory into which we write media files.
#[derive(Clone, Debug)]
pub struct MediaDir {
    dir: PathBuf,
}

impl MediaDir {
    /// Write media into `dir`, creating it if necessary.
    pub fn create<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::filesystem(&dir, e))?;
        Ok(Self { dir })
    }

    /// The directory we write into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save the audio for `text`, replacing any earlier file for the same
    /// text.
    pub fn write_audio(&self, text: &str, data: &[u8]) -> Result<MediaAsset> {
        let file_name = name_for(text);
        let path = self.dir.join(&file_name);
        fs::write(&path, data).map_err(|e| Error::filesystem(&path, e))?;
        debug!("wrote {} bytes of audio to {}", data.len(), path.display());
        Ok(MediaAsset { file_name, path })
    }
}
