//! Collecting notes and media into a deck we can export.

use std::path::PathBuf;

use super::model::{NoteModel, VOCAB_MODEL};
use crate::{deck_info::DeckInfo, media::MediaAsset, note::Note};

/// Accumulates the notes and media generated during a single run.
///
/// This does no de-duplication: adding the same note twice produces two
/// cards.
#[derive(Debug)]
pub struct DeckBuilder {
    info: DeckInfo,
    notes: Vec<Note>,
    media: Vec<MediaAsset>,
}

impl DeckBuilder {
    /// Start a new, empty deck.
    pub fn new(info: &DeckInfo) -> Self {
        Self {
            info: info.clone(),
            notes: vec![],
            media: vec![],
        }
    }

    /// Add a note. Notes keep the order in which they were added.
    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Add a media file which must be bundled with the deck.
    pub fn add_media(&mut self, asset: MediaAsset) {
        self.media.push(asset);
    }

    /// How many notes have we collected?
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Have we collected no notes at all?
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Finish building.
    pub fn build(self) -> ExportableDeck {
        ExportableDeck {
            deck_id: self.info.deck_id,
            name: self.info.name,
            model_id: self.info.model_id,
            model: &VOCAB_MODEL,
            notes: self.notes,
            media: self.media,
        }
    }
}

/// A complete deck, ready to be handed to a [`PackageWriter`].
///
/// [`PackageWriter`]: super::PackageWriter
#[derive(Debug)]
#[allow(missing_docs)]
pub struct ExportableDeck {
    pub deck_id: i64,
    pub name: String,
    pub model_id: i64,
    pub model: &'static NoteModel,
    pub notes: Vec<Note>,
    pub media: Vec<MediaAsset>,
}

impl ExportableDeck {
    /// The paths of all our media files.
    pub fn media_paths(&self) -> Vec<PathBuf> {
        self.media.iter().map(|m| m.path.clone()).collect()
    }
}
