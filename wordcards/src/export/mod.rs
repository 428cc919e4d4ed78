//! Building decks and writing them out as Anki packages.

pub use self::{
    apkg::{ApkgWriter, PackageWriter},
    deck::{DeckBuilder, ExportableDeck},
    model::{CardTemplate, NoteModel, VOCAB_MODEL},
};

mod apkg;
mod deck;
mod model;
