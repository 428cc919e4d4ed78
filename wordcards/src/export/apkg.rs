//! Writing `*.apkg` packages, which Anki can import directly.

use std::path::{Path, PathBuf};

use genanki_rs::{Deck, Field, Model, Note, Package, Template};
use log::debug;

use super::{deck::ExportableDeck, model::NoteModel};
use crate::{Error, Result};

/// Something which can serialize a deck and its media into a single file.
pub trait PackageWriter {
    /// Write `deck` and `media_files` to `output_path`, replacing any
    /// existing file.
    fn write_package(
        &self,
        deck: &ExportableDeck,
        media_files: &[PathBuf],
        output_path: &Path,
    ) -> Result<()>;
}

/// Writes Anki packages using `genanki-rs`.
#[derive(Debug, Default)]
pub struct ApkgWriter;

impl PackageWriter for ApkgWriter {
    fn write_package(
        &self,
        deck: &ExportableDeck,
        media_files: &[PathBuf],
        output_path: &Path,
    ) -> Result<()> {
        let mkerr = |e: genanki_rs::Error| Error::package(output_path, e);

        let model = anki_model(deck.model_id, deck.model);
        let mut anki_deck = Deck::new(deck.deck_id, &deck.name, "");
        for note in &deck.notes {
            let fields = note.fields().to_vec();
            anki_deck.add_note(Note::new(model.clone(), fields).map_err(mkerr)?);
        }

        let media_files = media_files
            .iter()
            .map(|p| {
                p.to_str().ok_or_else(|| {
                    Error::package(output_path, format!("media path is not UTF-8: {:?}", p))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let output = output_path.to_str().ok_or_else(|| {
            Error::package(output_path, "output path is not UTF-8")
        })?;

        debug!(
            "writing {} notes and {} media files to {}",
            deck.notes.len(),
            media_files.len(),
            output
        );
        let mut package = Package::new(vec![anki_deck], media_files).map_err(mkerr)?;
        package.write_to_file(output).map_err(mkerr)?;
        Ok(())
    }
}

/// Convert one of our static models into a `genanki` model with the given ID.
fn anki_model(model_id: i64, model: &NoteModel) -> Model {
    let fields = model
        .in_order_fields
        .iter()
        .map(|name| Field::new(name))
        .collect();
    let templates = model
        .card_templates
        .iter()
        .map(|t| Template::new(t.name).qfmt(t.front).afmt(t.back))
        .collect();
    Model::new_with_options(
        model_id,
        model.name,
        fields,
        templates,
        Some(model.css),
        None,
        None,
        None,
        None,
    )
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Read as _};

    use zip::ZipArchive;

    use super::*;
    use crate::{
        deck_info::DeckInfo, export::DeckBuilder, media::MediaDir, note::Note as VocabNote,
    };

    #[test]
    fn writes_an_apkg_file() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let media = MediaDir::create(tmp_dir.path().join("media")).unwrap();
        let audio = media.write_audio("hola", b"fake mp3").unwrap();
        let example = media.write_audio("Hola, amigo.", b"fake mp3").unwrap();

        let info = DeckInfo {
            name: "spanish".to_owned(),
            native_language: "English".to_owned(),
            deck_id: 1_234_567_890,
            model_id: 1_098_765_432,
        };
        let mut builder = DeckBuilder::new(&info);
        builder.add_note(VocabNote {
            term: "hola".to_owned(),
            term_audio: "[sound:hola.mp3]".to_owned(),
            english_definition: "a greeting".to_owned(),
            native_language_translation: "hello".to_owned(),
            example_sentence: "Hola, amigo.".to_owned(),
            example_sentence_audio: "[sound:hola,_amigo.mp3]".to_owned(),
        });
        builder.add_media(audio);
        builder.add_media(example);
        let deck = builder.build();

        let output = tmp_dir.path().join("spanish.apkg");
        ApkgWriter
            .write_package(&deck, &deck.media_paths(), &output)
            .unwrap();
        let mut archive = ZipArchive::new(fs::File::open(&output).unwrap()).unwrap();
        let mut manifest = String::new();
        archive
            .by_name("media")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        assert!(manifest.contains("\"hola.mp3\""));
        assert!(manifest.contains("\"hola,_amigo.mp3\""));

        // Anki stores a note's fields joined by 0x1f, in model order.
        let mut collection = vec![];
        archive
            .by_name("collection.anki2")
            .unwrap()
            .read_to_end(&mut collection)
            .unwrap();
        let fields = deck.notes[0].fields().join("\x1f");
        assert!(collection
            .windows(fields.len())
            .any(|w| w == fields.as_bytes()));

        // Writing again replaces the file.
        ApkgWriter
            .write_package(&deck, &deck.media_paths(), &output)
            .unwrap();
        assert!(output.exists());
    }
}
