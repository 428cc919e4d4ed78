//! Deck metadata, stored as one JSON file per deck.
//!
//! The numeric `deck_id` and `model_id` are chosen once, when the deck is
//! created, and never change afterwards. Anki uses them to recognize a
//! re-imported package as an update of an existing deck, so regenerating them
//! would produce duplicate decks on the user's side.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::debug;
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Everything we need to know to build a deck.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeckInfo {
    /// The deck name. Used as the Anki deck name and as part of file names.
    pub name: String,

    /// The language we translate terms into, in whatever form the user
    /// typed it ("Spanish", "es", ...). It is only ever used in prompts.
    pub native_language: String,

    /// Stable Anki deck ID.
    pub deck_id: i64,

    /// Stable Anki note model ID.
    pub model_id: i64,
}

/// Check that `name` can be used as both a deck name and a file name.
pub fn validate_deck_name(name: &str) -> Result<()> {
    let bad_char = |c: char| c.is_whitespace() || c == '/' || c == '\\';
    if name.is_empty() || name.chars().any(bad_char) || name == "." || name == ".." {
        return Err(Error::InvalidDeckName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// A source of fresh deck and model IDs.
pub trait IdGenerator {
    /// Return a new ID.
    fn next_id(&mut self) -> i64;
}

/// Random IDs in `[2^30, 2^31)`, which keeps them positive and well clear of
/// the small IDs Anki uses for its built-in decks and models.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> i64 {
        rand::thread_rng().gen_range((1i64 << 30)..(1i64 << 31))
    }
}

/// A directory of deck metadata files.
#[derive(Clone, Debug)]
pub struct DeckStore {
    dir: PathBuf,
}

impl DeckStore {
    /// Manage the decks stored in `dir`. The directory is created lazily.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory containing our decks.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The metadata path for the deck `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Does the deck `name` exist?
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Create a new deck, assigning it fresh IDs, and return the path of its
    /// metadata file.
    pub fn create(
        &self,
        name: &str,
        native_language: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<PathBuf> {
        validate_deck_name(name)?;
        if self.exists(name) {
            return Err(Error::DeckAlreadyExists {
                name: name.to_owned(),
            });
        }
        let info = DeckInfo {
            name: name.to_owned(),
            native_language: native_language.to_owned(),
            deck_id: ids.next_id(),
            model_id: ids.next_id(),
        };

        fs::create_dir_all(&self.dir).map_err(|e| Error::filesystem(&self.dir, e))?;
        let path = self.path_for(name);
        let json = serde_json::to_string_pretty(&info)
            .map_err(|e| Error::configuration(&path, e))?;
        fs::write(&path, json).map_err(|e| Error::filesystem(&path, e))?;
        debug!("created deck {:?} at {}", info, path.display());
        Ok(path)
    }

    /// Load the deck `name`.
    pub fn load(&self, name: &str) -> Result<DeckInfo> {
        validate_deck_name(name)?;
        let path = self.path_for(name);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::DeckNotFound {
                    name: name.to_owned(),
                });
            }
            Err(e) => return Err(Error::filesystem(&path, e)),
        };
        serde_json::from_str(&json).map_err(|e| Error::configuration(&path, e))
    }

    /// List the names of all our decks, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(Error::filesystem(&self.dir, e)),
        };
        let mut names = vec![];
        for entry in entries {
            let path = entry.map_err(|e| Error::filesystem(&self.dir, e))?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete the deck `name`, returning the path we removed.
    pub fn delete(&self, name: &str) -> Result<PathBuf> {
        validate_deck_name(name)?;
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(path),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::DeckNotFound {
                name: name.to_owned(),
            }),
            Err(e) => Err(Error::filesystem(&path, e)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Hands out IDs from a fixed list.
    pub(crate) struct FixedIds(pub(crate) Vec<i64>);

    impl IdGenerator for FixedIds {
        fn next_id(&mut self) -> i64 {
            self.0.remove(0)
        }
    }

    #[test]
    fn deck_names_are_validated() {
        assert!(validate_deck_name("spanish").is_ok());
        assert!(validate_deck_name("spanish-verbs_2").is_ok());
        for bad in ["", "spanish verbs", "a/b", "a\\b", "tab\there", ".."] {
            assert!(
                matches!(validate_deck_name(bad), Err(Error::InvalidDeckName { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn random_ids_are_in_range() {
        let mut ids = RandomIds;
        for _ in 0..100 {
            let id = ids.next_id();
            assert!(id >= 1 << 30 && id < 1 << 31);
        }
    }

    #[test]
    fn create_writes_exactly_the_metadata_fields() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let store = DeckStore::new(tmp_dir.path().join("decks"));
        let path = store
            .create("spanish", "Spanish", &mut FixedIds(vec![1111, 2222]))
            .unwrap();
        assert_eq!(path, tmp_dir.path().join("decks/spanish.json"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "spanish",
                "native_language": "Spanish",
                "deck_id": 1111,
                "model_id": 2222,
            })
        );

        let info = store.load("spanish").unwrap();
        assert_eq!(info.deck_id, 1111);
        assert_eq!(info.model_id, 2222);
    }

    #[test]
    fn create_refuses_existing_and_invalid_decks() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let store = DeckStore::new(tmp_dir.path());
        store
            .create("french", "English", &mut FixedIds(vec![1, 2]))
            .unwrap();
        let err = store
            .create("french", "German", &mut FixedIds(vec![3, 4]))
            .unwrap_err();
        assert!(matches!(err, Error::DeckAlreadyExists { .. }));
        // The original deck is untouched.
        assert_eq!(store.load("french").unwrap().native_language, "English");

        let err = store
            .create("two words", "English", &mut FixedIds(vec![5, 6]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDeckName { .. }));
        assert!(!store.path_for("two words").exists());
    }

    #[test]
    fn list_and_delete() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let store = DeckStore::new(tmp_dir.path().join("missing"));
        assert!(store.list().unwrap().is_empty());

        let store = DeckStore::new(tmp_dir.path());
        let mut ids = FixedIds(vec![1, 2, 3, 4]);
        store.create("zulu", "English", &mut ids).unwrap();
        store.create("alpha", "English", &mut ids).unwrap();
        fs::write(tmp_dir.path().join("notes.txt"), "not a deck").unwrap();
        assert_eq!(store.list().unwrap(), vec!["alpha", "zulu"]);

        let removed = store.delete("zulu").unwrap();
        assert!(!removed.exists());
        assert_eq!(store.list().unwrap(), vec!["alpha"]);
        assert!(matches!(
            store.delete("zulu"),
            Err(Error::DeckNotFound { .. })
        ));
    }

    #[test]
    fn load_reports_missing_and_malformed_decks() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let store = DeckStore::new(tmp_dir.path());
        assert!(matches!(
            store.load("nothing"),
            Err(Error::DeckNotFound { .. })
        ));
        fs::write(store.path_for("broken"), r#"{"name": "broken"}"#).unwrap();
        assert!(matches!(
            store.load("broken"),
            Err(Error::Configuration { .. })
        ));
    }
}
