//! Where vocabulary terms come from.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use tempfile::tempdir;

use crate::{editor::edit_file, Error, Result};

/// A source of terms for a generation run.
pub trait TermSource {
    /// Return the terms, in the order the user supplied them.
    fn read_terms(&self) -> Result<Vec<String>>;
}

/// Split `text` into terms, one per line. Surrounding whitespace is trimmed
/// and blank lines are dropped, but duplicates are kept.
pub fn parse_terms(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reads terms from an existing file.
#[derive(Clone, Debug)]
pub struct FileTermSource {
    path: PathBuf,
}

impl FileTermSource {
    /// Read terms from `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl TermSource for FileTermSource {
    fn read_terms(&self) -> Result<Vec<String>> {
        read_terms_file(&self.path)
    }
}

/// Asks the user to type terms into their editor.
#[derive(Clone, Debug, Default)]
pub struct EditorTermSource;

impl TermSource for EditorTermSource {
    fn read_terms(&self) -> Result<Vec<String>> {
        let dir = tempdir().map_err(|e| Error::filesystem(std::env::temp_dir(), e))?;
        let path = dir.path().join("terms.txt");
        fs::write(&path, "").map_err(|e| Error::filesystem(&path, e))?;
        edit_file(&path)?;
        read_terms_file(&path)
    }
}

fn read_terms_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| Error::filesystem(path, e))?;
    let terms = parse_terms(&text);
    debug!("read {} terms from {}", terms.len(), path.display());
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_terms_keeps_order_and_duplicates() {
        let text = "  apple \n\nbridge\r\n\t\ncat\napple\n";
        assert_eq!(parse_terms(text), vec!["apple", "bridge", "cat", "apple"]);
        assert!(parse_terms("\n \n").is_empty());
    }

    #[test]
    fn phrases_keep_inner_spaces() {
        assert_eq!(parse_terms("por favor\n"), vec!["por favor"]);
    }

    #[test]
    fn file_term_source() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("terms.txt");
        fs::write(&path, "uno\ndos\n").unwrap();
        let terms = FileTermSource::new(&path).read_terms().unwrap();
        assert_eq!(terms, vec!["uno", "dos"]);

        let missing = FileTermSource::new(tmp_dir.path().join("missing.txt"));
        assert!(matches!(
            missing.read_terms(),
            Err(Error::Filesystem { .. })
        ));
    }
}
