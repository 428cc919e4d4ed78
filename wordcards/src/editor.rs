//! Running the user's text editor.

use std::{env, io, path::Path, process::Command};

use log::debug;

use crate::{Error, Result};

/// The editor we use when `$EDITOR` is not set.
const DEFAULT_EDITOR: &str = "vi";

/// The user's preferred editor command.
pub fn editor_command() -> String {
    env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_owned())
}

/// Open `path` in the user's editor and wait for them to quit.
pub fn edit_file(path: &Path) -> Result<()> {
    edit_file_with(&editor_command(), path)
}

/// Open `path` using `editor`. The editor command may include arguments,
/// like `code --wait`.
pub(crate) fn edit_file_with(editor: &str, path: &Path) -> Result<()> {
    let mut words = editor.split_whitespace();
    let program = words.next().unwrap_or(DEFAULT_EDITOR);
    debug!("running {:?} on {}", editor, path.display());
    let status = Command::new(program)
        .args(words)
        .arg(path)
        .status()
        .map_err(|e| Error::Editor {
            editor: editor.to_owned(),
            source: e,
        })?;
    if !status.success() {
        return Err(Error::Editor {
            editor: editor.to_owned(),
            source: io::Error::new(io::ErrorKind::Other, format!("exited with {}", status)),
        });
    }
    Ok(())
}
