//! Error handling for this library.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// Our error type.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    /// A request to the content provider failed.
    #[error("could not {operation} for {term:?}")]
    #[non_exhaustive]
    Provider {
        operation: Operation,
        term: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A request to the content provider took too long.
    #[error("timed out after {timeout:?} trying to {operation} for {term:?}")]
    #[non_exhaustive]
    ProviderTimeout {
        operation: Operation,
        term: String,
        timeout: Duration,
    },

    /// A settings or deck metadata file could not be parsed.
    #[error("invalid configuration in {path:?}")]
    #[non_exhaustive]
    Configuration {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// We could not read or write a file or directory.
    #[error("could not access {path:?}")]
    #[non_exhaustive]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deck names are used as file names, so they are restricted.
    #[error("invalid deck name {name:?}: deck names must be non-empty and may not contain spaces or path separators")]
    #[non_exhaustive]
    InvalidDeckName { name: String },

    /// Tried to create a deck which already exists.
    #[error("deck {name:?} already exists")]
    #[non_exhaustive]
    DeckAlreadyExists { name: String },

    /// Tried to use a deck which does not exist.
    #[error("deck {name:?} does not exist")]
    #[non_exhaustive]
    DeckNotFound { name: String },

    /// An empty term cannot be turned into a note or a media file name.
    #[error("cannot generate a note for an empty term")]
    #[non_exhaustive]
    EmptyTerm {},

    /// There was nothing to generate.
    #[error("no terms were supplied for deck {deck:?}")]
    #[non_exhaustive]
    NoTerms { deck: String },

    /// The user's editor could not be run, or exited with an error.
    #[error("could not run editor {editor:?}")]
    #[non_exhaustive]
    Editor {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    /// The flashcard package could not be built or written.
    #[error("could not write package {path:?}: {message}")]
    #[non_exhaustive]
    Package { path: PathBuf, message: String },
}

impl Error {
    /// A content provider request failed.
    pub(crate) fn provider<E>(operation: Operation, term: &str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Provider {
            operation,
            term: term.to_owned(),
            source: source.into(),
        }
    }

    /// A configuration file at `path` was malformed.
    pub(crate) fn configuration<P, E>(path: P, source: E) -> Self
    where
        P: Into<PathBuf>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Configuration {
            path: path.into(),
            source: source.into(),
        }
    }

    /// A filesystem operation on `path` failed.
    pub(crate) fn filesystem<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Building or writing the package at `path` failed.
    pub(crate) fn package<P, M>(path: P, message: M) -> Self
    where
        P: Into<PathBuf>,
        M: ToString,
    {
        Error::Package {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// The content provider operations we perform for each term. Used to make
/// error messages point at the failing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Write an example sentence.
    ExampleSentence,
    /// Write an English definition.
    Definition,
    /// Translate into the user's native language.
    Translation,
    /// Synthesize speech for the term.
    TermAudio,
    /// Synthesize speech for the example sentence.
    ExampleAudio,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Operation::ExampleSentence => "generate an example sentence",
            Operation::Definition => "generate a definition",
            Operation::Translation => "generate a translation",
            Operation::TermAudio => "synthesize term audio",
            Operation::ExampleAudio => "synthesize example sentence audio",
        };
        f.write_str(s)
    }
}

/// Our result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
