//! Generate vocabulary flashcards for language learners.
//!
//! For each term in a list, we ask a generative AI service for an example
//! sentence, an English definition and a translation, synthesize audio for
//! the term and its example, and bundle the results into an Anki package.

#![warn(missing_docs)]

pub use crate::errors::{Error, Result};

pub mod deck_info;
pub mod editor;
pub mod errors;
pub mod export;
pub mod generate;
pub mod media;
pub mod note;
pub mod services;
pub mod settings;
pub mod terms;
pub mod ui;
