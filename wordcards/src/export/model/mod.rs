//! Anki note models.

use crate::note::FIELD_NAMES;

/// An Anki model, describing the data that can go in an Anki note,
/// and how to turn it into cards.
#[derive(Debug)]
#[allow(missing_docs)]
pub struct NoteModel {
    pub name: &'static str,
    pub in_order_fields: &'static [&'static str],
    pub css: &'static str,
    pub card_templates: &'static [CardTemplate],
}

/// An Anki card template, describing the front and back of a card.
#[derive(Debug)]
#[allow(missing_docs)]
pub struct CardTemplate {
    pub name: &'static str,
    pub front: &'static str,
    pub back: &'static str,
}

/// Our vocabulary card model. If you change the fields here, bump the
/// version in the name, because Anki will otherwise try to reuse the old
/// model for any deck which has already been imported.
pub static VOCAB_MODEL: NoteModel = NoteModel {
    name: "Wordcards Vocabulary (v1)",
    in_order_fields: &FIELD_NAMES,
    css: include_str!("vocab/style.css"),
    card_templates: &[CardTemplate {
        name: "Recognition",
        front: include_str!("vocab/front.html"),
        back: include_str!("vocab/back.html"),
    }],
};
