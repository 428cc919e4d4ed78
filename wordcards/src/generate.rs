//! Generating a complete deck from a list of terms.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::{
    deck_info::DeckInfo,
    export::{DeckBuilder, PackageWriter},
    media::MediaDir,
    note::NoteAssembler,
    services::ContentProvider,
    ui::{ProgressConfig, Ui},
    Error, Result,
};

/// What to do when we can't generate a note for a term.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FailurePolicy {
    /// Stop immediately and write nothing.
    #[default]
    Abort,
    /// Log provider failures and timeouts, skip those terms, and package
    /// whatever succeeded. Other errors still stop the run.
    SkipFailedTerms,
}

/// Options for [`generate_deck`].
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Where to write the finished package.
    pub output_dir: PathBuf,
    /// Where to write synthesized audio.
    pub media_dir: PathBuf,
    /// The date used in the package name.
    pub date: NaiveDate,
    /// How long to wait for any single provider request.
    pub request_timeout: Duration,
    /// What to do about terms which fail.
    pub failure_policy: FailurePolicy,
}

/// A term we skipped under [`FailurePolicy::SkipFailedTerms`].
#[derive(Debug)]
pub struct FailedTerm {
    /// The term.
    pub term: String,
    /// Why it failed.
    pub error: Error,
}

/// What a generation run produced.
#[derive(Debug)]
pub struct GenerationReport {
    /// The package we wrote.
    pub package_path: PathBuf,
    /// How many notes it contains.
    pub notes: usize,
    /// How many media files it contains.
    pub media_files: usize,
    /// Terms we skipped. Always empty under [`FailurePolicy::Abort`].
    pub failed_terms: Vec<FailedTerm>,
}

/// The path of the package for `deck_name` generated on `date`.
///
/// Runs on the same day write to the same path, so the newer package
/// replaces the older one.
pub fn package_path(output_dir: &Path, deck_name: &str, date: NaiveDate) -> PathBuf {
    output_dir.join(format!("{}_{}.apkg", deck_name, date.format("%Y-%m-%d")))
}

static PROGRESS_CONFIG: ProgressConfig<'static> = ProgressConfig {
    emoji: "🗂️",
    msg: "Generating notes",
    done_msg: "Generated notes",
};

/// Generate a note for each of `terms`, in order, and write them to a single
/// package.
///
/// Terms are processed one at a time. Under [`FailurePolicy::Abort`], the
/// first failure stops the run and no package is written, though audio for
/// earlier terms remains in the media directory.
pub async fn generate_deck(
    ui: &Ui,
    info: &DeckInfo,
    terms: &[String],
    provider: &dyn ContentProvider,
    writer: &dyn PackageWriter,
    options: &GenerateOptions,
) -> Result<GenerationReport> {
    if terms.is_empty() {
        return Err(Error::NoTerms {
            deck: info.name.clone(),
        });
    }
    let media = MediaDir::create(&options.media_dir)?;
    let assembler = NoteAssembler::new(
        provider,
        &media,
        &info.native_language,
        options.request_timeout,
    );

    let mut builder = DeckBuilder::new(info);
    let mut failed_terms = vec![];
    let pb = ui.new_progress_bar(&PROGRESS_CONFIG, terms.len() as u64);
    for term in terms {
        match assembler.assemble(term).await {
            Ok((note, assets)) => {
                builder.add_note(note);
                for asset in assets {
                    builder.add_media(asset);
                }
            }
            Err(error) => match options.failure_policy {
                FailurePolicy::SkipFailedTerms if is_skippable(&error) => {
                    warn!("skipping {:?}: {}", term, error);
                    failed_terms.push(FailedTerm {
                        term: term.clone(),
                        error,
                    });
                }
                _ => {
                    pb.abandon();
                    return Err(error);
                }
            },
        }
        pb.inc(1);
    }
    ui.finish(&PROGRESS_CONFIG, pb);

    if builder.is_empty() {
        // Every term failed, so there's nothing worth packaging.
        if let Some(last) = failed_terms.pop() {
            return Err(last.error);
        }
    }

    fs::create_dir_all(&options.output_dir)
        .map_err(|e| Error::filesystem(&options.output_dir, e))?;
    let path = package_path(&options.output_dir, &info.name, options.date);
    let deck = builder.build();
    let media_files = deck.media_paths();
    debug!("exporting {} notes to {}", deck.notes.len(), path.display());
    writer.write_package(&deck, &media_files, &path)?;
    info!("wrote {}", path.display());

    Ok(GenerationReport {
        package_path: path,
        notes: deck.notes.len(),
        media_files: media_files.len(),
        failed_terms,
    })
}

/// Can we skip a term which failed with `error`? Only problems with that
/// particular term qualify. Anything else, like a full disk, would break
/// the following terms too.
fn is_skippable(error: &Error) -> bool {
    matches!(
        error,
        Error::Provider { .. } | Error::ProviderTimeout { .. } | Error::EmptyTerm { .. }
    )
}
