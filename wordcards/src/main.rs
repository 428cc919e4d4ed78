//! Command-line interface to wordcards.

use std::{error::Error as StdError, path::PathBuf};

use anyhow::{Context as _, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::warn;
use wordcards::{
    deck_info::{DeckStore, RandomIds},
    editor::edit_file,
    export::ApkgWriter,
    generate::{generate_deck, FailurePolicy, GenerateOptions},
    services::OpenAiProvider,
    settings::{Settings, DEFAULT_SETTINGS_PATH},
    terms::{EditorTermSource, FileTermSource, TermSource},
    ui::Ui,
    Error,
};

#[derive(Debug, Parser)]
/// Generate Anki vocabulary decks with definitions, translations, example
/// sentences and audio, using OpenAI.
#[command(name = "wordcards", version)]
struct Args {
    /// Path to the settings file.
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Create a new deck.
    #[command(name = "newdeck")]
    NewDeck {
        /// Name of the deck. May not contain spaces.
        #[arg(short = 'n', long)]
        name: String,

        /// Native language of the deck's user. Terms are translated into
        /// this language.
        #[arg(short = 'l', long)]
        native_language: String,
    },

    /// Generate an .apkg file for a deck. Unless --terms is given, your
    /// $EDITOR is opened so you can enter one term per line.
    #[command(name = "generate")]
    Generate {
        /// Name of the deck.
        name: String,

        /// Read terms from this file instead of opening an editor.
        #[arg(long)]
        terms: Option<PathBuf>,

        /// Skip terms which fail, instead of stopping the whole run.
        #[arg(long)]
        skip_failures: bool,
    },

    /// List all decks.
    #[command(name = "listdecks")]
    ListDecks,

    /// Edit a deck's settings in your $EDITOR.
    #[command(name = "editdeck")]
    EditDeck {
        /// Name of the deck.
        name: String,
    },

    /// Delete a deck.
    #[command(name = "deletedeck")]
    DeleteDeck {
        /// Name of the deck.
        name: String,

        /// Don't ask for confirmation.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

// Choose and run the appropriate command.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let ui = Ui::init();

    let args = Args::parse();
    let settings = Settings::load(&args.settings)?;
    let store = DeckStore::new(settings.decks_directory.clone());
    match args.cmd {
        Cmd::NewDeck {
            name,
            native_language,
        } => cmd_new_deck(&store, &name, &native_language),
        Cmd::Generate {
            name,
            terms,
            skip_failures,
        } => cmd_generate(&ui, &settings, &store, &name, terms, skip_failures).await,
        Cmd::ListDecks => cmd_list_decks(&store),
        Cmd::EditDeck { name } => cmd_edit_deck(&store, &name),
        Cmd::DeleteDeck { name, yes } => cmd_delete_deck(&ui, &store, &name, yes),
    }
}

fn cmd_new_deck(store: &DeckStore, name: &str, native_language: &str) -> Result<()> {
    let path = store.create(name, native_language, &mut RandomIds)?;
    println!("Created {}", path.display());
    Ok(())
}

async fn cmd_generate(
    ui: &Ui,
    settings: &Settings,
    store: &DeckStore,
    name: &str,
    terms_path: Option<PathBuf>,
    skip_failures: bool,
) -> Result<()> {
    let info = store.load(name)?;
    let source: Box<dyn TermSource> = match terms_path {
        Some(path) => Box::new(FileTermSource::new(path)),
        None => Box::new(EditorTermSource),
    };
    let terms = source.read_terms()?;

    let provider = OpenAiProvider::new(&settings.openai)?;
    let options = GenerateOptions {
        output_dir: settings.output_directory.clone(),
        media_dir: settings.media_directory(),
        date: Local::now().date_naive(),
        request_timeout: settings.openai.timeout(),
        failure_policy: if skip_failures {
            FailurePolicy::SkipFailedTerms
        } else {
            FailurePolicy::Abort
        },
    };
    let report = generate_deck(ui, &info, &terms, &provider, &ApkgWriter, &options)
        .await
        .with_context(|| format!("could not generate deck {:?}", name))?;

    for failed in &report.failed_terms {
        ui.println(&format!(
            "Skipped {:?}: {}",
            failed.term,
            error_chain(&failed.error)
        ));
    }
    println!(
        "Wrote {} ({} notes)",
        report.package_path.display(),
        report.notes
    );
    Ok(())
}

fn cmd_list_decks(store: &DeckStore) -> Result<()> {
    println!("decks:");
    for name in store.list()? {
        println!(" - {}", name);
    }
    Ok(())
}

fn cmd_edit_deck(store: &DeckStore, name: &str) -> Result<()> {
    let before = store.load(name)?;
    let path = store.path_for(name);
    edit_file(&path)?;
    let after = store.load(name).with_context(|| {
        format!(
            "{} is no longer valid; run `wordcards editdeck {}` to fix it",
            path.display(),
            name
        )
    })?;
    if after.deck_id != before.deck_id || after.model_id != before.model_id {
        warn!(
            "the IDs of {:?} changed; Anki will treat the next package as a new deck",
            name
        );
    }
    if after.name != name {
        warn!(
            "deck file {} contains the name {:?}",
            path.display(),
            after.name
        );
    }
    Ok(())
}

fn cmd_delete_deck(ui: &Ui, store: &DeckStore, name: &str, yes: bool) -> Result<()> {
    store.load(name)?;
    let path = store.path_for(name);
    let question = format!("Are you sure you want to delete {}?", path.display());
    if yes || ui.confirm(&question)? {
        let path = store.delete(name)?;
        println!("Deleted {}", path.display());
    }
    Ok(())
}

/// Format an error and its causes on one line.
fn error_chain(err: &Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
