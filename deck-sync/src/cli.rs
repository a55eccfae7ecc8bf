///
/// This module implements the CLI interface for deck-sync: command parsing,
/// argument validation and the async entrypoint.
///
/// All business logic (extraction, enhancement, reconciliation) lives in the
/// [`deck-sync-core`] crate. This module only wires configuration, the
/// AnkiConnect client, the optional enhancer and the file workspace together.
///
/// ## How To Use
/// - For command-line users: use the installed `deck-sync` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`deck-sync-core`]: ../../deck-sync-core/
use crate::load_config::load_config;
use crate::workspace::FileWorkspace;
use anyhow::Result;
use clap::{Parser, Subcommand};
use deck_sync_core::anki::AnkiConnectClient;
use deck_sync_core::contract::Enhancer;
use deck_sync_core::enhance::OpenAiEnhancer;
use deck_sync_core::extract::extract_cards;
use deck_sync_core::synchronise::scan_and_sync;
use std::path::PathBuf;

/// CLI for deck-sync: turn `front::back` bullets in notes into Anki cards.
#[derive(Parser)]
#[clap(
    name = "deck-sync",
    version,
    about = "Extract flashcards from heading-structured notes and sync them to Anki via AnkiConnect"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synchronise the cards of a document into its deck
    Sync {
        /// Path to the markdown document
        file: PathBuf,
        /// Path to the YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// Target deck; defaults to the file name with whitespace replaced by '_'
        #[clap(long)]
        deck: Option<String>,
        /// Enhance every card through the configured model before syncing
        #[clap(long)]
        enhance: bool,
    },
    /// Print the cards of a document as JSON without contacting Anki
    Extract {
        /// Path to the markdown document
        file: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Sync {
            file,
            config,
            deck,
            enhance,
        } => {
            let config = load_config(config.as_deref())?;
            let workspace = FileWorkspace::open(&file).await?;
            tracing::info!(command = "sync", file = %file.display(), "Starting synchronisation process");

            let store = AnkiConnectClient::new(config.sync.anki.endpoint.as_str());
            let enhancer = (enhance || config.sync.enhancement.enabled)
                .then(|| OpenAiEnhancer::new(&config.sync.enhancement, config.api_key.clone()));

            match scan_and_sync(
                &config.sync,
                deck.as_deref(),
                &store,
                enhancer.as_ref().map(|e| e as &dyn Enhancer),
                &workspace,
            )
            .await
            {
                Ok(report) => {
                    tracing::info!(command = "sync", ?report, "Synchronisation complete");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = %e, "Synchronisation failed");
                    Err(anyhow::Error::new(e).context("Synchronisation failed"))
                }
            }
        }
        Commands::Extract { file } => {
            let workspace = FileWorkspace::open(&file).await?;
            let cards = extract_cards(&workspace.document().text);
            tracing::info!(command = "extract", count = cards.len(), "Extracted cards");
            println!("{}", serde_json::to_string_pretty(&cards)?);
            Ok(())
        }
    }
}
