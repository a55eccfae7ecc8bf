//! High-level pipeline: extract → enhance → reconcile for one document.
//!
//! # Major Types
//! - [`SyncReport`]: created/updated counters plus every per-card failure.
//!
//! # Responsibilities
//! - Cards are reconciled strictly one after another; each reconciliation is a
//!   read-then-write sequence against the same deck and must not interleave.
//! - Enhancement is best effort: any [`EnhanceError`](crate::error::EnhanceError)
//!   keeps the original card.
//! - A failing card is reported and skipped; only a failure to ensure the deck
//!   aborts the run.
//!
//! # Navigation
//! - Host entrypoint: [`scan_and_sync`]
//! - Document entrypoint: [`synchronise`]

use tracing::{error, info, warn};

use crate::config::SyncConfig;
use crate::contract::{Enhancer, PromptConfig, RemoteStore, Workspace};
use crate::error::RemoteStoreError;
use crate::extract::extract_cards;
use crate::model::{Card, Document, SyncReport};
use crate::reconcile::{ensure_collection, reconcile};

/// Deck for a document: its name with whitespace runs replaced by `_`, or
/// `default_deck` when that leaves nothing.
pub fn deck_name_for(document_name: &str, default_deck: &str) -> String {
    let deck = document_name.split_whitespace().collect::<Vec<_>>().join("_");
    if deck.is_empty() {
        default_deck.to_string()
    } else {
        deck
    }
}

/// Runs every card through the enhancer, keeping the original on failure.
pub async fn enhance_cards(
    cards: Vec<Card>,
    enhancer: &dyn Enhancer,
    prompt: &PromptConfig,
) -> Vec<Card> {
    let mut enhanced = Vec::with_capacity(cards.len());
    for card in cards {
        match enhancer.enhance(&card, prompt).await {
            Ok(replacement) if replacement.front.trim().is_empty() => {
                warn!(front = %card.front, "Enhancement returned an empty front, keeping original card");
                enhanced.push(card);
            }
            Ok(replacement) => enhanced.push(replacement),
            Err(e) => {
                warn!(front = %card.front, error = %e, "Enhancement failed, keeping original card");
                enhanced.push(card);
            }
        }
    }
    enhanced
}

/// Synchronises the cards of `document` into `deck`.
pub async fn synchronise<S, W>(
    config: &SyncConfig,
    document: &Document,
    deck: &str,
    store: &S,
    enhancer: Option<&dyn Enhancer>,
    workspace: &W,
) -> Result<SyncReport, RemoteStoreError>
where
    S: RemoteStore + ?Sized,
    W: Workspace + ?Sized,
{
    info!(document = %document.name, deck, "[SYNC] Starting synchronisation");

    let mut cards = extract_cards(&document.text);
    info!(count = cards.len(), "[SYNC] Extracted cards");

    if let Some(enhancer) = enhancer {
        cards = enhance_cards(cards, enhancer, &config.enhancement.prompt_config()).await;
    }

    if let Err(e) = ensure_collection(store, deck).await {
        error!(deck, error = %e, "[SYNC][ERROR] Failed to ensure deck exists");
        workspace.notify(&format!("Failed to prepare deck {deck}. Error: {e}"));
        return Err(e);
    }

    let mut report = SyncReport::new(deck);
    for card in &cards {
        let outcome = reconcile(store, card, deck).await;
        report.record(card, &outcome);
    }

    for failure in &report.failures {
        workspace.notify(&format!(
            "Failed to add/update card: {}. Error: {}",
            failure.front, failure.reason
        ));
    }
    workspace.notify(&format!(
        "Sync complete. Added: {}, Updated: {} in deck: {}",
        report.created, report.updated, report.deck
    ));
    info!(
        deck,
        created = report.created,
        updated = report.updated,
        failed = report.failures.len(),
        "[SYNC] Synchronisation complete"
    );
    Ok(report)
}

/// Synchronises the workspace's active document.
///
/// Returns `Ok(None)` after notifying the user when there is no active document.
/// `deck` overrides the deck derived from the document name.
pub async fn scan_and_sync<S, W>(
    config: &SyncConfig,
    deck: Option<&str>,
    store: &S,
    enhancer: Option<&dyn Enhancer>,
    workspace: &W,
) -> Result<Option<SyncReport>, RemoteStoreError>
where
    S: RemoteStore + ?Sized,
    W: Workspace + ?Sized,
{
    let Some(document) = workspace.active_document().await else {
        info!("[SYNC] No active file");
        workspace.notify("No active file");
        return Ok(None);
    };

    let deck = match deck {
        Some(deck) => deck.to_string(),
        None => deck_name_for(&document.name, &config.anki.default_deck),
    };
    synchronise(config, &document, &deck, store, enhancer, workspace)
        .await
        .map(Some)
}
