//! Create-or-update reconciliation of extracted cards against the store.
//!
//! A note is identified by its exact front text within one deck. For each card:
//!
//! ```text
//! Lookup -> Create                                         -> Created
//!        -> UpdateFields -> ClearTags -> AddTags           -> Updated
//! any failing step                                          -> Failed(reason)
//! ```
//!
//! Tag replacement is two calls, clear then add, because the store offers no
//! atomic "set tags". Between them the matched notes carry no tags at all; a
//! failure of the add step leaves them that way until the next run.
//!
//! Only the front is part of the identity. Two cards with the same front in one
//! document collide, and the later one updates the note created by the earlier.

use tracing::{error, info, warn};

use crate::contract::{NewNote, NoteFields, RemoteStore};
use crate::error::RemoteStoreError;
use crate::model::{Card, SyncOutcome};

/// Creates `deck` unless the store already has it.
pub async fn ensure_collection<S>(store: &S, deck: &str) -> Result<(), RemoteStoreError>
where
    S: RemoteStore + ?Sized,
{
    let existing = store.deck_names().await?;
    if existing.iter().any(|name| name == deck) {
        info!(deck, "Deck already exists");
        return Ok(());
    }
    info!(deck, "Creating new deck");
    store.create_deck(deck).await
}

/// Reconciles one card. Never fails: store errors become [`SyncOutcome::Failed`].
pub async fn reconcile<S>(store: &S, card: &Card, deck: &str) -> SyncOutcome
where
    S: RemoteStore + ?Sized,
{
    match try_reconcile(store, card, deck).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(front = %card.front, deck, error = %e, "Failed to add/update card");
            SyncOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

async fn try_reconcile<S>(
    store: &S,
    card: &Card,
    deck: &str,
) -> Result<SyncOutcome, RemoteStoreError>
where
    S: RemoteStore + ?Sized,
{
    let matches = store.find_notes(&note_query(&card.front, deck)).await?;

    let Some(&note_id) = matches.first() else {
        let note_id = store.add_note(&NewNote::from_card(card, deck)).await?;
        info!(front = %card.front, deck, note_id, "Created note");
        return Ok(SyncOutcome::Created { note_id });
    };

    if matches.len() > 1 {
        warn!(front = %card.front, deck, count = matches.len(), "Several notes share this front; updating the first");
    }

    let fields = NoteFields {
        front: card.front.clone(),
        back: card.back.clone(),
    };
    store.update_note_fields(note_id, &fields).await?;
    store.remove_tags(&matches, "").await?;
    store.add_tags(&matches, &card.tags.join(" ")).await?;

    info!(front = %card.front, deck, note_id, tags = ?card.tags, "Updated note");
    Ok(SyncOutcome::Updated { note_id })
}

/// Search query matching notes whose front is exactly `front`, in `deck` only.
pub fn note_query(front: &str, deck: &str) -> String {
    format!(
        "\"front:{}\" \"deck:{}\"",
        escape_search_term(front),
        escape_search_term(deck)
    )
}

fn escape_search_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '"' | '*' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
