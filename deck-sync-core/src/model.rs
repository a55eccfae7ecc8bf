//! Plain data carried through the extract → enhance → reconcile pipeline.

use serde::{Deserialize, Serialize};

/// Identifier of a note (record) in the flashcard store.
pub type NoteId = u64;

/// A flashcard statement extracted from a document.
///
/// `tags` runs from the shallowest ancestor heading path to the deepest, one
/// entry per heading level active when the card line was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
}

impl Card {
    /// Replacement card with new content and the same tags.
    pub fn with_content(&self, front: impl Into<String>, back: impl Into<String>) -> Card {
        Card {
            front: front.into(),
            back: back.into(),
            tags: self.tags.clone(),
        }
    }
}

/// A document handed over by the host: its display name (file stem) and raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

/// Result of reconciling one card against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Created { note_id: NoteId },
    Updated { note_id: NoteId },
    Failed { reason: String },
}

/// A card that could not be synchronised, with the reason reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFailure {
    pub front: String,
    pub reason: String,
}

/// Summary of one run. Failures count towards neither counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub deck: String,
    pub created: usize,
    pub updated: usize,
    pub failures: Vec<CardFailure>,
}

impl SyncReport {
    pub fn new(deck: impl Into<String>) -> Self {
        SyncReport {
            deck: deck.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, card: &Card, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::Created { .. } => self.created += 1,
            SyncOutcome::Updated { .. } => self.updated += 1,
            SyncOutcome::Failed { reason } => self.failures.push(CardFailure {
                front: card.front.clone(),
                reason: reason.clone(),
            }),
        }
    }
}
