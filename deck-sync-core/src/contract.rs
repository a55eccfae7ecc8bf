//! # contract: capability seams of the sync pipeline
//!
//! The core never talks to a concrete service directly. It depends on three
//! traits, implemented by real clients and by test mocks:
//!
//! - [`RemoteStore`]: the flashcard store (AnkiConnect protocol, version 6).
//! - [`Enhancer`]: the optional text-generation service that rewrites a card.
//! - [`Workspace`]: the host application, which supplies the active document
//!   and shows notifications to the user.
//!
//! ## Mocking & Testing
//! - Every trait is annotated for `mockall`; `MockRemoteStore`, `MockEnhancer`
//!   and `MockWorkspace` are exported with the `test-export-mocks` feature.
//!
//! ## Errors
//! - Store calls return [`RemoteStoreError`]; enhancement returns [`EnhanceError`].
//! - The workspace never fails: "no active document" is `None`.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;

use crate::error::{EnhanceError, RemoteStoreError};
use crate::model::{Card, Document, NoteId};

/// Note type used for every created note.
pub const BASIC_MODEL: &str = "Basic";

/// The `Front`/`Back` fields of a Basic note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteFields {
    #[serde(rename = "Front")]
    pub front: String,
    #[serde(rename = "Back")]
    pub back: String,
}

/// Duplicate handling asked of the store when adding a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    pub allow_duplicate: bool,
    pub duplicate_scope: String,
}

impl Default for NoteOptions {
    /// The store itself refuses a second note with the same front in the same deck.
    fn default() -> Self {
        NoteOptions {
            allow_duplicate: false,
            duplicate_scope: "deck".to_string(),
        }
    }
}

/// A note to be created, in the shape of the `addNote` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub deck_name: String,
    pub model_name: String,
    pub fields: NoteFields,
    pub options: NoteOptions,
    pub tags: Vec<String>,
}

impl NewNote {
    pub fn from_card(card: &Card, deck: &str) -> Self {
        NewNote {
            deck_name: deck.to_string(),
            model_name: BASIC_MODEL.to_string(),
            fields: NoteFields {
                front: card.front.clone(),
                back: card.back.clone(),
            },
            options: NoteOptions::default(),
            tags: card.tags.clone(),
        }
    }
}

/// Operations of the flashcard store consumed by the reconciler.
///
/// Every method is one request/response round trip and a suspension point.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Names of all existing decks (`deckNames`).
    async fn deck_names(&self) -> Result<Vec<String>, RemoteStoreError>;

    /// Creates a deck (`createDeck`).
    async fn create_deck(&self, deck: &str) -> Result<(), RemoteStoreError>;

    /// Ids of notes matching a search query (`findNotes`).
    async fn find_notes(&self, query: &str) -> Result<Vec<NoteId>, RemoteStoreError>;

    /// Creates a note and returns its id (`addNote`).
    async fn add_note(&self, note: &NewNote) -> Result<NoteId, RemoteStoreError>;

    /// Overwrites the fields of an existing note (`updateNoteFields`).
    async fn update_note_fields(
        &self,
        note_id: NoteId,
        fields: &NoteFields,
    ) -> Result<(), RemoteStoreError>;

    /// Removes space-separated `tags` from the notes (`removeTags`).
    async fn remove_tags(&self, notes: &[NoteId], tags: &str) -> Result<(), RemoteStoreError>;

    /// Adds space-separated `tags` to the notes (`addTags`).
    async fn add_tags(&self, notes: &[NoteId], tags: &str) -> Result<(), RemoteStoreError>;
}

/// Prompt settings for one enhancement call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    pub system_prompt: String,
}

/// Rewrites a card through an external generation service.
///
/// Success returns a replacement card with the same tags; the input is never
/// mutated. Callers must treat every error as recoverable and keep the original.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Enhancer: Send + Sync {
    async fn enhance(&self, card: &Card, prompt: &PromptConfig) -> Result<Card, EnhanceError>;
}

/// The host application as seen by the orchestrator.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Workspace: Send + Sync {
    /// The document the user is working on, if any.
    async fn active_document(&self) -> Option<Document>;

    /// Shows a message to the user.
    fn notify(&self, message: &str);
}
