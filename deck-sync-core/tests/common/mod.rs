#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use deck_sync_core::contract::{NewNote, NoteFields, RemoteStore, Workspace};
use deck_sync_core::error::RemoteStoreError;
use deck_sync_core::model::{Document, NoteId};

/// Decodes `"front:<v>" "deck:<d>"` the way Anki reads quoted search terms:
/// a backslash makes the next character literal.
pub fn parse_note_query(query: &str) -> Option<(String, String)> {
    let mut terms = Vec::new();
    let mut chars = query.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let mut term = String::new();
                loop {
                    match chars.next()? {
                        '\\' => term.push(chars.next()?),
                        '"' => break,
                        other => term.push(other),
                    }
                }
                terms.push(term);
            }
            ' ' => {}
            _ => return None,
        }
    }
    match terms.as_slice() {
        [front, deck] => Some((
            front.strip_prefix("front:")?.to_string(),
            deck.strip_prefix("deck:")?.to_string(),
        )),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNote {
    pub id: NoteId,
    pub deck: String,
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
}

#[derive(Default)]
struct StoreState {
    decks: Vec<String>,
    notes: Vec<StoredNote>,
    next_id: NoteId,
    actions: Vec<String>,
}

/// In-memory AnkiConnect stand-in that enforces deck-scoped duplicate fronts.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    /// `addNote` and `updateNoteFields` fail for this front.
    failing_front: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(front: &str) -> Self {
        InMemoryStore {
            failing_front: Some(front.to_string()),
            ..Self::default()
        }
    }

    pub fn with_note(self, deck: &str, front: &str, back: &str, tags: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            if !state.decks.iter().any(|d| d == deck) {
                state.decks.push(deck.to_string());
            }
            state.next_id += 1;
            let id = state.next_id;
            state.notes.push(StoredNote {
                id,
                deck: deck.to_string(),
                front: front.to_string(),
                back: back.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            });
        }
        self
    }

    pub fn decks(&self) -> Vec<String> {
        self.state.lock().unwrap().decks.clone()
    }

    pub fn notes(&self) -> Vec<StoredNote> {
        self.state.lock().unwrap().notes.clone()
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.lock().unwrap().actions.clone()
    }

    fn check_front(&self, action: &str, front: &str) -> Result<(), RemoteStoreError> {
        match &self.failing_front {
            Some(failing) if failing == front => {
                Err(RemoteStoreError::api(action, "collection is not available"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn deck_names(&self) -> Result<Vec<String>, RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.actions.push("deckNames".into());
        Ok(state.decks.clone())
    }

    async fn create_deck(&self, deck: &str) -> Result<(), RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.actions.push("createDeck".into());
        if !state.decks.iter().any(|d| d == deck) {
            state.decks.push(deck.to_string());
        }
        Ok(())
    }

    async fn find_notes(&self, query: &str) -> Result<Vec<NoteId>, RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.actions.push("findNotes".into());
        let (front, deck) = parse_note_query(query).ok_or_else(|| {
            RemoteStoreError::api("findNotes", format!("unsupported query: {query}"))
        })?;
        Ok(state
            .notes
            .iter()
            .filter(|n| n.front == front && n.deck == deck)
            .map(|n| n.id)
            .collect())
    }

    async fn add_note(&self, note: &NewNote) -> Result<NoteId, RemoteStoreError> {
        self.check_front("addNote", &note.fields.front)?;
        let mut state = self.state.lock().unwrap();
        state.actions.push("addNote".into());
        let duplicate = state
            .notes
            .iter()
            .any(|n| n.deck == note.deck_name && n.front == note.fields.front);
        if duplicate && !note.options.allow_duplicate {
            return Err(RemoteStoreError::api(
                "addNote",
                "cannot create note because it is a duplicate",
            ));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.notes.push(StoredNote {
            id,
            deck: note.deck_name.clone(),
            front: note.fields.front.clone(),
            back: note.fields.back.clone(),
            tags: note.tags.clone(),
        });
        Ok(id)
    }

    async fn update_note_fields(
        &self,
        note_id: NoteId,
        fields: &NoteFields,
    ) -> Result<(), RemoteStoreError> {
        self.check_front("updateNoteFields", &fields.front)?;
        let mut state = self.state.lock().unwrap();
        state.actions.push("updateNoteFields".into());
        let note = state
            .notes
            .iter_mut()
            .find(|n| n.id == note_id)
            .ok_or_else(|| RemoteStoreError::api("updateNoteFields", "note was not found"))?;
        note.front = fields.front.clone();
        note.back = fields.back.clone();
        Ok(())
    }

    async fn remove_tags(&self, notes: &[NoteId], tags: &str) -> Result<(), RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.actions.push("removeTags".into());
        let removed: Vec<&str> = tags.split_whitespace().collect();
        for note in state.notes.iter_mut().filter(|n| notes.contains(&n.id)) {
            if removed.is_empty() {
                note.tags.clear();
            } else {
                note.tags.retain(|t| !removed.contains(&t.as_str()));
            }
        }
        Ok(())
    }

    async fn add_tags(&self, notes: &[NoteId], tags: &str) -> Result<(), RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.actions.push("addTags".into());
        for note in state.notes.iter_mut().filter(|n| notes.contains(&n.id)) {
            for tag in tags.split_whitespace() {
                if !note.tags.iter().any(|t| t == tag) {
                    note.tags.push(tag.to_string());
                }
            }
        }
        Ok(())
    }
}

/// Workspace with a fixed document that records every notification.
pub struct RecordingWorkspace {
    document: Option<Document>,
    messages: Mutex<Vec<String>>,
}

impl RecordingWorkspace {
    pub fn with_document(name: &str, text: &str) -> Self {
        RecordingWorkspace {
            document: Some(Document {
                name: name.to_string(),
                text: text.to_string(),
            }),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Workspace for RecordingWorkspace {
    async fn active_document(&self) -> Option<Document> {
        self.document.clone()
    }

    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
