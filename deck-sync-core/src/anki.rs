//! # AnkiConnect client
//!
//! [`AnkiConnectClient`] implements [`RemoteStore`] over AnkiConnect's local
//! HTTP endpoint. Every call is a `POST` of `{ action, version: 6, params }`;
//! the reply is `{ result, error }`. A transport failure, a non-2xx status or a
//! non-null `error` all surface as [`RemoteStoreError`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::contract::{NewNote, NoteFields, RemoteStore};
use crate::error::RemoteStoreError;
use crate::model::NoteId;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8765";
pub const API_VERSION: u8 = 6;

#[derive(Debug, Serialize)]
pub struct AnkiRequest<'a> {
    pub action: &'a str,
    pub version: u8,
    pub params: serde_json::Value,
}

impl<'a> AnkiRequest<'a> {
    pub fn new(action: &'a str, params: serde_json::Value) -> Self {
        AnkiRequest {
            action,
            version: API_VERSION,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// The `result` payload, or the `error` string as a [`RemoteStoreError`].
    pub fn into_result(self, action: &str) -> Result<Option<T>, RemoteStoreError> {
        match self.error {
            Some(message) => Err(RemoteStoreError::api(action, message)),
            None => Ok(self.result),
        }
    }
}

pub struct AnkiConnectClient {
    client: Client,
    endpoint: String,
}

impl AnkiConnectClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        tracing::info!(endpoint = %endpoint, "Initialized AnkiConnect client");
        AnkiConnectClient {
            client: Client::new(),
            endpoint,
        }
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>, RemoteStoreError> {
        let request = AnkiRequest::new(action, params);
        tracing::debug!(action, params = %request.params, "Invoking AnkiConnect");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, action, endpoint = %self.endpoint, "Failed to reach AnkiConnect");
                RemoteStoreError::transport(action, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, action, "AnkiConnect returned non-success status");
            return Err(RemoteStoreError::Status {
                action: action.to_string(),
                status: status.as_u16(),
            });
        }

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| RemoteStoreError::transport(action, e))?;
        body.into_result(action).inspect_err(|e| {
            tracing::error!(error = %e, action, "AnkiConnect returned an error payload");
        })
    }

    async fn invoke_required<T: DeserializeOwned>(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<T, RemoteStoreError> {
        self.invoke(action, params)
            .await?
            .ok_or_else(|| RemoteStoreError::MissingResult {
                action: action.to_string(),
            })
    }
}

#[async_trait]
impl RemoteStore for AnkiConnectClient {
    async fn deck_names(&self) -> Result<Vec<String>, RemoteStoreError> {
        let decks: Vec<String> = self.invoke_required("deckNames", json!({})).await?;
        tracing::info!(count = decks.len(), "Fetched deck names");
        Ok(decks)
    }

    async fn create_deck(&self, deck: &str) -> Result<(), RemoteStoreError> {
        let deck_id: Option<NoteId> = self.invoke("createDeck", json!({ "deck": deck })).await?;
        tracing::info!(deck, ?deck_id, "Created deck");
        Ok(())
    }

    async fn find_notes(&self, query: &str) -> Result<Vec<NoteId>, RemoteStoreError> {
        let ids: Vec<NoteId> = self
            .invoke_required("findNotes", json!({ "query": query }))
            .await?;
        tracing::debug!(query, matches = ids.len(), "Searched notes");
        Ok(ids)
    }

    async fn add_note(&self, note: &NewNote) -> Result<NoteId, RemoteStoreError> {
        let id: NoteId = self
            .invoke_required("addNote", json!({ "note": note }))
            .await?;
        tracing::info!(note_id = id, deck = %note.deck_name, "Added note");
        Ok(id)
    }

    async fn update_note_fields(
        &self,
        note_id: NoteId,
        fields: &NoteFields,
    ) -> Result<(), RemoteStoreError> {
        self.invoke::<serde_json::Value>(
            "updateNoteFields",
            json!({ "note": { "id": note_id, "fields": fields } }),
        )
        .await?;
        tracing::info!(note_id, "Updated note fields");
        Ok(())
    }

    async fn remove_tags(&self, notes: &[NoteId], tags: &str) -> Result<(), RemoteStoreError> {
        self.invoke::<serde_json::Value>("removeTags", json!({ "notes": notes, "tags": tags }))
            .await?;
        tracing::debug!(?notes, tags, "Removed tags");
        Ok(())
    }

    async fn add_tags(&self, notes: &[NoteId], tags: &str) -> Result<(), RemoteStoreError> {
        self.invoke::<serde_json::Value>("addTags", json!({ "notes": notes, "tags": tags }))
            .await?;
        tracing::debug!(?notes, tags, "Added tags");
        Ok(())
    }
}
