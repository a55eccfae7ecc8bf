//! File-backed [`Workspace`]: the "active document" is the file named on the
//! command line, and notifications go to stdout.

use anyhow::{Context, Result};
use async_trait::async_trait;
use deck_sync_core::contract::Workspace;
use deck_sync_core::model::Document;
use std::path::Path;

pub struct FileWorkspace {
    document: Document,
}

impl FileWorkspace {
    pub async fn open(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!(path = %path.display(), name = %name, bytes = text.len(), "Opened document");
        Ok(FileWorkspace {
            document: Document { name, text },
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[async_trait]
impl Workspace for FileWorkspace {
    async fn active_document(&self) -> Option<Document> {
        Some(self.document.clone())
    }

    fn notify(&self, message: &str) {
        tracing::info!(message, "Notice");
        println!("{message}");
    }
}
