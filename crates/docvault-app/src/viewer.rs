//! Blob viewer — per-request object-URL lifecycle for inline previews.
//!
//! State machine: `Closed → Loading → Open → Closed`. Every object URL
//! minted here is revoked exactly once, and revocation happens before the
//! owning modal leaves the DOM. A second `open` while a preview is showing
//! closes (and revokes) the first before loading the second.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use docvault_client::{ClientError, Document, DocumentsGateway, DownloadedFile};

use crate::generation::Generation;
use crate::surface::ViewerHost;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewerState {
    Closed,
    Loading { document_id: String },
    Open { document_id: String, url: String },
}

pub struct BlobViewer {
    state: Mutex<ViewerState>,
    host: Arc<dyn ViewerHost>,
    generation: Generation,
}

fn lock(state: &Mutex<ViewerState>) -> MutexGuard<'_, ViewerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// True for the types the host can preview inline.
fn is_inline(mime_type: &str) -> bool {
    mime_type.starts_with("image/") || mime_type == "application/pdf"
}

impl BlobViewer {
    pub fn new(host: Arc<dyn ViewerHost>) -> Self {
        Self {
            state: Mutex::new(ViewerState::Closed),
            host,
            generation: Generation::new(),
        }
    }

    /// Fetch a document and preview it inline, or hand it straight to the
    /// user agent when the type is not previewable.
    ///
    /// # Errors
    ///
    /// Propagates download failures; the viewer is left closed.
    pub async fn open(
        &self,
        documents: &DocumentsGateway,
        document: &Document,
    ) -> Result<(), ClientError> {
        self.close();

        let ticket = self.generation.begin();
        *lock(&self.state) = ViewerState::Loading {
            document_id: document.id.clone(),
        };

        let result = documents.download(&document.id).await;

        if !self.generation.is_current(ticket) {
            // The viewer moved on while the download was in flight; the
            // resolution is dropped and no URL is ever minted for it.
            debug!(document_id = %document.id, "dropping stale viewer load");
            return Ok(());
        }

        let file = match result {
            Ok(file) => file,
            Err(err) => {
                *lock(&self.state) = ViewerState::Closed;
                return Err(err);
            }
        };

        if !is_inline(&document.mime_type) {
            self.host.save_file(&file);
            *lock(&self.state) = ViewerState::Closed;
            return Ok(());
        }

        let url = self.host.mint_object_url(&file.bytes, &document.mime_type);
        if document.mime_type == "application/pdf" {
            self.host.mount_pdf(&url, &document.title);
        } else {
            self.host.mount_image(&url, &document.title);
        }
        *lock(&self.state) = ViewerState::Open {
            document_id: document.id.clone(),
            url,
        };
        Ok(())
    }

    /// Close the modal. Revokes the object URL before unmounting; also
    /// invalidates any in-flight load so its resolution is dropped.
    pub fn close(&self) {
        self.generation.invalidate();
        let mut state = lock(&self.state);
        match std::mem::replace(&mut *state, ViewerState::Closed) {
            ViewerState::Open { url, .. } => {
                self.host.revoke_object_url(&url);
                self.host.unmount();
            }
            ViewerState::Loading { .. } | ViewerState::Closed => {}
        }
    }

    /// Close only when the given document is the one being shown. Used by
    /// the delete flow so a removed document never stays on screen.
    pub fn close_if_showing(&self, document_id: &str) {
        let showing = matches!(
            &*lock(&self.state),
            ViewerState::Open { document_id: open_id, .. } if open_id == document_id
        );
        if showing {
            self.close();
        }
    }

    /// The id of the document currently previewed, if any.
    pub fn current_document(&self) -> Option<String> {
        match &*lock(&self.state) {
            ViewerState::Open { document_id, .. } => Some(document_id.clone()),
            ViewerState::Loading { .. } | ViewerState::Closed => None,
        }
    }

    /// Hand an already-downloaded file to the user agent.
    pub fn save(&self, file: &DownloadedFile) {
        self.host.save_file(file);
    }
}
