//! Documents section — own and shared document listings.
//!
//! Keeps the last rendered list so view/delete gestures can resolve an id
//! to a document before any network use; an id that is not in the current
//! list is a stale reference and never reaches the backend.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use docvault_client::{ClientError, Document, VaultApi};

use crate::generation::Generation;
use crate::surface::{Region, Surface};

pub struct DocumentsController {
    api: Arc<VaultApi>,
    surface: Arc<dyn Surface>,
    generation: Generation,
    epoch: Generation,
    current: Mutex<Vec<Document>>,
}

fn lock(current: &Mutex<Vec<Document>>) -> MutexGuard<'_, Vec<Document>> {
    current.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DocumentsController {
    pub(crate) fn new(api: Arc<VaultApi>, surface: Arc<dyn Surface>, epoch: Generation) -> Self {
        Self {
            api,
            surface,
            generation: Generation::new(),
            epoch,
            current: Mutex::new(Vec::new()),
        }
    }

    /// Load both listings in parallel and render each region
    /// independently; a failed sub-fetch degrades only its own region.
    ///
    /// # Errors
    ///
    /// Only auth failures propagate.
    pub async fn load(&self) -> Result<(), ClientError> {
        let ticket = self.generation.begin();
        let epoch = self.epoch.current();

        let (own, shared) = tokio::join!(
            self.api.documents.list(None),
            self.api.documents.list_shared()
        );

        if !self.generation.is_current(ticket) || !self.epoch.is_current(epoch) {
            debug!("dropping stale documents load");
            return Ok(());
        }

        match own {
            Ok(documents) => {
                self.surface.render_documents(&documents);
                *lock(&self.current) = documents;
            }
            Err(err) if err.is_auth_failure() => return Err(err),
            Err(err) => {
                warn!(error = %err, "document list failed");
                self.surface
                    .render_region_error(Region::DocumentGrid, &err.user_message());
            }
        }

        match shared {
            Ok(documents) => self.surface.render_shared_documents(&documents),
            Err(err) if err.is_auth_failure() => return Err(err),
            Err(err) => {
                warn!(error = %err, "shared document list failed");
                self.surface
                    .render_region_error(Region::SharedDocuments, &err.user_message());
            }
        }

        Ok(())
    }

    /// Resolve an id against the current list.
    ///
    /// # Errors
    ///
    /// `StaleReference` when the id is not in the last rendered list.
    pub fn document(&self, id: &str) -> Result<Document, ClientError> {
        lock(&self.current)
            .iter()
            .find(|doc| doc.id == id)
            .cloned()
            .ok_or_else(|| {
                ClientError::StaleReference(format!("document {id} is no longer available"))
            })
    }

    /// Forget the rendered list (section reset on sign-out).
    pub fn reset(&self) {
        lock(&self.current).clear();
    }
}
