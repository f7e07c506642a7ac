//! Upload section — owns the file selection and the submission flow.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use docvault_client::{ClientError, PendingFile, UploadMeta, VaultApi, validate};

use crate::surface::{AlertKind, Surface};

pub struct UploadController {
    api: Arc<VaultApi>,
    surface: Arc<dyn Surface>,
    selected: Mutex<Option<PendingFile>>,
}

fn lock(selected: &Mutex<Option<PendingFile>>) -> MutexGuard<'_, Option<PendingFile>> {
    selected.lock().unwrap_or_else(PoisonError::into_inner)
}

impl UploadController {
    pub(crate) fn new(api: Arc<VaultApi>, surface: Arc<dyn Surface>) -> Self {
        Self {
            api,
            surface,
            selected: Mutex::new(None),
        }
    }

    /// React to a file pick. An invalid file is alerted immediately and
    /// the selection is cleared, so a later submit cannot sneak it in.
    pub fn select_file(&self, file: PendingFile) {
        match validate::validate_file(&file) {
            Ok(()) => *lock(&self.selected) = Some(file),
            Err(err) => {
                self.surface.alert(AlertKind::Error, &err.user_message());
                *lock(&self.selected) = None;
            }
        }
    }

    pub fn selected_file(&self) -> Option<PendingFile> {
        lock(&self.selected).clone()
    }

    /// Clear the selection (form reset, section unmount, sign-out).
    pub fn reset(&self) {
        *lock(&self.selected) = None;
    }

    /// Submit the selected file. The submit controls are re-enabled in a
    /// finally path regardless of outcome; on success the form is reset
    /// and the selection cleared.
    ///
    /// # Errors
    ///
    /// `Validation` when no file is selected or the title is empty,
    /// otherwise the gateway's errors. The caller surfaces them and
    /// triggers the cross-section reloads on success.
    pub async fn submit(&self, meta: UploadMeta) -> Result<(), ClientError> {
        self.surface.set_busy(true);
        let result = self.submit_inner(meta).await;
        self.surface.set_busy(false);
        result
    }

    async fn submit_inner(&self, meta: UploadMeta) -> Result<(), ClientError> {
        let Some(file) = lock(&self.selected).clone() else {
            return Err(ClientError::Validation(
                "Please select a file to upload".to_owned(),
            ));
        };
        validate::validate_upload(Some(&file), &meta.title)?;

        let document_id = self.api.documents.upload(&file, &meta).await?;
        info!(?document_id, title = %meta.title, "document uploaded");

        self.surface
            .alert(AlertKind::Success, "Document uploaded successfully!");
        self.surface.reset_upload_form();
        self.reset();
        Ok(())
    }
}
