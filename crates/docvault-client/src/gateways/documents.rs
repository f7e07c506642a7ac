//! Documents gateway — listing, stats, upload, download, share, delete.

use std::sync::Arc;

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::error::ClientError;
use crate::http::HttpClient;
use crate::types::{
    Ack, Document, DocumentListResponse, DocumentStats, DownloadedFile, PendingFile,
    StatsResponse, UploadMeta, UploadResponse,
};
use crate::validate;

pub struct DocumentsGateway {
    http: Arc<HttpClient>,
}

impl DocumentsGateway {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// List the current user's documents, newest first.
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<Document>, ClientError> {
        let path = match limit {
            Some(limit) => format!("/documents?limit={limit}"),
            None => "/documents".to_owned(),
        };
        let resp: DocumentListResponse = self.http.request(Method::GET, &path, None).await?;
        Ok(resp.documents)
    }

    /// List documents shared with the current user.
    pub async fn list_shared(&self) -> Result<Vec<Document>, ClientError> {
        let resp: DocumentListResponse =
            self.http.request(Method::GET, "/documents/shared", None).await?;
        Ok(resp.documents)
    }

    /// Fetch the dashboard overview counts.
    pub async fn stats(&self) -> Result<DocumentStats, ClientError> {
        let resp: StatsResponse = self.http.request(Method::GET, "/documents/stats", None).await?;
        Ok(resp.stats)
    }

    /// Upload a file with its metadata. Validates size, type, and title
    /// client-side; a validation failure issues no request.
    ///
    /// Returns the new document id when the server provides one.
    ///
    /// # Errors
    ///
    /// `Validation` for a rejected file or empty title, otherwise the usual
    /// transport/server errors.
    pub async fn upload(
        &self,
        file: &PendingFile,
        meta: &UploadMeta,
    ) -> Result<Option<String>, ClientError> {
        validate::validate_upload(Some(file), &meta.title)?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(ClientError::Transport)?;

        let mut form = Form::new()
            .part("document", part)
            .text("title", meta.title.clone())
            .text("category", meta.category.as_str());
        if let Some(ref description) = meta.description {
            form = form.text("description", description.clone());
        }
        if let Some(ref classification) = meta.classification {
            form = form.text("classification", classification.clone());
        }
        if let Some(ref department) = meta.department {
            form = form.text("department", department.clone());
        }

        let resp: UploadResponse = self.http.send_multipart("/documents/upload", form).await?;
        debug!(document_id = ?resp.document_id, "upload accepted");
        Ok(resp.document_id)
    }

    /// Download a document's bytes plus the server-provided file name.
    pub async fn download(&self, id: &str) -> Result<DownloadedFile, ClientError> {
        let path = format!("/documents/{}/download", urlencoding::encode(id));
        self.http.fetch_binary(&path).await
    }

    /// Delete a document. Any reference to the id is stale afterwards.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/documents/{}", urlencoding::encode(id));
        self.http.request::<Ack>(Method::DELETE, &path, None).await?;
        Ok(())
    }

    /// Share a document with another user by email.
    pub async fn share(&self, id: &str, email: &str, permission: &str) -> Result<(), ClientError> {
        let path = format!("/documents/{}/share", urlencoding::encode(id));
        let body = serde_json::json!({ "email": email, "permission": permission });
        self.http.request::<Ack>(Method::POST, &path, Some(body)).await?;
        Ok(())
    }
}
