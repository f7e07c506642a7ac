//! Resource layer for the docvault dashboard.
//!
//! Owns the authenticated session token and issues authorized requests to
//! the document-vault REST API: one gateway per backend resource (users,
//! documents, family, profile) over a shared bearer-token HTTP client.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docvault_client::{AuthTokenHolder, ClientConfig, HttpClient, MemoryTokenStore, VaultApi};
//!
//! # async fn example() -> Result<(), docvault_client::ClientError> {
//! let tokens = Arc::new(AuthTokenHolder::new(Arc::new(MemoryTokenStore::new())));
//! let http = Arc::new(HttpClient::new(&ClientConfig::default(), Arc::clone(&tokens))?);
//! let api = VaultApi::new(http);
//! let documents = api.documents.list(None).await?;
//! for doc in &documents {
//!     tracing::info!(title = %doc.title, "document");
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod error;
mod gateways;
mod http;
mod types;
pub mod validate;

pub use auth::{AuthTokenHolder, FileTokenStore, MemoryTokenStore, TokenStore, UserHandle};
pub use error::ClientError;
pub use gateways::{DocumentsGateway, FamilyGateway, ProfileGateway, UsersGateway, VaultApi};
pub use http::{ClientConfig, HttpClient, parse_content_disposition};
pub use types::{
    Address, Document, DocumentCategory, DocumentStats, DownloadedFile, FamilyGroup, FamilyMember,
    GovernmentIdChallenge, GovernmentIdKind, Invitation, InvitationStatus, MemberStatus,
    PendingFile, ProfilePatch, SyncProfile, UploadMeta, UserProfile,
};
pub use validate::{ACCEPTED_MIME_TYPES, MAX_UPLOAD_BYTES};
