//! Traits for the external collaborators: the thin presentation host and
//! the identity provider.
//!
//! The host receives structured data only — documents, invitations,
//! profiles — never markup. Titles and emails are user-controlled; a host
//! must render them as text nodes, not interpolate them into HTML.

use std::sync::Arc;

use async_trait::async_trait;

use docvault_client::{
    ClientError, Document, DocumentStats, DownloadedFile, FamilyGroup, Invitation, UserHandle,
    UserProfile,
};

/// Top-level screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
}

/// Dashboard sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Documents,
    Family,
    Profile,
    Upload,
}

/// Sub-regions that can degrade to an error placeholder independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Overview,
    DocumentGrid,
    SharedDocuments,
    FamilyMembers,
    PendingInvitations,
    Profile,
}

/// Alert severities. The host auto-dismisses alerts after five seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Info,
}

/// The rendering surface exposed by the presentation host.
///
/// Rendering calls replace the content of their screen/section/region;
/// they are safe to repeat. `confirm` is the only suspension point — it
/// blocks the issuing flow until the user answers.
#[async_trait]
pub trait Surface: Send + Sync {
    fn show_screen(&self, screen: Screen);
    fn show_section(&self, section: Section);

    fn render_overview(&self, stats: &DocumentStats);
    fn render_documents(&self, documents: &[Document]);
    fn render_shared_documents(&self, documents: &[Document]);
    fn render_family(&self, groups: &[FamilyGroup]);
    fn render_invitations(&self, invitations: &[Invitation]);
    fn render_profile(&self, profile: &UserProfile);

    /// Replace one region with an inline error placeholder. Sibling
    /// regions and the dashboard itself stay mounted.
    fn render_region_error(&self, region: Region, message: &str);

    /// Non-blocking toast/alert.
    fn alert(&self, kind: AlertKind, message: &str);

    /// Clear the upload form's inputs after a successful upload.
    fn reset_upload_form(&self);

    /// Disable (`true`) or re-enable (`false`) the submit controls of the
    /// in-flight interactive action.
    fn set_busy(&self, busy: bool);

    /// Explicit confirmation prompt gating destructive operations.
    async fn confirm(&self, message: &str) -> bool;
}

/// The external identity provider (sign-in, registration, sign-out).
///
/// State-change callbacks are delivered by the host wiring the provider's
/// listener to [`SessionCoordinator::on_auth_changed`].
///
/// [`SessionCoordinator::on_auth_changed`]: crate::SessionCoordinator::on_auth_changed
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Arc<dyn UserHandle>, ClientError>;

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Arc<dyn UserHandle>, ClientError>;

    async fn sign_out(&self) -> Result<(), ClientError>;
}

/// Object-URL and modal surface for the blob viewer.
///
/// Every URL returned by `mint_object_url` is owned by the viewer and
/// revoked exactly once, before `unmount` removes the modal.
pub trait ViewerHost: Send + Sync {
    /// Materialise downloaded bytes as a local object URL.
    fn mint_object_url(&self, bytes: &[u8], mime_type: &str) -> String;
    /// Release an object URL minted by this host.
    fn revoke_object_url(&self, url: &str);

    /// Mount the preview modal around an image tag.
    fn mount_image(&self, url: &str, title: &str);
    /// Mount the preview modal around an embedded PDF frame.
    fn mount_pdf(&self, url: &str, title: &str);
    /// Remove the modal from the DOM.
    fn unmount(&self);

    /// Hand a non-previewable download straight to the user agent.
    fn save_file(&self, file: &DownloadedFile);
}
