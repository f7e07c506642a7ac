//! Session coordinator — the top-level state machine.
//!
//! Owns the screen state (Login / Register / Dashboard), the dashboard
//! section state, the controllers, and the blob viewer. All user gestures
//! enter here; the coordinator sequences validation, confirmation,
//! gateway call, alerting, and the cross-section refresh contract:
//!
//! - upload success → Documents (when visible) + Overview
//! - invitation accept → Family (both sub-regions) + Overview
//! - member removal → Family + Overview
//! - document delete → Documents + Overview, viewer closed if it shows
//!   the deleted id
//!
//! Any 401-equivalent ends the session: alert, clear state, back to Login.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use docvault_client::{
    Address, AuthTokenHolder, ClientError, DownloadedFile, GovernmentIdChallenge,
    GovernmentIdKind, PendingFile, ProfilePatch, SyncProfile, UploadMeta, UserHandle, VaultApi,
};

use crate::controllers::{
    DocumentsController, FamilyController, OverviewController, ProfileController, UploadController,
};
use crate::generation::Generation;
use crate::surface::{AlertKind, IdentityProvider, Screen, Section, Surface, ViewerHost};
use crate::viewer::BlobViewer;

fn lock<T>(value: &Mutex<T>) -> MutexGuard<'_, T> {
    value.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct SessionCoordinator {
    api: Arc<VaultApi>,
    auth: Arc<AuthTokenHolder>,
    provider: Arc<dyn IdentityProvider>,
    surface: Arc<dyn Surface>,
    viewer: BlobViewer,

    overview: OverviewController,
    documents: DocumentsController,
    family: FamilyController,
    profile: ProfileController,
    upload: UploadController,

    screen: Mutex<Screen>,
    section: Mutex<Section>,
    /// Session epoch: bumped on login and logout so every in-flight load
    /// resolves stale and is dropped.
    epoch: Generation,
}

impl SessionCoordinator {
    pub fn new(
        api: Arc<VaultApi>,
        auth: Arc<AuthTokenHolder>,
        provider: Arc<dyn IdentityProvider>,
        surface: Arc<dyn Surface>,
        viewer_host: Arc<dyn ViewerHost>,
    ) -> Self {
        let epoch = Generation::new();
        Self {
            overview: OverviewController::new(
                Arc::clone(&api),
                Arc::clone(&surface),
                epoch.clone(),
            ),
            documents: DocumentsController::new(
                Arc::clone(&api),
                Arc::clone(&surface),
                epoch.clone(),
            ),
            family: FamilyController::new(Arc::clone(&api), Arc::clone(&surface), epoch.clone()),
            profile: ProfileController::new(Arc::clone(&api), Arc::clone(&surface), epoch.clone()),
            upload: UploadController::new(Arc::clone(&api), Arc::clone(&surface)),
            viewer: BlobViewer::new(viewer_host),
            api,
            auth,
            provider,
            surface,
            screen: Mutex::new(Screen::Login),
            section: Mutex::new(Section::Overview),
            epoch,
        }
    }

    /// Show the initial screen.
    pub fn start(&self) {
        *lock(&self.screen) = Screen::Login;
        self.surface.show_screen(Screen::Login);
    }

    pub fn screen(&self) -> Screen {
        *lock(&self.screen)
    }

    pub fn section(&self) -> Section {
        *lock(&self.section)
    }

    // ── Auth transitions ─────────────────────────────────────────────

    /// Identity-provider state callback. `Some` enters the dashboard,
    /// `None` tears the session down.
    pub async fn on_auth_changed(&self, user: Option<Arc<dyn UserHandle>>) {
        self.auth.on_auth_changed(user.clone()).await;
        match user {
            Some(_) => self.enter_dashboard().await,
            None => self.reset_to_login(),
        }
    }

    /// Explicit login submission.
    pub async fn submit_login(&self, email: &str, password: &str) {
        self.surface.set_busy(true);
        let result = self.provider.sign_in(email, password).await;
        self.surface.set_busy(false);

        match result {
            Ok(user) => self.on_auth_changed(Some(user)).await,
            Err(err) => self.surface.alert(AlertKind::Error, &err.user_message()),
        }
    }

    /// Explicit registration submission.
    pub async fn submit_register(&self, name: &str, email: &str, password: &str) {
        self.surface.set_busy(true);
        let result = self.provider.register(name, email, password).await;
        self.surface.set_busy(false);

        match result {
            Ok(user) => self.on_auth_changed(Some(user)).await,
            Err(err) => self.surface.alert(AlertKind::Error, &err.user_message()),
        }
    }

    /// Explicit sign-out.
    pub async fn logout(&self) {
        if let Err(err) = self.provider.sign_out().await {
            warn!(error = %err, "provider sign-out failed");
        }
        self.on_auth_changed(None).await;
    }

    /// Navigate to the registration screen.
    pub fn show_register(&self) {
        *lock(&self.screen) = Screen::Register;
        self.surface.show_screen(Screen::Register);
    }

    /// Navigate back to the login screen without an auth transition.
    pub fn show_login(&self) {
        *lock(&self.screen) = Screen::Login;
        self.surface.show_screen(Screen::Login);
    }

    async fn enter_dashboard(&self) {
        self.epoch.invalidate();
        *lock(&self.screen) = Screen::Dashboard;
        self.surface.show_screen(Screen::Dashboard);

        *lock(&self.section) = Section::Overview;
        self.surface.show_section(Section::Overview);
        self.guard(self.overview.load().await).await;

        // Lazy user record creation; a failure never blocks entry.
        if let Some(user) = self.auth.current_user().await {
            let profile = SyncProfile::from_user(&*user);
            if let Err(err) = self.api.users.sync(&profile).await {
                warn!(error = %err, "user sync failed");
            } else {
                info!(uid = user.uid(), "user synced");
            }
        }
    }

    fn reset_to_login(&self) {
        self.epoch.invalidate();
        self.viewer.close();
        self.documents.reset();
        self.upload.reset();
        *lock(&self.section) = Section::Overview;
        *lock(&self.screen) = Screen::Login;
        self.surface.show_screen(Screen::Login);
    }

    // ── Sections ─────────────────────────────────────────────────────

    /// Switch to a section. Idempotent: re-selecting the current section
    /// re-triggers its load.
    pub async fn switch_section(&self, section: Section) {
        *lock(&self.section) = section;
        self.surface.show_section(section);
        self.load_section(section).await;
    }

    async fn load_section(&self, section: Section) {
        let result = match section {
            Section::Overview => self.overview.load().await,
            Section::Documents => self.documents.load().await,
            Section::Family => self.family.load().await,
            Section::Profile => self.profile.load().await,
            // The upload form has no remote data to fetch.
            Section::Upload => Ok(()),
        };
        self.guard(result).await;
    }

    /// End the session when a load or gesture reports an auth failure.
    async fn guard(&self, result: Result<(), ClientError>) {
        if let Err(err) = result {
            self.fail_session(&err).await;
        }
    }

    async fn fail_session(&self, err: &ClientError) {
        warn!(error = %err, "session is no longer authenticated");
        self.surface.alert(AlertKind::Error, &err.user_message());
        self.auth.on_auth_changed(None).await;
        self.reset_to_login();
    }

    /// Uniform gesture-failure handling: auth failures end the session,
    /// everything else becomes a user-visible alert and the section is
    /// left unchanged.
    async fn handle_gesture_error(&self, err: ClientError) {
        if err.is_auth_failure() {
            self.fail_session(&err).await;
        } else {
            self.surface.alert(AlertKind::Error, &err.user_message());
        }
    }

    // ── Upload flow ──────────────────────────────────────────────────

    /// React to a file pick in the upload form.
    pub fn select_upload_file(&self, file: PendingFile) {
        self.upload.select_file(file);
    }

    /// Submit the upload form. On success, reload Documents (when that
    /// section is visible) and the Overview counts.
    pub async fn submit_upload(&self, meta: UploadMeta) {
        match self.upload.submit(meta).await {
            Ok(()) => {
                if self.section() == Section::Documents {
                    self.guard(self.documents.load().await).await;
                }
                self.guard(self.overview.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    // ── Document gestures ────────────────────────────────────────────

    /// Open the inline preview for a listed document.
    pub async fn view_document(&self, id: &str) {
        let result = match self.documents.document(id) {
            Ok(document) => self.viewer.open(&self.api.documents, &document).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            self.handle_gesture_error(err).await;
        }
    }

    /// Close the preview modal (Escape key, background click, close
    /// button).
    pub fn dismiss_viewer(&self) {
        self.viewer.close();
    }

    /// Download a document without previewing it.
    pub async fn download_document(&self, id: &str) {
        match self.api.documents.download(id).await {
            Ok(file) => self.save_download(&file),
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    fn save_download(&self, file: &DownloadedFile) {
        self.viewer.save(file);
    }

    /// Delete a document, gated on confirmation. Closes the viewer when
    /// it shows the deleted document, then reloads Documents + Overview.
    pub async fn delete_document(&self, id: &str) {
        if !self
            .surface
            .confirm("Are you sure you want to delete this document?")
            .await
        {
            return;
        }

        self.surface.set_busy(true);
        let result = self.api.documents.delete(id).await;
        self.surface.set_busy(false);

        match result {
            Ok(()) => {
                self.viewer.close_if_showing(id);
                self.surface
                    .alert(AlertKind::Success, "Document deleted successfully!");
                self.guard(self.documents.load().await).await;
                self.guard(self.overview.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    /// Share a document with another user by email.
    pub async fn share_document(&self, id: &str, email: &str, permission: &str) {
        if email.trim().is_empty() {
            self.surface
                .alert(AlertKind::Error, "Please enter an email address");
            return;
        }
        match self.api.documents.share(id, email.trim(), permission).await {
            Ok(()) => self
                .surface
                .alert(AlertKind::Success, "Document shared successfully!"),
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    // ── Family gestures ──────────────────────────────────────────────

    /// Invite an email address into the user's group, creating the group
    /// on demand.
    pub async fn send_invite(&self, email: &str, role: &str) {
        if email.trim().is_empty() {
            self.surface
                .alert(AlertKind::Error, "Please enter an email address");
            return;
        }

        self.surface.set_busy(true);
        let result = async {
            let group = self.api.family.ensure_group().await?;
            self.api.family.invite(&group.id, email.trim(), role).await
        }
        .await;
        self.surface.set_busy(false);

        match result {
            Ok(()) => {
                self.surface
                    .alert(AlertKind::Success, "Invitation sent successfully!");
                self.guard(self.family.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    /// Accept an invitation by its token. A missing token never reaches
    /// the network: the gateway rejects it as a stale reference and the
    /// user is told to refresh.
    pub async fn accept_invitation(&self, token: Option<&str>) {
        let token = token.unwrap_or_default();
        match self.api.family.accept_invitation(token).await {
            Ok(()) => {
                self.surface
                    .alert(AlertKind::Success, "Invitation accepted!");
                self.guard(self.family.load().await).await;
                self.guard(self.overview.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    /// Decline an invitation, gated on confirmation.
    pub async fn reject_invitation(&self, token: Option<&str>) {
        if !self
            .surface
            .confirm("Are you sure you want to decline this invitation?")
            .await
        {
            return;
        }
        let token = token.unwrap_or_default();
        match self.api.family.reject_invitation(token).await {
            Ok(()) => {
                self.surface.alert(AlertKind::Info, "Invitation declined");
                self.guard(self.family.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    /// Remove a member from the group, gated on confirmation.
    pub async fn remove_member(&self, group_id: &str, member_id: &str) {
        if !self
            .surface
            .confirm("Are you sure you want to remove this member?")
            .await
        {
            return;
        }
        match self.api.family.remove_member(group_id, member_id).await {
            Ok(()) => {
                self.surface
                    .alert(AlertKind::Success, "Member removed successfully!");
                self.guard(self.family.load().await).await;
                self.guard(self.overview.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    /// Re-send a pending invitation.
    pub async fn resend_invitation(&self, id: &str) {
        match self.api.family.resend_invitation(id).await {
            Ok(()) => self
                .surface
                .alert(AlertKind::Success, "Invitation re-sent!"),
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    /// Cancel a pending invitation, gated on confirmation.
    pub async fn cancel_invitation(&self, id: &str) {
        if !self
            .surface
            .confirm("Are you sure you want to cancel this invitation?")
            .await
        {
            return;
        }
        match self.api.family.cancel_invitation(id).await {
            Ok(()) => {
                self.surface.alert(AlertKind::Info, "Invitation cancelled");
                self.guard(self.family.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    // ── Profile gestures (best-effort) ───────────────────────────────

    pub async fn save_profile(&self, patch: ProfilePatch) {
        self.surface.set_busy(true);
        let result = self.api.profile.update(&patch).await;
        self.surface.set_busy(false);

        match result {
            Ok(()) => {
                self.surface
                    .alert(AlertKind::Success, "Profile updated successfully!");
                self.guard(self.profile.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    pub async fn upload_profile_picture(&self, file: PendingFile) {
        self.surface.set_busy(true);
        let result = self.api.profile.upload_picture(&file).await;
        self.surface.set_busy(false);

        match result {
            Ok(()) => {
                self.surface
                    .alert(AlertKind::Success, "Profile picture updated!");
                self.guard(self.profile.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    /// Step one of government-id linking. Returns the verification
    /// challenge so the host can prompt for the OTP.
    pub async fn link_government_id(
        &self,
        kind: GovernmentIdKind,
        value: &str,
    ) -> Option<GovernmentIdChallenge> {
        match self.api.profile.link_government_id(kind, value).await {
            Ok(challenge) => {
                if let Some(ref masked) = challenge.masked_aadhaar {
                    self.surface
                        .alert(AlertKind::Info, &format!("OTP sent for {masked}"));
                }
                Some(challenge)
            }
            Err(err) => {
                self.handle_gesture_error(err).await;
                None
            }
        }
    }

    /// Step two: verify the OTP for a pending challenge.
    pub async fn verify_government_id(&self, verification_id: &str, otp: &str) {
        match self
            .api
            .profile
            .verify_government_id(verification_id, otp)
            .await
        {
            Ok(()) => {
                self.surface
                    .alert(AlertKind::Success, "Government ID verified!");
                self.guard(self.profile.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    pub async fn save_address(&self, address: Address) {
        match self.api.profile.put_address(&address).await {
            Ok(()) => {
                self.surface.alert(AlertKind::Success, "Address saved!");
                self.guard(self.profile.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    /// Delete an address, gated on confirmation.
    pub async fn remove_address(&self, address_type: &str) {
        if !self
            .surface
            .confirm("Are you sure you want to delete this address?")
            .await
        {
            return;
        }
        match self.api.profile.delete_address(address_type).await {
            Ok(()) => {
                self.surface.alert(AlertKind::Info, "Address deleted");
                self.guard(self.profile.load().await).await;
            }
            Err(err) => self.handle_gesture_error(err).await,
        }
    }

    pub async fn update_security(&self, patch: serde_json::Value) {
        match self.api.profile.update_security(&patch).await {
            Ok(()) => self
                .surface
                .alert(AlertKind::Success, "Security settings updated!"),
            Err(err) => self.handle_gesture_error(err).await,
        }
    }
}
