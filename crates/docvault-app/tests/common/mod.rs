//! Shared fixtures: a recording surface, a recording viewer host, and a
//! fake identity provider wired to a wiremock backend.

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use docvault_app::{
    AlertKind, IdentityProvider, Region, Screen, Section, SessionCoordinator, Surface, ViewerHost,
};
use docvault_client::{
    AuthTokenHolder, ClientConfig, ClientError, Document, DocumentStats, DownloadedFile,
    FamilyGroup, HttpClient, Invitation, MemoryTokenStore, UserHandle, UserProfile, VaultApi,
};

// ── Recording surface ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ev {
    Screen(Screen),
    Section(Section),
    Overview { total: u64, family: u64 },
    Documents(Vec<String>),
    Shared(usize),
    Family(usize),
    Invitations(usize),
    Profile,
    RegionError(Region),
    Alert(AlertKind, String),
    ResetUploadForm,
    Busy(bool),
    Confirm(String),
}

#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<Ev>>,
    confirm_answer: AtomicBool,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        let surface = Self::default();
        surface.confirm_answer.store(true, Ordering::SeqCst);
        Arc::new(surface)
    }

    pub fn set_confirm_answer(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<Ev> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn alerts(&self) -> Vec<(AlertKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|ev| match ev {
                Ev::Alert(kind, message) => Some((kind, message)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, ev: Ev) {
        self.events.lock().unwrap().push(ev);
    }
}

#[async_trait]
impl Surface for RecordingSurface {
    fn show_screen(&self, screen: Screen) {
        self.push(Ev::Screen(screen));
    }
    fn show_section(&self, section: Section) {
        self.push(Ev::Section(section));
    }
    fn render_overview(&self, stats: &DocumentStats) {
        self.push(Ev::Overview {
            total: stats.total_documents,
            family: stats.family_members,
        });
    }
    fn render_documents(&self, documents: &[Document]) {
        self.push(Ev::Documents(
            documents.iter().map(|d| d.title.clone()).collect(),
        ));
    }
    fn render_shared_documents(&self, documents: &[Document]) {
        self.push(Ev::Shared(documents.len()));
    }
    fn render_family(&self, groups: &[FamilyGroup]) {
        self.push(Ev::Family(groups.len()));
    }
    fn render_invitations(&self, invitations: &[Invitation]) {
        self.push(Ev::Invitations(invitations.len()));
    }
    fn render_profile(&self, _profile: &UserProfile) {
        self.push(Ev::Profile);
    }
    fn render_region_error(&self, region: Region, _message: &str) {
        self.push(Ev::RegionError(region));
    }
    fn alert(&self, kind: AlertKind, message: &str) {
        self.push(Ev::Alert(kind, message.to_owned()));
    }
    fn reset_upload_form(&self) {
        self.push(Ev::ResetUploadForm);
    }
    fn set_busy(&self, busy: bool) {
        self.push(Ev::Busy(busy));
    }
    async fn confirm(&self, message: &str) -> bool {
        self.push(Ev::Confirm(message.to_owned()));
        self.confirm_answer.load(Ordering::SeqCst)
    }
}

// ── Recording viewer host ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEv {
    Mint(String),
    Revoke(String),
    MountImage(String),
    MountPdf(String),
    Unmount,
    Save(Option<String>),
}

#[derive(Default)]
pub struct RecordingViewerHost {
    events: Mutex<Vec<ViewerEv>>,
    next_url: AtomicU64,
}

impl RecordingViewerHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ViewerEv> {
        self.events.lock().unwrap().clone()
    }

    pub fn revocations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|ev| match ev {
                ViewerEv::Revoke(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    fn push(&self, ev: ViewerEv) {
        self.events.lock().unwrap().push(ev);
    }
}

impl ViewerHost for RecordingViewerHost {
    fn mint_object_url(&self, _bytes: &[u8], _mime_type: &str) -> String {
        let n = self.next_url.fetch_add(1, Ordering::SeqCst);
        let url = format!("blob:{n}");
        self.push(ViewerEv::Mint(url.clone()));
        url
    }
    fn revoke_object_url(&self, url: &str) {
        self.push(ViewerEv::Revoke(url.to_owned()));
    }
    fn mount_image(&self, url: &str, _title: &str) {
        self.push(ViewerEv::MountImage(url.to_owned()));
    }
    fn mount_pdf(&self, url: &str, _title: &str) {
        self.push(ViewerEv::MountPdf(url.to_owned()));
    }
    fn unmount(&self) {
        self.push(ViewerEv::Unmount);
    }
    fn save_file(&self, file: &DownloadedFile) {
        self.push(ViewerEv::Save(file.file_name.clone()));
    }
}

// ── Fake identity provider ───────────────────────────────────────────

pub struct FakeUser;

#[async_trait]
impl UserHandle for FakeUser {
    fn uid(&self) -> &str {
        "uid-1"
    }
    fn email(&self) -> &str {
        "user@example.com"
    }
    fn display_name(&self) -> &str {
        "Test User"
    }
    fn email_verified(&self) -> bool {
        true
    }
    async fn mint_token(&self) -> Result<String, ClientError> {
        Ok("test-token".to_owned())
    }
}

/// Accepts any credentials except the password `"bad"`.
#[derive(Default)]
pub struct FakeProvider;

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn sign_in(
        &self,
        _email: &str,
        password: &str,
    ) -> Result<Arc<dyn UserHandle>, ClientError> {
        if password == "bad" {
            return Err(ClientError::Remote {
                status: 400,
                message: "Invalid credentials".to_owned(),
            });
        }
        Ok(Arc::new(FakeUser))
    }

    async fn register(
        &self,
        _name: &str,
        _email: &str,
        _password: &str,
    ) -> Result<Arc<dyn UserHandle>, ClientError> {
        Ok(Arc::new(FakeUser))
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

// ── Harness ──────────────────────────────────────────────────────────

pub struct Harness {
    pub server: MockServer,
    pub coordinator: Arc<SessionCoordinator>,
    pub surface: Arc<RecordingSurface>,
    pub viewer_host: Arc<RecordingViewerHost>,
    pub store: Arc<MemoryTokenStore>,
}

impl Harness {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let surface = RecordingSurface::new();
        let viewer_host = RecordingViewerHost::new();
        let store = Arc::new(MemoryTokenStore::new());

        let auth = Arc::new(AuthTokenHolder::new(
            Arc::clone(&store) as Arc<dyn docvault_client::TokenStore>
        ));
        let cfg = ClientConfig {
            base_url: format!("{}/api", server.uri()),
            ..ClientConfig::default()
        };
        let http = Arc::new(HttpClient::new(&cfg, Arc::clone(&auth)).unwrap());
        let api = Arc::new(VaultApi::new(http));

        let coordinator = Arc::new(SessionCoordinator::new(
            api,
            auth,
            Arc::new(FakeProvider),
            Arc::clone(&surface) as Arc<dyn Surface>,
            Arc::clone(&viewer_host) as Arc<dyn ViewerHost>,
        ));
        coordinator.start();

        Self {
            server,
            coordinator,
            surface,
            viewer_host,
            store,
        }
    }

    /// Number of requests received for an exact path.
    pub async fn requests_to(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == request_path)
            .count()
    }
}

/// Mount the endpoints hit on every dashboard entry: stats and user sync.
pub async fn mount_dashboard_basics(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/documents/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "stats": {
                "totalDocuments": 3,
                "sharedDocuments": 1,
                "recentUploads": 2,
                "storageUsed": 4096,
                "familyMembers": 2
            }
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(server)
        .await;
}

/// Mount a one-document listing plus an empty shared listing.
pub async fn mount_document_list(server: &MockServer, id: &str, title: &str, mime: &str) {
    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{
                "id": id,
                "title": title,
                "category": "passport",
                "mimeType": mime,
                "fileSize": 2048,
                "uploadedAt": "2025-01-01T00:00:00Z"
            }]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/documents/shared"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .mount(server)
        .await;
}

pub fn pdf_bytes() -> Vec<u8> {
    vec![0x25, 0x50, 0x44, 0x46]
}
