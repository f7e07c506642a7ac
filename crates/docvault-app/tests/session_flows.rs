//! End-to-end session flows against a mock backend: login/logout, the
//! upload contract, invitation handling, and failure semantics.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{Ev, Harness, mount_dashboard_basics, mount_document_list};
use docvault_app::{AlertKind, Region, Screen, Section};
use docvault_client::{DocumentCategory, PendingFile, TokenStore, UploadMeta};

fn pdf_file(size: usize) -> PendingFile {
    PendingFile {
        name: "passport.pdf".to_owned(),
        mime_type: "application/pdf".to_owned(),
        bytes: vec![0u8; size],
    }
}

fn meta(title: &str) -> UploadMeta {
    UploadMeta {
        title: title.to_owned(),
        category: DocumentCategory::Passport,
        description: None,
        classification: None,
        department: None,
    }
}

#[tokio::test]
async fn login_enters_dashboard_on_overview() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;

    assert_eq!(h.coordinator.screen(), Screen::Login);
    h.coordinator.submit_login("user@example.com", "pw").await;

    assert_eq!(h.coordinator.screen(), Screen::Dashboard);
    assert_eq!(h.coordinator.section(), Section::Overview);

    let events = h.surface.events();
    assert!(events.contains(&Ev::Screen(Screen::Dashboard)));
    assert!(events.contains(&Ev::Section(Section::Overview)));
    assert!(events.contains(&Ev::Overview { total: 3, family: 2 }));
    assert_eq!(h.requests_to("/api/users/sync").await, 1);
}

#[tokio::test]
async fn rejected_login_stays_on_login_screen() {
    let h = Harness::new().await;
    h.coordinator.submit_login("user@example.com", "bad").await;
    assert_eq!(h.coordinator.screen(), Screen::Login);
    // Busy flag is cleared in the finally path even on success/failure.
    let events = h.surface.events();
    assert!(events.contains(&Ev::Busy(true)));
    assert!(events.contains(&Ev::Busy(false)));
}

#[tokio::test]
async fn sync_failure_does_not_block_dashboard_entry() {
    let h = Harness::new().await;
    Mock::given(method("GET"))
        .and(path("/api/documents/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stats": { "totalDocuments": 0 }
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/sync"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "sync down" })))
        .mount(&h.server)
        .await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    assert_eq!(h.coordinator.screen(), Screen::Dashboard);
    assert!(h.surface.events().contains(&Ev::Overview { total: 0, family: 0 }));
}

#[tokio::test]
async fn upload_happy_path_resets_form_and_reloads_counts() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;
    mount_document_list(&h.server, "D1", "Passport", "application/pdf").await;
    Mock::given(method("POST"))
        .and(path("/api/documents/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "documentId": "D1"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.coordinator.switch_section(Section::Upload).await;
    h.coordinator.select_upload_file(pdf_file(2 * 1024 * 1024));

    let stats_before = h.requests_to("/api/documents/stats").await;
    h.surface.clear();
    h.coordinator.submit_upload(meta("Passport")).await;

    let events = h.surface.events();
    assert!(events.contains(&Ev::Alert(
        AlertKind::Success,
        "Document uploaded successfully!".to_owned()
    )));
    assert!(events.contains(&Ev::ResetUploadForm));
    // Overview counts reloaded after the upload.
    assert_eq!(h.requests_to("/api/documents/stats").await, stats_before + 1);

    // The documents grid shows the new card after switching over.
    h.coordinator.switch_section(Section::Documents).await;
    assert!(
        h.surface
            .events()
            .contains(&Ev::Documents(vec!["Passport".to_owned()]))
    );
}

#[tokio::test]
async fn oversize_file_is_rejected_without_any_request() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.coordinator.switch_section(Section::Upload).await;
    h.surface.clear();

    h.coordinator.select_upload_file(pdf_file(10 * 1024 * 1024 + 1));
    assert!(h.surface.events().contains(&Ev::Alert(
        AlertKind::Error,
        "File size should be less than 10MB".to_owned()
    )));

    // The rejected file was never stored, so a submit is also refused.
    h.coordinator.submit_upload(meta("Too big")).await;
    assert_eq!(h.requests_to("/api/documents/upload").await, 0);
}

#[tokio::test]
async fn submit_without_title_is_rejected_client_side() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.coordinator.select_upload_file(pdf_file(16));
    h.coordinator.submit_upload(meta("   ")).await;

    assert_eq!(h.requests_to("/api/documents/upload").await, 0);
    assert!(h.surface.alerts().iter().any(|(kind, _)| *kind == AlertKind::Error));
}

#[tokio::test]
async fn accept_invitation_reloads_family_and_overview() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;
    Mock::given(method("GET"))
        .and(path("/api/family/my-groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "familyGroups": [{ "id": "G1", "name": "My Family", "members": [] }]
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/family/invitations/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "invitations": [] })))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/family/accept-invitation/tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&h.server)
        .await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.surface.clear();
    h.coordinator.accept_invitation(Some("tok-1")).await;

    let events = h.surface.events();
    assert!(events.contains(&Ev::Alert(
        AlertKind::Success,
        "Invitation accepted!".to_owned()
    )));
    assert!(events.contains(&Ev::Family(1)));
    assert!(events.contains(&Ev::Invitations(0)));
    assert!(events.iter().any(|ev| matches!(ev, Ev::Overview { .. })));
}

#[tokio::test]
async fn accept_with_missing_token_never_reaches_network() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.surface.clear();
    h.coordinator.accept_invitation(None).await;

    assert!(h.surface.events().contains(&Ev::Alert(
        AlertKind::Error,
        "Invalid invitation token. Please refresh the page.".to_owned()
    )));
    assert_eq!(h.requests_to("/api/family/invitations/pending").await, 0);
    // No accept path was hit at all.
    let requests = h.server.received_requests().await.unwrap();
    assert!(
        !requests
            .iter()
            .any(|r| r.url.path().contains("accept-invitation"))
    );
}

#[tokio::test]
async fn decline_invitation_is_gated_on_confirmation() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.surface.set_confirm_answer(false);
    h.coordinator.reject_invitation(Some("tok-1")).await;

    let requests = h.server.received_requests().await.unwrap();
    assert!(
        !requests
            .iter()
            .any(|r| r.url.path().contains("reject-invitation"))
    );
}

#[tokio::test]
async fn remove_member_reloads_family_and_overview() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;
    Mock::given(method("GET"))
        .and(path("/api/family/my-groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "familyGroups": [] })))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/family/invitations/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "invitations": [] })))
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/family/G1/members/M1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&h.server)
        .await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.surface.clear();
    h.coordinator.remove_member("G1", "M1").await;

    let events = h.surface.events();
    assert!(events.iter().any(|ev| matches!(ev, Ev::Confirm(_))));
    assert!(events.contains(&Ev::Alert(
        AlertKind::Success,
        "Member removed successfully!".to_owned()
    )));
    assert!(events.contains(&Ev::Family(0)));
    assert!(events.iter().any(|ev| matches!(ev, Ev::Overview { .. })));
}

#[tokio::test]
async fn sign_out_clears_token_and_short_circuits_loads() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    assert!(h.store.load().is_some(), "token persisted on sign-in");

    h.coordinator.logout().await;
    assert_eq!(h.coordinator.screen(), Screen::Login);
    assert!(h.store.load().is_none(), "persisted token cleared");

    // A loader triggered after sign-out short-circuits without a request.
    let documents_before = h.requests_to("/api/documents").await;
    h.coordinator.switch_section(Section::Documents).await;
    assert_eq!(h.requests_to("/api/documents").await, documents_before);
}

#[tokio::test]
async fn load_resolving_after_logout_renders_nothing() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;
    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "documents": [{
                        "id": "D1",
                        "title": "Passport",
                        "category": "passport",
                        "mimeType": "application/pdf",
                        "fileSize": 2048,
                        "uploadedAt": "2025-01-01T00:00:00Z"
                    }]
                }))
                .set_delay(Duration::from_millis(250)),
        )
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/documents/shared"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .mount(&h.server)
        .await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.surface.clear();

    let coordinator = Arc::clone(&h.coordinator);
    let switching = tokio::spawn(async move {
        coordinator.switch_section(Section::Documents).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    h.coordinator.logout().await;
    switching.await.unwrap();

    // The fetch resolved against a dead session: nothing is rendered.
    let events = h.surface.events();
    assert!(
        !events
            .iter()
            .any(|ev| matches!(ev, Ev::Documents(_) | Ev::Shared(_)))
    );
    assert_eq!(h.coordinator.screen(), Screen::Login);
}

#[tokio::test]
async fn section_switch_is_idempotent() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;
    mount_document_list(&h.server, "D1", "Passport", "application/pdf").await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.coordinator.switch_section(Section::Documents).await;
    h.coordinator.switch_section(Section::Overview).await;
    h.surface.clear();
    h.coordinator.switch_section(Section::Documents).await;

    // A → B → A renders the same content as A alone.
    assert!(
        h.surface
            .events()
            .contains(&Ev::Documents(vec!["Passport".to_owned()]))
    );
    // Re-selection re-triggers the load each time.
    assert_eq!(h.requests_to("/api/documents").await, 2);
}

#[tokio::test]
async fn failed_subfetch_degrades_its_region_only() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;
    Mock::given(method("GET"))
        .and(path("/api/family/my-groups"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/family/invitations/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invitations": [{
                "id": "I1",
                "invitationToken": "tok-1",
                "inviteeEmail": "kid@example.com",
                "status": "pending"
            }]
        })))
        .mount(&h.server)
        .await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.surface.clear();
    h.coordinator.switch_section(Section::Family).await;

    let events = h.surface.events();
    assert!(events.contains(&Ev::RegionError(Region::FamilyMembers)));
    assert!(events.contains(&Ev::Invitations(1)));
    // The dashboard itself stays mounted.
    assert_eq!(h.coordinator.screen(), Screen::Dashboard);
}

#[tokio::test]
async fn unauthorized_gesture_returns_to_login() {
    let h = Harness::new().await;
    mount_dashboard_basics(&h.server).await;
    mount_document_list(&h.server, "D1", "Passport", "application/pdf").await;
    Mock::given(method("DELETE"))
        .and(path("/api/documents/D1"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Session expired" })),
        )
        .mount(&h.server)
        .await;

    h.coordinator.submit_login("user@example.com", "pw").await;
    h.coordinator.switch_section(Section::Documents).await;
    h.coordinator.delete_document("D1").await;

    assert_eq!(h.coordinator.screen(), Screen::Login);
    assert!(
        h.surface
            .alerts()
            .iter()
            .any(|(kind, msg)| *kind == AlertKind::Error && msg == "Session expired")
    );
}

#[tokio::test]
async fn register_screen_navigation() {
    let h = Harness::new().await;
    h.coordinator.show_register();
    assert_eq!(h.coordinator.screen(), Screen::Register);
    h.coordinator.show_login();
    assert_eq!(h.coordinator.screen(), Screen::Login);
}
