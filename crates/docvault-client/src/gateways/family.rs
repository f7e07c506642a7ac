//! Family gateway — groups, members, and the invitation lifecycle.
//!
//! Accept/reject authenticate with the opaque invitation *token*, never the
//! invitation's database id. A missing token is a stale reference and must
//! not reach the network.

use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use crate::error::ClientError;
use crate::http::HttpClient;
use crate::types::{
    Ack, CreateGroupResponse, FamilyGroup, GroupListResponse, Invitation, InvitationListResponse,
};

/// Name used when a group has to be created on demand.
const DEFAULT_GROUP_NAME: &str = "My Family";

pub struct FamilyGateway {
    http: Arc<HttpClient>,
}

impl FamilyGateway {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// List the groups the current user owns or belongs to.
    pub async fn my_groups(&self) -> Result<Vec<FamilyGroup>, ClientError> {
        let resp: GroupListResponse =
            self.http.request(Method::GET, "/family/my-groups", None).await?;
        Ok(resp.family_groups)
    }

    /// Create a new family group.
    pub async fn create_group(
        &self,
        name: &str,
        description: &str,
    ) -> Result<FamilyGroup, ClientError> {
        let body = serde_json::json!({ "name": name, "description": description });
        let resp: CreateGroupResponse =
            self.http.request(Method::POST, "/family/create", Some(body)).await?;
        Ok(resp.family_group)
    }

    /// Resolve the user's group: the first existing one, or a freshly
    /// created default. This client models exactly one group per owner.
    pub async fn ensure_group(&self) -> Result<FamilyGroup, ClientError> {
        let groups = self.my_groups().await?;
        if let Some(group) = groups.into_iter().next() {
            return Ok(group);
        }
        debug!("no family group found, creating default");
        self.create_group(DEFAULT_GROUP_NAME, "").await
    }

    /// Invite an email address into a group.
    pub async fn invite(&self, group_id: &str, email: &str, role: &str) -> Result<(), ClientError> {
        let path = format!("/family/{}/invite", urlencoding::encode(group_id));
        let body = serde_json::json!({ "email": email, "role": role });
        self.http.request::<Ack>(Method::POST, &path, Some(body)).await?;
        Ok(())
    }

    /// Invitations addressed to the current user, still pending.
    pub async fn pending_invitations(&self) -> Result<Vec<Invitation>, ClientError> {
        let resp: InvitationListResponse = self
            .http
            .request(Method::GET, "/family/invitations/pending", None)
            .await?;
        Ok(resp.invitations)
    }

    /// Accept an invitation by its token.
    ///
    /// # Errors
    ///
    /// `StaleReference` when the token is missing or the literal
    /// `"undefined"`; no request is issued in that case.
    pub async fn accept_invitation(&self, token: &str) -> Result<(), ClientError> {
        let token = require_token(token)?;
        let path = format!("/family/accept-invitation/{}", urlencoding::encode(token));
        self.http.request::<Ack>(Method::POST, &path, None).await?;
        Ok(())
    }

    /// Reject an invitation by its token.
    ///
    /// # Errors
    ///
    /// Same token precondition as [`accept_invitation`](Self::accept_invitation).
    pub async fn reject_invitation(&self, token: &str) -> Result<(), ClientError> {
        let token = require_token(token)?;
        let path = format!("/family/reject-invitation/{}", urlencoding::encode(token));
        self.http.request::<Ack>(Method::POST, &path, None).await?;
        Ok(())
    }

    /// Remove a member from a group.
    pub async fn remove_member(&self, group_id: &str, member_id: &str) -> Result<(), ClientError> {
        let path = format!(
            "/family/{}/members/{}",
            urlencoding::encode(group_id),
            urlencoding::encode(member_id)
        );
        self.http.request::<Ack>(Method::DELETE, &path, None).await?;
        Ok(())
    }

    /// Re-send a pending invitation by its id.
    pub async fn resend_invitation(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/family/invitations/{}/resend", urlencoding::encode(id));
        self.http.request::<Ack>(Method::POST, &path, None).await?;
        Ok(())
    }

    /// Cancel a pending invitation by its id.
    pub async fn cancel_invitation(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/family/invitations/{}", urlencoding::encode(id));
        self.http.request::<Ack>(Method::DELETE, &path, None).await?;
        Ok(())
    }
}

/// Reject tokens that cannot authenticate anything: empty strings and the
/// literal `"undefined"`/`"null"` that a lossy host serialization produces.
fn require_token(token: &str) -> Result<&str, ClientError> {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed == "undefined" || trimmed == "null" {
        return Err(ClientError::StaleReference(
            "Invalid invitation token. Please refresh the page.".to_owned(),
        ));
    }
    Ok(trimmed)
}
