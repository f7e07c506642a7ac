//! Wire types for the document-vault REST API.
//!
//! Field names follow the backend's camelCase JSON. Timestamps are carried
//! as ISO 8601 strings exactly as the server sends them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Enumerated document category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Aadhaar,
    Pan,
    Passport,
    License,
    Marksheet,
    Certificate,
    Other,
}

impl DocumentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar",
            Self::Pan => "pan",
            Self::Passport => "passport",
            Self::License => "license",
            Self::Marksheet => "marksheet",
            Self::Certificate => "certificate",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentCategory {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aadhaar" => Ok(Self::Aadhaar),
            "pan" => Ok(Self::Pan),
            "passport" => Ok(Self::Passport),
            "license" => Ok(Self::License),
            "marksheet" => Ok(Self::Marksheet),
            "certificate" => Ok(Self::Certificate),
            "other" => Ok(Self::Other),
            other => Err(ClientError::Validation(format!(
                "unknown document category: {other}"
            ))),
        }
    }
}

/// A stored document as returned by list operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Opaque document id.
    pub id: String,
    /// User-supplied title.
    pub title: String,
    /// Document category.
    #[serde(default = "default_category")]
    pub category: DocumentCategory,
    /// Mime type of the stored file.
    pub mime_type: String,
    /// File size in bytes.
    pub file_size: u64,
    /// ISO 8601 upload timestamp.
    pub uploaded_at: String,
    /// Server-side verification status, when present.
    #[serde(default)]
    pub verification_status: Option<String>,
    /// Identity-provider uid of the owner.
    #[serde(default)]
    pub owner_uid: Option<String>,
}

fn default_category() -> DocumentCategory {
    DocumentCategory::Other
}

/// Dashboard overview counts from `/documents/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub shared_documents: u64,
    #[serde(default)]
    pub recent_uploads: u64,
    /// Storage used in bytes.
    #[serde(default)]
    pub storage_used: u64,
    /// Family member count — the overview's source of truth for it.
    #[serde(default)]
    pub family_members: u64,
}

/// Membership status inside a family group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Pending,
    Active,
}

/// A member of a family group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    /// Opaque member id.
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    /// ISO 8601 join timestamp; absent while the invitation is pending.
    #[serde(default)]
    pub joined_at: Option<String>,
    pub status: MemberStatus,
}

/// A family group owned by or including the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyGroup {
    /// Opaque group id.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner_uid: Option<String>,
    #[serde(default)]
    pub members: Vec<FamilyMember>,
}

/// Invitation lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

/// A family-group invitation.
///
/// `invitation_token` — not `id` — is the authentication material for
/// accept/reject. The server may omit it, in which case the invitation can
/// only be displayed, never acted on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    /// Opaque invitation id (database key, not usable for accept/reject).
    pub id: String,
    /// Opaque token used in accept/reject URLs.
    #[serde(default)]
    pub invitation_token: Option<String>,
    #[serde(default)]
    pub inviter_name: Option<String>,
    pub invitee_email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    pub status: InvitationStatus,
}

/// Profile payload for `/users/sync`. Sent on every dashboard entry; the
/// server upserts, so repeated syncs are side-effect free.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncProfile {
    /// The identity-provider uid. Wire name is exactly `firebaseUID`.
    #[serde(rename = "firebaseUID")]
    pub firebase_uid: String,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
    /// ISO 8601 timestamp generated client-side at sync time.
    pub last_login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl SyncProfile {
    /// Build the sync payload from a live user handle, stamping
    /// `lastLogin` with the current time.
    pub fn from_user(user: &dyn crate::auth::UserHandle) -> Self {
        Self {
            firebase_uid: user.uid().to_owned(),
            email: user.email().to_owned(),
            name: user.display_name().to_owned(),
            email_verified: user.email_verified(),
            last_login: chrono::Utc::now().to_rfc3339(),
            profile_picture: None,
            phone_number: None,
        }
    }
}

/// The user profile as stored by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    /// Masked government-id value, e.g. `XXXX-XXXX-1234`.
    #[serde(default)]
    pub masked_aadhaar: Option<String>,
}

/// Partial profile update. Only populated fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// A postal address, keyed by `address_type` (home, office, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_type: String,
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Supported government-id kinds for profile linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernmentIdKind {
    Aadhaar,
    Pan,
}

/// First step of government-id linking: the server issues a verification
/// challenge and echoes a masked form of the id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernmentIdChallenge {
    pub verification_id: String,
    #[serde(default)]
    pub masked_aadhaar: Option<String>,
}

/// A file the user has picked but not yet uploaded.
#[derive(Debug, Clone)]
pub struct PendingFile {
    /// Original file name, e.g. `passport.pdf`.
    pub name: String,
    /// Mime type reported by the picker.
    pub mime_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Text fields accompanying an upload.
#[derive(Debug, Clone)]
pub struct UploadMeta {
    pub title: String,
    pub category: DocumentCategory,
    pub description: Option<String>,
    pub classification: Option<String>,
    pub department: Option<String>,
}

/// A downloaded binary plus the metadata needed to display or save it.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub bytes: Vec<u8>,
    /// Content type reported by the server, when present.
    pub mime_type: Option<String>,
    /// File name parsed from `content-disposition`, when present.
    pub file_name: Option<String>,
}

// --- Internal API response envelopes ---

#[derive(Deserialize)]
pub(crate) struct DocumentListResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

#[derive(Deserialize)]
pub(crate) struct StatsResponse {
    #[serde(default)]
    pub stats: DocumentStats,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub document_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupListResponse {
    #[serde(default)]
    pub family_groups: Vec<FamilyGroup>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateGroupResponse {
    pub family_group: FamilyGroup,
}

#[derive(Deserialize)]
pub(crate) struct InvitationListResponse {
    #[serde(default)]
    pub invitations: Vec<Invitation>,
}

/// Empty acknowledgement envelope for mutation endpoints whose response
/// body carries nothing the client consumes.
#[derive(Deserialize)]
pub(crate) struct Ack {}

#[derive(Deserialize)]
pub(crate) struct ProfileResponse {
    #[serde(default)]
    pub profile: UserProfile,
}

#[derive(Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}
