//! Users gateway — backend user record sync and profile metadata.

use std::sync::Arc;

use reqwest::Method;

use crate::error::ClientError;
use crate::http::HttpClient;
use crate::types::{Ack, ProfilePatch, ProfileResponse, SyncProfile, UserProfile};

pub struct UsersGateway {
    http: Arc<HttpClient>,
}

impl UsersGateway {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Upsert the backend user record from the identity-provider profile.
    /// Idempotent: repeating the same sync has no further effect.
    ///
    /// # Errors
    ///
    /// Propagates transport and server errors; callers on the dashboard
    /// entry path treat them as non-blocking.
    pub async fn sync(&self, profile: &SyncProfile) -> Result<(), ClientError> {
        self.http
            .request::<Ack>(Method::POST, "/users/sync", Some(serde_json::to_value(profile)?))
            .await?;
        Ok(())
    }

    /// Fetch the stored user profile.
    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        let resp: ProfileResponse = self.http.request(Method::GET, "/users/profile", None).await?;
        Ok(resp.profile)
    }

    /// Apply a partial profile update.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<(), ClientError> {
        self.http
            .request::<Ack>(
                Method::PUT,
                "/users/profile",
                Some(serde_json::to_value(patch)?),
            )
            .await?;
        Ok(())
    }
}
