//! Profile gateway — picture upload, government-id linking, addresses,
//! and security settings. Everything here is best-effort: the dashboard
//! renders even when these endpoints fail.

use std::sync::Arc;

use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::error::ClientError;
use crate::http::HttpClient;
use crate::types::{
    Ack, Address, GovernmentIdChallenge, GovernmentIdKind, PendingFile, ProfilePatch,
    ProfileResponse, UserProfile,
};
use crate::validate;

pub struct ProfileGateway {
    http: Arc<HttpClient>,
}

impl ProfileGateway {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn get(&self) -> Result<UserProfile, ClientError> {
        let resp: ProfileResponse = self.http.request(Method::GET, "/users/profile", None).await?;
        Ok(resp.profile)
    }

    pub async fn update(&self, patch: &ProfilePatch) -> Result<(), ClientError> {
        self.http
            .request::<Ack>(
                Method::PUT,
                "/users/profile",
                Some(serde_json::to_value(patch)?),
            )
            .await?;
        Ok(())
    }

    /// Upload a profile picture (multipart field `profilePicture`).
    ///
    /// # Errors
    ///
    /// `Validation` when the file fails the size/type limits.
    pub async fn upload_picture(&self, file: &PendingFile) -> Result<(), ClientError> {
        validate::validate_file(file)?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(ClientError::Transport)?;
        let form = Form::new().part("profilePicture", part);

        self.http
            .send_multipart::<Ack>("/users/profile/picture", form)
            .await?;
        Ok(())
    }

    /// Step one of government-id linking: submit the id, receive a
    /// verification challenge. The value is format-checked client-side.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed Aadhaar/PAN value.
    pub async fn link_government_id(
        &self,
        kind: GovernmentIdKind,
        value: &str,
    ) -> Result<GovernmentIdChallenge, ClientError> {
        validate::validate_government_id(kind, value)?;

        let kind_name = match kind {
            GovernmentIdKind::Aadhaar => "aadhaar",
            GovernmentIdKind::Pan => "pan",
        };
        let body = serde_json::json!({ "type": kind_name, "value": value });
        self.http
            .request(Method::POST, "/users/profile/government-id", Some(body))
            .await
    }

    /// Step two: supply the OTP for a pending verification.
    pub async fn verify_government_id(
        &self,
        verification_id: &str,
        otp: &str,
    ) -> Result<(), ClientError> {
        let body = serde_json::json!({ "verificationId": verification_id, "otp": otp });
        self.http
            .request::<Ack>(Method::POST, "/users/profile/government-id/verify", Some(body))
            .await?;
        Ok(())
    }

    pub async fn addresses(&self) -> Result<Vec<Address>, ClientError> {
        #[derive(serde::Deserialize)]
        struct AddressListResponse {
            #[serde(default)]
            addresses: Vec<Address>,
        }
        let resp: AddressListResponse = self
            .http
            .request(Method::GET, "/users/profile/addresses", None)
            .await?;
        Ok(resp.addresses)
    }

    /// Create or replace the address of the given type.
    pub async fn put_address(&self, address: &Address) -> Result<(), ClientError> {
        let path = format!(
            "/users/profile/addresses/{}",
            urlencoding::encode(&address.address_type)
        );
        self.http
            .request::<Ack>(Method::PUT, &path, Some(serde_json::to_value(address)?))
            .await?;
        Ok(())
    }

    pub async fn delete_address(&self, address_type: &str) -> Result<(), ClientError> {
        let path = format!(
            "/users/profile/addresses/{}",
            urlencoding::encode(address_type)
        );
        self.http.request::<Ack>(Method::DELETE, &path, None).await?;
        Ok(())
    }

    /// Patch security settings (2FA, login alerts, ...). The server
    /// validates the accepted keys.
    pub async fn update_security(&self, patch: &serde_json::Value) -> Result<(), ClientError> {
        self.http
            .request::<Ack>(Method::PUT, "/users/profile/security", Some(patch.clone()))
            .await?;
        Ok(())
    }
}
