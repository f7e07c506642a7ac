//! Error types for `docvault-client`.
//!
//! Every variant carries enough context to show the user a meaningful
//! message without a debugger. Bearer tokens never appear in error text.

/// All errors surfaced by the resource layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No live user handle and no persisted token.
    #[error("not authenticated — sign in to continue")]
    NotAuthenticated,

    /// Backend returned a non-2xx status.
    #[error("server error {status}: {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or `HTTP <status>` when absent.
        message: String,
    },

    /// Network unreachable, DNS failure, or TLS failure.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Client-side precondition failed before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// A reference that is no longer usable — a deleted document, or an
    /// invitation whose token is missing.
    #[error("stale reference: {0}")]
    StaleReference(String),

    /// Response body could not be decoded.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// The persisted token entry could not be read or written.
    #[error("token store error: {0}")]
    TokenStore(String),
}

impl ClientError {
    /// True when the error means the session is no longer authenticated
    /// and the user must be returned to the login screen.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::Remote { status: 401, .. }
        )
    }

    /// Message suitable for a user-facing alert.
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote { message, .. } => message.clone(),
            Self::Validation(msg) | Self::StaleReference(msg) => msg.clone(),
            Self::NotAuthenticated => "Your session has expired. Please sign in again.".to_owned(),
            Self::Transport(_) => "Network error. Please check your connection.".to_owned(),
            Self::Json(_) | Self::TokenStore(_) => "Something went wrong. Please try again.".to_owned(),
        }
    }
}
