//! Auth token holder — owns the current user handle and the cached bearer
//! token, reacting to identity-provider state changes.
//!
//! The persisted token entry is a fallback for code paths that run without
//! the live user handle. When a handle is available, a freshly minted token
//! is always preferred over the persisted one.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::ClientError;

/// A signed-in user as exposed by the external identity provider.
#[async_trait]
pub trait UserHandle: Send + Sync {
    /// Identity-provider uid.
    fn uid(&self) -> &str;
    fn email(&self) -> &str;
    fn display_name(&self) -> &str;
    fn email_verified(&self) -> bool;

    /// Mint a fresh bearer token for this user.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot issue a token (revoked
    /// session, provider unreachable).
    async fn mint_token(&self) -> Result<String, ClientError>;
}

/// The browser-local persisted token entry (single key/value slot).
pub trait TokenStore: Send + Sync {
    /// Persist the token, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::TokenStore` when the entry cannot be written.
    fn save(&self, token: &str) -> Result<(), ClientError>;
    /// Read the persisted token, if any.
    fn load(&self) -> Option<String>;
    /// Remove the persisted token.
    fn clear(&self);
}

/// In-memory token store. The default for tests and embedded hosts.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: std::sync::RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(token.to_owned());
        }
        Ok(())
    }

    fn load(&self) -> Option<String> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }
}

/// File-backed token store for non-browser hosts. One token per file,
/// permissions restricted on unix.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| ClientError::TokenStore(format!("create {}: {e}", dir.display())))?;
        }
        std::fs::write(&self.path, token)
            .map_err(|e| ClientError::TokenStore(format!("write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            if let Err(err) = std::fs::set_permissions(&self.path, perms) {
                warn!(
                    error = %err,
                    path = %self.path.display(),
                    "failed to restrict token file permissions"
                );
            }
        }

        Ok(())
    }

    fn load(&self) -> Option<String> {
        let token = std::fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_owned())
        }
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Owns the live user handle and the cached bearer token.
pub struct AuthTokenHolder {
    user: RwLock<Option<Arc<dyn UserHandle>>>,
    cached: RwLock<Option<String>>,
    store: Arc<dyn TokenStore>,
}

impl AuthTokenHolder {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            user: RwLock::new(None),
            cached: RwLock::new(None),
            store,
        }
    }

    /// React to an identity-provider auth transition.
    ///
    /// Signed-in: record the handle, mint a token, cache and persist it.
    /// A failed mint is logged and left for [`token`](Self::token) to retry.
    /// Signed-out: clear the handle, the cache, and the persisted entry.
    pub async fn on_auth_changed(&self, user: Option<Arc<dyn UserHandle>>) {
        match user {
            Some(handle) => {
                debug!(uid = handle.uid(), "auth state: signed in");
                match handle.mint_token().await {
                    Ok(token) => {
                        if let Err(err) = self.store.save(&token) {
                            warn!(error = %err, "failed to persist bearer token");
                        }
                        *self.cached.write().await = Some(token);
                    }
                    Err(err) => warn!(error = %err, "token mint failed on sign-in"),
                }
                *self.user.write().await = Some(handle);
            }
            None => {
                debug!("auth state: signed out");
                *self.user.write().await = None;
                *self.cached.write().await = None;
                self.store.clear();
            }
        }
    }

    /// Resolve a bearer token for an outgoing request.
    ///
    /// Prefers a freshly minted token from the live handle; falls back to
    /// the cached token, then the persisted entry.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` when no live user and no
    /// persisted token exist.
    pub async fn token(&self) -> Result<String, ClientError> {
        let handle = self.user.read().await.clone();
        if let Some(handle) = handle {
            match handle.mint_token().await {
                Ok(token) => {
                    *self.cached.write().await = Some(token.clone());
                    return Ok(token);
                }
                Err(err) => {
                    warn!(error = %err, "token mint failed, falling back to cached token");
                }
            }
        }

        if let Some(token) = self.cached.read().await.clone() {
            return Ok(token);
        }
        if let Some(token) = self.store.load() {
            return Ok(token);
        }
        Err(ClientError::NotAuthenticated)
    }

    /// The live user handle, when signed in.
    pub async fn current_user(&self) -> Option<Arc<dyn UserHandle>> {
        self.user.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.user.read().await.is_some()
    }
}
