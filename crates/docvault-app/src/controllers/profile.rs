//! Profile section. Strictly best-effort: the dashboard renders even when
//! every profile endpoint fails.

use std::sync::Arc;

use tracing::{debug, warn};

use docvault_client::{ClientError, VaultApi};

use crate::generation::Generation;
use crate::surface::{Region, Surface};

pub struct ProfileController {
    api: Arc<VaultApi>,
    surface: Arc<dyn Surface>,
    generation: Generation,
    epoch: Generation,
}

impl ProfileController {
    pub(crate) fn new(api: Arc<VaultApi>, surface: Arc<dyn Surface>, epoch: Generation) -> Self {
        Self {
            api,
            surface,
            generation: Generation::new(),
            epoch,
        }
    }

    /// Load and render the profile.
    ///
    /// # Errors
    ///
    /// Only auth failures propagate.
    pub async fn load(&self) -> Result<(), ClientError> {
        let ticket = self.generation.begin();
        let epoch = self.epoch.current();

        let result = self.api.profile.get().await;

        if !self.generation.is_current(ticket) || !self.epoch.is_current(epoch) {
            debug!("dropping stale profile load");
            return Ok(());
        }

        match result {
            Ok(profile) => self.surface.render_profile(&profile),
            Err(err) if err.is_auth_failure() => return Err(err),
            Err(err) => {
                warn!(error = %err, "profile load failed");
                self.surface
                    .render_region_error(Region::Profile, &err.user_message());
            }
        }
        Ok(())
    }
}
