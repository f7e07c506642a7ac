//! Overview section — the dashboard counts.
//!
//! The family-member count shown here comes from `stats.familyMembers`;
//! the Family section's member listing comes from `my-groups`.

use std::sync::Arc;

use tracing::{debug, warn};

use docvault_client::{ClientError, VaultApi};

use crate::generation::Generation;
use crate::surface::{Region, Surface};

pub struct OverviewController {
    api: Arc<VaultApi>,
    surface: Arc<dyn Surface>,
    generation: Generation,
    epoch: Generation,
}

impl OverviewController {
    pub(crate) fn new(api: Arc<VaultApi>, surface: Arc<dyn Surface>, epoch: Generation) -> Self {
        Self {
            api,
            surface,
            generation: Generation::new(),
            epoch,
        }
    }

    /// Load and render the overview counts.
    ///
    /// # Errors
    ///
    /// Only auth failures propagate; other failures render an inline
    /// placeholder.
    pub async fn load(&self) -> Result<(), ClientError> {
        let ticket = self.generation.begin();
        let epoch = self.epoch.current();

        let result = self.api.documents.stats().await;

        if !self.generation.is_current(ticket) || !self.epoch.is_current(epoch) {
            debug!("dropping stale overview load");
            return Ok(());
        }

        match result {
            Ok(stats) => self.surface.render_overview(&stats),
            Err(err) if err.is_auth_failure() => return Err(err),
            Err(err) => {
                warn!(error = %err, "overview load failed");
                self.surface
                    .render_region_error(Region::Overview, &err.user_message());
            }
        }
        Ok(())
    }
}
