//! Family section — group member listing and pending invitations.

use std::sync::Arc;

use tracing::{debug, warn};

use docvault_client::{ClientError, VaultApi};

use crate::generation::Generation;
use crate::surface::{Region, Surface};

pub struct FamilyController {
    api: Arc<VaultApi>,
    surface: Arc<dyn Surface>,
    generation: Generation,
    epoch: Generation,
}

impl FamilyController {
    pub(crate) fn new(api: Arc<VaultApi>, surface: Arc<dyn Surface>, epoch: Generation) -> Self {
        Self {
            api,
            surface,
            generation: Generation::new(),
            epoch,
        }
    }

    /// Load member listing and pending invitations in parallel. Rendering
    /// happens only after both have settled; each region degrades to its
    /// own placeholder on failure without blocking the sibling.
    ///
    /// # Errors
    ///
    /// Only auth failures propagate.
    pub async fn load(&self) -> Result<(), ClientError> {
        let ticket = self.generation.begin();
        let epoch = self.epoch.current();

        let (groups, invitations) = tokio::join!(
            self.api.family.my_groups(),
            self.api.family.pending_invitations()
        );

        if !self.generation.is_current(ticket) || !self.epoch.is_current(epoch) {
            debug!("dropping stale family load");
            return Ok(());
        }

        match groups {
            Ok(groups) => self.surface.render_family(&groups),
            Err(err) if err.is_auth_failure() => return Err(err),
            Err(err) => {
                warn!(error = %err, "family group load failed");
                self.surface
                    .render_region_error(Region::FamilyMembers, &err.user_message());
            }
        }

        match invitations {
            Ok(invitations) => self.surface.render_invitations(&invitations),
            Err(err) if err.is_auth_failure() => return Err(err),
            Err(err) => {
                warn!(error = %err, "pending invitation load failed");
                self.surface
                    .render_region_error(Region::PendingInvitations, &err.user_message());
            }
        }

        Ok(())
    }
}
