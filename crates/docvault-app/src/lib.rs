//! Session layer for the docvault dashboard.
//!
//! Coordinates the authenticated session across the dashboard sections:
//! a screen state machine (Login / Register / Dashboard), per-section view
//! controllers with generation-guarded loads, the blob viewer's object-URL
//! lifecycle, and the cross-section refresh contract. The presentation
//! host and the identity provider are injected behind the [`Surface`],
//! [`ViewerHost`], and [`IdentityProvider`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! let coordinator = SessionCoordinator::new(api, auth, provider, surface, viewer_host);
//! coordinator.start();
//! coordinator.submit_login("user@example.com", "password").await;
//! coordinator.switch_section(Section::Documents).await;
//! ```

mod controllers;
mod generation;
mod session;
mod surface;
mod viewer;

pub use controllers::{
    DocumentsController, FamilyController, OverviewController, ProfileController, UploadController,
};
pub use generation::Generation;
pub use session::SessionCoordinator;
pub use surface::{AlertKind, IdentityProvider, Region, Screen, Section, Surface, ViewerHost};
pub use viewer::BlobViewer;
