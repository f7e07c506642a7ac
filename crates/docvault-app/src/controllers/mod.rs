//! View controllers — one per dashboard section.
//!
//! Each controller owns its section's load → render lifecycle, guarded by
//! a per-controller generation plus the session epoch: a resolve arriving
//! after the section was reloaded or the session ended is dropped without
//! touching the surface. Background failures degrade the affected region
//! to an inline placeholder; only auth failures propagate, so the session
//! coordinator can end the session.

mod documents;
mod family;
mod overview;
mod profile;
mod upload;

pub use documents::DocumentsController;
pub use family::FamilyController;
pub use overview::OverviewController;
pub use profile::ProfileController;
pub use upload::UploadController;
