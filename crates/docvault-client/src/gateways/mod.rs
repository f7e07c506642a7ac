//! Typed gateways, one per backend resource. Gateways own no state; they
//! translate typed operations into requests on the shared [`HttpClient`].

mod documents;
mod family;
mod profile;
mod users;

pub use documents::DocumentsGateway;
pub use family::FamilyGateway;
pub use profile::ProfileGateway;
pub use users::UsersGateway;

use std::sync::Arc;

use crate::http::HttpClient;

/// All gateways over one HTTP client.
pub struct VaultApi {
    pub users: UsersGateway,
    pub documents: DocumentsGateway,
    pub family: FamilyGateway,
    pub profile: ProfileGateway,
}

impl VaultApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            users: UsersGateway::new(Arc::clone(&http)),
            documents: DocumentsGateway::new(Arc::clone(&http)),
            family: FamilyGateway::new(Arc::clone(&http)),
            profile: ProfileGateway::new(http),
        }
    }
}
