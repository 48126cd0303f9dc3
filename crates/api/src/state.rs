//! Application state shared across handlers.

use std::sync::Arc;

use credentials::CredentialService;
use database::Database;

use crate::bridge::CompletionBridge;

/// Shared application state.
///
/// Every collaborator is passed in here; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Token issuer and verifier.
    pub credentials: Arc<CredentialService>,
    /// Access to the completion backend.
    pub bridge: CompletionBridge,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, credentials: CredentialService, bridge: CompletionBridge) -> Self {
        Self {
            db,
            credentials: Arc::new(credentials),
            bridge,
        }
    }
}
