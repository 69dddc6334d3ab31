//! Shared types for the API layer.

use std::sync::Arc;

use crate::core_state::CoreState;
use crate::identity::Caller;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Authenticated caller, injected into request extensions by the auth
/// middleware after the bearer token and profile have been resolved.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub caller: Caller,
    /// SHA-256 of the presented bearer token.
    pub token_hash: [u8; 32],
}
