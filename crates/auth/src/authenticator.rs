//! The current-user lookup capability.

use async_trait::async_trait;
use thiserror::Error;

use crate::outcome::AuthOutcome;
use crate::session::SessionStoreError;

/// Failures inside the lookup itself (not authentication failures).
///
/// These are never turned into 401/403 envelopes; they surface on the
/// host framework's error path.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("session store failure: {0}")]
    Store(#[from] SessionStoreError),

    #[error("malformed session payload: {0}")]
    MalformedSession(String),
}

/// Asynchronous current-user lookup.
///
/// There is deliberately no default implementation: a service that wants
/// gated routes must supply one. The `credential` is whatever token the
/// transport layer extracted from the request (bearer token, session
/// cookie value); `None` means the request carried no credential at all.
#[async_trait]
pub trait Authenticator: Send + Sync {
    type User: Clone + Send + Sync + 'static;

    async fn authenticate(
        &self,
        credential: Option<&str>,
    ) -> Result<AuthOutcome<Self::User>, AuthError>;
}
