//! Session-backed authentication.
//!
//! [`SessionStore`] is the storage capability (redis, a database, or the
//! in-memory test store). [`SessionAuthenticator`] maps stored session
//! state onto [`AuthOutcome`]: missing session → `Unauthenticated`, a
//! stored deny marker → `Denied`, otherwise the stored user.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use plinth_core::{Record, ToRecord};

use crate::authenticator::{AuthError, Authenticator};
use crate::outcome::AuthOutcome;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}

/// Keyed session storage. Payloads are opaque JSON text owned by the
/// authentication layer.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Option<String>, SessionStoreError>;

    async fn put(&self, session_id: &str, payload: String) -> Result<(), SessionStoreError>;

    async fn remove(&self, session_id: &str) -> Result<(), SessionStoreError>;
}

/// The user value carried by an active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub roles: Vec<String>,
}

impl ToRecord for SessionUser {
    fn to_record(&self) -> Map<String, Value> {
        Record::new()
            .field("id", self.id)
            .field("name", self.name.as_str())
            .field(
                "roles",
                Value::from(
                    self.roles
                        .iter()
                        .map(|r| Value::String(r.clone()))
                        .collect::<Vec<_>>(),
                ),
            )
            .finish()
    }
}

/// What a session record can say about its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Active { user: SessionUser },
    Denied,
}

impl SessionState {
    pub fn to_payload(&self) -> String {
        // Tagged enum of plain fields; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// [`Authenticator`] backed by a [`SessionStore`].
pub struct SessionAuthenticator<S> {
    store: S,
}

impl<S> SessionAuthenticator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: SessionStore> Authenticator for SessionAuthenticator<S> {
    type User = SessionUser;

    async fn authenticate(
        &self,
        credential: Option<&str>,
    ) -> Result<AuthOutcome<Self::User>, AuthError> {
        let Some(session_id) = credential else {
            return Ok(AuthOutcome::Unauthenticated);
        };

        let Some(payload) = self.store.get(session_id).await? else {
            return Ok(AuthOutcome::Unauthenticated);
        };

        let state: SessionState = serde_json::from_str(&payload)
            .map_err(|e| AuthError::MalformedSession(e.to_string()))?;

        Ok(match state {
            SessionState::Active { user } => AuthOutcome::Authenticated(user),
            SessionState::Denied => AuthOutcome::Denied,
        })
    }
}

/// In-memory store for tests and demos.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<String>, SessionStoreError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        Ok(sessions.get(session_id).cloned())
    }

    async fn put(&self, session_id: &str, payload: String) -> Result<(), SessionStoreError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        sessions.insert(session_id.to_owned(), payload);
        Ok(())
    }

    async fn remove(&self, session_id: &str) -> Result<(), SessionStoreError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        sessions.remove(session_id);
        Ok(())
    }
}
