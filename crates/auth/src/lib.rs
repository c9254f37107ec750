//! `plinth-auth` — authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage engines.
//! It defines the tagged authentication outcome, the capability traits a
//! service must supply ([`Authenticator`], [`SessionStore`]), and a
//! session-backed authenticator built on those traits.

pub mod authenticator;
pub mod outcome;
pub mod session;

pub use authenticator::{AuthError, Authenticator};
pub use outcome::AuthOutcome;
pub use session::{
    MemorySessionStore, SessionAuthenticator, SessionState, SessionStore, SessionStoreError,
    SessionUser,
};
