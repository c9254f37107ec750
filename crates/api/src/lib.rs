//! HTTP adapter layer: authentication gate, body readers, response
//! writers, and forbidden-by-default routing.
//!
//! If you're new to plinth, this crate is structured like:
//! - `gate.rs`: the authentication middleware (401/403 envelopes)
//! - `respond.rs`: JSON/XML response writers with exact content types
//! - `body.rs`: lenient + strict request-body readers
//! - `base.rs`: routing defaults (GET-as-POST, 403 fallback)
//! - `app.rs`: demo router wiring used by the binary and tests

pub mod app;
pub mod base;
pub mod body;
pub mod gate;
pub mod respond;
