//! `plinth-core` — transport-agnostic primitives.
//!
//! This crate contains **pure** building blocks (no HTTP or storage
//! concerns): the fixed response envelope and the record-serialization
//! layer for turning data rows into ordered JSON mappings.

pub mod envelope;
pub mod record;

pub use envelope::{Envelope, Status};
pub use record::{FieldValue, Record, ToRecord, to_json};
