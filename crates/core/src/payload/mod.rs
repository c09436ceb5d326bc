//! Obituary payload construction.
//!
//! The form is validated against a declarative field table
//! ([`fields`]) and assembled into the typed wire shape ([`model`]).
//! A build either yields a complete payload or the first validation
//! failure; partial payloads are never produced.

pub mod builder;
pub mod fields;
pub mod model;

pub use builder::{build_payload, build_payload_at, BuilderOptions};
pub use fields::{SourceModel, ValidationError};
pub use model::{Obituary, ObituaryPayload, Person, PersonName, SourceInfo};
