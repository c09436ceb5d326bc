//! Pure domain logic for the obituary publisher.
//!
//! Age calculation, form state, the declarative field table and the
//! payload builder. No I/O, no async, no network.

pub mod age;
pub mod environment;
pub mod error;
pub mod form;
pub mod payload;
pub mod types;

pub use age::{calculate_age, parse_legacy_date, LegacyDate};
pub use environment::Environment;
pub use error::CoreError;
pub use form::{FormField, FormState};
pub use payload::{build_payload, build_payload_at, BuilderOptions, ObituaryPayload, SourceModel};
