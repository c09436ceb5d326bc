//! HTTP client for the obituary publishing API.
//!
//! Resolves the per-environment base URL, posts the payload with the
//! API key header and normalizes success and error bodies.

pub mod api;
pub mod endpoints;
pub mod error;
pub mod response;

pub use api::PublishClient;
pub use endpoints::{Routing, OBITUARIES_PATH};
pub use error::PublishError;
pub use response::PublishResponse;
