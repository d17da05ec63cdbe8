//! Network layer - authenticated API requests
//!
//! The Network actor receives fetch and report commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{ApiClient, FetchError};
