//! Wire contracts shared between the front-end and the remote REST API.
//!
//! Field names follow the API's Spanish JSON keys through `serde(rename)`;
//! the Rust side is English throughout.

pub mod domain;
pub mod system;
