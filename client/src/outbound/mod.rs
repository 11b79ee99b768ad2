//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest transport for the `ApiTransport` port
//! - **rest**: typed facades for each backend resource
//! - **token_file**: capability-scoped file storage for the bearer token
//!
//! Adapters are thin translators between domain types and wire or storage
//! representations. They contain no business logic.

pub mod http;
pub mod rest;
pub mod token_file;
