//! Session-aware client for the studio projects and inventory API.
//!
//! The crate is laid out hexagonally: [`domain`] holds roles, the session
//! state machine, the route guard, and the ports; [`outbound`] implements the
//! ports over reqwest and the filesystem; [`inbound`] drives the domain from
//! the `studio-admin` command line.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod wiring;
