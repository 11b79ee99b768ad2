//! HTTP transport adapters.
//!
//! This module provides the reqwest implementation of the `ApiTransport`
//! port.

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;
