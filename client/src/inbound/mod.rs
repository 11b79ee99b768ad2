//! Inbound adapters driving the domain.
//!
//! - **cli**: the `studio-admin` command shell, one subcommand per screen

pub mod cli;
