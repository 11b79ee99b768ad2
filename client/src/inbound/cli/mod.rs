//! Terminal front end for the studio API.
//!
//! Parsing lives in [`args`], rendering in [`render`], and the [`Shell`]
//! runs commands against a [`ShellPorts`] bundle. Command handlers are split
//! by screen: account, projects, catalogue, and admin.

mod account;
mod admin;
pub mod args;
mod catalogue;
mod notification;
mod projects;
pub mod render;
mod shell;
mod state;

pub use args::{Cli, Command};
pub use notification::{Notification, NotificationKind};
pub use shell::{CommandStatus, Shell};
pub use state::ShellPorts;
