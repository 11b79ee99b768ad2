//! The shell: owns the session, checks the guard, and reacts to 401 signals.
//!
//! One [`Shell`] lives for the whole process. Each command goes through the
//! same steps: initialise the session if needed, ask the guard, run, print a
//! notice, then drain [`AuthSignals`]. Draining is the only place the
//! unauthenticated teardown happens, so it runs at most once per command.

use std::io::{self, Write};
use std::sync::Arc;

use tracing::{debug, info};

use super::args::Command;
use super::notification::Notification;
use super::state::ShellPorts;
use crate::domain::ports::Navigator;
use crate::domain::{
    AuthSignal, AuthSignals, CatalogueKind, Error, GuardDecision, ProjectListService, Route,
    SessionState, SessionStore, decide,
};

/// How a command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    /// Ran to completion.
    Completed,
    /// Ran and failed; a notice was printed.
    Failed,
    /// Did not run, or was cut short, and the shell moved to this route.
    Redirected(Route),
}

impl CommandStatus {
    /// True for [`CommandStatus::Completed`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Failure inside a command handler.
#[derive(Debug, thiserror::Error)]
pub(super) enum CommandError {
    /// Writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A domain operation failed; `fallback` is shown when it has no detail.
    #[error("{error}")]
    Failed {
        error: Error,
        fallback: &'static str,
    },
    /// The command was refused with a ready-made notice.
    #[error("{0}")]
    Rejected(Notification),
}

impl CommandError {
    /// Adapter for `map_err` that attaches a fallback description.
    pub(super) fn with_fallback(fallback: &'static str) -> impl FnOnce(Error) -> Self {
        move |error| Self::Failed { error, fallback }
    }
}

impl From<Error> for CommandError {
    fn from(error: Error) -> Self {
        Self::Failed {
            error,
            fallback: "",
        }
    }
}

/// Result of a command handler: an optional notice on success.
pub(super) type Handled = Result<Option<Notification>, CommandError>;

/// Session-owning command runner.
pub struct Shell {
    pub(super) session: SessionStore,
    pub(super) ports: ShellPorts,
    pub(super) lists: ProjectListService,
    navigator: Arc<dyn Navigator>,
    signals: AuthSignals,
}

impl Shell {
    /// Build a shell over `ports`; `signals` must come from the client the
    /// facades share.
    pub fn new(ports: ShellPorts, signals: AuthSignals) -> Self {
        Self {
            session: SessionStore::new(ports.auth.clone(), ports.tokens.clone()),
            lists: ProjectListService::new(ports.projects.clone()),
            navigator: ports.navigator.clone(),
            ports,
            signals,
        }
    }

    /// Session owned by this shell.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Route currently shown.
    pub fn current_route(&self) -> Route {
        self.navigator.current()
    }

    /// Validate the persisted token once at startup.
    pub async fn start(&mut self) {
        self.session.initialise().await;
        // A rejected token was already cleared by `initialise`.
        self.signals.drain();
        if !matches!(self.session.state(), SessionState::Authenticated(_)) {
            self.navigator.navigate(Route::Login);
        }
    }

    /// Run one command, writing its output and notice to `out`.
    ///
    /// # Errors
    ///
    /// Only fails when `out` cannot be written; domain failures are printed
    /// and reported through [`CommandStatus::Failed`].
    pub async fn run(&mut self, command: Command, out: &mut dyn Write) -> io::Result<CommandStatus> {
        if matches!(self.session.state(), SessionState::Uninitialized) {
            self.start().await;
        }

        let route = command.route();
        if let Some(route) = route.clone() {
            if let Some(status) = self.enter(route, out)? {
                return Ok(status);
            }
        }

        debug!(route = ?route, "running command");
        let mut status = match self.dispatch(command, out).await {
            Ok(notice) => {
                if let Some(notice) = notice {
                    writeln!(out, "{notice}")?;
                }
                CommandStatus::Completed
            }
            Err(CommandError::Io(err)) => return Err(err),
            Err(CommandError::Failed { error, fallback }) => {
                writeln!(out, "{}", Notification::from_error(&error, fallback))?;
                CommandStatus::Failed
            }
            Err(CommandError::Rejected(notice)) => {
                writeln!(out, "{notice}")?;
                CommandStatus::Failed
            }
        };

        if self.react_to_signals().await {
            writeln!(
                out,
                "{}",
                Notification::failure("Сессия истекла").with_description("войдите снова")
            )?;
            status = CommandStatus::Redirected(Route::Login);
        }
        Ok(status)
    }

    fn enter(&self, route: Route, out: &mut dyn Write) -> io::Result<Option<CommandStatus>> {
        match decide(self.session.state(), &route) {
            GuardDecision::Render => {
                self.navigator.navigate(route);
                Ok(None)
            }
            GuardDecision::Loading => {
                writeln!(out, "{}", Notification::failure("Загрузка..."))?;
                Ok(Some(CommandStatus::Failed))
            }
            GuardDecision::Redirect(target) => {
                let notice = match (&target, self.session.user()) {
                    (Route::Login, _) => Notification::failure("Требуется вход")
                        .with_description("выполните studio-admin login"),
                    (_, Some(user)) if matches!(route, Route::Login) => {
                        Notification::failure("Вы уже вошли").with_description(user.email.clone())
                    }
                    _ => Notification::failure("Недостаточно прав")
                        .with_description(format!("{route} доступен только администраторам")),
                };
                info!(from = %route, to = %target, "guard redirected");
                self.navigator.navigate(target.clone());
                writeln!(out, "{notice}")?;
                Ok(Some(CommandStatus::Redirected(target)))
            }
        }
    }

    /// Drain pending signals; tear the session down once if any arrived.
    async fn react_to_signals(&mut self) -> bool {
        let pending = self.signals.drain();
        if !pending.contains(&AuthSignal::Unauthenticated) {
            return false;
        }
        self.session.handle_unauthenticated().await;
        self.navigator.navigate(Route::Login);
        true
    }

    async fn dispatch(&mut self, command: Command, out: &mut dyn Write) -> Handled {
        match command {
            Command::Login { email, password } => self.login(&email, &password, out).await,
            Command::Logout => self.logout().await,
            Command::Whoami => self.whoami(out),
            Command::Nav => self.nav(out),
            Command::Projects(command) => self.projects(command, out).await,
            Command::Inventory(command) => {
                self.catalogue(CatalogueKind::Inventory, command, out).await
            }
            Command::Equipment(command) => {
                self.catalogue(CatalogueKind::Equipment, command, out).await
            }
            Command::Users(command) => self.users(command, out).await,
            Command::Logs(command) => self.logs(command, out).await,
            Command::Init => self.init(out).await,
            Command::LoadTestData => self.load_test_data().await,
        }
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
