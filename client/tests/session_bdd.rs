//! Behaviour tests for the console session lifecycle.
//!
//! Scenarios drive the shell end to end against the in-process fake backend:
//! sign-in, sign-out, stale tokens at startup, and mid-session revocation.

use std::cell::RefCell;
use std::sync::Arc;

use clap::Parser;
use client::domain::ports::{InMemoryNavigator, InMemoryTokenStore};
use client::domain::{AccessToken, Route, SessionState};
use client::inbound::cli::{Cli, CommandStatus, Shell};
use client::test_support::FakeBackend;
use client::wiring::shell_over;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

const PASSWORD: &str = "correct-horse";

struct Console {
    shell: Shell,
    tokens: Arc<InMemoryTokenStore>,
    navigator: Arc<InMemoryNavigator>,
}

struct SessionWorld {
    runtime: Runtime,
    backend: RefCell<Option<Arc<FakeBackend>>>,
    console: RefCell<Option<Console>>,
    transcript: RefCell<String>,
    last_status: RefCell<Option<CommandStatus>>,
}

impl SessionWorld {
    fn new() -> Self {
        Self {
            runtime: Runtime::new().expect("runtime should build"),
            backend: RefCell::new(None),
            console: RefCell::new(None),
            transcript: RefCell::new(String::new()),
            last_status: RefCell::new(None),
        }
    }

    fn backend(&self) -> Arc<FakeBackend> {
        self.backend
            .borrow()
            .clone()
            .expect("backend should be configured")
    }

    fn open_console(&self, tokens: InMemoryTokenStore) {
        let tokens = Arc::new(tokens);
        let navigator = Arc::new(InMemoryNavigator::default());
        let shell = shell_over(self.backend(), tokens.clone(), navigator.clone());
        *self.console.borrow_mut() = Some(Console {
            shell,
            tokens,
            navigator,
        });
    }

    fn with_console<T>(&self, f: impl FnOnce(&mut Console) -> T) -> T {
        let mut console = self.console.borrow_mut();
        f(console.as_mut().expect("console should be open"))
    }

    fn start(&self) {
        self.with_console(|console| self.runtime.block_on(console.shell.start()));
    }

    fn run(&self, args: &[&str]) {
        let argv = std::iter::once("studio-admin").chain(args.iter().copied());
        let command = Cli::try_parse_from(argv)
            .expect("arguments should parse")
            .command;
        let mut out = Vec::new();
        let status = self.with_console(|console| {
            self.runtime
                .block_on(console.shell.run(command, &mut out))
                .expect("output should be writable")
        });
        self.transcript
            .borrow_mut()
            .push_str(&String::from_utf8(out).expect("output should be UTF-8"));
        *self.last_status.borrow_mut() = Some(status);
    }
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld::new()
}

#[given("a studio backend with the usual accounts")]
fn a_studio_backend_with_the_usual_accounts(world: &SessionWorld) {
    let backend = FakeBackend::new();
    backend.add_user("admin@studio.test", PASSWORD, "Администратор");
    backend.add_user("curator@studio.test", PASSWORD, "Куратор студии");
    backend.add_user("florist@studio.test", PASSWORD, "Флорист");
    backend.add_project("p-1", "Summer gala");
    *world.backend.borrow_mut() = Some(Arc::new(backend));
}

#[given("a console without a stored token")]
fn a_console_without_a_stored_token(world: &SessionWorld) {
    world.open_console(InMemoryTokenStore::default());
    world.start();
}

#[given("a console signed in as {email}")]
fn a_console_signed_in_as(world: &SessionWorld, email: String) {
    let raw = world
        .backend()
        .issue_token(email.trim_matches('"'))
        .expect("account should exist");
    let token = AccessToken::new(raw).expect("token should be valid");
    world.open_console(InMemoryTokenStore::with_token(token));
    world.start();
}

#[given("a console holding the stale token {token}")]
fn a_console_holding_the_stale_token(world: &SessionWorld, token: String) {
    let token = AccessToken::new(token.trim_matches('"')).expect("token should be valid");
    world.open_console(InMemoryTokenStore::with_token(token));
}

#[when("the console starts")]
fn the_console_starts(world: &SessionWorld) {
    world.start();
}

#[when("{email} signs in with the correct password")]
fn signs_in_with_the_correct_password(world: &SessionWorld, email: String) {
    world.run(&[
        "login",
        "--email",
        email.trim_matches('"'),
        "--password",
        PASSWORD,
    ]);
}

#[when("the user signs out")]
fn the_user_signs_out(world: &SessionWorld) {
    world.run(&["logout"]);
}

#[when("the backend revokes every token")]
fn the_backend_revokes_every_token(world: &SessionWorld) {
    world.backend().revoke_tokens();
}

#[when("the user lists projects")]
fn the_user_lists_projects(world: &SessionWorld) {
    world.run(&["projects", "list"]);
}

#[then("the session is authenticated")]
fn the_session_is_authenticated(world: &SessionWorld) {
    world.with_console(|console| {
        assert!(matches!(
            console.shell.session().state(),
            SessionState::Authenticated(_)
        ));
    });
    assert_eq!(*world.last_status.borrow(), Some(CommandStatus::Completed));
}

#[then("the session is anonymous")]
fn the_session_is_anonymous(world: &SessionWorld) {
    world.with_console(|console| {
        assert_eq!(console.shell.session().state(), &SessionState::Anonymous);
    });
}

#[then("the user may manage users and inventory")]
fn the_user_may_manage_users_and_inventory(world: &SessionWorld) {
    world.with_console(|console| {
        let session = console.shell.session();
        assert!(session.is_admin());
        assert!(session.can_manage_users());
        assert!(session.can_manage_inventory());
        assert!(session.can_edit_final_list());
    });
}

#[then("the user may not manage users or inventory")]
fn the_user_may_not_manage_users_or_inventory(world: &SessionWorld) {
    world.with_console(|console| {
        let session = console.shell.session();
        assert!(session.is_florist());
        assert!(!session.can_manage_users());
        assert!(!session.can_manage_inventory());
        assert!(!session.can_edit_final_list());
    });
}

#[then("no role predicate holds")]
fn no_role_predicate_holds(world: &SessionWorld) {
    world.with_console(|console| {
        let session = console.shell.session();
        assert!(session.user().is_none());
        assert!(!session.is_admin());
        assert!(!session.is_curator());
        assert!(!session.is_lead_decorator());
        assert!(!session.is_florist());
        assert!(!session.can_edit_final_list());
        assert!(!session.can_manage_users());
        assert!(!session.can_manage_inventory());
    });
}

#[then("a token is stored")]
fn a_token_is_stored(world: &SessionWorld) {
    world.with_console(|console| assert!(console.tokens.current().is_some()));
}

#[then("no token is stored")]
fn no_token_is_stored(world: &SessionWorld) {
    world.with_console(|console| assert!(console.tokens.current().is_none()));
}

#[then("the console navigated to the login screen once")]
fn the_console_navigated_to_the_login_screen_once(world: &SessionWorld) {
    let logins = world.with_console(|console| {
        console
            .navigator
            .history()
            .iter()
            .filter(|route| **route == Route::Login)
            .count()
    });
    assert_eq!(logins, 1);
    assert_eq!(
        *world.last_status.borrow(),
        Some(CommandStatus::Redirected(Route::Login))
    );
}

#[then("the expiry notice was printed once")]
fn the_expiry_notice_was_printed_once(world: &SessionWorld) {
    assert_eq!(world.transcript.borrow().matches("Сессия истекла").count(), 1);
}

#[scenario(path = "tests/features/session.feature", name = "An administrator signs in")]
fn an_administrator_signs_in(world: SessionWorld) {
    drop(world);
}

#[scenario(path = "tests/features/session.feature", name = "A florist signs in")]
fn a_florist_signs_in(world: SessionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session.feature",
    name = "Signing out clears every role predicate"
)]
fn signing_out_clears_every_role_predicate(world: SessionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session.feature",
    name = "A stale stored token is discarded at startup"
)]
fn a_stale_stored_token_is_discarded_at_startup(world: SessionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session.feature",
    name = "A revoked token ends the session exactly once"
)]
fn a_revoked_token_ends_the_session_exactly_once(world: SessionWorld) {
    drop(world);
}
