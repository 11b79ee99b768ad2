//! Session state machine.
//!
//! `Uninitialized` → `Loading` → `Authenticated(user)` | `Anonymous`, with
//! login, logout, and the 401 teardown moving between the last two. There is
//! no terminal state.

use std::sync::Arc;

use tracing::{info, warn};

use super::ports::{AuthApi, TokenStore};
use super::{AccessToken, Capability, Error, LoginCredentials, Role, User};

const LOGIN_FAILED: &str = "Login failed";

/// Where the session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Process start; nothing checked yet.
    Uninitialized,
    /// A persisted token is being validated.
    Loading,
    /// Token validated against `GET /api/auth/me`.
    Authenticated(User),
    /// No valid token.
    Anonymous,
}

/// Result of [`SessionStore::login`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Signed in as this user.
    Success(User),
    /// Rejected; the session is unchanged.
    Failed {
        /// Backend detail or a fallback, ready to show.
        message: String,
    },
}

impl LoginOutcome {
    /// True for [`LoginOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Holds the token and cached user and exposes role predicates.
pub struct SessionStore {
    auth: Arc<dyn AuthApi>,
    tokens: Arc<dyn TokenStore>,
    state: SessionState,
}

impl SessionStore {
    /// Create an uninitialised session.
    pub fn new(auth: Arc<dyn AuthApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            auth,
            tokens,
            state: SessionState::Uninitialized,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Validate the persisted token, if there is one.
    ///
    /// Any failure clears the token and leaves the session anonymous.
    pub async fn initialise(&mut self) {
        self.state = SessionState::Loading;

        let token = match self.tokens.load().await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "could not read persisted token");
                None
            }
        };
        if token.is_none() {
            self.become_anonymous("no persisted token");
            return;
        }

        match self.auth.current_user().await {
            Ok(user) => self.become_authenticated(user),
            Err(err) => {
                warn!(error = %err, "persisted token rejected; clearing it");
                self.clear_token().await;
                self.become_anonymous("token validation failed");
            }
        }
    }

    /// Exchange credentials for a token and load the user.
    ///
    /// Never fails: problems come back as [`LoginOutcome::Failed`] and leave
    /// both the state and the persisted token as they were.
    pub async fn login(&mut self, email: &str, password: &str) -> LoginOutcome {
        let credentials = match LoginCredentials::try_from_parts(email, password) {
            Ok(credentials) => credentials,
            Err(err) => {
                return LoginOutcome::Failed {
                    message: err.to_string(),
                };
            }
        };

        let grant = match self.auth.login(&credentials).await {
            Ok(grant) => grant,
            Err(err) => return failed(&err),
        };

        let previous = self.tokens.load().await.ok().flatten();
        if let Err(err) = self.tokens.save(&grant.access_token).await {
            return LoginOutcome::Failed {
                message: err.to_string(),
            };
        }

        match self.auth.current_user().await {
            Ok(user) => {
                self.become_authenticated(user.clone());
                LoginOutcome::Success(user)
            }
            Err(err) => {
                self.restore_token(previous).await;
                failed(&err)
            }
        }
    }

    /// Drop the token and user. Safe to call repeatedly.
    pub async fn logout(&mut self) {
        self.clear_token().await;
        self.become_anonymous("logged out");
    }

    /// Teardown run by the unauthenticated-signal subscriber.
    pub async fn handle_unauthenticated(&mut self) {
        warn!("backend rejected the session token");
        self.clear_token().await;
        self.become_anonymous("session rejected");
    }

    /// Signed in as an administrator.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Administrator)
    }

    /// Signed in as a studio curator.
    pub fn is_curator(&self) -> bool {
        self.has_role(Role::StudioCurator)
    }

    /// Signed in as a lead decorator.
    pub fn is_lead_decorator(&self) -> bool {
        self.has_role(Role::LeadDecorator)
    }

    /// Signed in as a florist.
    pub fn is_florist(&self) -> bool {
        self.has_role(Role::Florist)
    }

    /// May append to a project's final list.
    pub fn can_edit_final_list(&self) -> bool {
        self.can(Capability::EditFinalList)
    }

    /// May create and delete accounts.
    pub fn can_manage_users(&self) -> bool {
        self.can(Capability::ManageUsers)
    }

    /// May change inventory and equipment.
    pub fn can_manage_inventory(&self) -> bool {
        self.can(Capability::ManageInventory)
    }

    /// Whether the signed-in user holds `capability`; false when signed out.
    pub fn can(&self, capability: Capability) -> bool {
        self.user().is_some_and(|user| user.can(capability))
    }

    fn has_role(&self, role: Role) -> bool {
        self.user()
            .and_then(|user| user.role.role())
            .is_some_and(|assigned| assigned == role)
    }

    fn become_authenticated(&mut self, user: User) {
        info!(user_id = %user.id, role = user.role.as_str(), "session authenticated");
        self.state = SessionState::Authenticated(user);
    }

    fn become_anonymous(&mut self, reason: &'static str) {
        info!(reason, "session anonymous");
        self.state = SessionState::Anonymous;
    }

    async fn clear_token(&self) {
        if let Err(err) = self.tokens.clear().await {
            warn!(error = %err, "could not clear persisted token");
        }
    }

    async fn restore_token(&self, previous: Option<AccessToken>) {
        let restored = match previous {
            Some(token) => self.tokens.save(&token).await,
            None => self.tokens.clear().await,
        };
        if let Err(err) = restored {
            warn!(error = %err, "could not restore persisted token");
        }
    }
}

/// Prefer the backend's detail; fall back to a generic message.
fn failed(err: &Error) -> LoginOutcome {
    let message = if err.message() == err.code().fallback_message() {
        LOGIN_FAILED.to_owned()
    } else {
        err.message().to_owned()
    };
    LoginOutcome::Failed { message }
}

#[cfg(test)]
mod tests {
    //! Transitions and predicates of the session state machine.
    use super::*;
    use crate::domain::ports::{InMemoryTokenStore, MockAuthApi, TokenGrant};
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn user(role: &str) -> User {
        serde_json::from_value(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "name": "Test User",
            "email": "test@example.com",
            "role": role,
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .expect("fixture user")
    }

    fn grant(raw: &str) -> TokenGrant {
        TokenGrant {
            access_token: AccessToken::new(raw).expect("token"),
            token_type: "bearer".to_owned(),
        }
    }

    #[fixture]
    fn tokens() -> Arc<InMemoryTokenStore> {
        Arc::new(InMemoryTokenStore::default())
    }

    #[rstest]
    #[tokio::test]
    async fn starts_uninitialised_and_goes_anonymous_without_token(
        tokens: Arc<InMemoryTokenStore>,
    ) {
        let mut auth = MockAuthApi::new();
        auth.expect_current_user().never();
        let mut session = SessionStore::new(Arc::new(auth), tokens);
        assert_eq!(session.state(), &SessionState::Uninitialized);

        session.initialise().await;
        assert_eq!(session.state(), &SessionState::Anonymous);
    }

    #[rstest]
    #[tokio::test]
    async fn valid_persisted_token_authenticates() {
        let tokens = Arc::new(InMemoryTokenStore::with_token(
            AccessToken::new("kept").expect("token"),
        ));
        let mut auth = MockAuthApi::new();
        auth.expect_current_user()
            .times(1)
            .returning(|| Ok(user("Куратор студии")));
        let mut session = SessionStore::new(Arc::new(auth), tokens.clone());

        session.initialise().await;
        assert!(session.is_curator());
        assert!(session.can_edit_final_list());
        assert!(!session.can_manage_users());
        assert!(tokens.current().is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_persisted_token_is_removed() {
        let tokens = Arc::new(InMemoryTokenStore::with_token(
            AccessToken::new("stale").expect("token"),
        ));
        let mut auth = MockAuthApi::new();
        auth.expect_current_user()
            .returning(|| Err(Error::unauthenticated("expired").with_status(401)));
        let mut session = SessionStore::new(Arc::new(auth), tokens.clone());

        session.initialise().await;
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(tokens.current().is_none());
    }

    #[rstest]
    #[case("Администратор", true, true)]
    #[case("Куратор студии", false, true)]
    #[case("Ведущий декоратор", false, false)]
    #[case("Флорист", false, false)]
    #[tokio::test]
    async fn login_grants_role_predicates(
        tokens: Arc<InMemoryTokenStore>,
        #[case] role: &'static str,
        #[case] manage_users: bool,
        #[case] manage_inventory: bool,
    ) {
        let mut auth = MockAuthApi::new();
        auth.expect_login().returning(|_| Ok(grant("fresh")));
        auth.expect_current_user().returning(move || Ok(user(role)));
        let mut session = SessionStore::new(Arc::new(auth), tokens.clone());
        session.initialise().await;

        let outcome = session.login("user@example.com", "pw").await;
        assert!(outcome.is_success());
        assert_eq!(session.can_manage_users(), manage_users);
        assert_eq!(session.can_manage_inventory(), manage_inventory);
        assert_eq!(
            tokens.current().as_ref().map(AccessToken::expose),
            Some("fresh")
        );
    }

    #[rstest]
    #[case(Error::unauthenticated("Incorrect email or password"), "Incorrect email or password")]
    #[case(Error::new(crate::domain::ErrorCode::Unauthenticated, ""), LOGIN_FAILED)]
    #[case(Error::transport("transport failed: refused"), "transport failed: refused")]
    #[tokio::test]
    async fn failed_login_reports_message_and_keeps_state(
        tokens: Arc<InMemoryTokenStore>,
        #[case] failure: Error,
        #[case] expected: &str,
    ) {
        let mut auth = MockAuthApi::new();
        auth.expect_login().returning(move |_| Err(failure.clone()));
        auth.expect_current_user().never();
        let mut session = SessionStore::new(Arc::new(auth), tokens.clone());
        session.initialise().await;

        let outcome = session.login("user@example.com", "wrong").await;
        assert_eq!(
            outcome,
            LoginOutcome::Failed {
                message: expected.to_owned()
            }
        );
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(tokens.current().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn blank_credentials_fail_without_a_call(tokens: Arc<InMemoryTokenStore>) {
        let mut auth = MockAuthApi::new();
        auth.expect_login().never();
        let mut session = SessionStore::new(Arc::new(auth), tokens);

        let outcome = session.login("  ", "pw").await;
        assert!(!outcome.is_success());
    }

    #[rstest]
    #[tokio::test]
    async fn user_fetch_failure_after_login_restores_token() {
        let original = AccessToken::new("original").expect("token");
        let tokens = Arc::new(InMemoryTokenStore::with_token(original.clone()));
        let mut auth = MockAuthApi::new();
        auth.expect_login().returning(|_| Ok(grant("new")));
        auth.expect_current_user()
            .returning(|| Err(Error::unexpected("").with_status(500)));
        let mut session = SessionStore::new(Arc::new(auth), tokens.clone());

        let outcome = session.login("a@b.c", "pw").await;
        assert_eq!(
            outcome,
            LoginOutcome::Failed {
                message: LOGIN_FAILED.to_owned()
            }
        );
        assert_eq!(session.state(), &SessionState::Uninitialized);
        assert_eq!(tokens.current(), Some(original));
    }

    #[rstest]
    #[tokio::test]
    async fn logout_is_idempotent_and_revokes_everything(tokens: Arc<InMemoryTokenStore>) {
        let mut auth = MockAuthApi::new();
        auth.expect_login().returning(|_| Ok(grant("t")));
        auth.expect_current_user()
            .returning(|| Ok(user("Администратор")));
        let mut session = SessionStore::new(Arc::new(auth), tokens.clone());
        assert!(session.login("a@b.c", "pw").await.is_success());

        session.logout().await;
        session.logout().await;
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(tokens.current().is_none());
        for predicate in [
            session.is_admin(),
            session.is_curator(),
            session.is_lead_decorator(),
            session.is_florist(),
            session.can_edit_final_list(),
            session.can_manage_users(),
            session.can_manage_inventory(),
        ] {
            assert!(!predicate);
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unrecognised_roles_hold_nothing(tokens: Arc<InMemoryTokenStore>) {
        let mut auth = MockAuthApi::new();
        auth.expect_login().returning(|_| Ok(grant("t")));
        auth.expect_current_user()
            .returning(|| Ok(user("Суперпользователь")));
        let mut session = SessionStore::new(Arc::new(auth), tokens);
        assert!(session.login("a@b.c", "pw").await.is_success());

        assert!(session.user().is_some());
        assert!(!session.is_admin());
        assert!(!session.can_edit_final_list());
        assert!(!session.can_manage_inventory());
        assert!(!session.can_manage_users());
    }
}
