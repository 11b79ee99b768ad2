//! Route table and the navigation guard.
//!
//! The guard is a pure function of the session state and the requested
//! route, so every front end (and every test) gets the same decisions.

use std::fmt;

use super::project::ProjectId;
use super::role::Capability;
use super::session::SessionState;

/// Access level a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Anyone, signed in or not.
    Public,
    /// Any signed-in user.
    Authenticated,
    /// Signed-in administrators only.
    Admin,
}

/// Navigable views.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in form.
    Login,
    /// Project list; the default route.
    Projects,
    /// One project with its three lists.
    ProjectDetail(ProjectId),
    /// Inventory catalogue.
    Inventory,
    /// Equipment/decor catalogue.
    Equipment,
    /// Administrative settings.
    Settings,
    /// User management.
    Users,
    /// Activity log.
    Logs,
    /// Seed/test data loader.
    TestData,
    /// First-run database bootstrap; reachable before any admin exists.
    Bootstrap,
}

impl Route {
    /// Where authenticated users land and where unknown paths fall back to.
    pub const DEFAULT: Self = Self::Projects;

    /// Access level this route requires.
    pub const fn access(&self) -> AccessLevel {
        match self {
            Self::Login | Self::Bootstrap => AccessLevel::Public,
            Self::Projects | Self::ProjectDetail(_) | Self::Inventory | Self::Equipment => {
                AccessLevel::Authenticated
            }
            Self::Settings | Self::Users | Self::Logs | Self::TestData => AccessLevel::Admin,
        }
    }

    /// Path form of the route.
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::Projects => "/".to_owned(),
            Self::ProjectDetail(id) => format!("/projects/{id}"),
            Self::Inventory => "/inventory".to_owned(),
            Self::Equipment => "/equipment".to_owned(),
            Self::Settings => "/settings".to_owned(),
            Self::Users => "/users".to_owned(),
            Self::Logs => "/logs".to_owned(),
            Self::TestData => "/test-data".to_owned(),
            Self::Bootstrap => "/init".to_owned(),
        }
    }

    /// Resolve a path; anything unknown maps to [`Route::DEFAULT`].
    ///
    /// # Examples
    /// ```
    /// use client::domain::Route;
    ///
    /// assert_eq!(Route::from_path("/inventory"), Route::Inventory);
    /// assert_eq!(Route::from_path("/nowhere"), Route::DEFAULT);
    /// ```
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Self::Projects,
            "/login" => Self::Login,
            "/inventory" => Self::Inventory,
            "/equipment" => Self::Equipment,
            "/settings" => Self::Settings,
            "/users" => Self::Users,
            "/logs" => Self::Logs,
            "/test-data" => Self::TestData,
            "/init" => Self::Bootstrap,
            other => other
                .strip_prefix("/projects/")
                .filter(|id| !id.contains('/'))
                .and_then(ProjectId::new)
                .map_or(Self::DEFAULT, Self::ProjectDetail),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the requested view.
    Render,
    /// Show a loading placeholder; the session is still being validated.
    Loading,
    /// Navigate elsewhere instead.
    Redirect(Route),
}

/// Decide whether `route` may be shown in `state`.
///
/// # Examples
/// ```
/// use client::domain::{GuardDecision, Route, SessionState, decide};
///
/// assert_eq!(
///     decide(&SessionState::Anonymous, &Route::Inventory),
///     GuardDecision::Redirect(Route::Login)
/// );
/// assert_eq!(decide(&SessionState::Loading, &Route::Login), GuardDecision::Loading);
/// ```
pub fn decide(state: &SessionState, route: &Route) -> GuardDecision {
    let user = match state {
        SessionState::Uninitialized | SessionState::Loading => return GuardDecision::Loading,
        SessionState::Authenticated(user) => Some(user),
        SessionState::Anonymous => None,
    };

    if matches!(route, Route::Login) {
        return if user.is_some() {
            GuardDecision::Redirect(Route::DEFAULT)
        } else {
            GuardDecision::Render
        };
    }

    match (route.access(), user) {
        (AccessLevel::Public, _) => GuardDecision::Render,
        (AccessLevel::Authenticated | AccessLevel::Admin, None) => {
            GuardDecision::Redirect(Route::Login)
        }
        (AccessLevel::Authenticated, Some(_)) => GuardDecision::Render,
        (AccessLevel::Admin, Some(user)) if user.can(Capability::Administer) => {
            GuardDecision::Render
        }
        (AccessLevel::Admin, Some(_)) => GuardDecision::Redirect(Route::DEFAULT),
    }
}

/// One entry in the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Menu label.
    pub label: &'static str,
    /// Target route.
    pub route: Route,
}

/// Menu entries visible in `state`; empty unless signed in.
pub fn navigation_menu(state: &SessionState) -> Vec<NavItem> {
    let SessionState::Authenticated(user) = state else {
        return Vec::new();
    };

    let mut items = vec![
        NavItem {
            label: "Проекты",
            route: Route::Projects,
        },
        NavItem {
            label: "Инвентарь",
            route: Route::Inventory,
        },
        NavItem {
            label: "Оборудование",
            route: Route::Equipment,
        },
    ];
    if user.can(Capability::Administer) {
        items.push(NavItem {
            label: "Пользователи",
            route: Route::Users,
        });
        items.push(NavItem {
            label: "Логи",
            route: Route::Logs,
        });
    }
    items
}
