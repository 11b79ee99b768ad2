//! Port exposing the current view and the ability to change it.
//!
//! The client adapter only reads the current route (to decide whether a 401
//! should raise the unauthenticated signal); navigation itself belongs to the
//! shell.

use std::sync::Mutex;

use crate::domain::Route;

/// Current-route holder.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Route currently shown.
    fn current(&self) -> Route;

    /// Move to `route`.
    fn navigate(&self, route: Route);
}

/// Navigator that records every transition.
#[derive(Debug)]
pub struct InMemoryNavigator {
    state: Mutex<NavigatorState>,
}

#[derive(Debug)]
struct NavigatorState {
    current: Route,
    history: Vec<Route>,
}

impl InMemoryNavigator {
    /// Start at `route` with an empty history.
    pub fn starting_at(route: Route) -> Self {
        Self {
            state: Mutex::new(NavigatorState {
                current: route,
                history: Vec::new(),
            }),
        }
    }

    /// Routes navigated to, oldest first. The starting route is excluded.
    pub fn history(&self) -> Vec<Route> {
        self.with_state(|state| state.history.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut NavigatorState) -> T) -> T {
        match self.state.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Default for InMemoryNavigator {
    fn default() -> Self {
        Self::starting_at(Route::DEFAULT)
    }
}

impl Navigator for InMemoryNavigator {
    fn current(&self) -> Route {
        self.with_state(|state| state.current.clone())
    }

    fn navigate(&self, route: Route) {
        self.with_state(|state| {
            state.current = route.clone();
            state.history.push(route);
        });
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn records_history() {
        let navigator = InMemoryNavigator::starting_at(Route::Inventory);
        navigator.navigate(Route::Login);
        navigator.navigate(Route::Projects);
        assert_eq!(navigator.current(), Route::Projects);
        assert_eq!(navigator.history(), vec![Route::Login, Route::Projects]);
    }
}
