//! Sign-in, sign-out, and session introspection commands.

use std::io::Write;

use super::notification::Notification;
use super::render;
use super::shell::{CommandError, Handled, Shell};
use crate::domain::{Error, LoginOutcome, Route, navigation_menu};

impl Shell {
    pub(super) async fn login(
        &mut self,
        email: &str,
        password: &str,
        out: &mut dyn Write,
    ) -> Handled {
        match self.session.login(email, password).await {
            LoginOutcome::Success(user) => {
                self.ports.navigator.navigate(Route::DEFAULT);
                render::user_card(out, &user)?;
                Ok(Some(
                    Notification::success("Вход выполнен").with_description(user.name),
                ))
            }
            LoginOutcome::Failed { message } => Err(CommandError::Rejected(
                Notification::failure("Ошибка входа").with_description(message),
            )),
        }
    }

    pub(super) async fn logout(&mut self) -> Handled {
        self.session.logout().await;
        self.ports.navigator.navigate(Route::Login);
        Ok(Some(Notification::success("Выход выполнен")))
    }

    pub(super) fn whoami(&self, out: &mut dyn Write) -> Handled {
        let user = self
            .session
            .user()
            .ok_or_else(|| Error::unauthenticated("not signed in"))?;
        render::user_card(out, user)?;
        Ok(None)
    }

    pub(super) fn nav(&self, out: &mut dyn Write) -> Handled {
        render::navigation(out, &navigation_menu(self.session.state()))?;
        Ok(None)
    }
}
