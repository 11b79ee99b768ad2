//! Administrator screens: users, activity log, and bootstrap.

use std::io::Write;

use super::args::{LogsCommand, UsersCommand};
use super::notification::{Notification, SUCCESS_TITLE};
use super::render;
use super::shell::{CommandError, Handled, Shell};
use crate::domain::{Error, Registration, Role, UserId, log_limit};

impl Shell {
    pub(super) async fn users(&mut self, command: UsersCommand, out: &mut dyn Write) -> Handled {
        match command {
            UsersCommand::List => {
                let users = self
                    .ports
                    .users
                    .list()
                    .await
                    .map_err(CommandError::with_fallback("Не удалось загрузить пользователей"))?;
                render::user_rows(out, &users)?;
                Ok(None)
            }
            UsersCommand::Register {
                name,
                email,
                password,
                role,
            } => self.register(&name, &email, &password, role, out).await,
            UsersCommand::Delete { id } => self.delete_user(&id).await,
        }
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        out: &mut dyn Write,
    ) -> Handled {
        let registration = Registration::try_from_parts(name, email, password, role)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let user = self
            .ports
            .auth
            .register(&registration)
            .await
            .map_err(CommandError::with_fallback("Не удалось создать пользователя"))?;
        writeln!(out, "{}", user.id)?;
        Ok(Some(
            Notification::success("Пользователь создан").with_description(user.name),
        ))
    }

    async fn delete_user(&self, raw_id: &str) -> Handled {
        let id = UserId::new(raw_id).map_err(|err| Error::invalid_request(err.to_string()))?;
        if self.session.user().is_some_and(|user| user.id == id) {
            return Err(Error::invalid_request("Нельзя удалить свою учётную запись").into());
        }
        self.ports
            .users
            .delete(&id)
            .await
            .map_err(CommandError::with_fallback("Не удалось удалить пользователя"))?;
        Ok(Some(Notification::success("Пользователь удалён")))
    }

    pub(super) async fn logs(&mut self, command: LogsCommand, out: &mut dyn Write) -> Handled {
        match command {
            LogsCommand::List { limit } => {
                let entries = self
                    .ports
                    .logs
                    .list(log_limit(limit))
                    .await
                    .map_err(CommandError::with_fallback("Не удалось загрузить логи"))?;
                render::log_rows(out, &entries)?;
                Ok(None)
            }
            LogsCommand::Cleanup => {
                let report = self
                    .ports
                    .logs
                    .cleanup()
                    .await
                    .map_err(CommandError::with_fallback("Не удалось очистить логи"))?;
                Ok(Some(
                    Notification::success(SUCCESS_TITLE)
                        .with_description(format!("Удалено записей: {}", report.deleted_count)),
                ))
            }
        }
    }

    pub(super) async fn init(&mut self, out: &mut dyn Write) -> Handled {
        let ack = self
            .ports
            .bootstrap
            .init()
            .await
            .map_err(CommandError::with_fallback("Не удалось инициализировать базу"))?;
        render::acknowledgement_extras(out, &ack)?;
        Ok(Some(
            Notification::success(SUCCESS_TITLE)
                .with_description(ack.message_or("База инициализирована")),
        ))
    }

    pub(super) async fn load_test_data(&mut self) -> Handled {
        let ack = self
            .ports
            .bootstrap
            .load_test_data()
            .await
            .map_err(CommandError::with_fallback("Не удалось загрузить тестовые данные"))?;
        Ok(Some(
            Notification::success("Успешно!")
                .with_description(ack.message_or("Тестовые данные загружены")),
        ))
    }
}
