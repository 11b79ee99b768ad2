//! Project list, detail, and list-append commands.

use std::io::Write;

use chrono::{DateTime, Utc};

use super::args::{AddItemArgs, ProjectsCommand};
use super::notification::{Notification, SUCCESS_TITLE};
use super::render;
use super::shell::{CommandError, Handled, Shell};
use crate::domain::{
    Capability, Error, NewProject, ProjectId, ProjectListItem, ProjectListKind, ProjectStatus,
    ProjectUpdate, item_from_catalogue, manual_item,
};

impl Shell {
    pub(super) async fn projects(
        &mut self,
        command: ProjectsCommand,
        out: &mut dyn Write,
    ) -> Handled {
        match command {
            ProjectsCommand::List => {
                let projects = self
                    .ports
                    .projects
                    .list()
                    .await
                    .map_err(CommandError::with_fallback("Не удалось загрузить проекты"))?;
                render::project_rows(out, &projects)?;
                Ok(None)
            }
            ProjectsCommand::Show { id } => {
                let project = self
                    .ports
                    .projects
                    .get(&id)
                    .await
                    .map_err(CommandError::with_fallback("Не удалось загрузить проект"))?;
                render::project_detail(out, &project)?;
                Ok(None)
            }
            ProjectsCommand::Create {
                title,
                lead_decorator,
                date,
            } => self.create_project(&title, &lead_decorator, date, out).await,
            ProjectsCommand::Status { id, status } => self.change_status(&id, status).await,
            ProjectsCommand::Delete { id } => self.delete_project(&id).await,
            ProjectsCommand::AddItem(args) => self.add_item(args).await,
        }
    }

    async fn create_project(
        &self,
        title: &str,
        lead_decorator: &str,
        date: DateTime<Utc>,
        out: &mut dyn Write,
    ) -> Handled {
        let title = title.trim();
        let lead_decorator = lead_decorator.trim();
        if title.is_empty() || lead_decorator.is_empty() {
            return Err(Error::invalid_request("Заполните название и ведущего декоратора").into());
        }
        let project = self
            .ports
            .projects
            .create(&NewProject {
                title: title.to_owned(),
                lead_decorator: lead_decorator.to_owned(),
                project_date: date,
                full_details: None,
            })
            .await
            .map_err(CommandError::with_fallback("Не удалось создать проект"))?;
        writeln!(out, "{}", project.id)?;
        Ok(Some(
            Notification::success("Проект создан").with_description(project.title),
        ))
    }

    async fn change_status(&self, id: &ProjectId, status: ProjectStatus) -> Handled {
        let project = self
            .ports
            .projects
            .update(id, &ProjectUpdate::status(status), None)
            .await
            .map_err(CommandError::with_fallback("Не удалось обновить статус"))?;
        Ok(Some(
            Notification::success("Статус обновлён").with_description(project.status.label()),
        ))
    }

    async fn delete_project(&self, id: &ProjectId) -> Handled {
        if !self.session.can(Capability::DeleteProjects) {
            return Err(Error::forbidden("Удалять проекты может только администратор").into());
        }
        let ack = self
            .ports
            .projects
            .delete(id)
            .await
            .map_err(CommandError::with_fallback("Не удалось удалить проект"))?;
        Ok(Some(
            Notification::success("Проект удалён").with_description(ack.message_or("")),
        ))
    }

    async fn add_item(&self, args: AddItemArgs) -> Handled {
        let kind = ProjectListKind::from(args.list);
        self.lists.authorise(&self.session, kind)?;

        let item = self.build_item(&args).await?;
        self.lists
            .append(&args.id, kind, item)
            .await
            .map_err(CommandError::with_fallback("Не удалось добавить элемент"))?;
        Ok(Some(
            Notification::success(SUCCESS_TITLE).with_description("Элемент добавлен в список"),
        ))
    }

    async fn build_item(&self, args: &AddItemArgs) -> Result<ProjectListItem, CommandError> {
        let Some(catalogue) = args.source.catalogue() else {
            return manual_item(
                args.name.as_deref().unwrap_or_default(),
                args.category.as_deref(),
                args.quantity,
                args.notes.as_deref(),
            )
            .map_err(|err| Error::from(err).into());
        };

        let items = self
            .ports
            .catalogue
            .list(catalogue)
            .await
            .map_err(CommandError::with_fallback("Не удалось загрузить каталог"))?;
        item_from_catalogue(catalogue, &items, args.item.as_deref(), args.quantity)
            .map_err(|err| Error::from(err).into())
    }
}
