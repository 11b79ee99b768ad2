//! Plain-text views of domain records.
//!
//! Every renderer writes whole lines to the injected writer so output can be
//! captured in tests.

use std::io::{self, Write};

use crate::domain::{
    Acknowledgement, CatalogueItem, LogEntry, NavItem, Project, ProjectListItem, ProjectListKind,
    User,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `name <email>` plus role and initials.
pub fn user_card(out: &mut dyn Write, user: &User) -> io::Result<()> {
    writeln!(out, "{} <{}>", user.name, user.email)?;
    writeln!(out, "role: {}", user.role.as_str())?;
    writeln!(out, "initials: {}", user.initials())
}

/// One line per menu entry.
pub fn navigation(out: &mut dyn Write, items: &[NavItem]) -> io::Result<()> {
    for item in items {
        writeln!(out, "{:<14} {}", item.label, item.route)?;
    }
    Ok(())
}

/// One line per project.
pub fn project_rows(out: &mut dyn Write, projects: &[Project]) -> io::Result<()> {
    if projects.is_empty() {
        return writeln!(out, "no projects");
    }
    for project in projects {
        writeln!(
            out,
            "{}  {}  {:<16}  {}  ({})",
            project.id,
            project.project_date.format(DATE_FORMAT),
            project.status.label(),
            project.title,
            project.lead_decorator
        )?;
    }
    Ok(())
}

/// Header, agreement flags, and the three lists.
pub fn project_detail(out: &mut dyn Write, project: &Project) -> io::Result<()> {
    writeln!(out, "{}", project.title)?;
    writeln!(out, "id: {}", project.id)?;
    writeln!(out, "date: {}", project.project_date.format(DATE_FORMAT))?;
    writeln!(out, "status: {}", project.status.label())?;
    writeln!(out, "lead decorator: {}", project.lead_decorator)?;
    writeln!(
        out,
        "agreed: curator={} decorator={}",
        yes_no(project.curator_agreement),
        yes_no(project.decorator_agreement)
    )?;
    for kind in ProjectListKind::ALL {
        project_list(out, project, kind)?;
    }
    Ok(())
}

fn project_list(out: &mut dyn Write, project: &Project, kind: ProjectListKind) -> io::Result<()> {
    let Some(list) = project.list(kind) else {
        return writeln!(out, "{}: (none)", kind.title());
    };
    writeln!(out, "{} ({}):", kind.title(), list.len())?;
    for item in list.items() {
        list_item(out, &item)?;
    }
    Ok(())
}

fn list_item(out: &mut dyn Write, item: &ProjectListItem) -> io::Result<()> {
    write!(out, "  - {} x{}", item.name, item.quantity)?;
    if let Some(category) = &item.category {
        write!(out, " [{category}]")?;
    }
    write!(out, " ({})", item.source.label())?;
    match &item.notes {
        Some(notes) => writeln!(out, ": {notes}"),
        None => writeln!(out),
    }
}

/// One line per catalogue item.
pub fn catalogue_rows(out: &mut dyn Write, items: &[CatalogueItem]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "no items");
    }
    for item in items {
        writeln!(
            out,
            "{}  {}{}  [{}]  qty {}",
            item.id,
            marker_prefix(item),
            item.name,
            item.category,
            item.total_quantity
        )?;
    }
    Ok(())
}

/// Full catalogue item including image URLs.
pub fn catalogue_detail(out: &mut dyn Write, item: &CatalogueItem) -> io::Result<()> {
    writeln!(out, "{}{}", marker_prefix(item), item.name)?;
    writeln!(out, "id: {}", item.id)?;
    writeln!(out, "category: {}", item.category)?;
    writeln!(out, "quantity: {}", item.total_quantity)?;
    if let Some(description) = &item.description {
        writeln!(out, "description: {description}")?;
    }
    writeln!(out, "images ({}):", item.images.len())?;
    for url in &item.images {
        writeln!(out, "  {url}")?;
    }
    Ok(())
}

fn marker_prefix(item: &CatalogueItem) -> String {
    item.visual_marker
        .as_deref()
        .filter(|marker| !marker.trim().is_empty())
        .map(|marker| format!("{marker} "))
        .unwrap_or_default()
}

/// One line per account.
pub fn user_rows(out: &mut dyn Write, users: &[User]) -> io::Result<()> {
    for user in users {
        writeln!(
            out,
            "{}  {:<24}  {:<28}  {}{}",
            user.id,
            user.name,
            user.email,
            user.role.as_str(),
            if user.is_active { "" } else { "  (inactive)" }
        )?;
    }
    Ok(())
}

/// One line per log entry, newest first as returned.
pub fn log_rows(out: &mut dyn Write, entries: &[LogEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "no log entries");
    }
    for entry in entries {
        writeln!(
            out,
            "{}  {:<20}  {:<8}  {} {}",
            entry.timestamp.format(STAMP_FORMAT),
            entry.user_name,
            entry.action,
            entry.entity_type,
            entry.entity_id
        )?;
    }
    Ok(())
}

/// Extra fields of a bootstrap acknowledgement, such as issued credentials.
pub fn acknowledgement_extras(out: &mut dyn Write, ack: &Acknowledgement) -> io::Result<()> {
    let Some(credentials) = ack.extra.get("admin_credentials") else {
        return Ok(());
    };
    for key in ["email", "password"] {
        if let Some(value) = credentials.get(key).and_then(|value| value.as_str()) {
            writeln!(out, "{key}: {value}")?;
        }
    }
    Ok(())
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    //! Layout coverage for the text views.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn project() -> Project {
        serde_json::from_value(json!({
            "id": "p-1",
            "title": "Summer gala",
            "lead_decorator": "Olga",
            "project_date": "2025-06-01T00:00:00Z",
            "status": "Создан",
            "preliminary_list": { "items": [
                { "name": "Vase", "quantity": 2, "category": "Glass", "source": "inventory" },
                { "name": "Ribbon", "quantity": "3", "notes": "red", "source": "manual" }
            ]},
            "final_list": { "items": [] },
            "created_at": "2025-05-01T00:00:00Z",
            "updated_at": "2025-05-02T08:30:00Z"
        }))
        .expect("project fixture")
    }

    fn rendered(render: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer).expect("render");
        String::from_utf8(buffer).expect("utf-8")
    }

    #[rstest]
    fn project_detail_lists_every_kind() {
        let text = rendered(|out| project_detail(out, &project()));
        let preliminary = ProjectListKind::Preliminary.title();
        let dismantling = ProjectListKind::Dismantling.title();

        assert!(text.contains(&format!("{preliminary} (2):")));
        assert!(text.contains("  - Vase x2 [Glass] (Инвентарь)\n"));
        assert!(text.contains("  - Ribbon x3 (Ручной ввод): red\n"));
        assert!(text.contains(&format!("{dismantling}: (none)")));
    }

    #[rstest]
    fn empty_collections_say_so() {
        assert_eq!(rendered(|out| project_rows(out, &[])), "no projects\n");
        assert_eq!(rendered(|out| catalogue_rows(out, &[])), "no items\n");
        assert_eq!(rendered(|out| log_rows(out, &[])), "no log entries\n");
    }

    #[rstest]
    fn bootstrap_credentials_are_printed() {
        let ack: Acknowledgement = serde_json::from_value(json!({
            "message": "Database initialized successfully",
            "admin_credentials": { "email": "admin@example.com", "password": "secret" }
        }))
        .expect("ack");
        assert_eq!(
            rendered(|out| acknowledgement_extras(out, &ack)),
            "email: admin@example.com\npassword: secret\n"
        );
    }
}
