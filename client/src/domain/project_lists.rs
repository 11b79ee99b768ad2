//! Appending entries to a project's preliminary, final, and dismantling lists.
//!
//! The backend stores each list as a JSON document, so an append is a
//! read-modify-write: fetch the project, extend one list, and `PATCH` only
//! that list's field. The write carries the revision read in the same
//! operation as `If-Match`; backends that honour it turn a lost update into
//! a `Conflict`, backends that ignore it behave as a plain overwrite.

use std::sync::Arc;

use tracing::info;

use super::ports::ProjectsApi;
use super::session::SessionStore;
use super::{
    Capability, CatalogueItem, CatalogueKind, Error, ItemSource, Project, ProjectId,
    ProjectListItem, ProjectListKind, ProjectUpdate,
};

/// Default quantity for new entries.
pub const DEFAULT_ITEM_QUANTITY: u32 = 1;

/// Reasons a list entry cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListItemError {
    /// Select mode without a matching catalogue item.
    #[error("select an item")]
    SelectItem,
    /// Manual mode without a name.
    #[error("enter a name")]
    EmptyName,
    /// Quantity below one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

impl From<ListItemError> for Error {
    fn from(value: ListItemError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Capability needed to append to `kind`.
pub const fn required_capability(kind: ProjectListKind) -> Capability {
    match kind {
        ProjectListKind::Final => Capability::EditFinalList,
        ProjectListKind::Preliminary | ProjectListKind::Dismantling => {
            Capability::EditWorkingLists
        }
    }
}

/// Build an entry by picking `selected` from a catalogue.
///
/// Copies the catalogue item's id, name, and category.
///
/// # Examples
/// ```
/// use client::domain::{CatalogueKind, ListItemError, item_from_catalogue};
///
/// let err = item_from_catalogue(CatalogueKind::Inventory, &[], None, None).unwrap_err();
/// assert_eq!(err, ListItemError::SelectItem);
/// ```
pub fn item_from_catalogue(
    kind: CatalogueKind,
    catalogue: &[CatalogueItem],
    selected: Option<&str>,
    quantity: Option<u32>,
) -> Result<ProjectListItem, ListItemError> {
    let quantity = checked_quantity(quantity)?;
    let item = selected
        .and_then(|id| catalogue.iter().find(|item| item.id == id))
        .ok_or(ListItemError::SelectItem)?;
    let source = match kind {
        CatalogueKind::Inventory => ItemSource::Inventory,
        CatalogueKind::Equipment => ItemSource::Equipment,
    };
    Ok(ProjectListItem {
        id: Some(item.id.clone()),
        name: item.name.clone(),
        category: Some(item.category.clone()),
        quantity,
        notes: None,
        source,
    })
}

/// Build a hand-typed entry.
pub fn manual_item(
    name: &str,
    category: Option<&str>,
    quantity: Option<u32>,
    notes: Option<&str>,
) -> Result<ProjectListItem, ListItemError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ListItemError::EmptyName);
    }
    let quantity = checked_quantity(quantity)?;
    Ok(ProjectListItem {
        id: None,
        name: name.to_owned(),
        category: non_blank(category),
        quantity,
        notes: non_blank(notes),
        source: ItemSource::Manual,
    })
}

fn checked_quantity(quantity: Option<u32>) -> Result<u32, ListItemError> {
    match quantity.unwrap_or(DEFAULT_ITEM_QUANTITY) {
        0 => Err(ListItemError::ZeroQuantity),
        value => Ok(value),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Append-only editor for project lists.
#[derive(Clone)]
pub struct ProjectListService {
    projects: Arc<dyn ProjectsApi>,
}

impl ProjectListService {
    /// Wrap a projects facade.
    pub fn new(projects: Arc<dyn ProjectsApi>) -> Self {
        Self { projects }
    }

    /// Reject the append when the signed-in user may not edit `kind`.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::Forbidden`] when the capability is missing.
    pub fn authorise(&self, session: &SessionStore, kind: ProjectListKind) -> Result<(), Error> {
        if session.can(required_capability(kind)) {
            Ok(())
        } else {
            Err(Error::forbidden(format!(
                "not allowed to edit the {} list",
                kind.slug()
            )))
        }
    }

    /// Append `item` at the end of `kind` and return the updated project.
    ///
    /// Only the one list field is sent; the other two lists are left to the
    /// backend untouched.
    ///
    /// # Errors
    ///
    /// Errors from reading or updating the project propagate unchanged,
    /// including [`crate::domain::ErrorCode::Conflict`] when the project
    /// changed between the read and the write.
    pub async fn append(
        &self,
        id: &ProjectId,
        kind: ProjectListKind,
        item: ProjectListItem,
    ) -> Result<Project, Error> {
        let project = self.projects.get(id).await?;
        let current = project.list(kind).cloned().unwrap_or_default();
        let next = current
            .appended(&item)
            .map_err(|err| Error::unexpected(format!("failed to encode list item: {err}")))?;
        let length = next.len();

        let update = ProjectUpdate::single_list(kind, next);
        let updated = self
            .projects
            .update(id, &update, Some(project.revision()))
            .await?;
        info!(project_id = %id, list = kind.slug(), length, "list item appended");
        Ok(updated)
    }
}
