//! Facade over the `/api/projects` endpoints.

use async_trait::async_trait;

use crate::domain::{
    Acknowledgement, Error, NewProject, Project, ProjectId, ProjectRevision, ProjectUpdate,
};

/// Project endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// All projects, newest first as the backend orders them.
    async fn list(&self) -> Result<Vec<Project>, Error>;

    /// One project with its lists.
    async fn get(&self, id: &ProjectId) -> Result<Project, Error>;

    /// Create a project.
    async fn create(&self, project: &NewProject) -> Result<Project, Error>;

    /// Partially update a project.
    ///
    /// Only the fields present in `update` are sent. With `precondition` set,
    /// the request carries `If-Match` and a stale revision fails with
    /// [`crate::domain::ErrorCode::Conflict`].
    async fn update(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
        precondition: Option<ProjectRevision>,
    ) -> Result<Project, Error>;

    /// Remove a project.
    async fn delete(&self, id: &ProjectId) -> Result<Acknowledgement, Error>;
}
