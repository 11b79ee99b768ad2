//! `/api/projects` facade.

use async_trait::async_trait;

use super::encode;
use crate::domain::ports::{ApiRequest, ProjectsApi};
use crate::domain::{
    Acknowledgement, ApiClient, Error, NewProject, Project, ProjectId, ProjectRevision,
    ProjectUpdate,
};

/// Project endpoints over the shared client.
#[derive(Clone)]
pub struct HttpProjectsApi {
    client: ApiClient,
}

impl HttpProjectsApi {
    /// Wrap the shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProjectsApi for HttpProjectsApi {
    async fn list(&self) -> Result<Vec<Project>, Error> {
        self.client.json(ApiRequest::get("/api/projects")).await
    }

    async fn get(&self, id: &ProjectId) -> Result<Project, Error> {
        self.client
            .json(ApiRequest::get(format!("/api/projects/{id}")))
            .await
    }

    async fn create(&self, project: &NewProject) -> Result<Project, Error> {
        let body = encode(project)?;
        self.client
            .json(ApiRequest::post("/api/projects").with_json(body))
            .await
    }

    async fn update(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
        precondition: Option<ProjectRevision>,
    ) -> Result<Project, Error> {
        let body = encode(update)?;
        let mut request = ApiRequest::patch(format!("/api/projects/{id}")).with_json(body);
        if let Some(revision) = precondition {
            request = request.with_if_match(revision.as_entity_tag());
        }
        self.client.json(request).await
    }

    async fn delete(&self, id: &ProjectId) -> Result<Acknowledgement, Error> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/api/projects/{id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Wire-shape coverage for project requests.
    use super::super::test_helpers::{client_answering, last, recorded_json};
    use super::*;
    use crate::domain::ports::HttpMethod;
    use crate::domain::{ErrorCode, ProjectStatus};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn project_body() -> Value {
        json!({
            "id": "p-1",
            "title": "Gala",
            "lead_decorator": "Anna",
            "project_date": "2025-06-01T00:00:00Z",
            "status": "Создан",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-05-02T08:30:00Z"
        })
    }

    #[rstest]
    #[tokio::test]
    async fn status_update_is_partial_and_unconditional() {
        let (client, recorder) = client_answering(200, project_body());
        let api = HttpProjectsApi::new(client);
        let id = ProjectId::new("p-1").expect("id");

        api.update(&id, &ProjectUpdate::status(ProjectStatus::Approved), None)
            .await
            .expect("update");
        let (path, body) = recorded_json(&recorder);
        assert_eq!(path, "/api/projects/p-1");
        assert_eq!(body, json!({ "status": "Согласован" }));
        assert!(last(&recorder).if_match.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn preconditions_become_if_match() {
        let (client, recorder) = client_answering(200, project_body());
        let api = HttpProjectsApi::new(client);
        let project: Project = serde_json::from_value(project_body()).expect("project");

        api.update(&project.id, &ProjectUpdate::default(), Some(project.revision()))
            .await
            .expect("update");
        let request = last(&recorder);
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(
            request.if_match.as_deref(),
            Some("\"2025-05-02T08:30:00+00:00\"")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn missing_projects_are_not_found() {
        let (client, _recorder) = client_answering(404, json!({ "detail": "Project not found" }));
        let api = HttpProjectsApi::new(client);
        let id = ProjectId::new("gone").expect("id");

        let err = api.get(&id).await.expect_err("404");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Project not found");
    }
}
