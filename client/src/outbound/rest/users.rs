//! `/api/users` facade.

use async_trait::async_trait;

use crate::domain::ports::{ApiRequest, UsersApi};
use crate::domain::{Acknowledgement, ApiClient, Error, User, UserId};

/// User management endpoints over the shared client.
#[derive(Clone)]
pub struct HttpUsersApi {
    client: ApiClient,
}

impl HttpUsersApi {
    /// Wrap the shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list(&self) -> Result<Vec<User>, Error> {
        self.client.json(ApiRequest::get("/api/users")).await
    }

    async fn get(&self, id: &UserId) -> Result<User, Error> {
        self.client
            .json(ApiRequest::get(format!("/api/users/{id}")))
            .await
    }

    async fn delete(&self, id: &UserId) -> Result<Acknowledgement, Error> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/api/users/{id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Path coverage for user endpoints.
    use super::super::test_helpers::{client_answering, last};
    use super::*;
    use crate::domain::ports::HttpMethod;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[tokio::test]
    async fn delete_targets_the_user_path() {
        let (client, recorder) =
            client_answering(200, json!({ "message": "User deleted successfully" }));
        let api = HttpUsersApi::new(client);
        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id");

        let ack = api.delete(&id).await.expect("delete");
        assert_eq!(ack.message_or(""), "User deleted successfully");
        let request = last(&recorder);
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path, "/api/users/3fa85f64-5717-4562-b3fc-2c963f66afa6");
        assert!(request.bearer.is_some());
    }
}
