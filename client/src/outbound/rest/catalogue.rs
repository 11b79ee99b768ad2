//! `/api/inventory` and `/api/equipment` facade.

use async_trait::async_trait;

use super::encode;
use crate::domain::ports::{ApiRequest, CatalogueApi};
use crate::domain::{
    Acknowledgement, ApiClient, CatalogueItem, CatalogueItemUpdate, CatalogueKind, Error,
    ImageUpload, NewCatalogueItem,
};

/// Catalogue endpoints over the shared client.
#[derive(Clone)]
pub struct HttpCatalogueApi {
    client: ApiClient,
}

impl HttpCatalogueApi {
    /// Wrap the shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn collection(kind: CatalogueKind) -> String {
    format!("/api/{}", kind.collection())
}

fn item_path(kind: CatalogueKind, id: &str) -> String {
    format!("/api/{}/{id}", kind.collection())
}

fn images_path(kind: CatalogueKind, id: &str) -> String {
    format!("/api/{}/{id}/images", kind.collection())
}

#[async_trait]
impl CatalogueApi for HttpCatalogueApi {
    async fn list(&self, kind: CatalogueKind) -> Result<Vec<CatalogueItem>, Error> {
        self.client.json(ApiRequest::get(collection(kind))).await
    }

    async fn get(&self, kind: CatalogueKind, id: &str) -> Result<CatalogueItem, Error> {
        self.client.json(ApiRequest::get(item_path(kind, id))).await
    }

    async fn create(
        &self,
        kind: CatalogueKind,
        item: &NewCatalogueItem,
    ) -> Result<CatalogueItem, Error> {
        let body = encode(item)?;
        self.client
            .json(ApiRequest::post(collection(kind)).with_json(body))
            .await
    }

    async fn update(
        &self,
        kind: CatalogueKind,
        id: &str,
        update: &CatalogueItemUpdate,
    ) -> Result<CatalogueItem, Error> {
        let body = encode(update)?;
        self.client
            .json(ApiRequest::patch(item_path(kind, id)).with_json(body))
            .await
    }

    async fn delete(&self, kind: CatalogueKind, id: &str) -> Result<Acknowledgement, Error> {
        self.client
            .acknowledge(ApiRequest::delete(item_path(kind, id)))
            .await
    }

    async fn upload_image(
        &self,
        kind: CatalogueKind,
        id: &str,
        upload: ImageUpload,
    ) -> Result<Acknowledgement, Error> {
        self.client
            .acknowledge(ApiRequest::post(images_path(kind, id)).with_upload(upload))
            .await
    }

    async fn delete_image(
        &self,
        kind: CatalogueKind,
        id: &str,
        image_url: &str,
    ) -> Result<Acknowledgement, Error> {
        self.client
            .acknowledge(
                ApiRequest::delete(images_path(kind, id)).with_query("image_url", image_url),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Path coverage for both catalogues.
    use super::super::test_helpers::{client_answering, last};
    use super::*;
    use crate::domain::ports::{HttpMethod, RequestBody};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(CatalogueKind::Inventory, "/api/inventory/i-1/images")]
    #[case(CatalogueKind::Equipment, "/api/equipment/i-1/images")]
    #[tokio::test]
    async fn uploads_go_to_the_images_endpoint(
        #[case] kind: CatalogueKind,
        #[case] expected: &str,
    ) {
        let (client, recorder) = client_answering(200, json!({ "images": ["/u/a.png"] }));
        let api = HttpCatalogueApi::new(client);
        let upload = ImageUpload::new("a.png", "image/png", vec![1, 2, 3]).expect("upload");

        api.upload_image(kind, "i-1", upload.clone())
            .await
            .expect("upload succeeds");
        let request = last(&recorder);
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, expected);
        assert_eq!(request.body, RequestBody::Multipart(upload));
    }

    #[rstest]
    #[tokio::test]
    async fn image_deletion_passes_the_url_as_query() {
        let (client, recorder) = client_answering(200, json!({ "message": "ok" }));
        let api = HttpCatalogueApi::new(client);

        api.delete_image(CatalogueKind::Equipment, "e-9", "/uploads/x.jpg")
            .await
            .expect("delete");
        let request = last(&recorder);
        assert_eq!(request.path, "/api/equipment/e-9/images");
        assert_eq!(
            request.query,
            vec![("image_url".to_owned(), "/uploads/x.jpg".to_owned())]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn listing_decodes_items() {
        let (client, _recorder) = client_answering(
            200,
            json!([{
                "id": "i-1",
                "category": "Vases",
                "name": "Glass vase",
                "total_quantity": 10,
                "visual_marker": "🔴",
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z"
            }]),
        );
        let api = HttpCatalogueApi::new(client);

        let items = api.list(CatalogueKind::Inventory).await.expect("list");
        assert_eq!(items.len(), 1);
        assert!(items[0].images.is_empty());
    }
}
