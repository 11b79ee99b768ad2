//! Facade over the `/api/inventory` and `/api/equipment` endpoints.
//!
//! Both catalogues expose the same operations, so one port serves both and
//! takes the [`CatalogueKind`] per call.

use async_trait::async_trait;

use crate::domain::{
    Acknowledgement, CatalogueItem, CatalogueItemUpdate, CatalogueKind, Error, ImageUpload,
    NewCatalogueItem,
};

/// Catalogue endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueApi: Send + Sync {
    /// All items in the catalogue.
    async fn list(&self, kind: CatalogueKind) -> Result<Vec<CatalogueItem>, Error>;

    /// One item.
    async fn get(&self, kind: CatalogueKind, id: &str) -> Result<CatalogueItem, Error>;

    /// Create an item.
    async fn create(
        &self,
        kind: CatalogueKind,
        item: &NewCatalogueItem,
    ) -> Result<CatalogueItem, Error>;

    /// Partially update an item.
    async fn update(
        &self,
        kind: CatalogueKind,
        id: &str,
        update: &CatalogueItemUpdate,
    ) -> Result<CatalogueItem, Error>;

    /// Remove an item.
    async fn delete(&self, kind: CatalogueKind, id: &str) -> Result<Acknowledgement, Error>;

    /// Attach an image as multipart `file`.
    async fn upload_image(
        &self,
        kind: CatalogueKind,
        id: &str,
        upload: ImageUpload,
    ) -> Result<Acknowledgement, Error>;

    /// Detach an image by its URL.
    async fn delete_image(
        &self,
        kind: CatalogueKind,
        id: &str,
        image_url: &str,
    ) -> Result<Acknowledgement, Error>;
}
