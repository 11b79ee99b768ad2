//! Inventory and equipment catalogues.
//!
//! Both catalogues share one item shape and one endpoint layout; only the
//! collection path differs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest image accepted for upload.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Which catalogue an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogueKind {
    /// Consumables and reusable stock.
    Inventory,
    /// Equipment and decor pieces.
    Equipment,
}

impl CatalogueKind {
    /// Collection path segment under `/api`.
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Equipment => "equipment",
        }
    }

    /// Human-readable title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Inventory => "Инвентарь",
            Self::Equipment => "Оборудование/декор",
        }
    }
}

impl fmt::Display for CatalogueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Catalogue item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueItem {
    /// Backend identifier.
    pub id: String,
    /// Grouping used by the pickers.
    pub category: String,
    /// Item name.
    pub name: String,
    /// Stock on hand.
    pub total_quantity: i64,
    /// Short marker (usually an emoji) printed next to the name.
    #[serde(default)]
    pub visual_marker: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URLs in upload order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Creation time.
    #[serde(deserialize_with = "crate::domain::timestamp::lenient")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(deserialize_with = "crate::domain::timestamp::lenient")]
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /api/{inventory,equipment}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCatalogueItem {
    /// Grouping used by the pickers.
    pub category: String,
    /// Item name.
    pub name: String,
    /// Stock on hand.
    pub total_quantity: i64,
    /// Short marker printed next to the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_marker: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update for `PATCH /api/{inventory,equipment}/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CatalogueItemUpdate {
    /// New category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New stock level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<i64>,
    /// New marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_marker: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogueItemUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Reasons an image is rejected before upload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageUploadError {
    /// The content type is not `image/*`.
    #[error("{file_name} is not an image")]
    NotAnImage {
        /// Rejected file name.
        file_name: String,
    },
    /// The payload exceeds [`MAX_IMAGE_BYTES`].
    #[error("{file_name} is too large (max 10MB)")]
    TooLarge {
        /// Rejected file name.
        file_name: String,
    },
    /// The file name was blank.
    #[error("file name must not be empty")]
    EmptyFileName,
}

/// A validated image ready to be sent as the multipart `file` part.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate an image before upload.
    ///
    /// # Examples
    /// ```
    /// use client::domain::{ImageUpload, ImageUploadError};
    ///
    /// let ok = ImageUpload::new("vase.jpg", "image/jpeg", vec![0xff, 0xd8]);
    /// assert!(ok.is_ok());
    /// let err = ImageUpload::new("notes.txt", "text/plain", vec![]).unwrap_err();
    /// assert!(matches!(err, ImageUploadError::NotAnImage { .. }));
    /// ```
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ImageUploadError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(ImageUploadError::EmptyFileName);
        }
        let content_type = content_type.into();
        if !content_type.starts_with("image/") {
            return Err(ImageUploadError::NotAnImage { file_name });
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageUploadError::TooLarge { file_name });
        }
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Guess an image content type from a file extension.
    pub fn content_type_for(file_name: &str) -> Option<&'static str> {
        let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "heic" => Some("image/heic"),
            "svg" => Some("image/svg+xml"),
            _ => None,
        }
    }

    /// File name sent in the multipart part.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type sent in the multipart part.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
