//! Response DTOs for the Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::datetime::to_rfc3339;
use crate::file::{Folder, Image};

/// Folder metadata row.
#[derive(Debug, Serialize, ToSchema)]
pub struct FolderRecordResponse {
    /// Folder ID.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Creation time (RFC3339).
    pub created_at: String,
    /// Last rename time (RFC3339).
    pub updated_at: String,
}

impl From<Folder> for FolderRecordResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
            created_at: to_rfc3339(&folder.created_at),
            updated_at: to_rfc3339(&folder.updated_at),
        }
    }
}

/// Image metadata row.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageResponse {
    /// Image ID.
    pub id: i64,
    /// Original filename.
    pub name: String,
    /// Absolute path of the stored file.
    pub url: String,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            name: image.name,
            url: image.url,
        }
    }
}
