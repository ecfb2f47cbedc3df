//! API handlers for the folder and image endpoints.

pub mod folder;
pub mod image;

pub use folder::*;
pub use image::*;

use std::sync::Arc;

use crate::file::FileStorage;
use crate::Database;

/// Shared database handle.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Metadata database.
    pub db: SharedDatabase,
    /// Storage for the folder API.
    pub folder_storage: FileStorage,
    /// Storage for image uploads.
    pub upload_storage: FileStorage,
    /// Maximum size of a single uploaded file in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Default per-file upload limit (10MB).
    pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

    /// Create a new application state.
    pub fn new(db: SharedDatabase, folder_storage: FileStorage, upload_storage: FileStorage) -> Self {
        Self {
            db,
            folder_storage,
            upload_storage,
            max_upload_size: Self::DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Set the per-file upload limit in bytes.
    pub fn with_max_upload_size(mut self, max_upload_size: u64) -> Self {
        self.max_upload_size = max_upload_size;
        self
    }
}
