//! Folder and image storage for foldershare.
//!
//! - Directory storage for folders and the files inside them
//! - Folder and image metadata repositories

mod folder;
mod image;
mod storage;

pub use folder::{Folder, FolderRepository, NewFolder};
pub use image::{Image, ImageRepository, NewImage};
pub use storage::FileStorage;

/// File extensions listed as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff"];

/// Check whether a filename has one of the image extensions.
pub fn is_image_name(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
