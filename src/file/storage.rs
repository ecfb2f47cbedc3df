//! Directory-backed storage for folders and the files inside them.
//!
//! Layout is flat, one directory per folder:
//! ```text
//! {base_path}/
//! ├── holidays/
//! │   ├── beach.jpg
//! │   └── sunset.png
//! └── family/
//!     └── portrait.jpeg
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::is_image_name;
use crate::{Result, ShareError};

/// Filesystem storage rooted at a base directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Absolute base directory.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `base_path`, creating the directory if needed.
    ///
    /// Relative paths are resolved against the current directory so stored
    /// file paths are always absolute.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        let base_path = if base_path.is_absolute() {
            base_path
        } else {
            std::env::current_dir()?.join(base_path)
        };
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Check that `name` is a single, non-empty path component.
    pub fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ShareError::Validation("name cannot be empty".to_string()));
        }
        if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
            return Err(ShareError::Validation(format!("invalid name: {name}")));
        }
        Ok(())
    }

    /// Get the directory path for a folder.
    pub fn folder_path(&self, folder: &str) -> Result<PathBuf> {
        Self::validate_name(folder)?;
        Ok(self.base_path.join(folder))
    }

    /// Get the path of a file inside a folder.
    pub fn file_path(&self, folder: &str, file_name: &str) -> Result<PathBuf> {
        Self::validate_name(file_name)?;
        Ok(self.folder_path(folder)?.join(file_name))
    }

    /// Check whether a folder directory exists.
    pub fn folder_exists(&self, folder: &str) -> bool {
        self.folder_path(folder).map(|p| p.is_dir()).unwrap_or(false)
    }

    /// Check whether a regular file exists inside a folder.
    pub fn file_exists(&self, folder: &str, file_name: &str) -> bool {
        self.file_path(folder, file_name)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    /// Create a folder directory.
    ///
    /// Fails with `Conflict` if anything already exists at that path.
    pub fn create_folder(&self, folder: &str) -> Result<PathBuf> {
        let path = self.folder_path(folder)?;
        if path.exists() {
            return Err(ShareError::Conflict(format!("folder {folder}")));
        }

        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Create a folder directory unless it already exists.
    pub fn ensure_folder(&self, folder: &str) -> Result<PathBuf> {
        let path = self.folder_path(folder)?;
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// List the names of all folder directories, sorted.
    ///
    /// A missing base directory yields an empty list.
    pub fn list_folders(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();

        Ok(names)
    }

    /// List the names of regular files in a folder, sorted.
    pub fn list_files(&self, folder: &str) -> Result<Vec<String>> {
        let path = self.folder_path(folder)?;
        if !path.is_dir() {
            return Err(ShareError::NotFound(format!("folder {folder}")));
        }

        let mut names: Vec<String> = fs::read_dir(&path)?
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();

        Ok(names)
    }

    /// List the image files in a folder, sorted.
    pub fn list_images(&self, folder: &str) -> Result<Vec<String>> {
        Ok(self
            .list_files(folder)?
            .into_iter()
            .filter(|name| is_image_name(name))
            .collect())
    }

    /// Read a file from a folder.
    pub fn read_file(&self, folder: &str, file_name: &str) -> Result<Vec<u8>> {
        let path = self.file_path(folder, file_name)?;

        match fs::read(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ShareError::NotFound(format!("file {file_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write a file into a folder, creating the folder if needed.
    ///
    /// An existing file with the same name is overwritten. Returns the
    /// absolute path of the written file.
    pub fn write_file(&self, folder: &str, file_name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.file_path(folder, file_name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)?;
        Ok(path)
    }

    /// Delete a file from a folder.
    ///
    /// Returns `false` if the file did not exist.
    pub fn delete_file(&self, folder: &str, file_name: &str) -> Result<bool> {
        let path = self.file_path(folder, file_name)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Recursively delete a folder and everything in it.
    ///
    /// Returns `false` if there was no such directory.
    pub fn delete_folder(&self, folder: &str) -> Result<bool> {
        let path = self.folder_path(folder)?;
        if !path.is_dir() {
            return Ok(false);
        }

        fs::remove_dir_all(&path)?;
        Ok(true)
    }

    /// Rename a folder directory.
    pub fn rename_folder(&self, from: &str, to: &str) -> Result<PathBuf> {
        let source = self.folder_path(from)?;
        let target = self.folder_path(to)?;

        if !source.is_dir() {
            return Err(ShareError::NotFound(format!("folder {from}")));
        }
        if target.exists() {
            return Err(ShareError::Conflict(format!("folder {to}")));
        }

        fs::rename(&source, &target)?;
        Ok(target)
    }
}
