//! Image metadata types and repository.

use crate::db::DbPool;
use crate::{Result, ShareError};

/// Metadata row for an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Image {
    /// Unique image ID.
    pub id: i64,
    /// Original filename.
    pub name: String,
    /// Absolute filesystem path of the stored file.
    pub url: String,
}

/// Data for creating a new image row.
#[derive(Debug, Clone)]
pub struct NewImage {
    /// Original filename.
    pub name: String,
    /// Absolute filesystem path of the stored file.
    pub url: String,
}

impl NewImage {
    /// Create a new NewImage.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Repository for image metadata.
pub struct ImageRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ImageRepository<'a> {
    /// Create a new ImageRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert an image row and return it with its assigned ID.
    pub async fn create(&self, image: &NewImage) -> Result<Image> {
        let result = sqlx::query("INSERT INTO images (name, url) VALUES (?, ?)")
            .bind(&image.name)
            .bind(&image.url)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| ShareError::NotFound("image".to_string()))
    }

    /// Get an image by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Image>> {
        let image = sqlx::query_as::<_, Image>("SELECT id, name, url FROM images WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(image)
    }

    /// List every image row with the given name, oldest first.
    pub async fn list_by_name(&self, name: &str) -> Result<Vec<Image>> {
        let images = sqlx::query_as::<_, Image>(
            "SELECT id, name, url FROM images WHERE name = ? ORDER BY id",
        )
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }

    /// Get the oldest image row stored at the given path.
    pub async fn get_by_url(&self, url: &str) -> Result<Option<Image>> {
        let image = sqlx::query_as::<_, Image>(
            "SELECT id, name, url FROM images WHERE url = ? ORDER BY id LIMIT 1",
        )
        .bind(url)
        .fetch_optional(self.pool)
        .await?;

        Ok(image)
    }

    /// List all image rows.
    pub async fn list_all(&self) -> Result<Vec<Image>> {
        let images = sqlx::query_as::<_, Image>("SELECT id, name, url FROM images ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(images)
    }

    /// List the rows whose url starts with `prefix`.
    ///
    /// This is a plain string prefix test: `/up/cat` also matches
    /// `/up/cats/a.png`. `LIKE` is avoided so `%` and `_` in names are literal.
    pub async fn list_by_url_prefix(&self, prefix: &str) -> Result<Vec<Image>> {
        let images = sqlx::query_as::<_, Image>(
            "SELECT id, name, url FROM images
             WHERE substr(url, 1, length(?1)) = ?1 ORDER BY id",
        )
        .bind(prefix)
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }

    /// Delete an image row by ID.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count image rows.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
