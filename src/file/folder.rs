//! Folder metadata types and repository.

use crate::db::DbPool;
use crate::{Result, ShareError};

/// Metadata row describing a folder directory.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Folder {
    /// Unique folder ID.
    pub id: i64,
    /// Folder name (the directory name under the base directory).
    pub name: String,
    /// When the folder was created.
    pub created_at: String,
    /// When the folder was last renamed.
    pub updated_at: String,
}

/// Data for creating a new folder row.
#[derive(Debug, Clone)]
pub struct NewFolder {
    /// Folder name.
    pub name: String,
}

impl NewFolder {
    /// Create a new NewFolder.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Repository for folder metadata.
pub struct FolderRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FolderRepository<'a> {
    /// Create a new FolderRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a folder row and return it with its assigned ID.
    pub async fn create(&self, folder: &NewFolder) -> Result<Folder> {
        let result = sqlx::query("INSERT INTO folders (name) VALUES (?)")
            .bind(&folder.name)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| ShareError::NotFound("folder".to_string()))
    }

    /// Get a folder by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Folder>> {
        let folder = sqlx::query_as::<_, Folder>(
            "SELECT id, name, created_at, updated_at FROM folders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(folder)
    }

    /// List all folder rows in creation order.
    pub async fn list_all(&self) -> Result<Vec<Folder>> {
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT id, name, created_at, updated_at FROM folders ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(folders)
    }

    /// List rows with the given name. Names are not unique.
    pub async fn list_by_name(&self, name: &str) -> Result<Vec<Folder>> {
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT id, name, created_at, updated_at FROM folders WHERE name = ? ORDER BY id",
        )
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(folders)
    }

    /// Rename a folder row and touch its updated_at.
    ///
    /// Returns the updated row, or None if not found.
    pub async fn rename(&self, id: i64, name: &str) -> Result<Option<Folder>> {
        let result =
            sqlx::query("UPDATE folders SET name = ?, updated_at = datetime('now') WHERE id = ?")
                .bind(name)
                .bind(id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a folder row by ID.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every row with the given name, returning how many were removed.
    pub async fn delete_by_name(&self, name: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM folders WHERE name = ?")
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::parse_db_datetime;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_folder() {
        let db = setup_db().await;
        let repo = FolderRepository::new(db.pool());

        let folder = repo.create(&NewFolder::new("Holidays 2024")).await.unwrap();

        assert!(folder.id > 0);
        assert_eq!(folder.name, "Holidays 2024");
        assert_eq!(folder.created_at, folder.updated_at);
    }

    #[tokio::test]
    async fn test_ids_autoincrement() {
        let db = setup_db().await;
        let repo = FolderRepository::new(db.pool());

        let first = repo.create(&NewFolder::new("a")).await.unwrap();
        let second = repo.create(&NewFolder::new("b")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_get_folder_not_found() {
        let db = setup_db().await;
        let repo = FolderRepository::new(db.pool());

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_names_allowed() {
        let db = setup_db().await;
        let repo = FolderRepository::new(db.pool());

        repo.create(&NewFolder::new("dup")).await.unwrap();
        repo.create(&NewFolder::new("dup")).await.unwrap();
        repo.create(&NewFolder::new("other")).await.unwrap();

        assert_eq!(repo.list_by_name("dup").await.unwrap().len(), 2);
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_rename_folder() {
        let db = setup_db().await;
        let repo = FolderRepository::new(db.pool());

        let folder = repo.create(&NewFolder::new("Original")).await.unwrap();
        let renamed = repo.rename(folder.id, "Renamed").await.unwrap().unwrap();

        assert_eq!(renamed.id, folder.id);
        assert_eq!(renamed.name, "Renamed");
        assert_eq!(renamed.created_at, folder.created_at);
        assert!(
            parse_db_datetime(&renamed.updated_at) >= parse_db_datetime(&folder.updated_at)
        );
    }

    #[tokio::test]
    async fn test_rename_missing_folder() {
        let db = setup_db().await;
        let repo = FolderRepository::new(db.pool());

        assert!(repo.rename(42, "Nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_folder() {
        let db = setup_db().await;
        let repo = FolderRepository::new(db.pool());

        let folder = repo.create(&NewFolder::new("ToDelete")).await.unwrap();

        assert!(repo.delete(folder.id).await.unwrap());
        assert!(repo.get_by_id(folder.id).await.unwrap().is_none());
        assert!(!repo.delete(folder.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_by_name() {
        let db = setup_db().await;
        let repo = FolderRepository::new(db.pool());

        repo.create(&NewFolder::new("gone")).await.unwrap();
        repo.create(&NewFolder::new("gone")).await.unwrap();
        let kept = repo.create(&NewFolder::new("kept")).await.unwrap();

        assert_eq!(repo.delete_by_name("gone").await.unwrap(), 2);
        assert_eq!(repo.delete_by_name("gone").await.unwrap(), 0);

        let remaining = repo.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_timestamps_parse() {
        let db = setup_db().await;
        let repo = FolderRepository::new(db.pool());

        let folder = repo.create(&NewFolder::new("dated")).await.unwrap();

        assert!(parse_db_datetime(&folder.created_at).is_some());
        assert!(parse_db_datetime(&folder.updated_at).is_some());
    }
}
