//! Request DTOs for the Web API.

use serde::Deserialize;
use utoipa::ToSchema;

/// Folder creation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFolderRequest {
    /// Folder name. Missing and blank names are rejected with 400.
    #[serde(default)]
    pub name: Option<String>,
}

/// Folder rename request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_folder_request_missing_name() {
        let req: CreateFolderRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none());

        let req: CreateFolderRequest = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(req.name.is_none());
    }

    #[test]
    fn test_rename_folder_request() {
        let req: RenameFolderRequest = serde_json::from_str(r#"{"name": "renamed"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("renamed"));
    }
}
