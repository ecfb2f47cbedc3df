//! Folder handlers for Web API.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::file::{FileStorage, FolderRepository, NewFolder};
use crate::web::dto::{CreateFolderRequest, FolderRecordResponse, RenameFolderRequest};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::ShareError;

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters are dropped, quotes and backslashes are replaced in the
/// plain `filename` parameter, and non-ASCII names additionally get an
/// RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && sanitized == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized,
        urlencoding::encode(filename)
    )
}

/// POST /api/folders - Create a folder.
#[utoipa::path(
    post,
    path = "/api/folders",
    tag = "folders",
    request_body = CreateFolderRequest,
    responses(
        (status = 201, description = "Folder created", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing or invalid folder name"),
        (status = 409, description = "Folder already exists"),
        (status = 500, description = "Folder could not be created")
    )
)]
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, String), ApiError> {
    let name = req.name.unwrap_or_default();
    if name.trim().is_empty() {
        return Err(ApiError::bad_request("Folder name cannot be empty."));
    }
    FileStorage::validate_name(&name)
        .map_err(|_| ApiError::bad_request(format!("Invalid folder name: {name}")))?;

    match state.folder_storage.create_folder(&name) {
        Ok(path) => {
            tracing::info!(folder = %name, path = %path.display(), "Folder created");
        }
        Err(ShareError::Conflict(_)) => {
            tracing::warn!(folder = %name, "Folder already exists");
            return Err(ApiError::conflict("Folder already exists."));
        }
        Err(e) => {
            tracing::error!("Failed to create folder {}: {}", name, e);
            return Err(ApiError::internal("Error creating folder."));
        }
    }

    let repo = FolderRepository::new(state.db.pool());
    if let Err(e) = repo.create(&NewFolder::new(&name)).await {
        tracing::error!("Failed to record folder {}: {}", name, e);
    }

    Ok((
        StatusCode::CREATED,
        format!("Folder created successfully: {name}"),
    ))
}

/// GET /api/folders - List folder names.
#[utoipa::path(
    get,
    path = "/api/folders",
    tag = "folders",
    responses(
        (status = 200, description = "Folder names, sorted", body = Vec<String>),
        (status = 500, description = "Base directory could not be read")
    )
)]
pub async fn list_folders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let folders = state.folder_storage.list_folders().map_err(|e| {
        tracing::error!("Failed to list folders: {}", e);
        ApiError::internal("Failed to list folders")
    })?;

    Ok(Json(folders))
}

/// GET /api/folders/:folder/images - List image files in a folder.
#[utoipa::path(
    get,
    path = "/api/folders/{folder}/images",
    tag = "folders",
    params(
        ("folder" = String, Path, description = "Folder name")
    ),
    responses(
        (status = 200, description = "Image file names, sorted", body = Vec<String>),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn list_folder_images(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    if !state.folder_storage.folder_exists(&folder) {
        return Err(ApiError::not_found("Folder not found."));
    }

    let images = state.folder_storage.list_images(&folder).map_err(|e| {
        tracing::error!("Failed to list images in {}: {}", folder, e);
        ApiError::internal("Failed to list images")
    })?;

    Ok(Json(images))
}

/// GET /api/folders/:folder/images/:name - Download one file from a folder.
#[utoipa::path(
    get,
    path = "/api/folders/{folder}/images/{name}",
    tag = "folders",
    params(
        ("folder" = String, Path, description = "Folder name"),
        ("name" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 404, description = "Image not found")
    )
)]
pub async fn get_folder_image(
    State(state): State<Arc<AppState>>,
    Path((folder, name)): Path<(String, String)>,
) -> Result<Response<Body>, ApiError> {
    if !state.folder_storage.file_exists(&folder, &name) {
        return Err(ApiError::not_found("Image not found."));
    }

    let content = state
        .folder_storage
        .read_file(&folder, &name)
        .map_err(|e| match e {
            ShareError::NotFound(_) => ApiError::not_found("Image not found."),
            e => {
                tracing::error!("Failed to read {}/{}: {}", folder, name, e);
                ApiError::internal("Failed to read image")
            }
        })?;

    let mime_type = mime_guess::from_path(&name)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, mime_type)
        .header(header::CONTENT_DISPOSITION, content_disposition_header(&name))
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

/// DELETE /api/folders - Delete several folders.
///
/// Always answers 200 with one line per requested name once the list is
/// non-empty; individual failures are reported in the body.
#[utoipa::path(
    delete,
    path = "/api/folders",
    tag = "folders",
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Per-folder outcome, one line each", body = String, content_type = "text/plain"),
        (status = 400, description = "No folder names provided")
    )
)]
pub async fn delete_folders(
    State(state): State<Arc<AppState>>,
    Json(names): Json<Vec<String>>,
) -> Result<(StatusCode, String), ApiError> {
    if names.is_empty() {
        return Err(ApiError::bad_request("No folder names provided."));
    }

    let repo = FolderRepository::new(state.db.pool());
    let mut summary = String::new();

    for name in &names {
        if !state.folder_storage.folder_exists(name) {
            summary.push_str(&format!("Folder {name} does not exist.\n"));
            continue;
        }

        match state.folder_storage.delete_folder(name) {
            Ok(true) => {
                tracing::info!(folder = %name, "Folder deleted");
                if let Err(e) = repo.delete_by_name(name).await {
                    tracing::error!("Failed to remove folder record {}: {}", name, e);
                }
                summary.push_str(&format!("Folder {name} deleted successfully.\n"));
            }
            Ok(false) => {
                summary.push_str(&format!("Folder {name} does not exist.\n"));
            }
            Err(e) => {
                tracing::error!("Failed to delete folder {}: {}", name, e);
                summary.push_str(&format!("Error deleting folder {name}.\n"));
            }
        }
    }

    Ok((StatusCode::OK, summary))
}

/// GET /api/folder-records - List folder metadata rows.
#[utoipa::path(
    get,
    path = "/api/folder-records",
    tag = "folders",
    responses(
        (status = 200, description = "Folder records", body = Vec<FolderRecordResponse>)
    )
)]
pub async fn list_folder_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FolderRecordResponse>>, ApiError> {
    let repo = FolderRepository::new(state.db.pool());
    let folders = repo.list_all().await.map_err(|e| {
        tracing::error!("Failed to list folder records: {}", e);
        ApiError::internal("Failed to list folder records")
    })?;

    Ok(Json(folders.into_iter().map(Into::into).collect()))
}

/// GET /api/folder-records/:id - Get one folder metadata row.
#[utoipa::path(
    get,
    path = "/api/folder-records/{id}",
    tag = "folders",
    params(
        ("id" = i64, Path, description = "Folder record ID")
    ),
    responses(
        (status = 200, description = "Folder record", body = FolderRecordResponse),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn get_folder_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<FolderRecordResponse>, ApiError> {
    let repo = FolderRepository::new(state.db.pool());
    let folder = repo
        .get_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get folder record {}: {}", id, e);
            ApiError::internal("Failed to get folder record")
        })?
        .ok_or_else(|| ApiError::not_found("Folder not found."))?;

    Ok(Json(folder.into()))
}

/// PUT /api/folder-records/:id - Rename a folder.
///
/// Renames the directory when it exists, then the metadata row.
#[utoipa::path(
    put,
    path = "/api/folder-records/{id}",
    tag = "folders",
    params(
        ("id" = i64, Path, description = "Folder record ID")
    ),
    request_body = RenameFolderRequest,
    responses(
        (status = 200, description = "Renamed folder record", body = FolderRecordResponse),
        (status = 400, description = "Missing or invalid folder name"),
        (status = 404, description = "Folder not found"),
        (status = 409, description = "A folder with the new name already exists")
    )
)]
pub async fn rename_folder_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<RenameFolderRequest>,
) -> Result<Json<FolderRecordResponse>, ApiError> {
    let new_name = req.name.unwrap_or_default();
    if new_name.trim().is_empty() {
        return Err(ApiError::bad_request("Folder name cannot be empty."));
    }
    FileStorage::validate_name(&new_name)
        .map_err(|_| ApiError::bad_request(format!("Invalid folder name: {new_name}")))?;

    let repo = FolderRepository::new(state.db.pool());
    let folder = repo
        .get_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get folder record {}: {}", id, e);
            ApiError::internal("Failed to get folder record")
        })?
        .ok_or_else(|| ApiError::not_found("Folder not found."))?;

    if folder.name != new_name {
        if state.folder_storage.folder_exists(&folder.name) {
            state
                .folder_storage
                .rename_folder(&folder.name, &new_name)
                .map_err(|e| match e {
                    ShareError::Conflict(_) => ApiError::conflict("Folder already exists."),
                    e => {
                        tracing::error!(
                            "Failed to rename folder {} to {}: {}",
                            folder.name,
                            new_name,
                            e
                        );
                        ApiError::internal("Error renaming folder.")
                    }
                })?;
        } else if state
            .folder_storage
            .folder_path(&new_name)
            .map(|p| p.exists())
            .unwrap_or(false)
        {
            return Err(ApiError::conflict("Folder already exists."));
        }
    }

    let renamed = repo
        .rename(id, &new_name)
        .await
        .map_err(|e| {
            tracing::error!("Failed to rename folder record {}: {}", id, e);
            ApiError::internal("Failed to rename folder record")
        })?
        .ok_or_else(|| ApiError::not_found("Folder not found."))?;

    tracing::info!(id, from = %folder.name, to = %new_name, "Folder renamed");

    Ok(Json(renamed.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition_header("photo.jpg"),
            "attachment; filename=\"photo.jpg\""
        );
    }

    #[test]
    fn test_content_disposition_quotes_and_control_chars() {
        let header = content_disposition_header("evil\"\r\nname.png");
        assert!(!header.contains('\r'));
        assert!(!header.contains('\n'));
        assert!(header.starts_with("attachment; filename=\"evil_name.png\""));
        assert!(header.contains("filename*=UTF-8''evil%22%0D%0Aname.png"));
    }

    #[test]
    fn test_content_disposition_unicode() {
        let header = content_disposition_header("写真.png");
        assert!(header.contains("filename=\"写真.png\""));
        assert!(header.contains("filename*=UTF-8''%E5%86%99%E7%9C%9F.png"));
    }
}
