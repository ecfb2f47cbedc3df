//! Image handlers for Web API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::{FileStorage, Image, ImageRepository, NewImage};
use crate::web::dto::ImageResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Multipart field names that carry files.
const FILE_FIELDS: &[&str] = &["files", "files[]", "file"];

/// One file part read from an upload request.
struct UploadedFile {
    file_name: Option<String>,
    content: Vec<u8>,
}

/// Outcome of storing one uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadOutcome {
    Stored,
    Rejected,
    Failed,
}

/// Reduce a client-supplied file name to its final path component.
///
/// Both `/` and `\` count as separators.
fn sanitize_file_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    FileStorage::validate_name(name).ok()?;
    Some(name.to_string())
}

/// Map a multipart read failure to its status; an oversized body is 413.
fn multipart_error(e: MultipartError) -> ApiError {
    let status = e.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Upload rejected: {}", e);
        return ApiError::new(status, "Request body is too large.");
    }

    tracing::error!("Failed to read multipart data: {}", e);
    ApiError::new(status, "Invalid multipart data")
}

/// Status for an upload request given the outcomes of its files.
fn upload_status(outcomes: &[UploadOutcome]) -> StatusCode {
    if outcomes.contains(&UploadOutcome::Stored) {
        StatusCode::OK
    } else if outcomes.contains(&UploadOutcome::Failed) {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Pick the oldest row whose stored path no longer holds a file.
///
/// Rows pointing at a live file belong to another folder and are kept.
fn stale_record(images: Vec<Image>) -> Option<Image> {
    images
        .into_iter()
        .find(|image| !std::path::Path::new(&image.url).exists())
}

/// GET /api/images - List all image records.
#[utoipa::path(
    get,
    path = "/api/images",
    tag = "images",
    responses(
        (status = 200, description = "All image records", body = Vec<ImageResponse>)
    )
)]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ImageResponse>>, ApiError> {
    let repo = ImageRepository::new(state.db.pool());
    let images = repo.list_all().await.map_err(|e| {
        tracing::error!("Failed to list images: {}", e);
        ApiError::internal("Failed to list images")
    })?;

    Ok(Json(images.into_iter().map(Into::into).collect()))
}

/// POST /api/images/upload/:folder - Upload one or more images into a folder.
///
/// Request body: multipart/form-data with one or more `files` parts.
#[utoipa::path(
    post,
    path = "/api/images/upload/{folder}",
    tag = "images",
    params(
        ("folder" = String, Path, description = "Target folder name")
    ),
    request_body(content = String, content_type = "multipart/form-data", description = "One or more `files` parts"),
    responses(
        (status = 200, description = "At least one file stored; per-file outcome, one line each", body = String, content_type = "text/plain"),
        (status = 400, description = "No files provided, or every file was rejected"),
        (status = 413, description = "Request body exceeds the configured limit"),
        (status = 500, description = "No file could be stored")
    )
)]
pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, String), ApiError> {
    FileStorage::validate_name(&folder)
        .map_err(|_| ApiError::bad_request(format!("Invalid folder name: {folder}")))?;

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let field_name = field.name().unwrap_or("").to_string();
        if !FILE_FIELDS.contains(&field_name.as_str()) {
            continue;
        }

        let file_name = field.file_name().map(|s| s.to_string());
        let content = field
            .bytes()
            .await
            .map_err(multipart_error)?
            .to_vec();
        files.push(UploadedFile { file_name, content });
    }

    if files.is_empty() {
        return Err(ApiError::bad_request("No files provided."));
    }

    state.upload_storage.ensure_folder(&folder).map_err(|e| {
        tracing::error!("Failed to create upload folder {}: {}", folder, e);
        ApiError::internal("Failed to create folder")
    })?;

    let repo = ImageRepository::new(state.db.pool());
    let mut summary = String::new();
    let mut outcomes = Vec::with_capacity(files.len());

    for file in files {
        let Some(name) = file.file_name.as_deref().and_then(sanitize_file_name) else {
            summary.push_str("File has no valid name.\n");
            outcomes.push(UploadOutcome::Rejected);
            continue;
        };

        if file.content.is_empty() {
            summary.push_str(&format!("File {name} is empty.\n"));
            outcomes.push(UploadOutcome::Rejected);
            continue;
        }
        if file.content.len() as u64 > state.max_upload_size {
            summary.push_str(&format!("File {name} is too large.\n"));
            outcomes.push(UploadOutcome::Rejected);
            continue;
        }

        let path = match state.upload_storage.write_file(&folder, &name, &file.content) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!("Failed to write {}/{}: {}", folder, name, e);
                summary.push_str(&format!("Failed to upload file {name}: {e}\n"));
                outcomes.push(UploadOutcome::Failed);
                continue;
            }
        };

        let url = path.to_string_lossy().into_owned();
        match repo.create(&NewImage::new(name.as_str(), url)).await {
            Ok(image) => {
                tracing::info!(folder = %folder, file = %name, id = image.id, "Image uploaded");
                summary.push_str(&format!("File {name} uploaded successfully.\n"));
                outcomes.push(UploadOutcome::Stored);
            }
            Err(e) => {
                tracing::error!("Failed to record image {}/{}: {}", folder, name, e);
                summary.push_str(&format!("Failed to upload file {name}: {e}\n"));
                outcomes.push(UploadOutcome::Failed);
            }
        }
    }

    Ok((upload_status(&outcomes), summary))
}

/// GET /api/images/folder/:folder - List image records stored under a folder.
///
/// Records are matched by plain prefix of their stored path against the
/// folder's directory path.
#[utoipa::path(
    get,
    path = "/api/images/folder/{folder}",
    tag = "images",
    params(
        ("folder" = String, Path, description = "Folder name")
    ),
    responses(
        (status = 200, description = "Image records under the folder", body = Vec<ImageResponse>),
        (status = 400, description = "Folder does not exist")
    )
)]
pub async fn list_images_by_folder(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
) -> Result<Json<Vec<ImageResponse>>, ApiError> {
    if !state.upload_storage.folder_exists(&folder) {
        return Err(ApiError::bad_request("Folder does not exist."));
    }

    let folder_path = state.upload_storage.folder_path(&folder)?;
    let prefix = folder_path.to_string_lossy();

    let repo = ImageRepository::new(state.db.pool());
    let images = repo.list_by_url_prefix(&prefix).await.map_err(|e| {
        tracing::error!("Failed to list images for {}: {}", folder, e);
        ApiError::internal("Failed to list images")
    })?;

    Ok(Json(images.into_iter().map(Into::into).collect()))
}

/// DELETE /api/images/delete/:folder/:file - Delete an uploaded image.
#[utoipa::path(
    delete,
    path = "/api/images/delete/{folder}/{file}",
    tag = "images",
    params(
        ("folder" = String, Path, description = "Folder name"),
        ("file" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "File deleted", body = String, content_type = "text/plain"),
        (status = 400, description = "File does not exist"),
        (status = 500, description = "File could not be removed")
    )
)]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path((folder, file)): Path<(String, String)>,
) -> Result<(StatusCode, String), ApiError> {
    if !state.upload_storage.file_exists(&folder, &file) {
        return Err(ApiError::bad_request(format!("File {file} does not exist.")));
    }

    let path = state.upload_storage.file_path(&folder, &file)?;
    match state.upload_storage.delete_file(&folder, &file) {
        Ok(true) => {
            tracing::info!(folder = %folder, file = %file, "Image file deleted");
        }
        Ok(false) => {
            return Err(ApiError::bad_request(format!("File {file} does not exist.")));
        }
        Err(e) => {
            tracing::error!("Failed to delete {}/{}: {}", folder, file, e);
            return Err(ApiError::internal(format!("Failed to delete file {file}.")));
        }
    }

    let repo = ImageRepository::new(state.db.pool());
    let url = path.to_string_lossy();
    let record = match repo.get_by_url(&url).await {
        Ok(Some(image)) => Ok(Some(image)),
        Ok(None) => repo.list_by_name(&file).await.map(stale_record),
        Err(e) => Err(e),
    };

    let message = match record {
        Ok(Some(image)) => match repo.delete(image.id).await {
            Ok(_) => format!("File {file} deleted successfully."),
            Err(e) => {
                tracing::error!("Failed to delete image record {}: {}", image.id, e);
                format!("File {file} deleted successfully.")
            }
        },
        Ok(None) => {
            tracing::warn!(folder = %folder, file = %file, "No image record for deleted file");
            format!("File {file} deleted successfully (no metadata record found).")
        }
        Err(e) => {
            tracing::error!("Failed to look up image record for {}: {}", file, e);
            format!("File {file} deleted successfully.")
        }
    };

    Ok((StatusCode::OK, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("a.png"), Some("a.png".to_string()));
        assert_eq!(
            sanitize_file_name("C:\\Users\\me\\b.jpg"),
            Some("b.jpg".to_string())
        );
        assert_eq!(
            sanitize_file_name("../../etc/passwd"),
            Some("passwd".to_string())
        );
        assert_eq!(sanitize_file_name("dir/"), None);
        assert_eq!(sanitize_file_name(".."), None);
        assert_eq!(sanitize_file_name(""), None);
    }

    #[test]
    fn test_upload_status() {
        use UploadOutcome::*;

        assert_eq!(upload_status(&[Stored]), StatusCode::OK);
        assert_eq!(upload_status(&[Rejected, Stored, Failed]), StatusCode::OK);
        assert_eq!(upload_status(&[Rejected, Failed]), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upload_status(&[Rejected, Rejected]), StatusCode::BAD_REQUEST);
    }
}
