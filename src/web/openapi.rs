//! OpenAPI documentation and Swagger UI integration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{CreateFolderRequest, FolderRecordResponse, ImageResponse, RenameFolderRequest};
use super::handlers;

/// OpenAPI documentation for foldershare.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "foldershare API",
        version = "0.1.0",
        description = "Share folders of images over HTTP",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    paths(
        handlers::create_folder,
        handlers::list_folders,
        handlers::list_folder_images,
        handlers::get_folder_image,
        handlers::delete_folders,
        handlers::list_folder_records,
        handlers::get_folder_record,
        handlers::rename_folder_record,
        handlers::list_images,
        handlers::upload_images,
        handlers::list_images_by_folder,
        handlers::delete_image,
    ),
    components(
        schemas(
            CreateFolderRequest,
            RenameFolderRequest,
            FolderRecordResponse,
            ImageResponse,
        )
    ),
    tags(
        (name = "folders", description = "Folder management endpoints"),
        (name = "images", description = "Image upload and metadata endpoints"),
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router serving `/docs` and `/api-docs/openapi.json`.
pub fn create_swagger_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_endpoints() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/folders"));
        assert!(paths.contains_key("/api/folders/{folder}/images/{name}"));
        assert!(paths.contains_key("/api/images/upload/{folder}"));
        assert!(paths.contains_key("/api/images/delete/{folder}/{file}"));
        assert!(paths.contains_key("/api/folder-records/{id}"));
    }
}
