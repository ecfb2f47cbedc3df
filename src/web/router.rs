//! Router configuration for Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_folder, delete_folders, delete_image, get_folder_image, get_folder_record,
    list_folder_images, list_folder_records, list_folders, list_images, list_images_by_folder,
    rename_folder_record, upload_images, AppState,
};
use super::middleware::create_cors_layer;

/// Create the main API router.
///
/// `max_request_size` bounds the whole request body, which for uploads is
/// the sum of all file parts.
pub fn create_router(
    app_state: Arc<AppState>,
    cors_origins: &[String],
    max_request_size: usize,
) -> Router {
    let folder_routes = Router::new()
        .route(
            "/folders",
            post(create_folder).get(list_folders).delete(delete_folders),
        )
        .route("/folders/:folder/images", get(list_folder_images))
        .route("/folders/:folder/images/:name", get(get_folder_image))
        .route("/folder-records", get(list_folder_records))
        .route(
            "/folder-records/:id",
            get(get_folder_record).put(rename_folder_record),
        );

    let image_routes = Router::new()
        .route("/images", get(list_images))
        .route("/images/upload/:folder", post(upload_images))
        .route("/images/folder/:folder", get(list_images_by_folder))
        .route("/images/delete/:folder/:file", delete(delete_image));

    let api_routes = Router::new().merge(folder_routes).merge(image_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(DefaultBodyLimit::max(max_request_size)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let response = create_health_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }
}
