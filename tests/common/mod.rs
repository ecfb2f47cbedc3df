//! Shared helpers for the Web API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use tempfile::TempDir;

use foldershare::file::FileStorage;
use foldershare::web::create_router;
use foldershare::web::handlers::AppState;
use foldershare::Database;

/// Request body limit used by the test router.
pub const TEST_MAX_REQUEST_SIZE: usize = 8 * 1024 * 1024;

/// A test server backed by an in-memory database and temporary directories.
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<Database>,
    pub folders: FileStorage,
    pub uploads: FileStorage,
    _temp_dir: TempDir,
}

/// Create a test app with the default upload limit.
pub async fn create_test_app() -> TestApp {
    create_test_app_with_limit(AppState::DEFAULT_MAX_UPLOAD_SIZE).await
}

/// Create a test app with a custom per-file upload limit.
pub async fn create_test_app_with_limit(max_upload_size: u64) -> TestApp {
    create_test_app_with_limits(max_upload_size, TEST_MAX_REQUEST_SIZE).await
}

/// Create a test app with custom per-file and whole-request limits.
pub async fn create_test_app_with_limits(max_upload_size: u64, max_request_size: usize) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let folders =
        FileStorage::new(temp_dir.path().join("folders")).expect("Failed to create folder storage");
    let uploads =
        FileStorage::new(temp_dir.path().join("uploads")).expect("Failed to create upload storage");

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let shared_db = Arc::new(db);

    let app_state = Arc::new(
        AppState::new(shared_db.clone(), folders.clone(), uploads.clone())
            .with_max_upload_size(max_upload_size),
    );
    let router = create_router(app_state, &[], max_request_size);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        db: shared_db,
        folders,
        uploads,
        _temp_dir: temp_dir,
    }
}

/// Build a multipart form with one `files` part per (name, content) pair.
pub fn files_form(files: &[(&str, &str)]) -> MultipartForm {
    files
        .iter()
        .fold(MultipartForm::new(), |form, (name, content)| {
            form.add_part("files", file_part(name, content.as_bytes()))
        })
}

/// Build a file part with a guessed content type.
pub fn file_part(name: &str, content: &[u8]) -> Part {
    let mime = mime_guess::from_path(name).first_or_octet_stream();
    Part::bytes(content.to_vec())
        .file_name(name.to_string())
        .mime_type(mime.to_string())
}
