//! Web API module for foldershare.
//!
//! Exposes the folder and image endpoints under `/api`, a `/health` check
//! and Swagger UI at `/docs`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
