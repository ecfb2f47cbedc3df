//! foldershare - share folders of images over HTTP
//!
//! Folders live as directories on disk; folder and image metadata is kept
//! in SQLite. A REST API (see [`web`]) creates, lists, serves, uploads and
//! deletes them.

pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use db::{Database, DbPool};
pub use error::{Result, ShareError};
pub use file::{FileStorage, Folder, FolderRepository, Image, ImageRepository, NewFolder, NewImage};
pub use web::{AppState, WebServer};
