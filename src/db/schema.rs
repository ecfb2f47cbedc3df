//! Database schema and migrations for foldershare.
//!
//! Migrations are applied in order when the database is opened; the
//! schema_version table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: folder metadata
    r#"
CREATE TABLE folders (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,           -- not unique: the directory is the source of truth
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_folders_name ON folders(name);
"#,
    // v2: image metadata
    r#"
-- No foreign key to folders: membership is derived from the url prefix
CREATE TABLE images (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,                 -- original filename
    url   TEXT NOT NULL                  -- absolute path of the stored file
);

CREATE INDEX idx_images_name ON images(name);
CREATE INDEX idx_images_url ON images(url);
"#,
];
