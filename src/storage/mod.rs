//! Storage layer for ReviewIQ
//!
//! Provides the SQLite-backed key-value database used for persisted state

pub mod database;

use crate::error::{Result, ReviewIqError};
use std::path::{Path, PathBuf};

pub use database::{Database, DbPool};

/// File name of the database inside the data directory
pub const DB_FILE: &str = "history.sqlite";

/// Open the database that lives in `data_dir`
pub fn open(data_dir: &Path) -> Result<Database> {
    std::fs::create_dir_all(data_dir).map_err(|e| ReviewIqError::Io {
        source: e,
        context: format!("Failed to create data directory: {}", data_dir.display()),
    })?;
    Database::new(&db_path(data_dir))
}

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

/// Expand a leading `~/` to the home directory
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| ReviewIqError::Config("Invalid path encoding".to_string()))?;

    if let Some(stripped) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| ReviewIqError::Config("Cannot determine home directory".to_string()))?;
        Ok(home.join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}
