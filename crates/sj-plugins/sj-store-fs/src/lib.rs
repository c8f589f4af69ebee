//! # sj-store-fs
//! swear-jar/crates/sj-plugins/sj-store-fs/src/lib.rs
//! Local filesystem implementation of `ListStore` and `EvaluationLog`.
//! Features: atomic snapshot replace via rename, serialized appends, no caching.

mod lists;
mod log_file;

pub use lists::FsListStore;
pub use log_file::FsEvaluationLog;

use sj_core::AppError;
use std::io;
use std::path::Path;

/// File name of the list snapshot inside the data directory.
pub const LISTS_FILE: &str = "lists.json";
/// File name of the evaluation log inside the data directory.
pub const LOG_FILE: &str = "evaluations.log";

/// Builds both stores rooted at `data_dir` (e.g., "./data").
pub fn open(data_dir: &Path) -> (FsListStore, FsEvaluationLog) {
    (
        FsListStore::new(data_dir.join(LISTS_FILE)),
        FsEvaluationLog::new(data_dir.join(LOG_FILE)),
    )
}

fn storage_error(action: &str, path: &Path, err: io::Error) -> AppError {
    AppError::StorageUnavailable(format!("{action} {}: {err}", path.display()))
}

async fn ensure_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| storage_error("creating directory", parent, e))?;
    }
    Ok(())
}
