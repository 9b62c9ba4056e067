//! On-disk layout for task inputs and outputs
//!
//! Every task owns one upload file and one output directory. Writes here
//! surface as [`Error::Storage`]; removals are best-effort and only log.

use crate::error::{Error, Result};
use crate::types::TaskId;
use chrono::Local;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use uuid::Uuid;

/// Reduce a client-supplied file name to its final path component
///
/// Browsers on Windows may send a full path with backslashes, so both
/// separators are stripped. Returns `None` if nothing usable remains.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();

    if last.is_empty() || last == "." || last == ".." || last.contains('\0') {
        return None;
    }
    Some(last.to_string())
}

/// `<upload_dir>/<uuid>_<file_name>`
pub fn upload_path(upload_dir: &Path, file_name: &str) -> PathBuf {
    upload_dir.join(format!("{}_{}", Uuid::new_v4(), file_name))
}

/// `<output_dir>/<name_root>_<YYYYmmdd_HHMMSS>_<task-id prefix>`
///
/// The id prefix keeps two same-named uploads within one second apart.
pub fn output_dir_for(output_root: &Path, file_name: &str, task_id: TaskId) -> PathBuf {
    let name_root = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("document");

    output_root.join(format!(
        "{}_{}_{}",
        name_root,
        Local::now().format("%Y%m%d_%H%M%S"),
        task_id.short()
    ))
}

/// Write the uploaded bytes, removing any partial file on failure
pub async fn persist_upload(path: &Path, content: &[u8]) -> Result<()> {
    if let Err(e) = fs::write(path, content).await {
        remove_file_quietly(path).await;
        return Err(Error::Storage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        });
    }
    Ok(())
}

/// Create a task's output directory
pub async fn create_output_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await.map_err(|e| Error::Storage {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Make sure the upload and output roots exist
pub async fn ensure_roots(upload_dir: &Path, output_dir: &Path) -> Result<()> {
    create_output_dir(upload_dir).await?;
    create_output_dir(output_dir).await
}

/// Remove a task's upload, logging anything other than "already gone"
pub async fn remove_input_file(task_id: TaskId, path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => tracing::debug!(task_id = %task_id, path = ?path, "removed input file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(task_id = %task_id, path = ?path, error = %e, "failed to remove input file")
        }
    }
}

/// Recursively remove a task's output directory, logging anything other than "already gone"
pub async fn remove_output_dir(task_id: TaskId, path: &Path) {
    match fs::remove_dir_all(path).await {
        Ok(()) => tracing::debug!(task_id = %task_id, path = ?path, "removed output directory"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(task_id = %task_id, path = ?path, error = %e, "failed to remove output directory")
        }
    }
}

/// Remove both backing paths of a task; each removal is attempted independently
pub async fn remove_task_files(task_id: TaskId, input_file: &Path, output_dir: &Path) {
    remove_input_file(task_id, input_file).await;
    remove_output_dir(task_id, output_dir).await;
}

async fn remove_file_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path).await
        && e.kind() != ErrorKind::NotFound
    {
        tracing::warn!(path = ?path, error = %e, "failed to remove partial upload");
    }
}

/// Most recently modified file in `dir` whose extension matches `extension`
///
/// Matching is case-insensitive and only looks at the top level of `dir`.
/// A leading dot on `extension` is ignored. Ties on modification time go to
/// the lexicographically greater name so the choice is deterministic.
pub async fn find_latest_artifact(dir: &Path, extension: &str) -> std::io::Result<Option<PathBuf>> {
    let wanted = extension.trim_start_matches('.');
    let mut entries = fs::read_dir(dir).await?;
    let mut best: Option<(SystemTime, PathBuf)> = None;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(wanted));
        if !matches {
            continue;
        }

        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        let newer = match &best {
            None => true,
            Some((t, p)) => modified > *t || (modified == *t && path > *p),
        };
        if newer {
            best = Some((modified, path));
        }
    }

    Ok(best.map(|(_, path)| path))
}
