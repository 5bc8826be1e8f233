// src/store/archive.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Upper bound on `-N` suffixes tried for one stamp.
const MAX_STAMP_SUFFIX: u32 = 999;

/// Move `src` (bytes untouched) to the archive location built by `target_for`.
///
/// `target_for` receives the stamp to embed in the name. If the name is
/// already taken, `<stamp>-1`, `<stamp>-2`, ... are tried so an older
/// archive is never replaced. The archive directory is created on demand.
///
/// Returns `None` when `src` does not exist (nothing to protect).
pub fn archive_existing<F>(src: &Path, stamp: &str, target_for: F) -> AppResult<Option<PathBuf>>
where
    F: Fn(&str) -> PathBuf,
{
    if !src.exists() {
        return Ok(None);
    }

    let target = free_target(stamp, &target_for)?;

    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir).map_err(|e| AppError::store_write(dir, e))?;
    }

    fs::rename(src, &target).map_err(|e| AppError::store_write(&target, e))?;
    info(format!("Archived {} -> {}", src.display(), target.display()));

    Ok(Some(target))
}

fn free_target<F>(stamp: &str, target_for: &F) -> AppResult<PathBuf>
where
    F: Fn(&str) -> PathBuf,
{
    let first = target_for(stamp);
    if !first.exists() {
        return Ok(first);
    }

    (1..=MAX_STAMP_SUFFIX)
        .map(|n| target_for(&format!("{stamp}-{n}")))
        .find(|p| !p.exists())
        .ok_or_else(|| {
            AppError::store_write(
                first,
                io::Error::new(io::ErrorKind::AlreadyExists, "no free archive name"),
            )
        })
}

/// Replace `path` with `bytes` in one step.
///
/// The content goes to a temporary file in the same directory first, then
/// is renamed over `path`: a failed write never leaves a truncated file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| AppError::store_write(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| AppError::store_write(path, e))?;
    tmp.write_all(bytes)
        .map_err(|e| AppError::store_write(path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| AppError::store_write(path, e))?;
    tmp.persist(path)
        .map_err(|e| AppError::store_write(path, e.error))?;

    Ok(())
}
