//! Atomic file write helpers.
//!
//! Bytes go to a temp file in the destination directory, which is then
//! renamed over the target. Readers see either the old contents or the new
//! ones, never a torn file. Where rename-over-existing fails (Windows), the
//! old file is parked as `.bak` for the duration of the swap.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSyncPolicy {
    SyncAll,
    SkipSync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentDirSyncPolicy {
    SyncBestEffort,
    SkipSync,
}

#[derive(Debug, Clone, Copy)]
pub struct AtomicWriteOptions {
    /// File sync policy for the temp file before persisting.
    pub file_sync: FileSyncPolicy,
    /// Parent directory sync policy after the file has been persisted.
    pub parent_dir_sync: ParentDirSyncPolicy,
    /// Create missing parent directories first.
    pub create_parent: bool,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self {
        Self {
            file_sync: FileSyncPolicy::SyncAll,
            parent_dir_sync: ParentDirSyncPolicy::SyncBestEffort,
            create_parent: true,
        }
    }
}

/// Restore `path` from `path.bak` left behind by an interrupted swap.
pub fn recover_bak_file(path: &Path) {
    let backup = path.with_extension("bak");
    if !path.exists() && backup.exists() {
        match fs::rename(&backup, path) {
            Ok(()) => {
                tracing::warn!(
                    path = %path.display(),
                    "Recovered .bak file from interrupted atomic write"
                );
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    "Failed to recover .bak file: {e}"
                );
            }
        }
    }
}

pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    atomic_write_with_options(path, bytes, AtomicWriteOptions::default())
}

pub fn atomic_write_with_options(
    path: impl AsRef<Path>,
    bytes: &[u8],
    options: AtomicWriteOptions,
) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if options.create_parent {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    if matches!(options.file_sync, FileSyncPolicy::SyncAll) {
        tmp.as_file().sync_all()?;
    }

    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }
        let backup_path = path.with_extension("bak");
        let _ = fs::remove_file(&backup_path);
        fs::rename(path, &backup_path)?;

        if let Err(rename_err) = err.file.persist(path) {
            let _ = fs::rename(&backup_path, path);
            return Err(rename_err.error);
        }
        if let Err(e) = fs::remove_file(&backup_path) {
            tracing::warn!(
                path = %backup_path.display(),
                "Failed to remove .bak after atomic write: {e}"
            );
        }
    }

    if matches!(options.parent_dir_sync, ParentDirSyncPolicy::SyncBestEffort) {
        best_effort_sync_parent_dir(parent);
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Atomic write complete");
    Ok(())
}

fn best_effort_sync_parent_dir(parent: &Path) {
    // Directory handles can't be fsynced portably outside Unix.
    #[cfg(unix)]
    if let Err(e) = fs::File::open(parent).and_then(|d| d.sync_all()) {
        debug!(path = %parent.display(), "Parent directory sync_all failed (best-effort): {e}");
    }

    #[cfg(not(unix))]
    let _ = parent;
}
