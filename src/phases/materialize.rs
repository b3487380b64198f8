//! Phase 3: Materializing the Workspace
//!
//! Flushes the overlay into a freshly allocated temporary directory so that
//! the external generator can run against it.
//!
//! ## Process
//!
//! 1.  **Allocate**: Create a uniquely named `bufme-*` directory.
//!
//! 2.  **Copy**: For each overlay file, create its parent directories, write
//!     the content, and (on Unix) apply the stored permissions.
//!
//! The directory is owned by the returned [`Workspace`] and removed when it is
//! dropped, unless [`Workspace::retain`] is called. If any copy fails the
//! directory is removed before the error is returned, so a caller never sees a
//! partially populated workspace.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::TempDir;

use super::WORKSPACE_PREFIX;
use crate::error::{Error, Result};
use crate::filesystem::MemoryFS;

/// A materialized workspace directory
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Keep the directory on disk and return its path.
    pub fn retain(self) -> PathBuf {
        self.dir.keep()
    }

    /// Remove the directory now, reporting any failure.
    pub fn close(self) -> Result<()> {
        self.dir.close().map_err(|e| Error::Materialize {
            message: format!("Failed to remove workspace: {}", e),
        })
    }
}

/// Executes Phase 3 of the pipeline in the system temporary directory.
pub fn execute(overlay: &MemoryFS) -> Result<Workspace> {
    let dir = tempfile::Builder::new()
        .prefix(WORKSPACE_PREFIX)
        .tempdir()
        .map_err(|e| Error::Materialize {
            message: format!("Failed to create workspace directory: {}", e),
        })?;
    populate(overlay, dir)
}

/// Executes Phase 3 of the pipeline with the workspace created inside `parent`.
pub fn execute_in(overlay: &MemoryFS, parent: &Path) -> Result<Workspace> {
    let dir = tempfile::Builder::new()
        .prefix(WORKSPACE_PREFIX)
        .tempdir_in(parent)
        .map_err(|e| Error::Materialize {
            message: format!(
                "Failed to create workspace directory in '{}': {}",
                parent.display(),
                e
            ),
        })?;
    populate(overlay, dir)
}

fn populate(overlay: &MemoryFS, dir: TempDir) -> Result<Workspace> {
    // On error `dir` is dropped here, which deletes whatever was copied.
    write_files(overlay, dir.path())?;
    info!(
        "Materialized {} file(s) into {}",
        overlay.len(),
        dir.path().display()
    );
    Ok(Workspace { dir })
}

/// Write every overlay file below `output_path`.
pub fn write_files(overlay: &MemoryFS, output_path: &Path) -> Result<()> {
    for (relative_path, file) in overlay.files() {
        let full_path = output_path.join(relative_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Materialize {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }

        fs::write(&full_path, &file.content).map_err(|e| Error::Materialize {
            message: format!("Failed to write file '{}': {}", full_path.display(), e),
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(file.permissions);
            fs::set_permissions(&full_path, perms).map_err(|e| Error::Materialize {
                message: format!(
                    "Failed to set permissions on '{}': {}",
                    full_path.display(),
                    e
                ),
            })?;
        }
        debug!("Wrote {}", full_path.display());
    }

    Ok(())
}
