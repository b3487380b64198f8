//! Phase 5: Collecting Generated Code
//!
//! Walks `generated/` in the workspace and copies every file whose name ends
//! in `pb.go` to the same relative path under the repository root, which puts
//! each generated file next to the `.proto` it came from. Other generator
//! output is left in the workspace.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use super::{GENERATED_PERMISSIONS, GEN_DIR};
use crate::error::{Error, Result};

const GENERATED_SUFFIX: &str = "pb.go";

/// Executes Phase 5 of the pipeline.
///
/// Returns the paths written under `root`, in sorted order.
pub fn execute(workspace: &Path, root: &Path) -> Result<Vec<PathBuf>> {
    let gen_dir = workspace.join(GEN_DIR);
    if !gen_dir.is_dir() {
        warn!("No {}/ directory in {}", GEN_DIR, workspace.display());
        return Ok(Vec::new());
    }

    let mut written = Vec::new();
    for entry in WalkDir::new(&gen_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Collect {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| gen_dir.clone()),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let source = entry.path();
        if !source.to_string_lossy().ends_with(GENERATED_SUFFIX) {
            continue;
        }

        let relative = source.strip_prefix(&gen_dir).map_err(|e| Error::Collect {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;
        let target = root.join(relative);
        copy_generated(source, &target)?;
        info!("wrote: {}", target.display());
        written.push(target);
    }

    Ok(written)
}

fn copy_generated(source: &Path, target: &Path) -> Result<()> {
    let collect_err = |e: std::io::Error| Error::Collect {
        path: target.to_path_buf(),
        message: e.to_string(),
    };

    let content = fs::read(source).map_err(collect_err)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(collect_err)?;
    }
    fs::write(target, content).map_err(collect_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(target, fs::Permissions::from_mode(GENERATED_PERMISSIONS))
            .map_err(collect_err)?;
    }
    Ok(())
}
