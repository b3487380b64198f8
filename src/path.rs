//! Path helpers for mapping between the real filesystem and root-relative import paths

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::{Error, Result};

/// Express `path` relative to `root` with `/` separators, the form imports use.
pub fn relative_to_root(root: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).map_err(|_| Error::Configuration {
        message: format!(
            "you are not currently in your root directory({})",
            root.display()
        ),
        hint: None,
    })?;

    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Find the single `.proto` file directly inside `dir`.
pub fn find_entry_file(dir: &Path) -> Result<PathBuf> {
    let pattern = format!("{}/*.proto", Pattern::escape(&dir.to_string_lossy()));
    let mut found = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::Io(e.into()))?;
        if path.is_file() {
            found.push(path);
        }
    }

    if found.len() != 1 {
        return Err(Error::EntryFileCount {
            dir: dir.to_path_buf(),
            found: found.len(),
        });
    }
    Ok(found.remove(0))
}
