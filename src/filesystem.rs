//! In-memory overlay filesystem used to stage a workspace before it is written to disk

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

/// Permission bits given to files staged without an explicit mode
pub const DEFAULT_PERMISSIONS: u32 = 0o600;

/// Represents a file with content and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// File content as bytes
    pub content: Vec<u8>,
    /// File permissions (simplified as u32)
    pub permissions: u32,
}

impl File {
    /// Create a new file with content
    pub fn new(content: Vec<u8>) -> Self {
        Self::with_permissions(content, DEFAULT_PERMISSIONS)
    }

    /// Create a new file with content and an explicit mode
    pub fn with_permissions(content: Vec<u8>, permissions: u32) -> Self {
        Self {
            content,
            permissions,
        }
    }

    /// Create a new file from string content
    pub fn from_string(content: &str) -> Self {
        Self::new(content.as_bytes().to_vec())
    }

    /// Get file size in bytes
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// A direct child of a directory in the overlay
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// In-memory filesystem keyed by workspace-relative path.
///
/// Paths are kept in sorted order so that listing and materializing are
/// deterministic. Directories are implicit: a directory exists when some
/// file lives below it.
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    files: BTreeMap<PathBuf, File>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a file
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, file: File) -> Result<()> {
        let path = normalize(path.as_ref())?;
        self.files.insert(path, file);
        Ok(())
    }

    /// Write `content` at `path` with the given permission bits
    pub fn write_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        content: Vec<u8>,
        permissions: u32,
    ) -> Result<()> {
        self.add_file(path, File::with_permissions(content, permissions))
    }

    /// Add a file with string content
    pub fn add_file_string<P: AsRef<Path>>(&mut self, path: P, content: &str) -> Result<()> {
        self.add_file(path, File::from_string(content))
    }

    /// Get a file by path
    pub fn get_file<P: AsRef<Path>>(&self, path: P) -> Option<&File> {
        self.files.get(path.as_ref())
    }

    /// Read a previously written file's content
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<&[u8]> {
        let path = path.as_ref();
        self.files
            .get(path)
            .map(|f| f.content.as_slice())
            .ok_or_else(|| Error::Filesystem {
                message: format!("File not found: {}", path.display()),
            })
    }

    /// Check if a file exists
    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// List the direct children of `dir`, files and subdirectories alike.
    ///
    /// An empty path (or `.`) lists the top level. Listing a directory with
    /// nothing below it is an error.
    pub fn list_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<DirEntry>> {
        let dir = dir.as_ref();
        let dir = if dir == Path::new(".") { Path::new("") } else { dir };

        let mut entries = BTreeSet::new();
        for path in self.files.keys() {
            let Ok(rest) = path.strip_prefix(dir) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            entries.insert(DirEntry {
                name: first.as_os_str().to_string_lossy().into_owned(),
                is_dir: components.next().is_some(),
            });
        }

        if entries.is_empty() && !dir.as_os_str().is_empty() {
            return Err(Error::Filesystem {
                message: format!("Directory not found: {}", dir.display()),
            });
        }
        Ok(entries.into_iter().collect())
    }

    /// List all files
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all files as (path, file) pairs, in path order
    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &File)> {
        self.files.iter()
    }
}

/// Reduce `path` to a clean relative path, refusing anything that could
/// land outside the workspace once materialized.
fn normalize(path: &Path) -> Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::Filesystem {
                    message: format!("Path escapes the workspace: {}", path.display()),
                });
            }
        }
    }
    if out.as_os_str().is_empty() {
        return Err(Error::Filesystem {
            message: "Cannot write a file at the workspace root".to_string(),
        });
    }
    Ok(out)
}
