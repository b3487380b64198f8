//! Repository names under the configured root
//!
//! The immediate subdirectories of the root are the repositories. Their names
//! act as a whitelist: an import is a cross-repository dependency only when
//! its path starts with one of them. Anything else (e.g. `google/protobuf/...`)
//! is assumed to be provided by the generator's toolchain.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// The set of repository names found under a root directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSet {
    names: Vec<String>,
}

impl RepoSet {
    /// Enumerate the immediate subdirectories of `root`.
    pub fn discover(root: &Path) -> Result<Self> {
        let entries = fs::read_dir(root).map_err(|e| Error::Configuration {
            message: format!("cannot list repositories under {}: {}", root.display(), e),
            hint: None,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(Self::from_names(names))
    }

    /// Build a set from already known names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Whether `import` belongs to one of the repositories.
    ///
    /// This is a plain prefix test: a repository named `foo` also claims
    /// imports under `foobar/`.
    pub fn matches(&self, import: &str) -> bool {
        self.names.iter().any(|name| import.starts_with(name.as_str()))
    }

    /// Repository names in sorted order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of repositories
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the root holds no repositories
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
