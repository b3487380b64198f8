//! Phase 1: Dependency Walk
//!
//! Starting from the entry file, every cross-repository import is followed
//! and each reachable file is copied into the overlay under `work/`, at its
//! root-relative path.
//!
//! ## Process
//!
//! 1.  **Claim**: Before a file is scheduled it is claimed in the visited set.
//!     The claim is a single test-and-set under one lock, so two tasks that
//!     discover the same import race for it and exactly one wins. Diamonds
//!     are fetched once and cycles terminate.
//!
//! 2.  **Stage**: The claimed file is read from disk, its imports are
//!     extracted, and its content is written into the overlay.
//!
//! 3.  **Fan out**: Every newly claimed import is spawned as its own task on a
//!     `rayon::scope`. The scope is the join barrier: `walk` does not return
//!     until every spawned task has finished, including tasks still draining
//!     after a failure.
//!
//! The first failure (unreadable file, malformed import) sets the shared
//! cancellation flag and is recorded in a single-assignment cell. Later
//! failures are dropped. Reads already in flight are not interrupted, but no
//! new task starts once the flag is set.
//!
//! Discovery order is not deterministic; only the staged set is.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use log::{debug, info};

use super::{STAGED_PERMISSIONS, WORK_DIR};
use crate::error::{Error, Result};
use crate::filesystem::MemoryFS;
use crate::imports;
use crate::repos::RepoSet;

/// Reads source files for the walk - allows mocking in tests
pub trait SourceReader: Send + Sync {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Reads from the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSourceReader;

impl SourceReader for DefaultSourceReader {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// Executes Phase 1 of the pipeline.
///
/// Returns an overlay holding every file reachable from `entry`, or the first
/// error hit while walking.
pub fn execute(root: &Path, repos: &RepoSet, entry: &str) -> Result<MemoryFS> {
    Walker::new(root, repos).walk(entry)
}

/// Concurrent import-graph walker. One instance performs one walk.
pub struct Walker<'a> {
    root: &'a Path,
    repos: &'a RepoSet,
    reader: &'a dyn SourceReader,
    visited: Mutex<HashSet<String>>,
    overlay: Mutex<MemoryFS>,
    first_error: OnceLock<Error>,
    cancelled: Arc<AtomicBool>,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Path, repos: &'a RepoSet) -> Self {
        Self {
            root,
            repos,
            reader: &DefaultSourceReader,
            visited: Mutex::new(HashSet::new()),
            overlay: Mutex::new(MemoryFS::new()),
            first_error: OnceLock::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read sources through `reader` instead of the real filesystem.
    pub fn with_reader(mut self, reader: &'a dyn SourceReader) -> Self {
        self.reader = reader;
        self
    }

    /// Share a cancellation flag with the caller.
    ///
    /// Setting the flag stops new tasks from starting; the walk then reports
    /// `Error::Cancelled` unless a real failure was recorded first.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    /// Walk the import graph from `entry` (a root-relative path).
    pub fn walk(self, entry: &str) -> Result<MemoryFS> {
        if !self.is_cancelled() && self.claim(entry)? {
            rayon::scope(|s| self.visit(s, entry.to_string()));
        }

        let Walker {
            visited,
            overlay,
            first_error,
            cancelled,
            ..
        } = self;

        if let Some(err) = first_error.into_inner() {
            return Err(err);
        }
        if cancelled.load(Ordering::SeqCst) {
            return Err(Error::Cancelled);
        }

        let overlay = overlay.into_inner().map_err(|_| Error::LockPoisoned {
            context: "walk overlay".to_string(),
        })?;
        info!(
            "Staged {} file(s) from {} visited import(s)",
            overlay.len(),
            visited.into_inner().map(|v| v.len()).unwrap_or_default()
        );
        Ok(overlay)
    }

    fn visit<'s>(&'s self, scope: &rayon::Scope<'s>, import: String) {
        if self.is_cancelled() {
            return;
        }

        let children = match self.stage(&import) {
            Ok(children) => children,
            Err(err) => return self.fail(err),
        };

        for child in children {
            if self.is_cancelled() {
                break;
            }
            match self.claim(&child) {
                Ok(true) => scope.spawn(move |s| self.visit(s, child)),
                Ok(false) => {}
                Err(err) => return self.fail(err),
            }
        }
    }

    /// Read one file, copy it into the overlay and return its imports.
    fn stage(&self, import: &str) -> Result<Vec<String>> {
        let source = self.root.join(import);
        let content = self
            .reader
            .read(&source)
            .map_err(|e| Error::SourceRead {
                path: source.clone(),
                source: e,
            })?;
        debug!("Staging {}", import);

        let imports = imports::extract(import, &content, self.repos)?;

        let target: PathBuf = Path::new(WORK_DIR).join(import);
        self.overlay
            .lock()
            .map_err(|_| Error::LockPoisoned {
                context: "walk overlay".to_string(),
            })?
            .write_file(target, content, STAGED_PERMISSIONS)?;

        Ok(imports)
    }

    /// Test-and-set: returns true only for the first caller claiming `import`.
    fn claim(&self, import: &str) -> Result<bool> {
        let mut visited = self.visited.lock().map_err(|_| Error::LockPoisoned {
            context: "visited set".to_string(),
        })?;
        Ok(visited.insert(import.to_string()))
    }

    fn fail(&self, err: Error) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Err(dropped) = self.first_error.set(err) {
            debug!("Dropping later walk error: {}", dropped);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
