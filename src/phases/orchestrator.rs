//! # Pipeline Orchestrator
//!
//! Runs the phases of a `bufme` run in order. Every phase error is terminal.
//!
//! A run is split in two: [`stage`] hands back the materialized
//! [`Workspace`], and [`generate_in`] runs the generator inside it. The
//! caller owns the workspace in between and decides whether it is kept or
//! removed, whatever the outcome of the generator. If staging fails no
//! workspace is handed back and nothing under the root has been written.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::materialize::Workspace;
use super::{collect, generate, manifest, materialize, walk};
use crate::config::Config;
use crate::error::Result;
use crate::path;
use crate::repos::RepoSet;

/// Resolve the entry import for the single `.proto` file in `dir`.
pub fn entry_from_dir(root: &Path, dir: &Path) -> Result<String> {
    let dir = fs::canonicalize(dir)?;
    // Check the directory first so a run outside the root fails on that,
    // not on the .proto count.
    path::relative_to_root(root, &dir)?;
    let entry = path::find_entry_file(&dir)?;
    path::relative_to_root(root, &entry)
}

/// Phases 1-3: build a ready-to-run workspace for `entry`.
pub fn stage(config: &Config, repos: &RepoSet, entry: &str) -> Result<Workspace> {
    info!("Phase 1: walking imports from {}", entry);
    let mut overlay = walk::execute(&config.root, repos, entry)?;

    info!("Phase 2: rendering manifests");
    manifest::execute(&mut overlay, &config.vtproto_opts)?;

    info!("Phase 3: materializing workspace");
    materialize::execute(&overlay)
}

/// Phases 4-5 against an already materialized workspace.
pub fn generate_in(config: &Config, workspace: &Path) -> Result<Vec<PathBuf>> {
    info!("Phase 4: running {} generate", config.buf);
    generate::execute(&config.buf, workspace)?;

    info!("Phase 5: collecting generated code");
    collect::execute(workspace, &config.root)
}
