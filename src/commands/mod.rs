//! # CLI Command Implementations
//!
//! Each subcommand lives in its own file with:
//! - An `Args` struct derived with `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `bufme` library.
//!
//! Both commands start the same way, by resolving a [`Target`]: the config,
//! the repositories under its root, and the entry `.proto` file.

pub mod generate;
pub mod stage;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use bufme::config::{self, Config};
use bufme::phases::orchestrator;
use bufme::repos::RepoSet;

/// Arguments shared by every command
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Path to bufme.conf (searched upwards from the working directory by default)
    #[arg(short, long, value_name = "PATH", env = "BUFME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the entry .proto file (defaults to current directory)
    #[arg(short = 'C', long, value_name = "PATH")]
    pub dir: Option<PathBuf>,
}

/// Everything a run needs before the first phase starts
pub struct Target {
    pub config: Config,
    pub repos: RepoSet,
    pub entry: String,
}

impl TargetArgs {
    pub fn resolve(&self) -> Result<Target> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let config = match &self.config {
            Some(path) => config::from_file(path)?,
            None => config::find_config(&dir)?,
        };
        let repos = RepoSet::discover(&config.root)?;
        let entry = orchestrator::entry_from_dir(&config.root, &dir)?;
        log::debug!(
            "Entry {} under {} ({} repositories)",
            entry,
            config.root.display(),
            repos.len()
        );

        Ok(Target {
            config,
            repos,
            entry,
        })
    }
}
