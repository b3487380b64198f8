//! Stage command implementation
//!
//! Builds the workspace (walk, manifests, materialize) without running the
//! generator, keeps it on disk, and prints its path. Useful for inspecting
//! exactly what `buf` would see.

use anyhow::Result;
use clap::Args;

use bufme::phases::orchestrator;

use super::TargetArgs;

/// Arguments for the stage command
#[derive(Args, Debug)]
pub struct StageArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Execute the stage command
pub fn execute(args: StageArgs) -> Result<()> {
    let target = args.target.resolve()?;
    let workspace = orchestrator::stage(&target.config, &target.repos, &target.entry)?;
    println!("{}", workspace.retain().display());
    Ok(())
}
