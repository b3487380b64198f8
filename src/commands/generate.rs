//! Generate command implementation
//!
//! Runs the whole pipeline for the `.proto` file in the working directory:
//! stage the workspace, run `buf generate`, and copy `*.pb.go` files back.

use anyhow::Result;
use clap::Args;

use bufme::phases::orchestrator;

use super::TargetArgs;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Keep the temporary workspace and print its path
    #[arg(long)]
    pub debug: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let target = args.target.resolve()?;

    let workspace = orchestrator::stage(&target.config, &target.repos, &target.entry)?;
    if args.debug {
        eprintln!("tmp dir:  {}", workspace.path().display());
    }

    let result = orchestrator::generate_in(&target.config, workspace.path());

    if args.debug {
        workspace.retain();
    } else if let Err(e) = workspace.close() {
        log::warn!("{}", e);
    }

    for path in result? {
        println!("wrote:  {}", path.display());
    }
    println!("Completed!");
    Ok(())
}
