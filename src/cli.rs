//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// bufme - stage cross-repository protos and run buf generate
#[derive(Parser, Debug)]
#[command(name = "bufme")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to `generate`)
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: commands::generate::GenerateArgs,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate code for the .proto file in the current directory
    Generate(commands::generate::GenerateArgs),
    /// Build the workspace only and print its path
    Stage(commands::stage::StageArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Some(Commands::Generate(args)) => commands::generate::execute(args),
            Some(Commands::Stage(args)) => commands::stage::execute(args),
            None => commands::generate::execute(self.generate),
        }
    }

    /// `RUST_LOG` wins over `--log-level` when set.
    fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(self.log_level.as_str());
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .try_init();
    }
}
