//! Phase 4: Running the Generator
//!
//! Runs `<buf> generate` with the workspace as its working directory. The
//! process-wide current directory is left alone.

use std::path::Path;
use std::process::Command;

use log::info;

use crate::error::{Error, Result};

/// Executes Phase 4 of the pipeline.
pub fn execute(buf: &str, workspace: &Path) -> Result<()> {
    let command = format!("{} generate", buf);
    info!("Running `{}` in {}", command, workspace.display());

    let output = Command::new(buf)
        .arg("generate")
        .current_dir(workspace)
        .output()
        .map_err(|e| Error::Generator {
            command: command.clone(),
            output: format!("could not start {}: {}", buf, e),
        })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(Error::Generator {
            command,
            output: combined,
        });
    }
    Ok(())
}
