//! Implementation of the phases of a `bufme` run.
//!
//! ## Overview
//!
//! 1. Walk - Follow imports from the entry file and stage every reachable file
//! 2. Manifest - Render `buf.work.yaml`, `buf.gen.yaml` and `buf.yaml`
//! 3. Materialize - Flush the overlay into a fresh temporary directory
//! 4. Generate - Run `buf generate` inside that directory
//! 5. Collect - Copy generated `*.pb.go` files back next to their sources
//!
//! Phases 1-3 build the workspace and are pure with respect to the
//! repositories: nothing under the root is written until phase 5.
//!
//! ## Workspace layout
//!
//! ```text
//! bufme-XXXXXX/
//! ├── buf.work.yaml
//! ├── buf.gen.yaml
//! ├── buf.yaml
//! ├── work/<root-relative .proto paths>
//! └── generated/            (written by buf)
//! ```
//!
//! The names below are read by `buf`, so they are fixed.

pub mod collect;
pub mod generate;
pub mod manifest;
pub mod materialize;
pub mod orchestrator;
pub mod walk;

/// Staging directory holding copies of every reachable `.proto` file
pub const WORK_DIR: &str = "work";

/// Directory the `go` plugin writes into
pub const GEN_DIR: &str = "generated";

pub const BUF_WORK_FILE: &str = "buf.work.yaml";
pub const BUF_GEN_FILE: &str = "buf.gen.yaml";
pub const BUF_YAML_FILE: &str = "buf.yaml";

/// Prefix of the temporary workspace directory
pub const WORKSPACE_PREFIX: &str = "bufme-";

/// Mode of every file placed in the overlay
pub const STAGED_PERMISSIONS: u32 = 0o600;

/// Mode of generated files copied back under the root
pub const GENERATED_PERMISSIONS: u32 = 0o660;
