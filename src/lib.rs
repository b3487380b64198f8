//! # bufme
//!
//! `bufme` generates Go code for a `.proto` file whose imports are spread over
//! many sibling repositories. It stages exactly the files the entry file
//! needs into a private workspace, runs `buf generate` there, and copies the
//! generated code back next to the sources.
//!
//! ## Quick Example
//!
//! ```
//! use bufme::filesystem::MemoryFS;
//! use bufme::imports;
//! use bufme::repos::RepoSet;
//!
//! let repos = RepoSet::from_names(["repoA", "repoB"]);
//! let content = b"import \"repoB/types.proto\";\nimport \"google/protobuf/empty.proto\";\n";
//! let found = imports::extract("repoA/svc.proto", content, &repos).unwrap();
//! assert_eq!(found, vec!["repoB/types.proto"]);
//!
//! let mut fs = MemoryFS::new();
//! fs.add_file_string("work/repoB/types.proto", "syntax = \"proto3\";").unwrap();
//! assert!(fs.exists("work/repoB/types.proto"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: `bufme.conf` names the root directory that
//!   holds every repository, plus plugin options.
//! - **Repositories (`repos`)**: the root's subdirectories; an import is
//!   followed only if it starts with one of their names.
//! - **Imports (`imports`)**: single-line `import "...";` statements.
//! - **Overlay (`filesystem`)**: an in-memory tree that mirrors the workspace
//!   before it is written to disk.
//! - **Phases (`phases`)**: walk, manifest, materialize, generate, collect.
//!
//! ## Execution Flow
//!
//! 1.  **Walk**: Concurrently follow imports from the entry file and copy every
//!     reachable file into the overlay under `work/`.
//! 2.  **Manifest**: Add `buf.work.yaml`, `buf.gen.yaml` and `buf.yaml`.
//! 3.  **Materialize**: Write the overlay into a fresh `bufme-*` temp dir.
//! 4.  **Generate**: Run `buf generate` in that directory.
//! 5.  **Collect**: Copy `generated/**/*pb.go` back under the root.

pub mod config;
pub mod error;
pub mod filesystem;
pub mod imports;
pub mod path;
pub mod phases;
pub mod repos;
pub mod template;

#[cfg(test)]
mod imports_proptest;
