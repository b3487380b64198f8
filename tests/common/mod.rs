//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a repository-root fixture and a scriptable stand-in
//! for `buf` so tests can drive a whole run without any external tooling.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = RootFixture::new().with_two_repos().with_config(&[]);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::protos;
    pub use super::RootFixture;
}

/// `.proto` sources used across tests.
#[allow(dead_code)]
pub mod protos {
    /// Entry service in `repoA/api`, importing across repositories.
    pub const SERVICE: &str = r#"syntax = "proto3";

package repoA.api;

import "repoB/types.proto";
import public "repoA/common/common.proto";
import "google/protobuf/empty.proto";

service Svc {
  rpc Ping(google.protobuf.Empty) returns (repoB.Types);
}
"#;

    /// Shared messages in the entry's own repository.
    pub const COMMON: &str = r#"syntax = "proto3";

package repoA.api;

import "repoB/types.proto";

message Req {}
"#;

    /// Leaf in a second repository.
    pub const TYPES: &str = r#"syntax = "proto3";

package repoB;

message Types {}
"#;

    /// A file outside every repository, never staged.
    pub const UNRELATED: &str = "syntax = \"proto3\";\n";
}

/// Fake `buf` that fails unless run inside a staged workspace, then emits
/// generated Go code plus output that must not be collected.
#[allow(dead_code)]
pub const FAKE_BUF_OK: &str = r#"#!/bin/sh
test "$1" = generate || exit 2
test -f buf.gen.yaml || exit 3
test -f work/repoA/api/svc.proto || exit 4
mkdir -p generated/repoA/api generated/repoB
echo 'package api' > generated/repoA/api/svc.pb.go
echo 'package api' > generated/repoA/api/svc_vtproto.pb.go
echo 'package repoB' > generated/repoB/types.pb.go
echo 'not go' > generated/repoA/api/svc.swagger.json
"#;

/// Fake `buf` that fails with a diagnostic.
#[allow(dead_code)]
pub const FAKE_BUF_FAIL: &str = r#"#!/bin/sh
echo "svc.proto:3:1: boom" >&2
exit 1
"#;

/// A temporary repository root.
///
/// The root holds one directory per repository plus `bufme.conf`; a second
/// temporary directory holds tool scripts so they never look like a
/// repository.
pub struct RootFixture {
    root: assert_fs::TempDir,
    tools: assert_fs::TempDir,
}

#[allow(dead_code)]
impl RootFixture {
    /// Create an empty root.
    pub fn new() -> Self {
        Self {
            root: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            tools: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add `repoA` (entry plus a same-repo import) and `repoB` (a leaf).
    pub fn with_two_repos(self) -> Self {
        self.with_file("repoA/api/svc.proto", protos::SERVICE)
            .with_file("repoA/common/common.proto", protos::COMMON)
            .with_file("repoB/types.proto", protos::TYPES)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.root
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Write `bufme.conf` at the root with `"Root": "."`, the given pools, and
    /// the fixture's fake `buf`.
    pub fn with_config(self, pools: &[&str]) -> Self {
        let json = self.config_json(".", pools);
        self.root
            .child("bufme.conf")
            .write_str(&json)
            .expect("Failed to write config file");
        self
    }

    /// Install a fake `buf` script.
    pub fn with_buf(self, script: &str) -> Self {
        let buf = self.tools.child("buf");
        buf.write_str(script).expect("Failed to write buf script");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(buf.path(), std::fs::Permissions::from_mode(0o755))
                .expect("Failed to make buf executable");
        }
        self
    }

    /// Render a config document pointing at `root`.
    pub fn config_json(&self, root: &str, pools: &[&str]) -> String {
        let pools = pools
            .iter()
            .map(|p| format!("\"{}\"", p))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r#"{{"Root": "{}", "VTProtoOpts": {{"Pools": [{}]}}, "Buf": "{}"}}"#,
            root,
            pools,
            self.buf_path().display()
        )
    }

    /// The root, canonicalized the way `bufme` resolves it.
    pub fn root(&self) -> PathBuf {
        self.root
            .path()
            .canonicalize()
            .expect("Failed to canonicalize root")
    }

    /// A path under the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// The entry directory used by most tests.
    pub fn entry_dir(&self) -> PathBuf {
        self.path("repoA/api")
    }

    /// Path of `bufme.conf` at the root.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("bufme.conf")
    }

    /// Path of the fake `buf` script.
    pub fn buf_path(&self) -> PathBuf {
        self.tools.path().join("buf")
    }

    /// Directory for scratch files that are outside the root.
    pub fn tools_dir(&self) -> &Path {
        self.tools.path()
    }
}

impl Default for RootFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the workspace path out of a `tmp dir:  <path>` line.
#[allow(dead_code)]
pub fn tmp_dir_from(output: &str) -> Option<PathBuf> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("tmp dir:"))
        .map(|rest| PathBuf::from(rest.trim()))
}
