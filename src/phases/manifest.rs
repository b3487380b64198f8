//! Phase 2: Manifest Rendering
//!
//! Writes the three files `buf` needs at the top of the workspace:
//!
//! - `buf.work.yaml` declares `work/` as the only module directory.
//! - `buf.gen.yaml` lists the `go`, `grpc` and `vtproto` plugins. The
//!   vtproto plugin receives one `pool=` option per configured pool, in
//!   configuration order.
//! - `buf.yaml` is the minimal module descriptor.
//!
//! Rendering depends only on the configuration, so the same configuration
//! always yields byte-identical manifests.

use std::collections::HashMap;

use log::{debug, info};

use super::{
    BUF_GEN_FILE, BUF_WORK_FILE, BUF_YAML_FILE, GEN_DIR, STAGED_PERMISSIONS, WORK_DIR,
};
use crate::config::VtProtoOpts;
use crate::error::{Error, Result};
use crate::filesystem::MemoryFS;
use crate::template;

const BUF_WORK_TEMPLATE: &str = "\
version: v1
directories:
  - ${WORK_DIR}";

const BUF_GEN_TEMPLATE: &str = "\
version: v1
plugins:
  - name: go
    out: ./${GEN_DIR}/
    opt: paths=source_relative
  - plugin: buf.build/grpc/go:v1.3.0
    out: ./
    opt:
      - paths=source_relative
  - plugin: go-vtproto
    out: ./
    opt:
      - paths=source_relative${POOL_OPTIONS}
";

const BUF_YAML_TEMPLATE: &str = "version: v1";

/// Indentation of an entry in the vtproto `opt:` list
const OPT_INDENT: &str = "      ";

/// The rendered manifest documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifests {
    pub buf_work: String,
    pub buf_gen: String,
    pub buf_yaml: String,
}

impl Manifests {
    /// (workspace path, content) for each document
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (BUF_WORK_FILE, self.buf_work.as_str()),
            (BUF_GEN_FILE, self.buf_gen.as_str()),
            (BUF_YAML_FILE, self.buf_yaml.as_str()),
        ]
    }
}

/// Executes Phase 2 of the pipeline.
///
/// Renders the manifests into `overlay` and returns the repositories that
/// were staged under `work/`.
pub fn execute(overlay: &mut MemoryFS, opts: &VtProtoOpts) -> Result<Vec<String>> {
    let staged: Vec<String> = overlay
        .list_dir(WORK_DIR)?
        .into_iter()
        .filter(|entry| entry.is_dir)
        .map(|entry| entry.name)
        .collect();
    debug!("Staged repositories: {}", staged.join(", "));

    let manifests = render(opts)?;
    for (path, content) in manifests.entries() {
        overlay.write_file(path, content.as_bytes().to_vec(), STAGED_PERMISSIONS)?;
    }
    info!(
        "Rendered {}, {} and {} ({} pool option(s))",
        BUF_WORK_FILE,
        BUF_GEN_FILE,
        BUF_YAML_FILE,
        opts.pools.len()
    );

    Ok(staged)
}

/// Render all manifests for the given plugin options.
pub fn render(opts: &VtProtoOpts) -> Result<Manifests> {
    let mut vars = HashMap::new();
    vars.insert("WORK_DIR".to_string(), WORK_DIR.to_string());
    vars.insert("GEN_DIR".to_string(), GEN_DIR.to_string());
    vars.insert("POOL_OPTIONS".to_string(), pool_options(&opts.pools)?);

    Ok(Manifests {
        buf_work: template::render(BUF_WORK_TEMPLATE, &vars)?,
        buf_gen: template::render(BUF_GEN_TEMPLATE, &vars)?,
        buf_yaml: template::render(BUF_YAML_TEMPLATE, &vars)?,
    })
}

/// One `- pool=<name>` line per pool, each preceded by a newline.
fn pool_options(pools: &[String]) -> Result<String> {
    let mut out = String::new();
    for pool in pools {
        if pool.is_empty() || pool.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::Template {
                message: format!("invalid pool name {:?}", pool),
                variable: Some("VTProtoOpts.Pools".to_string()),
            });
        }
        out.push('\n');
        out.push_str(OPT_INDENT);
        out.push_str("- pool=");
        out.push_str(pool);
    }
    Ok(out)
}
