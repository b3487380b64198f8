//! # Configuration
//!
//! `bufme` is configured by a small JSON file named `bufme.conf`:
//!
//! ```json
//! {
//!   "Root": "/home/me/src",
//!   "VTProtoOpts": { "Pools": ["example.v1.Request"] },
//!   "Buf": "buf"
//! }
//! ```
//!
//! - **`Root`**: the directory holding every repository. The special value `.`
//!   means the directory the config file lives in (not allowed when that is
//!   the home directory).
//! - **`VTProtoOpts.Pools`**: message types that get a `pool=` option for the
//!   vtproto plugin in the generated `buf.gen.yaml`.
//! - **`Buf`**: the generator binary, `buf` by default.
//!
//! ## Discovery
//!
//! `find_config` looks for `bufme.conf` in the starting directory and each of
//! its ancestors (stopping below `/`), then falls back to the home directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = "bufme.conf";

/// Generator binary used when the config does not name one
pub const DEFAULT_BUF: &str = "buf";

/// Options forwarded to the vtproto plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VtProtoOpts {
    /// Fully qualified message names that should use object pools
    #[serde(rename = "Pools", alias = "pools", default)]
    pub pools: Vec<String>,
}

/// Parsed and validated `bufme.conf`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory that holds all the repositories
    #[serde(rename = "Root", alias = "root")]
    pub root: PathBuf,
    #[serde(rename = "VTProtoOpts", alias = "vtproto_opts", default)]
    pub vtproto_opts: VtProtoOpts,
    /// Generator binary to invoke
    #[serde(rename = "Buf", alias = "buf", default = "default_buf")]
    pub buf: String,
}

fn default_buf() -> String {
    DEFAULT_BUF.to_string()
}

impl Config {
    /// Resolve `Root` against the config location and check it exists.
    ///
    /// `config_dir` is the directory containing the config file.
    fn validate(&mut self, config_dir: &Path, home: Option<&Path>) -> Result<()> {
        if self.root == Path::new(".") {
            if home.is_some_and(|h| same_dir(h, config_dir)) {
                return Err(Error::Configuration {
                    message: "cannot use set Root == '.' if the config file is in your home directory"
                        .to_string(),
                    hint: Some("set Root to the directory holding your repositories".to_string()),
                });
            }
            self.root = config_dir.to_path_buf();
        }

        let root = fs::canonicalize(&self.root).map_err(|e| Error::Configuration {
            message: format!(
                "Root({}) does not exist in the file system: {}",
                self.root.display(),
                e
            ),
            hint: None,
        })?;
        if !root.is_dir() {
            return Err(Error::Configuration {
                message: format!("Root({}) is not a directory", self.root.display()),
                hint: None,
            });
        }
        self.root = root;
        Ok(())
    }
}

/// Parse a config document that was read from `config_path`.
pub fn parse(json: &str, config_path: &Path) -> Result<Config> {
    parse_with_home(json, config_path, dirs::home_dir().as_deref())
}

fn parse_with_home(json: &str, config_path: &Path, home: Option<&Path>) -> Result<Config> {
    let mut config: Config = serde_json::from_str(json).map_err(|e| Error::Configuration {
        message: format!("{}: {}", config_path.display(), e),
        hint: None,
    })?;
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    config.validate(config_dir, home)?;
    Ok(config)
}

/// Load and validate a config file.
pub fn from_file(path: &Path) -> Result<Config> {
    from_file_with_home(path, dirs::home_dir().as_deref())
}

fn from_file_with_home(path: &Path, home: Option<&Path>) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| Error::Configuration {
        message: format!("cannot read {}: {}", path.display(), e),
        hint: None,
    })?;
    let path = fs::canonicalize(path)?;
    debug!("Using config {}", path.display());
    parse_with_home(&content, &path, home)
}

/// Find the nearest `bufme.conf` at or above `start`, else in the home directory.
pub fn find_config(start: &Path) -> Result<Config> {
    find_config_with_home(start, dirs::home_dir().as_deref())
}

fn find_config_with_home(start: &Path, home: Option<&Path>) -> Result<Config> {
    for dir in start.ancestors() {
        // The filesystem root itself is never searched.
        if dir.parent().is_none() {
            break;
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return from_file_with_home(&candidate, home);
        }
    }

    if let Some(home) = home {
        let candidate = home.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return from_file_with_home(&candidate, Some(home));
        }
    }

    Err(Error::Configuration {
        message: format!("didn't find a {} anywhere", CONFIG_FILE_NAME),
        hint: Some(format!(
            "create {} in your repository root or home directory",
            CONFIG_FILE_NAME
        )),
    })
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
