//! # Error Handling
//!
//! This module defines the centralized error type for `bufme`. It uses the
//! `thiserror` library to build a single `Error` enum covering every failure
//! mode of a run, from locating the configuration file to copying generated
//! code back into the repositories.
//!
//! Every error is terminal for the run: there is no partial-success mode, and
//! a workspace produced by a failed run must be treated as unusable. Variants
//! carry the offending path (or file, or variable) so a failure can be
//! diagnosed without re-running with extra logging.
//!
//! The `Result` type alias is used to return `Result<T, Error>` from library
//! functions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for bufme operations
#[derive(Error, Debug)]
pub enum Error {
    /// The `bufme.conf` file is missing, malformed, or names an invalid root.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Configuration {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The working directory does not hold exactly one entry `.proto` file.
    #[error("Expected exactly 1 .proto file in {}, found {found}", dir.display())]
    EntryFileCount { dir: PathBuf, found: usize },

    /// An import statement could not be parsed.
    #[error("Import parse error in {file}: {message}")]
    ImportParse { file: String, message: String },

    /// A source file reached during the dependency walk could not be read.
    #[error("cannot open .proto file({}): {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest template could not be rendered.
    ///
    /// May include the name of the problematic variable when applicable.
    #[error("Template processing error: {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Template {
        message: String,
        /// The template variable that caused the error, if applicable
        variable: Option<String>,
    },

    /// An error occurred with an in-memory filesystem operation.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// The workspace could not be allocated or populated on disk.
    #[error("Materialize error: {message}")]
    Materialize { message: String },

    /// The external generator failed to start or exited unsuccessfully.
    #[error("problem running `{command}`:\n{output}")]
    Generator { command: String, output: String },

    /// Generated output could not be copied back under the repository root.
    #[error("Failed to copy generated file {}: {message}", path.display())]
    Collect { path: PathBuf, message: String },

    /// The walk was cancelled by its caller before it could finish.
    #[error("Dependency walk cancelled")]
    Cancelled,

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// An error indicating that a mutex or other lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
