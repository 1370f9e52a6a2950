//! Harness-level errors.
//!
//! These are the configuration and run-tree failures that terminate the
//! whole run. A compiler diagnostic for a single input is *not* one of
//! these; that is an expected per-case outcome and lives in
//! [`crate::compiler::CompileError`].

use std::path::PathBuf;

use thiserror::Error;

/// Fatal error for the run as a whole. The CLI prints these with a
/// `Fatal Error:` prefix and exits with code 1.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A fixture-set or output directory named by the suite is absent.
    #[error("both the input and output directories must exist: missing '{}'", .0.display())]
    MissingDirectory(PathBuf),

    /// A fixture-set directory could not be enumerated.
    #[error("failed to scan '{}': {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// An input or reference file that should exist could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A regenerated reference file could not be written.
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The suite manifest was present but malformed.
    #[error("failed to load suite manifest '{}': {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
