//! Fixture discovery: turns suite configuration into concrete test cases.
//!
//! For each `(FixtureSet, OutputSet)` pair the locator enumerates the files
//! directly inside the set directory that match `*{search}*{glob}`, pairs
//! each with its expected reference file, and computes the two-entry import
//! search path. Matches are sorted by file name so execution order is
//! deterministic across platforms.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::HarnessError;
use crate::suite::{SuiteManifest, SuitePair};

/// One discovered test: an input file, the reference file it must match,
/// and the directories consulted when the compiler resolves `@import`s.
///
/// Immutable once constructed. The *last* import-path entry is also the
/// working directory handed to the compiler for source fed as ad-hoc text;
/// some legacy fixtures write `@import "file.less"` where the strict form
/// would be `@import "test-imports/file.less"`, and resolving relative to
/// the set directory keeps those compiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub input: PathBuf,
    pub expected: PathBuf,
    pub import_path: Vec<PathBuf>,
}

impl TestCase {
    /// The input file name, for progress lines.
    pub fn input_name(&self) -> String {
        file_name(&self.input)
    }

    /// The reference file name, for progress lines.
    pub fn expected_name(&self) -> String {
        file_name(&self.expected)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Enumerates all test cases for the suite, in pair order then file-name
/// order within each pair.
///
/// Fails fast when a set's input or output directory is missing; a set
/// whose pattern matches nothing contributes zero cases and is not an
/// error.
pub fn discover(
    manifest: &SuiteManifest,
    prefix: &Path,
    search: Option<&str>,
) -> Result<Vec<TestCase>, HarnessError> {
    let mut cases = Vec::new();
    for pair in &manifest.pairs {
        discover_pair(pair, prefix, search, &mut cases)?;
    }
    Ok(cases)
}

fn discover_pair(
    pair: &SuitePair,
    prefix: &Path,
    search: Option<&str>,
    cases: &mut Vec<TestCase>,
) -> Result<(), HarnessError> {
    let set_dir = prefix.join(&pair.input.dir);
    let out_dir = prefix.join(&pair.output.dir);
    if !set_dir.is_dir() {
        return Err(HarnessError::MissingDirectory(set_dir));
    }
    if !out_dir.is_dir() {
        return Err(HarnessError::MissingDirectory(out_dir));
    }

    let suffix = pair.input.suffix();
    let mut matches = Vec::new();
    for entry in WalkDir::new(&set_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| HarnessError::Scan {
            path: set_dir.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(suffix) {
            continue;
        }
        if let Some(s) = search {
            if !name.contains(s) {
                continue;
            }
        }
        matches.push(entry.path().to_path_buf());
    }
    matches.sort();

    for input in matches {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        cases.push(TestCase {
            expected: out_dir.join(pair.output.output_name(&stem)),
            import_path: vec![pair.input.import_root(&set_dir), set_dir.clone()],
            input,
        });
    }
    Ok(())
}
