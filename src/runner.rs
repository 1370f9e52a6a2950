//! The run controller: drives the discovered cases through the compiler
//! and the reconciliation engine, strictly sequentially, and accounts for
//! the outcome.
//!
//! Failure policy, in one place: a missing reference file always aborts
//! the run regardless of flags (there is nothing to compare against); any
//! other per-case failure aborts only when diff display is on and
//! keep-going is off, matching the behavior the fixture suite has always
//! had. Per-case compiler diagnostics never crash the controller.

use std::fs;

use crate::cli::output::Reporter;
use crate::compiler::Compiler;
use crate::discovery::TestCase;
use crate::errors::HarnessError;
use crate::reconcile::{normalize, reconcile, Reconciliation};

/// Whether the run regenerates references or verifies against them.
/// Selected once at startup; never changes mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Overwrite every reference file with fresh compiler output. Only
    /// sound when the compiler is independently trusted.
    Compile,
    /// Compare compiler output against the stored references.
    Verify,
}

/// External diff display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffConfig {
    pub tool: String,
}

impl DiffConfig {
    pub const DEFAULT_TOOL: &'static str = "diff -b -B -t -u";
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            tool: Self::DEFAULT_TOOL.to_string(),
        }
    }
}

/// Immutable configuration for one suite run, assembled once by the CLI.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: Mode,
    pub search: Option<String>,
    pub diff: Option<DiffConfig>,
    pub keep_going: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Verify,
            search: None,
            diff: None,
            keep_going: false,
        }
    }
}

/// Monotonic counters for the run. `total` counts attempted cases, not
/// discovered ones: an aborted run stops counting where it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    pub total: usize,
    pub failed: usize,
}

impl RunResult {
    pub fn passed(&self) -> usize {
        self.total - self.failed
    }

    /// Process exit code contract: the failure count capped at 255.
    pub fn exit_code(&self) -> i32 {
        self.failed.min(255) as i32
    }
}

/// What the loop does after a failed case.
enum Continuation {
    Continue,
    Abort,
}

/// Runs every case in order, reporting as it goes, and returns the counts.
///
/// Only configuration-level trouble (unreadable input, unwritable
/// reference) escapes as an error; everything a single case can do wrong
/// is contained in the loop.
pub fn run(
    cases: &[TestCase],
    compiler: &mut dyn Compiler,
    config: &RunConfig,
    reporter: &mut Reporter,
) -> Result<RunResult, HarnessError> {
    let mut result = RunResult::default();
    let count = cases.len();
    reporter.header(config.mode, count);

    for (index, case) in cases.iter().enumerate() {
        reporter.progress(index + 1, count, case);
        result.total += 1;
        compiler.set_import_paths(&case.import_path);

        let outcome = match config.mode {
            Mode::Compile => regenerate_case(case, compiler, config, reporter, &mut result)?,
            Mode::Verify => verify_case(case, compiler, config, reporter, &mut result)?,
        };
        if let Continuation::Abort = outcome {
            break;
        }
    }

    reporter.summary(&result);
    Ok(result)
}

fn read_input(case: &TestCase) -> Result<String, HarnessError> {
    fs::read_to_string(&case.input).map_err(|source| HarnessError::Read {
        path: case.input.clone(),
        source,
    })
}

fn regenerate_case(
    case: &TestCase,
    compiler: &mut dyn Compiler,
    config: &RunConfig,
    reporter: &mut Reporter,
    result: &mut RunResult,
) -> Result<Continuation, HarnessError> {
    let source = read_input(case)?;
    match compiler.compile(&source) {
        Ok(text) => {
            fs::write(&case.expected, normalize(&text)).map_err(|e| HarnessError::Write {
                path: case.expected.clone(),
                source: e,
            })?;
            Ok(Continuation::Continue)
        }
        Err(diag) => {
            result.failed += 1;
            report_compile_failure(reporter, &diag.message);
            if config.keep_going {
                Ok(Continuation::Continue)
            } else {
                reporter.note(&["Aborting".to_string()]);
                Ok(Continuation::Abort)
            }
        }
    }
}

fn verify_case(
    case: &TestCase,
    compiler: &mut dyn Compiler,
    config: &RunConfig,
    reporter: &mut Reporter,
    result: &mut RunResult,
) -> Result<Continuation, HarnessError> {
    // A missing reference is a hard stop no matter the flags.
    if !case.expected.is_file() {
        result.failed += 1;
        reporter.failure(&[
            format!("Failed to find output file: {}", case.expected.display()),
            "Maybe you forgot to compile the fixtures?".to_string(),
            "Aborting".to_string(),
        ]);
        return Ok(Continuation::Abort);
    }

    let source = read_input(case)?;
    let actual = match compiler.compile(&source) {
        Ok(text) => text,
        Err(diag) => {
            result.failed += 1;
            report_compile_failure(reporter, &diag.message);
            return Ok(after_failure(config, reporter));
        }
    };

    match reconcile(compiler, &actual, &case.expected)? {
        Reconciliation::Passed => {
            reporter.passed();
            Ok(Continuation::Continue)
        }
        failed => {
            result.failed += 1;
            if let Some(diff) = &config.diff {
                reporter.failure(&["Failed:".to_string()]);
                let expected = failed.expected_for_display().unwrap_or_default();
                reporter.show_diff(&diff.tool, expected, &normalize(&actual));
            } else {
                reporter.failure(&["Failed, run with the -d flag to view the diff".to_string()]);
            }
            Ok(after_failure(config, reporter))
        }
    }
}

/// Abort-vs-continue after a recorded failure: aborting only makes sense
/// when the user asked to inspect diffs and did not ask to go on.
fn after_failure(config: &RunConfig, reporter: &mut Reporter) -> Continuation {
    match &config.diff {
        Some(_) if !config.keep_going => {
            reporter.note(&["Aborting".to_string()]);
            Continuation::Abort
        }
        Some(_) => {
            reporter.separator();
            Continuation::Continue
        }
        None => Continuation::Continue,
    }
}

fn report_compile_failure(reporter: &mut Reporter, message: &str) {
    let mut lines = vec!["Failed to compile input, reason:".to_string()];
    lines.extend(message.lines().map(str::to_string));
    reporter.failure(&lines);
}
