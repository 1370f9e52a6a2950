//! Command-line arguments for the harness.
//!
//! Uses `clap` with the derive feature. The flag letters and the exit-code
//! contract are part of the harness's external interface: shell scripts
//! wrap this binary and read the failure count out of the exit code.

use clap::Parser;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
The optional [SEARCHSTRING] filters the input files: only tests whose file
name contains the given substring are executed, i.e. the effective pattern
is '*SEARCHSTRING*.less'.

The exit code is the number of failed tests (capped at 255), 0 on success
and 1 when this help is shown or the suite is misconfigured. This aids in
integrating the harness into larger shell test scripts.

Examples:

  Run the full test set:
      lesstest

  Run only the mixin tests:
      lesstest mixin

  Use a custom diff tool to show diffs for failing tests:
      lesstest -d=meld
";

/// Differential fixture harness for the LESS-to-CSS transpiler.
#[derive(Debug, Parser)]
#[command(name = "lesstest", version, after_help = AFTER_HELP)]
pub struct HarnessArgs {
    /// Regenerate ('compile') the reference output files from the given
    /// inputs. WARNING: only use this once you have ascertained that the
    /// compiler processes all tests correctly.
    #[arg(short = 'C', long = "compile")]
    pub compile: bool,

    /// Show the diff of the actual output vs. the reference when a test
    /// fails; uses 'diff -b -B -t -u' unless a tool is named (-d=meld).
    /// The run is aborted after the first failure report unless -g is
    /// also given.
    #[arg(
        short = 'd',
        long = "diff",
        value_name = "TOOL",
        num_args = 0..=1,
        require_equals = true
    )]
    pub diff: Option<Option<String>>,

    /// Continue executing the other tests when a test fails and option
    /// '-d' is active ('go on').
    #[arg(short = 'g', long = "go-on")]
    pub go_on: bool,

    /// Compiler command. It receives the stylesheet source on stdin, the
    /// import search path as --include-path, and must print the compiled
    /// text on stdout.
    #[arg(long, value_name = "CMD", default_value = "lessc -")]
    pub compiler: String,

    /// YAML suite manifest describing the fixture-set pairs; the built-in
    /// sets are used when absent.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Directory the fixture-set paths are resolved against.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub prefix: PathBuf,

    /// Case-sensitive substring filter on input file names.
    #[arg(value_name = "SEARCHSTRING")]
    pub searchstring: Option<String>,
}
