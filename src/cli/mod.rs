//! CLI entry point: parses arguments, assembles the run configuration,
//! and maps the run outcome onto the process exit code.

use clap::Parser;

use crate::cli::args::HarnessArgs;
use crate::compiler::ExternalCompiler;
use crate::discovery::discover;
use crate::errors::HarnessError;
use crate::runner::{run, DiffConfig, Mode, RunConfig};
use crate::suite::SuiteManifest;

pub mod args;
pub mod output;

/// Parses the command line and runs the suite, returning the exit code:
/// the capped failure count, 0 on success or a version query, 1 for help
/// or a configuration error.
pub fn run_cli() -> i32 {
    let args = match HarnessArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and usage errors exit 1; wrapper scripts rely on 0
            // meaning "everything passed". A version query is not a run.
            let _ = e.print();
            return match e.kind() {
                clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
        }
    };

    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Fatal Error: {e}");
            1
        }
    }
}

fn execute(args: HarnessArgs) -> Result<i32, HarnessError> {
    let manifest = match &args.manifest {
        Some(path) => SuiteManifest::from_file(path)?,
        None => SuiteManifest::builtin(),
    };

    let config = RunConfig {
        mode: if args.compile {
            Mode::Compile
        } else {
            Mode::Verify
        },
        search: args.searchstring,
        diff: args.diff.map(|tool| DiffConfig {
            tool: tool.unwrap_or_else(|| DiffConfig::DEFAULT_TOOL.to_string()),
        }),
        keep_going: args.go_on,
    };

    let cases = discover(&manifest, &args.prefix, config.search.as_deref())?;
    let mut compiler = ExternalCompiler::new(&args.compiler);
    let mut reporter = output::Reporter::stdout();
    let result = run(&cases, &mut compiler, &config, &mut reporter)?;
    Ok(result.exit_code())
}
