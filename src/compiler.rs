//! The compiler collaborator.
//!
//! The harness never parses stylesheets itself; it hands raw source text to
//! a [`Compiler`] and inspects the outcome. A compile failure is an
//! expected per-case result the run controller must look at, so it is a
//! plain [`CompileError`] value rather than a [`crate::HarnessError`].
//!
//! [`ExternalCompiler`] is the production implementation: it runs a
//! configurable compiler command as a subprocess, feeding the source on
//! stdin. Whatever the compiler writes to stderr is captured separately
//! from the compiled text and surfaced only inside a failure diagnostic,
//! never mixed into the output stream.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Diagnostic from a failed compilation of one input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The seam between the harness and the transpiler under test.
///
/// Import paths are settable before each invocation, not fixed at
/// construction: every test case carries its own resolution directories.
pub trait Compiler {
    fn set_import_paths(&mut self, paths: &[PathBuf]);
    fn compile(&mut self, source: &str) -> Result<String, CompileError>;
}

/// Runs an external compiler command per invocation.
///
/// The command string is split on whitespace; the import search path is
/// appended as a single `--include-path=<a>:<b>` argument and the last
/// import entry becomes the subprocess working directory, so bare relative
/// `@import`s in ad-hoc source resolve against the fixture-set directory.
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    command: Vec<String>,
    import_paths: Vec<PathBuf>,
}

impl ExternalCompiler {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.split_whitespace().map(str::to_string).collect(),
            import_paths: Vec::new(),
        }
    }

    fn include_path_arg(&self) -> Result<Option<OsString>, CompileError> {
        if self.import_paths.is_empty() {
            return Ok(None);
        }
        let joined = std::env::join_paths(&self.import_paths)
            .map_err(|e| CompileError::new(format!("unusable import search path: {e}")))?;
        let mut arg = OsString::from("--include-path=");
        arg.push(joined);
        Ok(Some(arg))
    }
}

impl Compiler for ExternalCompiler {
    fn set_import_paths(&mut self, paths: &[PathBuf]) {
        self.import_paths = paths.to_vec();
    }

    fn compile(&mut self, source: &str) -> Result<String, CompileError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| CompileError::new("empty compiler command"))?;

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(arg) = self.include_path_arg()? {
            cmd.arg(arg);
        }
        if let Some(cwd) = self.import_paths.last() {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| CompileError::new(format!("failed to launch compiler '{program}': {e}")))?;
        if let Some(mut stdin) = child.stdin.take() {
            // A compiler that rejects its input early may exit before
            // draining stdin; the broken pipe is expected then and the
            // diagnostic is waiting on stderr.
            if let Err(e) = stdin.write_all(source.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CompileError::new(format!(
                        "failed to feed compiler input: {e}"
                    )));
                }
            }
        }
        let output = child
            .wait_with_output()
            .map_err(|e| CompileError::new(format!("failed to wait for compiler: {e}")))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let diagnostic = String::from_utf8_lossy(&output.stderr);
            let diagnostic = diagnostic.trim();
            if diagnostic.is_empty() {
                Err(CompileError::new(format!(
                    "compiler exited with {}",
                    output.status
                )))
            } else {
                Err(CompileError::new(diagnostic))
            }
        }
    }
}
