//! User-facing output for the harness.
//!
//! All progress lines, failure dumps, the inline diff preview, and the
//! external diff-tool invocation live here, so the run controller stays
//! free of presentation concerns. Line formats match what the fixture
//! suite's wrappers have always parsed.

use std::io::Write;
use std::process::Command;

use difference::{Changeset, Difference};
use tempfile::NamedTempFile;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::discovery::TestCase;
use crate::runner::{Mode, RunResult};

const PLAIN_PREFIX: &str = "    ";
const FAIL_PREFIX: &str = " ** ";

pub struct Reporter {
    stream: StandardStream,
}

impl Reporter {
    /// Reporter writing to stdout, colored only on a terminal.
    pub fn stdout() -> Self {
        let choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stream: StandardStream::stdout(choice),
        }
    }

    pub fn header(&mut self, mode: Mode, count: usize) {
        let verb = match mode {
            Mode::Compile => "Compiling",
            Mode::Verify => "Running",
        };
        let plural = if count == 1 { "" } else { "s" };
        let _ = writeln!(self.stream, "{verb} {count} test{plural}:");
    }

    pub fn progress(&mut self, index: usize, count: usize, case: &TestCase) {
        let _ = writeln!(
            self.stream,
            "{PLAIN_PREFIX}[Test {index:04}/{count:04}] {} -> {}",
            case.input_name(),
            case.expected_name()
        );
    }

    pub fn passed(&mut self) {
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)));
        let _ = writeln!(self.stream, "{PLAIN_PREFIX} - Passed");
        let _ = self.stream.reset();
    }

    /// Indented informational lines, e.g. `Aborting`.
    pub fn note(&mut self, lines: &[String]) {
        for line in lines {
            let _ = writeln!(self.stream, "{PLAIN_PREFIX} - {line}");
        }
    }

    /// Failure dump block with the ` ** ` marker prefix.
    pub fn failure(&mut self, lines: &[String]) {
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        for line in lines {
            let _ = writeln!(self.stream, "{FAIL_PREFIX} - {line}");
        }
        let _ = self.stream.reset();
    }

    /// Visual break between failure reports when the run keeps going.
    pub fn separator(&mut self) {
        let _ = writeln!(self.stream, "{}", "=".repeat(75));
    }

    pub fn summary(&mut self, result: &RunResult) {
        let _ = writeln!(
            self.stream,
            "{PLAIN_PREFIX}[Tests: {} / failed: {} / passed: {}]",
            result.total,
            result.failed,
            result.passed()
        );
    }

    /// Shows a failed comparison: an inline colored preview, then the
    /// external diff tool on two temporary files (expected, actual). The
    /// tool's output passes through verbatim and its exit status is not
    /// inspected; the temp files are dropped on every path out of here.
    pub fn show_diff(&mut self, tool: &str, expected: &str, actual: &str) {
        self.inline_diff(expected, actual);
        if let Err(e) = self.external_diff(tool, expected, actual) {
            self.failure(&[format!("diff tool '{tool}' failed: {e}")]);
        }
    }

    fn inline_diff(&mut self, expected: &str, actual: &str) {
        let changeset = Changeset::new(expected, actual, "\n");
        for diff in &changeset.diffs {
            match diff {
                Difference::Same(x) => {
                    let _ = self.stream.reset();
                    for line in x.lines() {
                        let _ = writeln!(self.stream, " {line}");
                    }
                }
                Difference::Add(x) => {
                    let _ = self
                        .stream
                        .set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                    for line in x.lines() {
                        let _ = writeln!(self.stream, "+{line}");
                    }
                }
                Difference::Rem(x) => {
                    let _ = self
                        .stream
                        .set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                    for line in x.lines() {
                        let _ = writeln!(self.stream, "-{line}");
                    }
                }
            }
        }
        let _ = self.stream.reset();
    }

    fn external_diff(&mut self, tool: &str, expected: &str, actual: &str) -> std::io::Result<()> {
        let expected_file = side_file(expected)?;
        let actual_file = side_file(actual)?;

        let mut parts = tool.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty diff command")
        })?;
        let output = Command::new(program)
            .args(parts)
            .arg(expected_file.path())
            .arg(actual_file.path())
            .output()?;

        self.stream.write_all(&output.stdout)?;
        std::io::stderr().write_all(&output.stderr)?;
        Ok(())
    }
}

/// One side of the comparison in a self-deleting temp file. A trailing
/// newline keeps `diff` from flagging the last line of both sides.
fn side_file(text: &str) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(text.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(file)
}
