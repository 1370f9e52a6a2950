//! Pass/fail reconciliation for one test case.
//!
//! A case passes when the compiled output equals the stored reference after
//! line-ending normalization. When the direct comparison misses, the
//! reference text itself is fed back through the compiler and the result
//! compared instead: reference files in this suite are valid compiler input
//! (the output language is a subset of the input language), so a stored
//! reference that only drifted in formatting recompiles to the same text
//! the input does. Recompilation failing is not an error here; it just
//! means the primary comparison stands alone.

use std::fs;
use std::path::Path;

use crate::compiler::Compiler;
use crate::errors::HarnessError;

/// Line-ending-agnostic canonical form: CRLF becomes LF, then surrounding
/// whitespace is trimmed. Applied independently to both sides of every
/// comparison; equality afterwards is exact, not substring.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

/// Outcome of reconciling compiled output against a reference file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    Passed,
    /// Both comparisons missed. Carries the normalized primary reference
    /// text and, when the reference recompiled cleanly, the alternate form
    /// actually used for the final comparison.
    Failed {
        primary: String,
        alternate: Option<String>,
    },
}

impl Reconciliation {
    /// The expected text a failure report should show: the alternate form
    /// when one was produced, the stored reference otherwise.
    pub fn expected_for_display(&self) -> Option<&str> {
        match self {
            Reconciliation::Passed => None,
            Reconciliation::Failed { primary, alternate } => {
                Some(alternate.as_deref().unwrap_or(primary))
            }
        }
    }
}

/// Compares `actual` against the reference at `expected_path`, falling back
/// to the recompiled reference. The compiler must already carry the case's
/// import paths; the alternate compilation reuses them.
///
/// Only failing to read the reference file is a harness error; the file's
/// existence has been checked by the run controller before compilation.
pub fn reconcile(
    compiler: &mut dyn Compiler,
    actual: &str,
    expected_path: &Path,
) -> Result<Reconciliation, HarnessError> {
    let reference = fs::read_to_string(expected_path).map_err(|source| HarnessError::Read {
        path: expected_path.to_path_buf(),
        source,
    })?;
    let primary = normalize(&reference);
    let actual = normalize(actual);
    if actual == primary {
        return Ok(Reconciliation::Passed);
    }

    match compiler.compile(&reference) {
        Ok(recompiled) => {
            let alternate = normalize(&recompiled);
            if actual == alternate {
                Ok(Reconciliation::Passed)
            } else {
                Ok(Reconciliation::Failed {
                    primary,
                    alternate: Some(alternate),
                })
            }
        }
        Err(_) => Ok(Reconciliation::Failed {
            primary,
            alternate: None,
        }),
    }
}
