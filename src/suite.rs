//! Suite configuration: which directories hold fixtures and how inputs map
//! to their reference outputs.
//!
//! A suite is a list of `(FixtureSet, OutputSet)` pairs. Each fixture set
//! declares where one family of inputs lives and how `@import` references
//! are resolved for that family; the paired output set declares where the
//! reference files live and how an input's base name becomes the reference
//! file name. The pairs are static configuration, built once at startup
//! either from the built-in defaults or from a YAML manifest.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::HarnessError;

/// Where one family of input fixtures lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixtureSet {
    /// Directory holding the inputs, relative to the suite prefix.
    pub dir: String,
    /// A `*`-prefixed suffix pattern selecting input files, e.g. `*.less`.
    pub glob: String,
    /// `%s` template producing the primary import directory from the
    /// absolute fixture-set directory, e.g. `%s/test-imports`.
    pub import_dir: String,
}

/// Where the reference outputs for a fixture set live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputSet {
    /// Directory holding the reference files, relative to the suite prefix.
    pub dir: String,
    /// `%s` template mapping an input's base name to its reference file
    /// name, e.g. `%s.css`.
    pub filename: String,
}

/// One fixture family: inputs plus their reference outputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuitePair {
    pub input: FixtureSet,
    pub output: OutputSet,
}

/// The full suite: an ordered list of fixture families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteManifest {
    pub pairs: Vec<SuitePair>,
}

fn apply_template(template: &str, value: &str) -> String {
    template.replace("%s", value)
}

impl FixtureSet {
    /// The suffix an input file name must end with, i.e. the glob with its
    /// leading `*` stripped.
    pub fn suffix(&self) -> &str {
        self.glob.trim_start_matches('*')
    }

    /// Applies the import-directory template to the absolute set directory.
    pub fn import_root(&self, set_dir: &Path) -> PathBuf {
        PathBuf::from(apply_template(&self.import_dir, &set_dir.to_string_lossy()))
    }
}

impl OutputSet {
    /// Applies the filename template to an input's base name.
    pub fn output_name(&self, stem: &str) -> String {
        apply_template(&self.filename, stem)
    }
}

impl SuiteManifest {
    /// The default suite, mirroring the layout the reference fixtures have
    /// always used: the hand-written family, the less.js family, and the
    /// outputs mapped onto themselves (reference files are themselves valid
    /// input, so recompiling them must be a no-op).
    pub fn builtin() -> Self {
        let pair = |dir: &str, glob: &str, import_dir: &str, out_dir: &str, filename: &str| {
            SuitePair {
                input: FixtureSet {
                    dir: dir.to_string(),
                    glob: glob.to_string(),
                    import_dir: import_dir.to_string(),
                },
                output: OutputSet {
                    dir: out_dir.to_string(),
                    filename: filename.to_string(),
                },
            }
        };
        Self {
            pairs: vec![
                pair("inputs", "*.less", "%s/test-imports", "outputs", "%s.css"),
                pair("less.js/less", "*.less", "%s/import", "less.js/css", "%s.css"),
                pair("outputs", "*.css", "%s", "outputs", "%s.css"),
            ],
        }
    }

    /// Loads a suite from a YAML manifest: a sequence of
    /// `{ input: {dir, glob, import_dir}, output: {dir, filename} }` entries.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let text = fs::read_to_string(path).map_err(|source| HarnessError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let pairs = serde_yaml::from_str(&text).map_err(|source| HarnessError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_substitute_the_placeholder() {
        let set = FixtureSet {
            dir: "inputs".into(),
            glob: "*.less".into(),
            import_dir: "%s/test-imports".into(),
        };
        assert_eq!(set.suffix(), ".less");
        assert_eq!(
            set.import_root(Path::new("/suite/inputs")),
            PathBuf::from("/suite/inputs/test-imports")
        );

        let out = OutputSet {
            dir: "outputs".into(),
            filename: "%s.css".into(),
        };
        assert_eq!(out.output_name("mixins"), "mixins.css");
    }

    #[test]
    fn identity_import_template_yields_the_set_dir() {
        let set = FixtureSet {
            dir: "outputs".into(),
            glob: "*.css".into(),
            import_dir: "%s".into(),
        };
        assert_eq!(
            set.import_root(Path::new("/suite/outputs")),
            PathBuf::from("/suite/outputs")
        );
    }

    #[test]
    fn builtin_suite_has_one_output_set_per_fixture_set() {
        let suite = SuiteManifest::builtin();
        assert_eq!(suite.pairs.len(), 3);
        assert_eq!(suite.pairs[0].input.dir, "inputs");
        assert_eq!(suite.pairs[0].output.dir, "outputs");
        // The self-mapping pair: outputs verified against themselves.
        assert_eq!(suite.pairs[2].input.dir, suite.pairs[2].output.dir);
    }

    #[test]
    fn manifest_yaml_round_trips_into_pairs() {
        let yaml = r#"
- input: { dir: inputs, glob: "*.less", import_dir: "%s/test-imports" }
  output: { dir: outputs, filename: "%s.css" }
"#;
        let pairs: Vec<SuitePair> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].input.glob, "*.less");
        assert_eq!(pairs[0].output.filename, "%s.css");
    }
}
