//! Fixture locator behavior: pairing, import paths, filtering, ordering,
//! and fail-fast on a broken suite layout.

use std::fs;
use std::path::Path;

use lesstest::discovery::discover;
use lesstest::suite::{FixtureSet, OutputSet, SuiteManifest, SuitePair};
use lesstest::HarnessError;

fn pair(dir: &str, glob: &str, import_dir: &str, out_dir: &str, filename: &str) -> SuitePair {
    SuitePair {
        input: FixtureSet {
            dir: dir.into(),
            glob: glob.into(),
            import_dir: import_dir.into(),
        },
        output: OutputSet {
            dir: out_dir.into(),
            filename: filename.into(),
        },
    }
}

fn manifest(pairs: Vec<SuitePair>) -> SuiteManifest {
    SuiteManifest { pairs }
}

fn seed(prefix: &Path, rel: &str, content: &str) {
    let path = prefix.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn discovers_sorted_cases_paired_with_reference_files() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "inputs/mixins.less", "");
    seed(dir.path(), "inputs/colors.less", "");
    seed(dir.path(), "outputs/.keep", "");

    let suite = manifest(vec![pair(
        "inputs",
        "*.less",
        "%s/test-imports",
        "outputs",
        "%s.css",
    )]);
    let cases = discover(&suite, dir.path(), None).unwrap();

    assert_eq!(cases.len(), 2);
    // Sorted by file name, not directory-listing order.
    assert_eq!(cases[0].input_name(), "colors.less");
    assert_eq!(cases[1].input_name(), "mixins.less");
    assert_eq!(cases[0].expected, dir.path().join("outputs/colors.css"));
    assert_eq!(cases[1].expected_name(), "mixins.css");
}

#[test]
fn every_case_has_two_import_entries_ending_with_the_set_dir() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "inputs/a.less", "");
    seed(dir.path(), "outputs/.keep", "");

    let suite = manifest(vec![pair(
        "inputs",
        "*.less",
        "%s/test-imports",
        "outputs",
        "%s.css",
    )]);
    let cases = discover(&suite, dir.path(), None).unwrap();

    let set_dir = dir.path().join("inputs");
    for case in &cases {
        assert!(!case.expected.as_os_str().is_empty());
        assert_eq!(case.import_path.len(), 2);
        assert_eq!(case.import_path[0], set_dir.join("test-imports"));
        assert_eq!(case.import_path[1], set_dir);
    }
}

#[test]
fn search_filter_yields_the_matching_subset_of_the_unfiltered_run() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "inputs/mixin-args.less", "");
    seed(dir.path(), "inputs/mixin-guards.less", "");
    seed(dir.path(), "inputs/variables.less", "");
    seed(dir.path(), "outputs/.keep", "");

    let suite = manifest(vec![pair(
        "inputs",
        "*.less",
        "%s/test-imports",
        "outputs",
        "%s.css",
    )]);
    let all = discover(&suite, dir.path(), None).unwrap();
    let filtered = discover(&suite, dir.path(), Some("mixin")).unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(filtered.len(), 2);
    for case in &filtered {
        assert!(case.input_name().contains("mixin"));
        assert!(all.contains(case));
    }
    // Case-sensitive, not a regex.
    let none = discover(&suite, dir.path(), Some("MIXIN")).unwrap();
    assert!(none.is_empty());
}

#[test]
fn a_set_with_no_matches_contributes_zero_cases() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("inputs")).unwrap();
    fs::create_dir_all(dir.path().join("outputs")).unwrap();
    seed(dir.path(), "inputs/README.txt", "not a fixture");

    let suite = manifest(vec![pair(
        "inputs",
        "*.less",
        "%s/test-imports",
        "outputs",
        "%s.css",
    )]);
    let cases = discover(&suite, dir.path(), None).unwrap();
    assert!(cases.is_empty());
}

#[test]
fn missing_directories_fail_fast_naming_the_path() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "inputs/a.less", "");

    let suite = manifest(vec![pair(
        "inputs",
        "*.less",
        "%s/test-imports",
        "outputs",
        "%s.css",
    )]);
    let err = discover(&suite, dir.path(), None).unwrap_err();
    match err {
        HarnessError::MissingDirectory(path) => {
            assert_eq!(path, dir.path().join("outputs"));
        }
        other => panic!("expected MissingDirectory, got {other:?}"),
    }
}

#[test]
fn pairs_contribute_cases_in_manifest_order() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "inputs/z.less", "");
    seed(dir.path(), "third-party/less/a.less", "");
    seed(dir.path(), "outputs/.keep", "");
    seed(dir.path(), "third-party/css/.keep", "");

    let suite = manifest(vec![
        pair("inputs", "*.less", "%s/test-imports", "outputs", "%s.css"),
        pair(
            "third-party/less",
            "*.less",
            "%s/import",
            "third-party/css",
            "%s.css",
        ),
    ]);
    let cases = discover(&suite, dir.path(), None).unwrap();

    assert_eq!(cases.len(), 2);
    // First pair's cases come first even though "a.less" sorts before "z.less".
    assert_eq!(cases[0].input_name(), "z.less");
    assert_eq!(cases[1].input_name(), "a.less");
    assert_eq!(
        cases[1].import_path[0],
        dir.path().join("third-party/less/import")
    );
}

#[test]
fn self_mapping_output_set_pairs_references_with_themselves() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "outputs/a.css", "a { b: 2px; }");

    let suite = manifest(vec![pair("outputs", "*.css", "%s", "outputs", "%s.css")]);
    let cases = discover(&suite, dir.path(), None).unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].input, cases[0].expected);
    assert_eq!(
        cases[0].import_path,
        vec![dir.path().join("outputs"), dir.path().join("outputs")]
    );
}

#[test]
fn fixtures_in_subdirectories_are_not_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "inputs/a.less", "");
    seed(dir.path(), "inputs/test-imports/b.less", "");
    seed(dir.path(), "outputs/.keep", "");

    let suite = manifest(vec![pair(
        "inputs",
        "*.less",
        "%s/test-imports",
        "outputs",
        "%s.css",
    )]);
    let cases = discover(&suite, dir.path(), None).unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].input_name(), "a.less");
}
