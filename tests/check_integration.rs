//! Integration tests for the full check pipeline.
//!
//! Each fixture directory under `testdata/` is a small Go tree whose
//! expected findings are written inline as `// want "..."` comments on the
//! literal's opening line. The harness runs the checker over the fixture
//! and compares findings against expectations in both directions.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use fieldcheck::{Config, Runner};

type Expectation = (String, usize, String);

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

/// Collect `// want "..."` annotations as (file, line, message).
fn collect_wants(root: &Path) -> BTreeSet<Expectation> {
    let pattern = Regex::new(r#"//\s*want\s+"([^"]+)""#).expect("should compile want pattern");
    let mut wants = BTreeSet::new();
    walk_fixture(root, root, &pattern, &mut wants);
    wants
}

fn walk_fixture(root: &Path, dir: &Path, pattern: &Regex, out: &mut BTreeSet<Expectation>) {
    for entry in fs::read_dir(dir).expect("should read fixture dir") {
        let path = entry.expect("should read fixture entry").path();
        if path.is_dir() {
            walk_fixture(root, &path, pattern, out);
            continue;
        }
        if path.extension().map(|ext| ext == "go").unwrap_or(false) {
            let rel = path
                .strip_prefix(root)
                .expect("fixture files live under their root")
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let source = fs::read_to_string(&path).expect("should read fixture file");
            for (index, line) in source.lines().enumerate() {
                if let Some(caps) = pattern.captures(line) {
                    out.insert((rel.clone(), index + 1, caps[1].to_string()));
                }
            }
        }
    }
}

fn run_fixture(name: &str, config: &Config) -> BTreeSet<Expectation> {
    let runner = Runner::new(config).expect("should compile patterns");
    let result = runner
        .run(&fixture_path(name))
        .expect("check should succeed");
    result
        .findings
        .into_iter()
        .map(|f| (f.file, f.line, f.message))
        .collect()
}

fn assert_fixture(name: &str, config: &Config) {
    let wants = collect_wants(&fixture_path(name));
    assert!(!wants.is_empty(), "fixture {name} declares no expectations");
    let got = run_fixture(name, config);

    let missing: Vec<_> = wants.difference(&got).collect();
    let unexpected: Vec<_> = got.difference(&wants).collect();
    assert!(
        missing.is_empty() && unexpected.is_empty(),
        "fixture {name} mismatch\nmissing: {missing:#?}\nunexpected: {unexpected:#?}"
    );
}

#[test]
fn test_basic_fixture() {
    assert_fixture("basic", &Config::default());
}

#[test]
fn test_iface_fixture() {
    assert_fixture("iface", &Config::default());
}

#[test]
fn test_extern_fixture() {
    assert_fixture("extern", &Config::default());
}

#[test]
fn test_patterns_fixture() {
    assert_fixture("patterns", &Config::new("example.com/patterns/*.Dial", ""));
}

#[test]
fn test_runs_are_deterministic() {
    let first = run_fixture("basic", &Config::default());
    let second = run_fixture("basic", &Config::default());
    assert_eq!(first, second);
}

#[test]
fn test_findings_are_sorted() {
    let runner = Runner::new(&Config::default()).expect("should compile patterns");
    let result = runner
        .run(&fixture_path("extern"))
        .expect("check should succeed");

    let keys: Vec<_> = result
        .findings
        .iter()
        .map(|f| (f.file.clone(), f.line, f.column))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}
