//! Integration tests for workspace loading and direct checker composition.
//!
//! These exercise the library surface the way an embedding tool would:
//! load a workspace, compile a filter, and drive the checker by hand
//! instead of going through `Runner`.

use std::fs;

use tempfile::TempDir;

use fieldcheck::{Config, LiteralChecker, Resolution, TypeFilter, Workspace};

fn write_file(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("should create fixture dirs");
    }
    fs::write(path, content).expect("should write fixture file");
}

fn sample_workspace() -> TempDir {
    let dir = TempDir::new().expect("should create temp dir");
    write_file(&dir, "go.mod", "module example.com/svc\n\ngo 1.21\n");
    write_file(
        &dir,
        "store/store.go",
        r#"package store

type Options struct {
	Path     string
	ReadOnly bool
}
"#,
    );
    write_file(
        &dir,
        "main.go",
        r#"package main

import "example.com/svc/store"

func open() store.Options {
	return store.Options{Path: "/var/lib/svc"}
}
"#,
    );
    dir
}

#[test]
fn test_workspace_table_resolves_across_packages() {
    let dir = sample_workspace();
    let workspace = Workspace::load(dir.path()).expect("should load workspace");

    assert_eq!(workspace.files, 2);
    assert!(matches!(
        workspace.types.resolve("example.com/svc/store.Options"),
        Resolution::Struct(desc) if desc.fields.len() == 2
    ));
}

#[test]
fn test_checker_composes_with_loaded_workspace() {
    let dir = sample_workspace();
    let workspace = Workspace::load(dir.path()).expect("should load workspace");
    let filter = TypeFilter::compile(&Config::default()).expect("should compile empty patterns");
    let checker = LiteralChecker::new(&filter, &workspace.types);

    let findings: Vec<_> = workspace
        .units
        .iter()
        .flat_map(|unit| checker.check_unit(unit))
        .collect();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].file, "main.go");
    assert_eq!(findings[0].message, "ReadOnly is missing in Options");
}

#[test]
fn test_filter_narrows_checker_scope() {
    let dir = sample_workspace();
    let workspace = Workspace::load(dir.path()).expect("should load workspace");
    let filter = TypeFilter::compile(&Config::new("", "example.com/svc/store.*"))
        .expect("should compile exclude patterns");
    let checker = LiteralChecker::new(&filter, &workspace.types);

    let findings: Vec<_> = workspace
        .units
        .iter()
        .flat_map(|unit| checker.check_unit(unit))
        .collect();
    assert!(findings.is_empty());
}
