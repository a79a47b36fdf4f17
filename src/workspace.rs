//! Workspace loading.
//!
//! Walks the scan root for Go files, groups them into one compilation unit
//! per directory, derives each unit's namespace from `go.mod`, and builds
//! the shared type table every unit's declarations feed into.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

use crate::analysis::{TypeTable, Unit};
use crate::parser::{collect_types, go_parser, lower_file, FileScope, Import, ParsedFile};

/// A loaded workspace: lowered units plus the table of all declared types.
pub struct Workspace {
    /// Compilation units in directory order.
    pub units: Vec<Unit>,
    /// Types declared anywhere in the workspace, by qualified name.
    pub types: TypeTable,
    /// Files successfully lowered.
    pub files: usize,
    /// Files skipped because they failed to parse.
    pub skipped: usize,
}

impl Workspace {
    /// Load every Go file under `root`.
    ///
    /// `root` may also be a single file, in which case only that file is
    /// loaded and paths are shown relative to its directory. Files that do
    /// not parse are skipped with a warning; the rest of the workspace is
    /// still checked.
    pub fn load(root: &Path) -> Result<Workspace> {
        let base = if root.is_file() {
            root.parent().unwrap_or(Path::new("."))
        } else {
            root
        };
        let module = read_module_path(base);

        let paths = if root.is_file() {
            vec![root.to_path_buf()]
        } else {
            collect_go_files(base)?
        };

        let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for path in paths {
            let rel_dir = path
                .parent()
                .and_then(|dir| dir.strip_prefix(base).ok())
                .map(slash_path)
                .unwrap_or_default();
            groups.entry(rel_dir).or_default().push(path);
        }

        let mut units = Vec::new();
        let mut types = TypeTable::new();
        let mut files = 0usize;
        let mut skipped = 0usize;

        for (rel_dir, paths) in &groups {
            let mut parsed: Vec<(ParsedFile, Vec<Import>)> = Vec::new();
            for path in paths {
                let source = fs::read(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                match go_parser().parse(path, source) {
                    Ok(file) if !file.root().has_error() => {
                        let imports = go_parser().imports(&file)?;
                        parsed.push((file, imports));
                    }
                    Ok(_) => {
                        eprintln!("Warning: skipping {}: syntax errors", path.display());
                        skipped += 1;
                    }
                    Err(err) => {
                        eprintln!("Warning: skipping {}: {}", path.display(), err);
                        skipped += 1;
                    }
                }
            }
            if parsed.is_empty() {
                continue;
            }

            let package_name = parsed
                .iter()
                .find_map(|(file, _)| go_parser().package_name(file).ok().flatten())
                .unwrap_or_default();
            let unit_path = unit_namespace(module.as_deref(), rel_dir, &package_name);

            for (file, imports) in &parsed {
                let scope = FileScope {
                    package: &unit_path,
                    imports,
                };
                collect_types(file, &scope, &mut types)?;
            }

            let mut unit_files = Vec::new();
            for (file, imports) in &parsed {
                let scope = FileScope {
                    package: &unit_path,
                    imports,
                };
                let display = file
                    .path
                    .strip_prefix(base)
                    .map(slash_path)
                    .unwrap_or_else(|_| file.path.display().to_string());
                unit_files.push(lower_file(file, &scope, display));
                files += 1;
            }

            units.push(Unit {
                path: unit_path,
                name: package_name,
                files: unit_files,
            });
        }

        Ok(Workspace {
            units,
            types,
            files,
            skipped,
        })
    }
}

/// Go files under `base`, sorted for a stable unit layout.
///
/// Directories and files whose names begin with `.` or `_` are ignored, as
/// is any `vendor` directory. The root itself is always entered.
fn collect_go_files(base: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let walker = WalkDir::new(base)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "go")
        {
            paths.push(entry.path().to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') || name.starts_with('_') {
        return true;
    }
    entry.file_type().is_dir() && name == "vendor"
}

/// Namespace of the unit at `rel_dir`.
///
/// With a module path the namespace is the import path a Go program would
/// use. Without one, subdirectories fall back to their relative path and
/// the root falls back to its package clause name.
fn unit_namespace(module: Option<&str>, rel_dir: &str, package_name: &str) -> String {
    match (module, rel_dir.is_empty()) {
        (Some(module), true) => module.to_string(),
        (Some(module), false) => format!("{module}/{rel_dir}"),
        (None, true) => package_name.to_string(),
        (None, false) => rel_dir.to_string(),
    }
}

/// The `module` directive from `go.mod` at the scan root, when present.
fn read_module_path(base: &Path) -> Option<String> {
    let contents = fs::read_to_string(base.join("go.mod")).ok()?;
    for line in contents.lines() {
        let mut parts = line.split_whitespace();
        if parts.next() == Some("module") {
            return parts.next().map(|token| token.trim_matches('"').to_string());
        }
    }
    None
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
