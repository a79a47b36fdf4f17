//! Go source parsing front-end.
//!
//! Wraps the tree-sitter Go grammar behind a small API: parse a file, read
//! its package clause and imports, then hand the tree to [`lower_file`] and
//! [`collect_types`] which turn it into the shapes the checker consumes.

mod decls;
mod lower;

pub use decls::collect_types;
pub use lower::lower_file;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::OnceCell;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser as TsParser, Query, QueryCursor, Tree};

/// Tree-sitter query for the package clause name.
const PACKAGE_QUERY: &str = "(package_clause (package_identifier) @package.name)";

/// Tree-sitter query for import specs. The `name` and `path` fields are read
/// off each captured spec node.
const IMPORT_QUERY: &str = "(import_spec) @import.spec";

/// A parsed Go file: path, raw bytes, and the syntax tree over them.
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: Vec<u8>,
    pub tree: Tree,
}

impl ParsedFile {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text of a node; empty on invalid UTF-8.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }
}

/// One import: the quoted path plus the local alias, when written.
#[derive(Debug, Clone)]
pub struct Import {
    pub path: String,
    pub alias: Option<String>,
}

/// Loads the Go grammar once and parses files with it.
pub struct GoParser {
    language: Language,
}

impl GoParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Parse one file's bytes into a tree.
    pub fn parse(&self, path: &Path, source: Vec<u8>) -> Result<ParsedFile> {
        let mut parser = TsParser::new();
        parser
            .set_language(&self.language)
            .context("failed to load Go grammar")?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| anyhow!("failed to parse {}", path.display()))?;
        Ok(ParsedFile {
            path: path.to_path_buf(),
            source,
            tree,
        })
    }

    /// Name from the package clause, when the file has one.
    pub fn package_name(&self, file: &ParsedFile) -> Result<Option<String>> {
        let query = Query::new(&self.language, PACKAGE_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, file.root(), file.source.as_slice());

        while let Some(m) = matches.next() {
            if let Some(capture) = m.captures.first() {
                return Ok(Some(file.node_text(capture.node).to_string()));
            }
        }
        Ok(None)
    }

    /// All imports that introduce a usable qualifier.
    ///
    /// Dot imports and blank imports are dropped: neither binds a prefix a
    /// qualified type name could be written against.
    pub fn imports(&self, file: &ParsedFile) -> Result<Vec<Import>> {
        let query = Query::new(&self.language, IMPORT_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, file.root(), file.source.as_slice());

        let mut imports = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let spec = capture.node;
                let Some(path_node) = spec.child_by_field_name("path") else {
                    continue;
                };
                let path = file
                    .node_text(path_node)
                    .trim_matches(|c| c == '"' || c == '`')
                    .to_string();
                let alias = match spec.child_by_field_name("name") {
                    Some(name_node) => {
                        let name = file.node_text(name_node);
                        if name == "." || name == "_" {
                            continue;
                        }
                        Some(name.to_string())
                    }
                    None => None,
                };
                imports.push(Import { path, alias });
            }
        }
        Ok(imports)
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-file naming context: the unit's namespace plus the file's imports.
pub struct FileScope<'a> {
    pub package: &'a str,
    pub imports: &'a [Import],
}

impl FileScope<'_> {
    /// Map a written qualifier to the import path it names.
    ///
    /// An aliased import is reachable only through its alias; otherwise the
    /// last path segment serves as the local name.
    pub fn resolve_prefix(&self, prefix: &str) -> Option<&str> {
        self.imports.iter().find_map(|import| {
            let local = import
                .alias
                .as_deref()
                .unwrap_or_else(|| base_name(&import.path));
            (local == prefix).then_some(import.path.as_str())
        })
    }

    /// Qualify an unqualified type name with the unit namespace.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.package, name)
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

static GO_PARSER: OnceCell<GoParser> = OnceCell::new();

/// Shared parser instance. The grammar is loaded once per process.
pub fn go_parser() -> &'static GoParser {
    GO_PARSER.get_or_init(GoParser::new)
}
