//! Fieldcheck - exhaustive struct initialization linter for Go.
//!
//! Fieldcheck flags struct literal expressions that leave fields unset.
//! A literal that names some fields but not others usually means the
//! missing ones were forgotten rather than deliberately zeroed; writing
//! every field out makes the zero values a reviewed decision.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `parser`: Go grammar front-end, lowering, and type harvesting
//! - `analysis`: the lowered shapes and the workspace type table
//! - `workspace`: file discovery and per-directory unit construction
//! - `check`: pattern filter, the literal completeness walk, orchestration
//! - `config`: pattern configuration and its errors
//! - `report`: output formatting (pretty, JSON)

pub mod analysis;
pub mod check;
pub mod cli;
pub mod config;
pub mod parser;
pub mod report;
pub mod workspace;

pub use analysis::{
    FieldDescriptor, Resolution, SourceFile, StructLiteral, TypeDescriptor, TypeEntry, TypeTable,
    Unit,
};
pub use check::{CheckResult, Finding, LiteralChecker, Runner, TypeFilter};
pub use config::{Config, ConfigError};
pub use report::JsonReport;
pub use workspace::Workspace;
