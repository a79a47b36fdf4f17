//! Program representation shared by the parser front-end and the checker.
//!
//! Two halves:
//! - `syntax`: the lowered statement/expression tree one walk consumes,
//!   produced per file by the front-end.
//! - `types`: the workspace-wide table of named types (structs with field
//!   sequences, interfaces, defined types) the walk resolves against.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────────┐
//! │ Go sources   │────▶│ parser        │────▶│ Unit (syntax) +  │
//! └──────────────┘     │ (tree-sitter) │     │ TypeTable (types)│
//!                      └───────────────┘     └──────────────────┘
//!                                                     │
//!                                                     ▼
//!                                            ┌──────────────────┐
//!                                            │ LiteralChecker   │
//!                                            └──────────────────┘
//! ```

mod syntax;
mod types;

pub use syntax::{
    Expr, ExprKind, LiteralEntry, ReturnStmt, SourceFile, Span, Stmt, StructLiteral, TypeFact,
    TypeName, Unit, VarDecl,
};
pub use types::{FieldDescriptor, Resolution, TypeDescriptor, TypeEntry, TypeTable};
