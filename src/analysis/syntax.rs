//! Lowered program representation consumed by the completeness checker.
//!
//! The parser front-end reduces each Go file to the handful of node shapes
//! the checker distinguishes: struct literals, return statements, variable
//! declarations, address-of expressions, `nil`, and function literals.
//! Everything else is preserved as an opaque shape that keeps its children
//! reachable, so no literal site is ever lost to an unmodeled construct.

use std::fmt;

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// A type reference as written at a use site.
///
/// The qualified form drives pattern matching and table lookup; the short
/// form is what diagnostics display. Both keep the written spelling: a
/// literal of a defined type reports that type's name, not the underlying
/// struct's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// Package-qualified name (e.g. "example.com/demo/config.Config").
    pub qualified: String,
    /// Short name (e.g. "Config").
    pub short: String,
}

/// Static type fact attached to an expression during lowering.
///
/// Only the facts the checker consumes are tracked; expressions without a
/// relevant fact carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFact {
    /// The expression's static type is the built-in `error` interface.
    Error,
}

/// One entry supplied in a composite literal body.
#[derive(Debug, Clone)]
pub enum LiteralEntry {
    /// `Name: value` with an identifier key.
    Keyed { name: String, value: Expr },
    /// Unkeyed entry occupying a positional slot.
    Positional(Expr),
    /// Non-identifier key (map and array literals); kept for traversal only
    /// and never treated as supplying a struct field.
    Computed { key: Expr, value: Expr },
}

impl LiteralEntry {
    /// The value expression of this entry.
    pub fn value(&self) -> &Expr {
        match self {
            LiteralEntry::Keyed { value, .. } => value,
            LiteralEntry::Positional(value) => value,
            LiteralEntry::Computed { value, .. } => value,
        }
    }
}

/// A composite literal expression.
///
/// `type_name` is present only when the literal spells out a plain or
/// package-qualified type name; slice/map/generic/anonymous-struct literals
/// carry `None` and are skipped at resolution.
#[derive(Debug, Clone)]
pub struct StructLiteral {
    /// The written type, when the literal names one.
    pub type_name: Option<TypeName>,
    /// Supplied entries in source order.
    pub entries: Vec<LiteralEntry>,
}

impl StructLiteral {
    /// Whether the literal supplies zero entries (`T{}`).
    pub fn is_bare(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An expression in the lowered tree.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Static type fact, when the lowering could establish one.
    pub fact: Option<TypeFact>,
}

impl Expr {
    /// Whether this is the `nil` constant.
    pub fn is_nil(&self) -> bool {
        matches!(self.kind, ExprKind::Nil)
    }

    /// Whether the expression is known to be error-typed.
    pub fn is_error(&self) -> bool {
        self.fact == Some(TypeFact::Error)
    }
}

/// Expression shapes the checker distinguishes.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// A composite literal.
    Literal(StructLiteral),
    /// `&expr`.
    AddressOf(Box<Expr>),
    /// The `nil` constant.
    Nil,
    /// A function literal; its body is walked with a fresh context.
    FuncLit(Vec<Stmt>),
    /// Any other expression, with its child expressions preserved.
    Other(Vec<Expr>),
}

/// A `return` statement with its result expressions.
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub results: Vec<Expr>,
}

/// One spec of a `var` declaration; grouped declarations lower to several.
#[derive(Debug, Clone)]
pub struct VarDecl {
    /// Bound names in written order, `_` included as written.
    pub names: Vec<String>,
    /// The written declared type, if any.
    pub type_name: Option<TypeName>,
    /// Initializer expressions.
    pub values: Vec<Expr>,
}

/// Statement shapes the checker distinguishes.
#[derive(Debug, Clone)]
pub enum Stmt {
    Return(ReturnStmt),
    Var(VarDecl),
    /// Any other statement, with child expressions and nested statements
    /// preserved for traversal.
    Other { exprs: Vec<Expr>, body: Vec<Stmt> },
}

/// A lowered source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the scan root, as it appears in findings.
    pub path: String,
    /// Top-level declarations, lowered to statements.
    pub body: Vec<Stmt>,
}

/// A compilation unit: one Go package worth of lowered files.
#[derive(Debug, Clone)]
pub struct Unit {
    /// Namespace path (e.g. "example.com/demo/config").
    pub path: String,
    /// Package clause name.
    pub name: String,
    /// Lowered files in deterministic path order.
    pub files: Vec<SourceFile>,
}
