//! The literal completeness checker.
//!
//! One depth-first walk per compilation unit. Each struct literal goes
//! through four steps: resolve the written type, apply the scope filter,
//! apply bare-literal exemptions, and enumerate missing fields.

use crate::analysis::{
    Expr, ExprKind, LiteralEntry, Resolution, ReturnStmt, SourceFile, Stmt, StructLiteral,
    TypeTable, Unit, VarDecl,
};
use crate::check::filter::TypeFilter;
use crate::check::types::Finding;

/// Exemption context threaded through the walk.
///
/// Carries the one piece of enclosing-context knowledge a bare literal may
/// consume. It never survives a descent into literal entries, call
/// arguments, or function-literal bodies, so only the literal directly
/// adjacent to the return or declaration sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exemption {
    /// No exempting context.
    None,
    /// Direct result expression of a return that also carries a live error.
    ErrorTail,
    /// Right-hand side of a blank capability assertion; `addressed` is set
    /// once the walk has passed through the single permitted `&` layer.
    Assertion { addressed: bool },
}

/// Walks lowered units and reports struct literals with unset fields.
pub struct LiteralChecker<'a> {
    filter: &'a TypeFilter,
    types: &'a TypeTable,
}

impl<'a> LiteralChecker<'a> {
    /// Create a checker over a compiled filter and a resolved type table.
    pub fn new(filter: &'a TypeFilter, types: &'a TypeTable) -> Self {
        Self { filter, types }
    }

    /// Check every literal site in one compilation unit.
    ///
    /// Findings come back in walk order: file order, then preorder within
    /// each file (an outer literal before the literals in its entries).
    pub fn check_unit(&self, unit: &Unit) -> Vec<Finding> {
        let mut findings = Vec::new();
        for file in &unit.files {
            let mut walk = Walk {
                filter: self.filter,
                types: self.types,
                package: &unit.path,
                file,
                findings: &mut findings,
            };
            for stmt in &file.body {
                walk.stmt(stmt);
            }
        }
        findings
    }
}

/// Per-file walk state: the shared read-only inputs plus the finding sink.
struct Walk<'w> {
    filter: &'w TypeFilter,
    types: &'w TypeTable,
    package: &'w str,
    file: &'w SourceFile,
    findings: &'w mut Vec<Finding>,
}

impl Walk<'_> {
    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Return(ret) => self.return_stmt(ret),
            Stmt::Var(decl) => self.var_decl(decl),
            Stmt::Other { exprs, body } => {
                for expr in exprs {
                    self.expr(expr, Exemption::None);
                }
                for stmt in body {
                    self.stmt(stmt);
                }
            }
        }
    }

    /// Direct results of a return share the error-tail context when any
    /// result is a live (non-nil) error value.
    fn return_stmt(&mut self, ret: &ReturnStmt) {
        let live_error = ret.results.iter().any(|r| r.is_error() && !r.is_nil());
        let ctx = if live_error {
            Exemption::ErrorTail
        } else {
            Exemption::None
        };
        for result in &ret.results {
            self.expr(result, ctx);
        }
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        let ctx = if self.is_assertion(decl) {
            Exemption::Assertion { addressed: false }
        } else {
            Exemption::None
        };
        for value in &decl.values {
            self.expr(value, ctx);
        }
    }

    /// A declaration asserts capability satisfaction when it binds exactly
    /// one blank name and its written type resolves to an interface. A type
    /// the table cannot resolve gets the benefit of the doubt; a type known
    /// to be a struct or other non-interface does not.
    fn is_assertion(&self, decl: &VarDecl) -> bool {
        if decl.names.len() != 1 || decl.names[0] != "_" {
            return false;
        }
        let Some(type_name) = &decl.type_name else {
            return false;
        };
        matches!(
            self.types.resolve(&type_name.qualified),
            Resolution::Interface | Resolution::Unknown
        )
    }

    fn expr(&mut self, expr: &Expr, ctx: Exemption) {
        match &expr.kind {
            ExprKind::Literal(lit) => self.literal(lit, expr, ctx),
            ExprKind::AddressOf(inner) => {
                // One & layer is transparent for assertions only.
                let inner_ctx = match ctx {
                    Exemption::Assertion { addressed: false } => {
                        Exemption::Assertion { addressed: true }
                    }
                    _ => Exemption::None,
                };
                self.expr(inner, inner_ctx);
            }
            ExprKind::Nil => {}
            ExprKind::FuncLit(body) => {
                for stmt in body {
                    self.stmt(stmt);
                }
            }
            ExprKind::Other(children) => {
                for child in children {
                    self.expr(child, Exemption::None);
                }
            }
        }
    }

    fn literal(&mut self, lit: &StructLiteral, expr: &Expr, ctx: Exemption) {
        if let Some(finding) = self.literal_finding(lit, expr, ctx) {
            self.findings.push(finding);
        }
        // Nested literals are checked on their own terms.
        for entry in &lit.entries {
            if let LiteralEntry::Computed { key, .. } = entry {
                self.expr(key, Exemption::None);
            }
            self.expr(entry.value(), Exemption::None);
        }
    }

    fn literal_finding(
        &self,
        lit: &StructLiteral,
        expr: &Expr,
        ctx: Exemption,
    ) -> Option<Finding> {
        let type_name = lit.type_name.as_ref()?;
        let Resolution::Struct(desc) = self.types.resolve(&type_name.qualified) else {
            return None;
        };
        if !self.filter.should_process(&type_name.qualified) {
            return None;
        }
        if lit.is_bare() && ctx != Exemption::None {
            return None;
        }

        let same_package = desc.package == self.package;
        let mut missing = Vec::new();
        for (index, field) in desc.fields.iter().enumerate() {
            if !field.exported && !same_package {
                continue;
            }
            if !field_present(lit, &field.name, index) {
                missing.push(field.name.clone());
            }
        }
        if missing.is_empty() {
            return None;
        }
        Some(Finding::new(
            self.file.path.clone(),
            expr.span.start_line,
            expr.span.start_col,
            type_name.short.clone(),
            missing,
        ))
    }
}

/// Presence of one field: keyed entries match by name, positional entries
/// mark the field at their own slot. Computed keys never supply a field.
fn field_present(lit: &StructLiteral, name: &str, index: usize) -> bool {
    lit.entries.iter().enumerate().any(|(i, entry)| match entry {
        LiteralEntry::Keyed { name: key, .. } => key == name,
        LiteralEntry::Positional(_) => i == index,
        LiteralEntry::Computed { .. } => false,
    })
}
