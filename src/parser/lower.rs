//! Lowering from tree-sitter nodes to the checker's statement shapes.
//!
//! The walk keeps only what the checker needs: returns, var declarations,
//! composite literals, `&`, `nil`, function literals. Everything else
//! collapses to an opaque shell whose children stay reachable, so literal
//! sites are never lost inside expressions we do not model.

use tree_sitter::Node;

use crate::analysis::{
    Expr, ExprKind, LiteralEntry, ReturnStmt, SourceFile, Span, Stmt, StructLiteral, TypeFact,
    TypeName, VarDecl,
};
use crate::parser::{FileScope, ParsedFile};

/// Calls whose results are error values regardless of where they appear.
static ERROR_CONSTRUCTORS: phf::Set<&'static str> = phf::phf_set! {
    "errors.New",
    "fmt.Errorf",
};

/// Grammar kinds that lower as statements rather than expressions.
fn is_statement_kind(kind: &str) -> bool {
    kind == "block"
        || kind.ends_with("_statement")
        || kind.ends_with("_declaration")
        || kind.ends_with("_case")
        || kind.ends_with("_clause")
}

/// Lower one parsed file. `display_path` is the path findings will carry.
pub fn lower_file(file: &ParsedFile, scope: &FileScope, display_path: String) -> SourceFile {
    let mut lowering = Lowering {
        file,
        scope,
        results: Vec::new(),
    };
    let mut body = Vec::new();
    let root = file.root();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        lowering.lower_stmt(child, &mut body);
    }
    SourceFile {
        path: display_path,
        body,
    }
}

/// Walk state: the file, its naming scope, and a stack of declared result
/// types for the enclosing functions (innermost last).
struct Lowering<'a> {
    file: &'a ParsedFile,
    scope: &'a FileScope<'a>,
    results: Vec<Vec<String>>,
}

impl Lowering<'_> {
    fn lower_stmt(&mut self, node: Node, out: &mut Vec<Stmt>) {
        match node.kind() {
            "function_declaration" | "method_declaration" => {
                self.results.push(result_types(self.file, node));
                let mut body = Vec::new();
                if let Some(block) = node.child_by_field_name("body") {
                    let mut cursor = block.walk();
                    for child in block.named_children(&mut cursor) {
                        self.lower_stmt(child, &mut body);
                    }
                }
                self.results.pop();
                out.push(Stmt::Other {
                    exprs: Vec::new(),
                    body,
                });
            }
            "return_statement" => {
                let mut results = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() != "expression_list" {
                        continue;
                    }
                    let mut list_cursor = child.walk();
                    for expr in child.named_children(&mut list_cursor) {
                        if expr.kind() == "comment" {
                            continue;
                        }
                        results.push(self.lower_expr(expr));
                    }
                }
                self.mark_error_results(&mut results);
                out.push(Stmt::Return(ReturnStmt { results }));
            }
            "var_declaration" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    match child.kind() {
                        "var_spec" => self.lower_var_spec(child, out),
                        "var_spec_list" => {
                            let mut list_cursor = child.walk();
                            for spec in child.named_children(&mut list_cursor) {
                                if spec.kind() == "var_spec" {
                                    self.lower_var_spec(spec, out);
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            "type_declaration" | "import_declaration" | "package_clause" | "comment" => {}
            _ => {
                let mut exprs = Vec::new();
                let mut body = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "comment" {
                        continue;
                    }
                    if is_statement_kind(child.kind()) {
                        self.lower_stmt(child, &mut body);
                    } else {
                        exprs.push(self.lower_expr(child));
                    }
                }
                if !exprs.is_empty() || !body.is_empty() {
                    out.push(Stmt::Other { exprs, body });
                }
            }
        }
    }

    fn lower_var_spec(&mut self, spec: Node, out: &mut Vec<Stmt>) {
        let mut cursor = spec.walk();
        let names: Vec<String> = spec
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.file.node_text(n).to_string())
            .collect();
        let type_name = spec
            .child_by_field_name("type")
            .and_then(|node| type_name_of(self.file, self.scope, node));
        let mut values = Vec::new();
        if let Some(list) = spec.child_by_field_name("value") {
            let mut list_cursor = list.walk();
            for child in list.named_children(&mut list_cursor) {
                if child.kind() == "comment" {
                    continue;
                }
                values.push(self.lower_expr(child));
            }
        }
        out.push(Stmt::Var(VarDecl {
            names,
            type_name,
            values,
        }));
    }

    fn lower_expr(&mut self, node: Node) -> Expr {
        let span = Span::from_node(node);
        let kind = match node.kind() {
            "composite_literal" => self.lower_composite(node),
            "unary_expression" => {
                let is_address = node
                    .child_by_field_name("operator")
                    .is_some_and(|op| self.file.node_text(op) == "&");
                match node.child_by_field_name("operand") {
                    Some(operand) if is_address => {
                        ExprKind::AddressOf(Box::new(self.lower_expr(operand)))
                    }
                    Some(operand) => ExprKind::Other(vec![self.lower_expr(operand)]),
                    None => ExprKind::Other(Vec::new()),
                }
            }
            "nil" => ExprKind::Nil,
            "func_literal" => {
                self.results.push(result_types(self.file, node));
                let mut body = Vec::new();
                if let Some(block) = node.child_by_field_name("body") {
                    let mut cursor = block.walk();
                    for child in block.named_children(&mut cursor) {
                        self.lower_stmt(child, &mut body);
                    }
                }
                self.results.pop();
                ExprKind::FuncLit(body)
            }
            _ => {
                let mut children = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "comment" {
                        continue;
                    }
                    children.push(self.lower_expr(child));
                }
                ExprKind::Other(children)
            }
        };
        let fact = self.call_fact(node);
        Expr { kind, span, fact }
    }

    fn lower_composite(&mut self, node: Node) -> ExprKind {
        let type_name = node
            .child_by_field_name("type")
            .and_then(|ty| type_name_of(self.file, self.scope, ty));
        let mut entries = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for element in body.named_children(&mut cursor) {
                match element.kind() {
                    "comment" => {}
                    "keyed_element" => self.lower_keyed(element, &mut entries),
                    "literal_element" => {
                        entries.push(LiteralEntry::Positional(self.lower_element(element)));
                    }
                    _ => entries.push(LiteralEntry::Positional(self.lower_expr(element))),
                }
            }
        }
        ExprKind::Literal(StructLiteral { type_name, entries })
    }

    fn lower_keyed(&mut self, element: Node, entries: &mut Vec<LiteralEntry>) {
        let key = element.child_by_field_name("key");
        let value = element.child_by_field_name("value");
        let (Some(key), Some(value)) = (key, value) else {
            entries.push(LiteralEntry::Positional(self.lower_expr(element)));
            return;
        };
        match element_ident(self.file, key) {
            Some(name) => entries.push(LiteralEntry::Keyed {
                name,
                value: self.lower_element(value),
            }),
            None => entries.push(LiteralEntry::Computed {
                key: self.lower_element(key),
                value: self.lower_element(value),
            }),
        }
    }

    /// Unwrap a `literal_element` shell around the actual expression.
    fn lower_element(&mut self, element: Node) -> Expr {
        if element.kind() == "literal_element" {
            if let Some(inner) = element.named_child(0) {
                return self.lower_expr(inner);
            }
        }
        self.lower_expr(element)
    }

    /// Error fact for calls of known error constructors.
    fn call_fact(&self, node: Node) -> Option<TypeFact> {
        if node.kind() != "call_expression" {
            return None;
        }
        let function = node.child_by_field_name("function")?;
        if function.kind() != "selector_expression" {
            return None;
        }
        ERROR_CONSTRUCTORS
            .contains(self.file.node_text(function))
            .then_some(TypeFact::Error)
    }

    /// Mark return values sitting in declared `error` result slots.
    ///
    /// Slots pair up positionally, so a forwarded call (`return f()`) with a
    /// different arity is left alone. A literal `nil` in an error slot stays
    /// unmarked: it can never carry a live error.
    fn mark_error_results(&self, results: &mut [Expr]) {
        let Some(declared) = self.results.last() else {
            return;
        };
        if declared.len() != results.len() {
            return;
        }
        for (ty, expr) in declared.iter().zip(results.iter_mut()) {
            if ty == "error" && !expr.is_nil() && expr.fact.is_none() {
                expr.fact = Some(TypeFact::Error);
            }
        }
    }
}

/// Identifier text of a literal key, when the key is a plain identifier.
fn element_ident(file: &ParsedFile, key: Node) -> Option<String> {
    let node = if key.kind() == "literal_element" {
        key.named_child(0)?
    } else {
        key
    };
    match node.kind() {
        "identifier" | "field_identifier" => Some(file.node_text(node).to_string()),
        _ => None,
    }
}

/// Declared result types of a function-like node, one entry per slot.
fn result_types(file: &ParsedFile, node: Node) -> Vec<String> {
    let Some(result) = node.child_by_field_name("result") else {
        return Vec::new();
    };
    if result.kind() != "parameter_list" {
        return vec![file.node_text(result).to_string()];
    }
    let mut types = Vec::new();
    let mut cursor = result.walk();
    for decl in result.named_children(&mut cursor) {
        if decl.kind() != "parameter_declaration" {
            continue;
        }
        let Some(ty) = decl.child_by_field_name("type") else {
            continue;
        };
        let text = file.node_text(ty).to_string();
        let mut names = decl.walk();
        let count = decl.children_by_field_name("name", &mut names).count();
        // One slot per declared name; an anonymous result is one slot.
        for _ in 0..count.max(1) {
            types.push(text.clone());
        }
    }
    types
}

/// The written type of a literal or declaration, qualified through the scope.
///
/// Only plain and package-qualified identifiers name checkable structs;
/// anything else (slices, maps, anonymous structs, instantiated generics)
/// yields `None` and the literal is skipped.
pub(crate) fn type_name_of(file: &ParsedFile, scope: &FileScope, node: Node) -> Option<TypeName> {
    match node.kind() {
        "type_identifier" => {
            let short = file.node_text(node).to_string();
            Some(TypeName {
                qualified: scope.qualify(&short),
                short,
            })
        }
        "qualified_type" => {
            let package = node.child_by_field_name("package")?;
            let name = node.child_by_field_name("name")?;
            let namespace = scope.resolve_prefix(file.node_text(package))?;
            let short = file.node_text(name).to_string();
            Some(TypeName {
                qualified: format!("{namespace}.{short}"),
                short,
            })
        }
        _ => None,
    }
}
