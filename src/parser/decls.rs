//! Type declaration harvesting.
//!
//! Fills the [`TypeTable`] from `type` declarations: struct types become
//! field descriptors, interfaces are tagged as such, defined types and
//! aliases record the type they resolve through, everything else is opaque.

use anyhow::Result;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use crate::analysis::{FieldDescriptor, TypeDescriptor, TypeEntry, TypeTable};
use crate::parser::lower::type_name_of;
use crate::parser::{go_parser, FileScope, ParsedFile};

/// Tree-sitter query for type specs, alias specs included.
const TYPE_QUERY: &str = "(type_spec) @type.spec\n(type_alias) @type.alias";

/// Collect every type declared in `file` into the table.
pub fn collect_types(file: &ParsedFile, scope: &FileScope, table: &mut TypeTable) -> Result<()> {
    let query = Query::new(go_parser().language(), TYPE_QUERY)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, file.root(), file.source.as_slice());

    while let Some(m) = matches.next() {
        for capture in m.captures {
            let spec = capture.node;
            let Some(name_node) = spec.child_by_field_name("name") else {
                continue;
            };
            let Some(type_node) = spec.child_by_field_name("type") else {
                continue;
            };
            let qualified = scope.qualify(file.node_text(name_node));
            let entry = lower_type_entry(file, scope, &qualified, type_node);
            table.insert(qualified, entry);
        }
    }
    Ok(())
}

fn lower_type_entry(
    file: &ParsedFile,
    scope: &FileScope,
    qualified: &str,
    node: Node,
) -> TypeEntry {
    match node.kind() {
        "struct_type" => TypeEntry::Struct(struct_descriptor(file, scope, qualified, node)),
        "interface_type" => TypeEntry::Interface,
        "type_identifier" | "qualified_type" => match type_name_of(file, scope, node) {
            Some(target) => TypeEntry::ResolveThrough(target.qualified),
            None => TypeEntry::Opaque,
        },
        _ => TypeEntry::Opaque,
    }
}

/// Field descriptors for one struct type, in declaration order.
fn struct_descriptor(
    file: &ParsedFile,
    scope: &FileScope,
    qualified: &str,
    node: Node,
) -> TypeDescriptor {
    let mut fields = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "field_declaration_list" {
            continue;
        }
        let mut list_cursor = child.walk();
        for decl in child.named_children(&mut list_cursor) {
            if decl.kind() == "field_declaration" {
                push_fields(file, decl, &mut fields);
            }
        }
    }
    TypeDescriptor {
        qualified: qualified.to_string(),
        package: scope.package.to_string(),
        fields,
    }
}

/// One `field_declaration` contributes one descriptor per written name, or
/// one for the embedded type's short name when no names are written.
fn push_fields(file: &ParsedFile, decl: Node, fields: &mut Vec<FieldDescriptor>) {
    let mut cursor = decl.walk();
    let names: Vec<String> = decl
        .children_by_field_name("name", &mut cursor)
        .map(|n| file.node_text(n).to_string())
        .collect();
    if names.is_empty() {
        if let Some(name) = embedded_name(file, decl) {
            fields.push(FieldDescriptor {
                exported: is_exported(&name),
                name,
            });
        }
        return;
    }
    for name in names {
        fields.push(FieldDescriptor {
            exported: is_exported(&name),
            name,
        });
    }
}

/// Short name an embedded field is addressed by: the base type name with
/// pointer layers and type arguments stripped.
fn embedded_name(file: &ParsedFile, decl: Node) -> Option<String> {
    let mut node = decl.child_by_field_name("type")?;
    loop {
        match node.kind() {
            "pointer_type" => node = node.named_child(0)?,
            "generic_type" => node = node.child_by_field_name("type")?,
            _ => break,
        }
    }
    match node.kind() {
        "type_identifier" => Some(file.node_text(node).to_string()),
        "qualified_type" => {
            let name = node.child_by_field_name("name")?;
            Some(file.node_text(name).to_string())
        }
        _ => None,
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
