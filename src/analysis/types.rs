//! Nominal type information resolved ahead of the checking walk.
//!
//! The workspace loader records every named type it sees into one table;
//! the checker treats the table as read-only and shares it across parallel
//! unit walks.

use std::collections::HashMap;

/// One field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name; embedded fields use their type's short name.
    pub name: String,
    /// Whether the field is exported (visible outside its declaring package).
    pub exported: bool,
}

/// A resolved struct type: the field sequence literals are checked against.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Qualified name of the struct declaration.
    pub qualified: String,
    /// Namespace path of the package declaring the struct (and so its
    /// fields); visibility is judged against this.
    pub package: String,
    /// Fields in declaration order; a field's index is its positional slot.
    pub fields: Vec<FieldDescriptor>,
}

/// One named type known to the table.
#[derive(Debug, Clone)]
pub enum TypeEntry {
    /// A struct type with a known field sequence.
    Struct(TypeDescriptor),
    /// An interface type.
    Interface,
    /// A defined type or alias whose written underlying type is another
    /// name; resolution chases the target.
    ResolveThrough(String),
    /// A named type with a non-struct underlying shape (func, map, chan...).
    Opaque,
}

/// Answer from [`TypeTable::resolve`].
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    Struct(&'a TypeDescriptor),
    Interface,
    Opaque,
    Unknown,
}

impl Resolution<'_> {
    /// Whether the name resolved to an interface.
    pub fn is_interface(&self) -> bool {
        matches!(self, Resolution::Interface)
    }
}

/// Maximum defined-type chain length followed before giving up.
const MAX_RESOLVE_DEPTH: usize = 32;

/// Read-only table of named types across all loaded packages.
#[derive(Debug, Default)]
pub struct TypeTable {
    entries: HashMap<String, TypeEntry>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a named type under its qualified name.
    pub fn insert(&mut self, qualified: String, entry: TypeEntry) {
        self.entries.insert(qualified, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a qualified name, chasing defined types and aliases.
    ///
    /// Chains longer than the depth cap (including cycles) resolve as
    /// unknown rather than looping.
    pub fn resolve(&self, qualified: &str) -> Resolution<'_> {
        let mut name = qualified;
        for _ in 0..MAX_RESOLVE_DEPTH {
            match self.entries.get(name) {
                Some(TypeEntry::Struct(desc)) => return Resolution::Struct(desc),
                Some(TypeEntry::Interface) => return Resolution::Interface,
                Some(TypeEntry::Opaque) => return Resolution::Opaque,
                Some(TypeEntry::ResolveThrough(target)) => name = target,
                None => return Resolution::Unknown,
            }
        }
        Resolution::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(qualified: &str, package: &str, fields: &[(&str, bool)]) -> TypeDescriptor {
        TypeDescriptor {
            qualified: qualified.to_string(),
            package: package.to_string(),
            fields: fields
                .iter()
                .map(|(name, exported)| FieldDescriptor {
                    name: name.to_string(),
                    exported: *exported,
                })
                .collect(),
        }
    }

    #[test]
    fn test_resolve_struct() {
        let mut table = TypeTable::new();
        table.insert(
            "demo.Config".to_string(),
            TypeEntry::Struct(descriptor("demo.Config", "demo", &[("Host", true), ("port", false)])),
        );

        match table.resolve("demo.Config") {
            Resolution::Struct(desc) => {
                assert_eq!(desc.fields.len(), 2);
                assert_eq!(desc.fields[0].name, "Host");
                assert!(!desc.fields[1].exported);
            }
            other => panic!("expected struct, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_through_chain() {
        let mut table = TypeTable::new();
        table.insert(
            "demo.Base".to_string(),
            TypeEntry::Struct(descriptor("demo.Base", "demo", &[("A", true)])),
        );
        table.insert(
            "demo.Wrapped".to_string(),
            TypeEntry::ResolveThrough("demo.Base".to_string()),
        );
        table.insert(
            "demo.Deep".to_string(),
            TypeEntry::ResolveThrough("demo.Wrapped".to_string()),
        );

        match table.resolve("demo.Deep") {
            Resolution::Struct(desc) => assert_eq!(desc.qualified, "demo.Base"),
            other => panic!("expected struct, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_cycle_is_unknown() {
        let mut table = TypeTable::new();
        table.insert(
            "demo.A".to_string(),
            TypeEntry::ResolveThrough("demo.B".to_string()),
        );
        table.insert(
            "demo.B".to_string(),
            TypeEntry::ResolveThrough("demo.A".to_string()),
        );

        assert!(matches!(table.resolve("demo.A"), Resolution::Unknown));
    }

    #[test]
    fn test_resolve_unknown_and_interface() {
        let mut table = TypeTable::new();
        table.insert("demo.Writer".to_string(), TypeEntry::Interface);
        table.insert("demo.Handler".to_string(), TypeEntry::Opaque);

        assert!(table.resolve("demo.Writer").is_interface());
        assert!(matches!(table.resolve("demo.Handler"), Resolution::Opaque));
        assert!(matches!(table.resolve("demo.Nope"), Resolution::Unknown));
    }
}
