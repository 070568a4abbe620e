//! Symbol-graph data model.
//!
//! The front end hands us an already-bound snapshot of namespaces,
//! types and members. Symbols live in an arena owned by
//! [`crate::compilation::Compilation`] and refer to each other through
//! [`SymbolId`] indices rather than parent pointers.

use serde::{Deserialize, Serialize};

/// Index of a symbol in the compilation arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a source file registered on the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub(crate) u32);

/// A half-open byte range `[start, end)` in one source file.
///
/// Declaring spans include the declaration's own delimiter tokens and
/// leading attribute/trivia text, so a location on an opening brace
/// falls inside the declaration that owns the brace, not a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub file: FileId,
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Whether `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }
}

/// What flavor of member a member symbol is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    Field,
    Method,
    Property,
    Event,
    /// A get/set/add/remove accessor. Owned by its property or event
    /// symbol, never directly by the type.
    Accessor,
    /// The invoke member of a delegate-like type.
    DelegateInvoke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    Namespace,
    Type,
    Member(MemberKind),
}

impl SymbolKind {
    pub fn is_namespace(&self) -> bool {
        matches!(self, SymbolKind::Namespace)
    }

    pub fn is_type(&self) -> bool {
        matches!(self, SymbolKind::Type)
    }

    pub fn is_member(&self) -> bool {
        matches!(self, SymbolKind::Member(_))
    }
}

/// One declared symbol.
///
/// `arity` is the generic arity (zero for non-generic symbols and for
/// namespaces). `signature` is the ordered list of parameter type
/// names for members that have a parameter list; `None` for symbols
/// without one (fields, properties, namespaces, types).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub parent: Option<SymbolId>,
    pub arity: u32,
    pub signature: Option<Vec<String>>,
    /// Ordered declaring spans. A namespace declared in several
    /// blocks, or a partial type, carries one span per declaration.
    pub spans: Vec<Span>,
    /// Strict ancestors, nearest first. Filled in at freeze time so
    /// lookups never re-walk containment (one array hop per level).
    pub(crate) ancestors: Vec<SymbolId>,
}

impl Symbol {
    pub(crate) fn new(name: String, kind: SymbolKind, parent: Option<SymbolId>) -> Self {
        Self {
            name,
            kind,
            parent,
            arity: 0,
            signature: None,
            spans: Vec::new(),
            ancestors: Vec::new(),
        }
    }

    /// Strict ancestors of this symbol, nearest first.
    pub fn ancestors(&self) -> &[SymbolId] {
        &self.ancestors
    }
}
