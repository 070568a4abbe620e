//! The bound compilation snapshot consumed by the engine.
//!
//! [`CompilationBuilder`] is the intake surface for the front end:
//! it registers files, declares symbols, attaches declaring spans and
//! decoded suppression attributes, and [`CompilationBuilder::freeze`]
//! validates the graph and publishes an immutable [`Compilation`].
//!
//! Namespace identity is the fully-qualified dotted name: declaring
//! `N.N1` twice, or nesting `N1` lexically inside `N`, produces one
//! logical namespace symbol either way.

use crate::attribute::SuppressionAttribute;
use crate::error::BuildError;
use crate::symbol::{FileId, MemberKind, Span, Symbol, SymbolId, SymbolKind};
use rustc_hash::FxHashMap;

#[derive(Debug)]
pub struct Compilation {
    symbols: Vec<Symbol>,
    files: Vec<String>,
    /// Symbols with no parent (top-level namespaces and types in the
    /// global namespace).
    roots: Vec<SymbolId>,
    /// Children per symbol, parallel to `symbols`.
    children: Vec<Vec<SymbolId>>,
    /// Fully-qualified dotted name -> namespace symbol.
    namespaces: FxHashMap<String, SymbolId>,
    local_attributes: FxHashMap<SymbolId, Vec<SuppressionAttribute>>,
    global_attributes: Vec<SuppressionAttribute>,
}

impl Compilation {
    pub fn builder() -> CompilationBuilder {
        CompilationBuilder::default()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }

    pub fn file_name(&self, file: FileId) -> &str {
        &self.files[file.0 as usize]
    }

    /// The namespace with exactly this fully-qualified dotted name.
    pub fn namespace(&self, dotted: &str) -> Option<SymbolId> {
        self.namespaces.get(dotted).copied()
    }

    pub fn children(&self, id: SymbolId) -> &[SymbolId] {
        &self.children[id.index()]
    }

    pub fn top_level(&self) -> &[SymbolId] {
        &self.roots
    }

    pub fn attributes_on(&self, id: SymbolId) -> &[SuppressionAttribute] {
        self.local_attributes.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn local_attributes(
        &self,
    ) -> impl Iterator<Item = (SymbolId, &[SuppressionAttribute])> {
        self.local_attributes
            .iter()
            .map(|(id, attrs)| (*id, attrs.as_slice()))
    }

    pub fn global_attributes(&self) -> &[SuppressionAttribute] {
        &self.global_attributes
    }

    /// Dotted/`+`-joined qualified name, for logging.
    pub fn fully_qualified_name(&self, id: SymbolId) -> String {
        let symbol = self.symbol(id);
        let Some(parent) = symbol.parent else {
            return symbol.name.clone();
        };
        let separator = match (self.symbol(parent).kind, symbol.kind) {
            (SymbolKind::Type, SymbolKind::Type) => "+",
            (_, SymbolKind::Member(_)) => ".#",
            _ => ".",
        };
        format!("{}{separator}{}", self.fully_qualified_name(parent), symbol.name)
    }
}

#[derive(Debug, Default)]
pub struct CompilationBuilder {
    symbols: Vec<Symbol>,
    files: Vec<String>,
    namespaces: FxHashMap<String, SymbolId>,
    local_attributes: FxHashMap<SymbolId, Vec<SuppressionAttribute>>,
    global_attributes: Vec<SuppressionAttribute>,
}

impl CompilationBuilder {
    pub fn add_file(&mut self, name: &str) -> FileId {
        self.files.push(name.to_owned());
        FileId((self.files.len() - 1) as u32)
    }

    /// Declare a namespace by fully-qualified dotted name, creating
    /// missing ancestors. Repeated declarations merge into the same
    /// logical symbol.
    pub fn add_namespace(&mut self, dotted: &str) -> SymbolId {
        let mut parent: Option<SymbolId> = None;
        let mut fqn = String::new();
        for segment in dotted.split('.') {
            if !fqn.is_empty() {
                fqn.push('.');
            }
            fqn.push_str(segment);
            parent = Some(match self.namespaces.get(&fqn) {
                Some(&id) => id,
                None => {
                    let id = self.push(Symbol::new(
                        segment.to_owned(),
                        SymbolKind::Namespace,
                        parent,
                    ));
                    self.namespaces.insert(fqn.clone(), id);
                    id
                }
            });
        }
        parent.expect("namespace name has at least one segment")
    }

    /// Declare a type. `owner` is the containing namespace or type;
    /// `None` places the type in the global namespace.
    pub fn add_type(&mut self, owner: Option<SymbolId>, name: &str, arity: u32) -> SymbolId {
        let mut symbol = Symbol::new(name.to_owned(), SymbolKind::Type, owner);
        symbol.arity = arity;
        self.push(symbol)
    }

    /// Declare a member on `owner`. `signature` is the ordered list
    /// of parameter type names for members that have a parameter
    /// list, `None` for those that do not (fields, properties).
    pub fn add_member(
        &mut self,
        owner: SymbolId,
        kind: MemberKind,
        name: &str,
        arity: u32,
        signature: Option<Vec<String>>,
    ) -> SymbolId {
        let mut symbol = Symbol::new(name.to_owned(), SymbolKind::Member(kind), Some(owner));
        symbol.arity = arity;
        symbol.signature = signature;
        self.push(symbol)
    }

    pub fn add_span(&mut self, symbol: SymbolId, file: FileId, start: u32, end: u32) {
        self.symbols[symbol.index()].spans.push(Span::new(file, start, end));
    }

    /// Attach a local suppression attribute to a declared symbol.
    pub fn add_attribute(&mut self, symbol: SymbolId, attribute: SuppressionAttribute) {
        self.local_attributes.entry(symbol).or_default().push(attribute);
    }

    /// Record a compilation-level suppression attribute.
    pub fn add_global_attribute(&mut self, attribute: SuppressionAttribute) {
        self.global_attributes.push(attribute);
    }

    /// Validate the graph and publish the immutable snapshot.
    pub fn freeze(mut self) -> Result<Compilation, BuildError> {
        self.validate_owners()?;
        self.validate_spans()?;

        let mut roots = Vec::new();
        let mut children: Vec<Vec<SymbolId>> = vec![Vec::new(); self.symbols.len()];
        for (index, symbol) in self.symbols.iter().enumerate() {
            let id = SymbolId(index as u32);
            match symbol.parent {
                Some(parent) => children[parent.index()].push(id),
                None => roots.push(id),
            }
        }

        // Ancestor chains, nearest first. Parents are always pushed
        // before their children, so the parent's chain is final here.
        for index in 0..self.symbols.len() {
            let Some(parent) = self.symbols[index].parent else {
                continue;
            };
            let mut chain = Vec::with_capacity(self.symbols[parent.index()].ancestors.len() + 1);
            chain.push(parent);
            chain.extend_from_slice(&self.symbols[parent.index()].ancestors);
            self.symbols[index].ancestors = chain;
        }

        Ok(Compilation {
            symbols: self.symbols,
            files: self.files,
            roots,
            children,
            namespaces: self.namespaces,
            local_attributes: self.local_attributes,
            global_attributes: self.global_attributes,
        })
    }

    fn push(&mut self, symbol: Symbol) -> SymbolId {
        self.symbols.push(symbol);
        SymbolId((self.symbols.len() - 1) as u32)
    }

    fn kind_of(&self, id: SymbolId) -> SymbolKind {
        self.symbols[id.index()].kind
    }

    fn validate_owners(&self) -> Result<(), BuildError> {
        for symbol in &self.symbols {
            let parent_kind = symbol.parent.map(|p| self.kind_of(p));
            match symbol.kind {
                SymbolKind::Namespace => {}
                SymbolKind::Type => match parent_kind {
                    None | Some(SymbolKind::Namespace) | Some(SymbolKind::Type) => {}
                    Some(_) => {
                        return Err(BuildError::InvalidTypeOwner { name: symbol.name.clone() });
                    }
                },
                SymbolKind::Member(MemberKind::Accessor) => match parent_kind {
                    Some(SymbolKind::Member(MemberKind::Property))
                    | Some(SymbolKind::Member(MemberKind::Event)) => {}
                    _ => {
                        return Err(BuildError::InvalidAccessorOwner {
                            name: symbol.name.clone(),
                        });
                    }
                },
                SymbolKind::Member(_) => match parent_kind {
                    Some(SymbolKind::Type) => {}
                    _ => {
                        return Err(BuildError::InvalidMemberOwner { name: symbol.name.clone() });
                    }
                },
            }
        }
        Ok(())
    }

    /// Declaring spans within one file must nest properly: two spans
    /// either contain one another or are disjoint.
    fn validate_spans(&self) -> Result<(), BuildError> {
        let mut per_file: FxHashMap<FileId, Vec<(u32, u32)>> = FxHashMap::default();
        for symbol in &self.symbols {
            for span in &symbol.spans {
                if span.start >= span.end {
                    return Err(BuildError::EmptySpan {
                        name: symbol.name.clone(),
                        start: span.start,
                        end: span.end,
                    });
                }
                per_file.entry(span.file).or_default().push((span.start, span.end));
            }
        }

        for (file, mut spans) in per_file {
            spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
            let mut open: Vec<(u32, u32)> = Vec::new();
            for &(start, end) in &spans {
                while let Some(&(_, open_end)) = open.last()
                    && open_end <= start
                {
                    open.pop();
                }
                if let Some(&(open_start, open_end)) = open.last()
                    && end > open_end
                {
                    return Err(BuildError::OverlappingSpans {
                        file: self.files[file.0 as usize].clone(),
                        first_start: open_start,
                        first_end: open_end,
                        second_start: start,
                        second_end: end,
                    });
                }
                open.push((start, end));
            }
        }
        Ok(())
    }
}
