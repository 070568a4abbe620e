//! Resolution of (scope, parsed target) pairs to concrete symbols.
//!
//! Resolution is pure and fail-closed: an unknown name, an ambiguous
//! member, or a scope/target shape mismatch yields an empty result,
//! never an error and never a broader match than the target names.

use crate::compilation::Compilation;
use crate::scope::ScopeKind;
use crate::symbol::SymbolId;
use crate::target::{ParsedTarget, TypePath};
use tracing::trace;

/// The symbol set a suppression denotes, and whether it covers the
/// declared subtree beneath each symbol (type and member scopes do;
/// plain namespace scope covers only the namespace itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScope {
    pub symbols: Vec<SymbolId>,
    pub covers_descendants: bool,
}

impl ResolvedScope {
    fn empty() -> Self {
        Self { symbols: Vec::new(), covers_descendants: false }
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

pub fn resolve_target(
    compilation: &Compilation,
    scope: ScopeKind,
    target: &ParsedTarget,
) -> ResolvedScope {
    match scope {
        ScopeKind::Namespace => resolve_namespace(compilation, target, false),
        ScopeKind::NamespaceAndDescendants => resolve_namespace(compilation, target, true),
        ScopeKind::Type => resolve_type(compilation, target),
        ScopeKind::Member => resolve_member(compilation, target),
        ScopeKind::Invalid => ResolvedScope::empty(),
    }
}

fn resolve_namespace(
    compilation: &Compilation,
    target: &ParsedTarget,
    descendants: bool,
) -> ResolvedScope {
    let Some(path) = target.as_namespace_path() else {
        return ResolvedScope::empty();
    };
    let dotted = path.join(".");
    let Some(namespace) = compilation.namespace(&dotted) else {
        trace!("suppression names an unknown namespace `{dotted}`");
        return ResolvedScope::empty();
    };
    // With descendants, every namespace, type and member beneath this
    // one is covered through the ancestor walk at lookup time.
    ResolvedScope { symbols: vec![namespace], covers_descendants: descendants }
}

fn resolve_type(compilation: &Compilation, target: &ParsedTarget) -> ResolvedScope {
    let Some(path) = target.as_type_path() else {
        return ResolvedScope::empty();
    };
    let Some(symbol) = find_type(compilation, &path) else {
        trace!("suppression names an unknown type");
        return ResolvedScope::empty();
    };
    ResolvedScope { symbols: vec![symbol], covers_descendants: true }
}

fn resolve_member(compilation: &Compilation, target: &ParsedTarget) -> ResolvedScope {
    let Some(view) = target.as_member() else {
        return ResolvedScope::empty();
    };
    let Some(owner) = find_type(compilation, &view.owner) else {
        trace!("suppression names member `{}` on an unknown type", view.name);
        return ResolvedScope::empty();
    };

    let mut candidates: Vec<SymbolId> = compilation
        .children(owner)
        .iter()
        .copied()
        .filter(|&id| {
            let symbol = compilation.symbol(id);
            symbol.kind.is_member() && symbol.name == view.name
        })
        .collect();
    if let Some(arity) = view.arity {
        candidates.retain(|&id| compilation.symbol(id).arity == arity);
    }
    if let Some(params) = view.params {
        candidates.retain(|&id| compilation.symbol(id).signature.as_deref() == Some(params));
    }

    match candidates.as_slice() {
        &[member] => ResolvedScope { symbols: vec![member], covers_descendants: true },
        [] => {
            trace!("suppression member target `{}` matches nothing", view.name);
            ResolvedScope::empty()
        }
        _ => {
            // Several overloads and nothing narrowing them down:
            // never "suppress all candidates".
            trace!("suppression member target `{}` is ambiguous", view.name);
            ResolvedScope::empty()
        }
    }
}

/// Walk a type path: namespace prefix, then the nested-type chain,
/// matching name and arity exactly at each step.
fn find_type(compilation: &Compilation, path: &TypePath<'_>) -> Option<SymbolId> {
    let mut children: &[SymbolId] = if path.namespace.is_empty() {
        compilation.top_level()
    } else {
        let namespace = compilation.namespace(&path.namespace.join("."))?;
        compilation.children(namespace)
    };

    let mut current = None;
    for &(name, arity) in &path.chain {
        let found = children.iter().copied().find(|&id| {
            let symbol = compilation.symbol(id);
            symbol.kind.is_type() && symbol.name == name && symbol.arity == arity
        })?;
        children = compilation.children(found);
        current = Some(found);
    }
    current
}
