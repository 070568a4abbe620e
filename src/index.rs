//! The suppression table built once per compilation snapshot.
//!
//! [`SuppressionIndex::build`] walks every local and global
//! suppression attribute, decodes scope and target, resolves the
//! symbol set, and records symbol → {(category, id)}. Unresolvable
//! or invalid attributes are recorded nowhere: they are silent
//! no-ops, logged at debug level, never configuration errors.

use crate::attribute::{SuppressionAttribute, SuppressionKey};
use crate::compilation::Compilation;
use crate::locate::SpanTable;
use crate::resolve::resolve_target;
use crate::scope::ScopeKind;
use crate::symbol::{Span, SymbolId};
use crate::target::parse_target;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct SuppressionIndex {
    /// Compilation-level suppressions with neither scope nor target:
    /// they cover every diagnostic of that (category, id).
    blanket: FxHashSet<SuppressionKey>,
    /// Keys suppressing a symbol itself.
    direct: FxHashMap<SymbolId, FxHashSet<SuppressionKey>>,
    /// Keys suppressing a symbol and everything declared beneath it.
    subtree: FxHashMap<SymbolId, FxHashSet<SuppressionKey>>,
    spans: SpanTable,
}

impl SuppressionIndex {
    pub fn build(compilation: &Compilation) -> Self {
        let mut index = Self {
            blanket: FxHashSet::default(),
            direct: FxHashMap::default(),
            subtree: FxHashMap::default(),
            spans: SpanTable::build(compilation),
        };

        for (symbol, attributes) in compilation.local_attributes() {
            for attribute in attributes {
                // A local attribute applies to the symbol it is
                // attached to; scope/target named arguments on it are
                // ignored. It also marks the symbol self-suppressing
                // for span-based lookups.
                index.insert(symbol, attribute.key(), true);
            }
        }

        for attribute in compilation.global_attributes() {
            index.add_global(compilation, attribute);
        }

        trace!(
            blanket = index.blanket.len(),
            symbols = index.direct.len(),
            "suppression index built"
        );
        index
    }

    fn add_global(&mut self, compilation: &Compilation, attribute: &SuppressionAttribute) {
        match (&attribute.scope, &attribute.target) {
            (None, None) => {
                self.blanket.insert(attribute.key());
            }
            (Some(_), None) | (None, Some(_)) => {
                debug!(
                    "suppression ({}, {}) carries scope or target but not both; ignored",
                    attribute.category, attribute.id
                );
            }
            (Some(scope), Some(target)) => {
                let kind = ScopeKind::classify(scope);
                if kind == ScopeKind::Invalid {
                    debug!("unrecognized suppression scope `{scope}`; ignored");
                    return;
                }
                let Some(parsed) = parse_target(target) else {
                    debug!("malformed suppression target `{target}`; ignored");
                    return;
                };
                let resolved = resolve_target(compilation, kind, &parsed);
                if resolved.is_empty() {
                    debug!("suppression target `{target}` ({kind:?}) resolved to nothing; ignored");
                    return;
                }
                for symbol in resolved.symbols {
                    self.insert(symbol, attribute.key(), resolved.covers_descendants);
                }
            }
        }
    }

    fn insert(&mut self, symbol: SymbolId, key: SuppressionKey, covers_descendants: bool) {
        if covers_descendants {
            self.subtree.entry(symbol).or_default().insert(key.clone());
        }
        self.direct.entry(symbol).or_default().insert(key);
    }

    /// Whether `key` is suppressed everywhere in the compilation.
    pub fn is_blanket(&self, key: &SuppressionKey) -> bool {
        self.blanket.contains(key)
    }

    /// Whether `key` is suppressed on `symbol`: on the symbol
    /// itself, or by a subtree-covering suppression on any ancestor.
    pub fn is_suppressed_on(
        &self,
        compilation: &Compilation,
        symbol: SymbolId,
        key: &SuppressionKey,
    ) -> bool {
        if self.direct.get(&symbol).is_some_and(|keys| keys.contains(key)) {
            return true;
        }
        compilation
            .symbol(symbol)
            .ancestors()
            .iter()
            .any(|ancestor| self.subtree.get(ancestor).is_some_and(|keys| keys.contains(key)))
    }

    /// Innermost declared symbol at a raw location, if any.
    pub(crate) fn locate(&self, location: &Span) -> Option<SymbolId> {
        self.spans.innermost(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils_test::{attr, global_attr, sample_graph};

    fn key(category: &str, id: &str) -> SuppressionKey {
        (category.to_owned(), id.to_owned())
    }

    #[test]
    fn local_attribute_suppresses_symbol_and_subtree() {
        let mut graph = sample_graph();
        graph.builder.add_attribute(graph.c, attr("Test", "Declaration"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        let k = key("Test", "Declaration");
        assert!(index.is_suppressed_on(&compilation, graph.c, &k));
        // Members and nested types beneath the type are covered.
        assert!(index.is_suppressed_on(&compilation, graph.m1, &k));
        assert!(index.is_suppressed_on(&compilation, graph.d, &k));
        assert!(index.is_suppressed_on(&compilation, graph.get_p, &k));
        // A sibling type is not.
        assert!(!index.is_suppressed_on(&compilation, graph.e, &k));
    }

    #[test]
    fn category_and_id_must_both_match() {
        let mut graph = sample_graph();
        graph.builder.add_attribute(graph.c, attr("Test", "Declaration"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        assert!(!index.is_suppressed_on(&compilation, graph.c, &key("Test", "Other")));
        assert!(!index.is_suppressed_on(&compilation, graph.c, &key("Other", "Declaration")));
    }

    #[test]
    fn namespace_scope_does_not_reach_declarations_inside() {
        let mut graph = sample_graph();
        graph
            .builder
            .add_global_attribute(global_attr("Test", "Declaration", "Namespace", "N.N1"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        let k = key("Test", "Declaration");
        assert!(index.is_suppressed_on(&compilation, graph.n1, &k));
        assert!(!index.is_suppressed_on(&compilation, graph.n2, &k));
        assert!(!index.is_suppressed_on(&compilation, graph.c1, &k));
    }

    #[test]
    fn namespace_and_descendants_covers_the_closure() {
        let mut graph = sample_graph();
        graph.builder.add_global_attribute(global_attr(
            "Test",
            "Declaration",
            "namespaceanddescendants",
            "N.N1",
        ));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        let k = key("Test", "Declaration");
        for symbol in [graph.n1, graph.n2, graph.n3, graph.c1] {
            assert!(index.is_suppressed_on(&compilation, symbol, &k));
        }
        // The parent namespace and unrelated namespaces stay visible.
        assert!(!index.is_suppressed_on(&compilation, graph.n, &k));
        assert!(!index.is_suppressed_on(&compilation, graph.n4, &k));
        assert!(!index.is_suppressed_on(&compilation, graph.n5, &k));
    }

    #[test]
    fn blanket_suppression_requires_neither_scope_nor_target() {
        let mut graph = sample_graph();
        graph.builder.add_global_attribute(attr("Test", "Comment"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        assert!(index.is_blanket(&key("Test", "Comment")));
        assert!(!index.is_blanket(&key("Test", "Declaration")));
    }

    #[test]
    fn scope_without_target_and_target_without_scope_are_inert() {
        let mut graph = sample_graph();
        let mut scope_only = attr("Test", "Declaration");
        scope_only.scope = Some("Type".to_owned());
        let mut target_only = attr("Test", "Declaration");
        target_only.target = Some("C".to_owned());
        graph.builder.add_global_attribute(scope_only);
        graph.builder.add_global_attribute(target_only);
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        let k = key("Test", "Declaration");
        assert!(!index.is_blanket(&k));
        assert!(!index.is_suppressed_on(&compilation, graph.c, &k));
    }

    #[test]
    fn invalid_scope_and_unresolved_targets_are_inert() {
        let mut graph = sample_graph();
        graph
            .builder
            .add_global_attribute(global_attr("Test", "Declaration", "Class", "C"));
        graph
            .builder
            .add_global_attribute(global_attr("Test", "Declaration", "Type", "Missing"));
        graph
            .builder
            .add_global_attribute(global_attr("Test", "Declaration", "Type", "N..C"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        assert!(!index.is_suppressed_on(&compilation, graph.c, &key("Test", "Declaration")));
    }

    #[test]
    fn duplicate_attributes_collapse_to_one_entry() {
        let mut graph = sample_graph();
        graph.builder.add_attribute(graph.c, attr("Test", "Declaration"));
        graph.builder.add_attribute(graph.c, attr("Test", "Declaration"));
        graph
            .builder
            .add_global_attribute(global_attr("Test", "Declaration", "Type", "C"));
        graph
            .builder
            .add_global_attribute(global_attr("Test", "Declaration", "Type", "C"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        let k = key("Test", "Declaration");
        assert_eq!(index.direct[&graph.c].len(), 1);
        assert!(index.is_suppressed_on(&compilation, graph.c, &k));
    }

    #[test]
    fn overlapping_suppressions_union() {
        let mut graph = sample_graph();
        // A type-scoped suppression nested inside a broader
        // namespace-and-descendants suppression for another id.
        graph.builder.add_global_attribute(global_attr(
            "Test",
            "Outer",
            "NamespaceAndDescendants",
            "N",
        ));
        graph
            .builder
            .add_global_attribute(global_attr("Test", "Inner", "Type", "N.N1.C1"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        assert!(index.is_suppressed_on(&compilation, graph.c1, &key("Test", "Outer")));
        assert!(index.is_suppressed_on(&compilation, graph.c1, &key("Test", "Inner")));
        assert!(index.is_suppressed_on(&compilation, graph.n3, &key("Test", "Outer")));
        assert!(!index.is_suppressed_on(&compilation, graph.n3, &key("Test", "Inner")));
    }

    #[test]
    fn member_scope_narrows_to_the_named_member() {
        let mut graph = sample_graph();
        graph
            .builder
            .add_global_attribute(global_attr("Test", "Declaration", "Member", "C.#M1"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        let k = key("Test", "Declaration");
        assert!(index.is_suppressed_on(&compilation, graph.m1, &k));
        assert!(!index.is_suppressed_on(&compilation, graph.m2, &k));
        assert!(!index.is_suppressed_on(&compilation, graph.c, &k));
    }

    #[test]
    fn property_suppression_covers_its_accessors() {
        let mut graph = sample_graph();
        graph.builder.add_attribute(graph.p, attr("Test", "Declaration"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        let k = key("Test", "Declaration");
        assert!(index.is_suppressed_on(&compilation, graph.get_p, &k));
        assert!(index.is_suppressed_on(&compilation, graph.set_p, &k));
        assert!(!index.is_suppressed_on(&compilation, graph.m1, &k));
    }

    #[test]
    fn delegate_suppression_covers_its_invoke_member() {
        let mut graph = sample_graph();
        graph.builder.add_attribute(graph.del, attr("Test", "Declaration"));
        let compilation = graph.builder.freeze().unwrap();
        let index = SuppressionIndex::build(&compilation);

        assert!(index.is_suppressed_on(&compilation, graph.invoke, &key("Test", "Declaration")));
    }
}
