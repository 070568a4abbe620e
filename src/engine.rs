//! The suppression engine façade.
//!
//! One engine per compilation snapshot. The suppression index is
//! built in full on first use and then published behind a
//! `OnceLock`: concurrent first callers block on the single build,
//! and every lookup afterwards is a stateless read, safely evaluable
//! in parallel in any order.

use crate::compilation::Compilation;
use crate::diagnostic::{Diagnostic, DiagnosticAnchor};
use crate::index::SuppressionIndex;
use rayon::prelude::*;
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
pub struct SuppressionEngine {
    compilation: Arc<Compilation>,
    index: OnceLock<SuppressionIndex>,
}

impl SuppressionEngine {
    pub fn new(compilation: Arc<Compilation>) -> Self {
        Self { compilation, index: OnceLock::new() }
    }

    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    fn index(&self) -> &SuppressionIndex {
        self.index.get_or_init(|| SuppressionIndex::build(&self.compilation))
    }

    /// Whether the diagnostic is silenced by a suppression attribute
    /// visible in the compilation.
    ///
    /// A diagnostic anchored to a symbol is checked against that
    /// symbol's suppression set and then up its containment chain. A
    /// diagnostic at a raw location is first mapped onto the
    /// innermost enclosing declaration; one outside all declarations
    /// can only be silenced by a blanket suppression.
    pub fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        let index = self.index();
        let key = (diagnostic.category.clone(), diagnostic.id.clone());
        if index.is_blanket(&key) {
            return true;
        }
        let symbol = match &diagnostic.anchor {
            DiagnosticAnchor::Symbol(symbol) => Some(*symbol),
            DiagnosticAnchor::Location(span) => index.locate(span),
        };
        match symbol {
            Some(symbol) => index.is_suppressed_on(&self.compilation, symbol, &key),
            None => false,
        }
    }

    /// Order-preserving filter yielding only non-suppressed
    /// diagnostics. Evaluated in parallel; the index is published
    /// before the parallel walk starts.
    pub fn filter(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        self.index();
        diagnostics
            .into_par_iter()
            .filter(|diagnostic| !self.is_suppressed(diagnostic))
            .collect()
    }
}
