use crate::symbol::{Span, SymbolId};
use serde::{Deserialize, Serialize};

/// Where a diagnostic is anchored: the declared symbol an analyzer
/// reported it on, or a raw lexical location with no owning symbol
/// (token- and trivia-level diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticAnchor {
    Symbol(SymbolId),
    Location(Span),
}

/// One raw diagnostic as produced by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: String,
    pub id: String,
    pub anchor: DiagnosticAnchor,
}

impl Diagnostic {
    pub fn on_symbol(
        category: impl Into<String>,
        id: impl Into<String>,
        symbol: SymbolId,
    ) -> Self {
        Self {
            category: category.into(),
            id: id.into(),
            anchor: DiagnosticAnchor::Symbol(symbol),
        }
    }

    pub fn at_location(category: impl Into<String>, id: impl Into<String>, span: Span) -> Self {
        Self {
            category: category.into(),
            id: id.into(),
            anchor: DiagnosticAnchor::Location(span),
        }
    }
}
