//! Mapping of symbol-less diagnostic locations onto declarations.
//!
//! Token- and trivia-level diagnostics carry only a raw source
//! location. To decide whether such a diagnostic is suppressed we
//! need the innermost declared symbol whose declaring span contains
//! the location. Declaring spans nest properly (enforced at freeze
//! time), so the table is a per-file vector sorted by start offset
//! and lookup is a backward interval scan — no parent-pointer
//! chasing through a syntax tree.

use crate::compilation::Compilation;
use crate::symbol::{FileId, Span, SymbolId};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy)]
struct SpanEntry {
    start: u32,
    end: u32,
    symbol: SymbolId,
}

/// Per-file table of declaring spans, sorted by (start ascending,
/// end descending) so that an enclosing span sorts before the spans
/// nested inside it.
#[derive(Debug)]
pub struct SpanTable {
    by_file: FxHashMap<FileId, Vec<SpanEntry>>,
}

impl SpanTable {
    pub fn build(compilation: &Compilation) -> Self {
        let mut by_file: FxHashMap<FileId, Vec<SpanEntry>> = FxHashMap::default();
        for (id, symbol) in compilation.symbols() {
            for span in &symbol.spans {
                by_file.entry(span.file).or_default().push(SpanEntry {
                    start: span.start,
                    end: span.end,
                    symbol: id,
                });
            }
        }
        for entries in by_file.values_mut() {
            entries.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        }
        Self { by_file }
    }

    /// The innermost declared symbol whose declaring span contains
    /// the location, or `None` when the location lies outside all
    /// declarations.
    pub fn innermost(&self, location: &Span) -> Option<SymbolId> {
        let entries = self.by_file.get(&location.file)?;
        // Scanning right to left from the last span starting at or
        // before the location, the first containing span is the
        // innermost one: any span nested inside it would have sorted
        // later and been visited first.
        let mut i = entries.partition_point(|e| e.start <= location.start);
        while i > 0 {
            i -= 1;
            let entry = &entries[i];
            if location.end <= entry.end {
                return Some(entry.symbol);
            }
        }
        None
    }
}
