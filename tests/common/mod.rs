use quell::{Compilation, Diagnostic, DiagnosticAnchor, SuppressionEngine};

/// Flag every declared symbol whose name starts with `prefix` under
/// ("Test", "Declaration"), the way the declaration analyzers in the
/// engine's scenarios do.
pub fn warn_on_name_prefix(compilation: &Compilation, prefix: &str) -> Vec<Diagnostic> {
    compilation
        .symbols()
        .filter(|(_, symbol)| symbol.name.starts_with(prefix))
        .map(|(id, _)| Diagnostic::on_symbol("Test", "Declaration", id))
        .collect()
}

/// Run the engine's filter and return the names of the symbols still
/// reported, in order.
pub fn reported_names(engine: &SuppressionEngine, diagnostics: Vec<Diagnostic>) -> Vec<String> {
    engine
        .filter(diagnostics)
        .into_iter()
        .map(|diagnostic| match diagnostic.anchor {
            DiagnosticAnchor::Symbol(symbol) => {
                engine.compilation().symbol(symbol).name.clone()
            }
            DiagnosticAnchor::Location(span) => format!("{}..{}", span.start, span.end),
        })
        .collect()
}
