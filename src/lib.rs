//! Suppression resolution for static-analysis diagnostics.
//!
//! Analyzers report diagnostics anchored either to a declared symbol
//! or to a raw lexical location. Authors silence selected diagnostics
//! with suppression attributes, placed directly on a declaration or
//! at the compilation level with an explicit scope and target. This
//! crate decides, for every reported diagnostic, whether it is
//! suppressed given all attributes visible in the compilation.
//!
//! The front end hands over an immutable snapshot through
//! [`CompilationBuilder`]; [`SuppressionEngine`] then answers
//! [`SuppressionEngine::is_suppressed`] for single diagnostics or
//! filters a whole batch in parallel, order preserved.
//!
//! Suppression configuration can never fail: malformed targets,
//! unrecognized scopes and unresolvable names contribute no
//! suppression and nothing else. The engine fails closed toward
//! visibility — it never suppresses when resolution is uncertain.

pub mod attribute;
pub mod compilation;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod index;
pub mod locate;
pub mod resolve;
pub mod scope;
pub mod symbol;
pub mod target;


pub use attribute::{SuppressionAttribute, SuppressionKey};
pub use compilation::{Compilation, CompilationBuilder};
pub use diagnostic::{Diagnostic, DiagnosticAnchor};
pub use engine::SuppressionEngine;
pub use error::BuildError;
pub use index::SuppressionIndex;
pub use scope::ScopeKind;
pub use symbol::{FileId, MemberKind, Span, Symbol, SymbolId, SymbolKind};
