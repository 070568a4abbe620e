//! Classification of the `Scope` named argument.

use serde::{Deserialize, Serialize};

/// The kind of entity a global suppression's target names.
///
/// Anything outside the closed literal set classifies as `Invalid`,
/// including near-miss words like `"Class"`; an invalid scope never
/// contributes a suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    Namespace,
    NamespaceAndDescendants,
    Type,
    Member,
    Invalid,
}

impl ScopeKind {
    /// Case-insensitive match against the exact literal set.
    pub fn classify(text: &str) -> ScopeKind {
        if text.eq_ignore_ascii_case("namespace") {
            ScopeKind::Namespace
        } else if text.eq_ignore_ascii_case("namespaceanddescendants") {
            ScopeKind::NamespaceAndDescendants
        } else if text.eq_ignore_ascii_case("type") {
            ScopeKind::Type
        } else if text.eq_ignore_ascii_case("member") {
            ScopeKind::Member
        } else {
            ScopeKind::Invalid
        }
    }
}
