//! Suppression attribute data and the typed decode step.
//!
//! The front end reads attribute applications off declarations and
//! the compilation unit and hands them over as loosely-typed argument
//! bags. [`SuppressionAttribute::decode`] turns one bag into typed
//! data, tolerating missing or malformed fields: a bag without the
//! two positional string arguments is not a suppression attribute at
//! all, while malformed optional named arguments are simply dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The (category, id) pair a suppression matches diagnostics against.
/// Both parts must match the same attribute; neither suppresses alone.
pub type SuppressionKey = (String, String);

/// One decoded suppression attribute, immutable once decoded.
///
/// `scope` and `target` are the raw named-argument strings. They are
/// classified and parsed later, when the suppression table is built;
/// keeping them raw here keeps decoding infallible for valid
/// (category, id) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionAttribute {
    pub category: String,
    pub id: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

impl SuppressionAttribute {
    pub fn new(category: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            id: id.into(),
            scope: None,
            target: None,
        }
    }

    /// A compilation-level attribute carrying scope and target.
    pub fn global(
        category: impl Into<String>,
        id: impl Into<String>,
        scope: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            id: id.into(),
            scope: Some(scope.into()),
            target: Some(target.into()),
        }
    }

    /// Decode an attribute argument bag.
    ///
    /// The bag is an object with an `arguments` array (positional
    /// constructor arguments) and an optional `named` object. The
    /// first two positional arguments must be strings (category, id);
    /// anything else means this is not a usable suppression attribute
    /// and `None` is returned. `Scope`/`Target` named arguments are
    /// picked up when they are strings and ignored otherwise.
    pub fn decode(bag: &Value) -> Option<Self> {
        let object = bag.as_object()?;
        let arguments = object.get("arguments")?.as_array()?;
        let category = arguments.first()?.as_str()?;
        let id = arguments.get(1)?.as_str()?;

        let named = object.get("named").and_then(Value::as_object);
        let named_string = |key: &str| -> Option<String> {
            named?.get(key)?.as_str().map(str::to_owned)
        };

        Some(Self {
            category: category.to_owned(),
            id: id.to_owned(),
            scope: named_string("Scope"),
            target: named_string("Target"),
        })
    }

    pub(crate) fn key(&self) -> SuppressionKey {
        (self.category.clone(), self.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_positional_only() {
        let bag = json!({ "arguments": ["Test", "Declaration"] });
        let attr = SuppressionAttribute::decode(&bag).unwrap();
        assert_eq!(attr, SuppressionAttribute::new("Test", "Declaration"));
    }

    #[test]
    fn decode_with_scope_and_target() {
        let bag = json!({
            "arguments": ["Test", "Declaration"],
            "named": { "Scope": "Type", "Target": "C" }
        });
        let attr = SuppressionAttribute::decode(&bag).unwrap();
        assert_eq!(
            attr,
            SuppressionAttribute::global("Test", "Declaration", "Type", "C")
        );
    }

    #[test]
    fn decode_missing_positional_arguments() {
        assert_eq!(SuppressionAttribute::decode(&json!({ "arguments": [] })), None);
        assert_eq!(
            SuppressionAttribute::decode(&json!({ "arguments": ["Test"] })),
            None
        );
        assert_eq!(SuppressionAttribute::decode(&json!({})), None);
        assert_eq!(SuppressionAttribute::decode(&json!("Test")), None);
    }

    #[test]
    fn decode_non_string_positional_arguments() {
        let bag = json!({ "arguments": ["Test", 42] });
        assert_eq!(SuppressionAttribute::decode(&bag), None);
    }

    #[test]
    fn decode_drops_malformed_named_arguments() {
        // A non-string Scope is dropped, not an error; named argument
        // names are case-sensitive, so `scope` is not `Scope`.
        let bag = json!({
            "arguments": ["Test", "Declaration"],
            "named": { "Scope": 1, "scope": "Type", "Target": "C" }
        });
        let attr = SuppressionAttribute::decode(&bag).unwrap();
        assert_eq!(attr.scope, None);
        assert_eq!(attr.target, Some("C".to_owned()));
    }
}
