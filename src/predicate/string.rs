//! Substring assertions

use serde_json::Value;

use super::{bool_property, Assertion, Configurable, Operands};
use crate::error::PropertyError;

/// Which substring relation a [`StringMatch`] tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    /// The check value contains the right-hand value.
    Contains,
    /// The check value starts with the right-hand value.
    StartsWith,
    /// The check value ends with the right-hand value.
    EndsWith,
}

/// Substring relation between the check value (haystack) and the right-hand
/// value (needle).
///
/// Case-insensitive unless `caseSensitive` is set. Non-string operands never match.
#[derive(Debug, Clone)]
pub struct StringMatch {
    kind: StringKind,
    operands: Operands,
    case_sensitive: bool,
}

impl StringMatch {
    /// Create a case-insensitive substring assertion.
    pub fn new(kind: StringKind, haystack: Value, needle: Value) -> Self {
        Self {
            kind,
            operands: Operands::new(haystack, needle),
            case_sensitive: false,
        }
    }

    /// The relation being tested.
    pub fn kind(&self) -> StringKind {
        self.kind
    }

    /// Switch between case-sensitive and case-insensitive matching.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Names accepted by [`Configurable::set_property`].
    pub const PROPERTIES: &'static [&'static str] = &["value", "caseSensitive"];

    fn compute(&self) -> bool {
        let (Value::String(haystack), Value::String(needle)) =
            (&self.operands.check, &self.operands.value)
        else {
            return false;
        };
        let (haystack, needle) = if self.case_sensitive {
            (haystack.clone(), needle.clone())
        } else {
            (haystack.to_ascii_lowercase(), needle.to_ascii_lowercase())
        };
        match self.kind {
            StringKind::Contains => haystack.contains(&needle),
            StringKind::StartsWith => haystack.starts_with(&needle),
            StringKind::EndsWith => haystack.ends_with(&needle),
        }
    }
}

/// Create a "contains" assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(contains(json!("Ciao Mondo"), json!("MONDO")).evaluate());
/// assert!(!contains(json!("Ciao Mondo"), json!("MONDO")).case_sensitive(true).evaluate());
/// ```
pub fn contains(haystack: Value, needle: Value) -> StringMatch {
    StringMatch::new(StringKind::Contains, haystack, needle)
}

/// Create a "starts with" assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(starts_with(json!("https://example.com"), json!("HTTP")).evaluate());
/// ```
pub fn starts_with(haystack: Value, prefix: Value) -> StringMatch {
    StringMatch::new(StringKind::StartsWith, haystack, prefix)
}

/// Create an "ends with" assertion.
pub fn ends_with(haystack: Value, suffix: Value) -> StringMatch {
    StringMatch::new(StringKind::EndsWith, haystack, suffix)
}

impl Assertion for StringMatch {
    fn evaluate(&self) -> bool {
        self.operands.memo.get_or_eval(|| self.compute())
    }

    fn last_result(&self) -> Option<bool> {
        self.operands.memo.peek()
    }
}

impl Configurable for StringMatch {
    fn check_value(&self) -> &Value {
        &self.operands.check
    }

    fn set_check_value(&mut self, value: Value) {
        self.operands.set_check(value);
    }

    fn set_value(&mut self, value: Value) {
        self.operands.set_value(value);
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        match name {
            "value" => self.operands.value = value.clone(),
            "caseSensitive" => self.case_sensitive = bool_property(name, value)?,
            _ => return Err(PropertyError::Unknown(name.to_string())),
        }
        self.operands.memo.clear();
        Ok(())
    }
}
