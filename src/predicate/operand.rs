//! Operand coercion rules
//!
//! Loose comparisons follow the usual dynamic-language conventions for
//! JSON values: numbers compare numerically, numeric strings compare as
//! numbers, booleans compare by truthiness.

use std::cmp::Ordering;

use serde_json::Value;

/// Whether a value counts as "empty".
///
/// `null`, `false`, `0`, `0.0`, `""`, `"0"`, `[]` and `{}` are empty.
///
/// ```rust
/// use assertree::predicate::is_empty_value;
/// use serde_json::json;
///
/// assert!(is_empty_value(&json!("0")));
/// assert!(!is_empty_value(&json!(" ")));
/// ```
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Name of the JSON kind of a value.
///
/// Numbers report `"integer"` or `"float"`.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a string the way numeric strings are recognised: surrounding
/// whitespace allowed, decimal or exponent notation, finite values only.
pub(crate) fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let alphabetic = |c: char| c.is_ascii_alphabetic() && c != 'e' && c != 'E';
    if trimmed.is_empty() || trimmed.chars().any(alphabetic) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric view of a value; strings only count when `allow_strings` is set.
pub(crate) fn as_number(value: &Value, allow_strings: bool) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if allow_strings => parse_numeric(s),
        _ => None,
    }
}

/// Exact integer view of a value, covering the whole `i64` and `u64` ranges.
fn as_integer(value: &Value, allow_strings: bool) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        Value::String(s) if allow_strings => s.trim().parse::<i128>().ok(),
        _ => None,
    }
}

/// Integers compare exactly; floats are only involved when either side is one.
fn numeric_cmp(left: &Value, right: &Value, allow_strings: bool) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (
        as_integer(left, allow_strings),
        as_integer(right, allow_strings),
    ) {
        return Some(a.cmp(&b));
    }
    let left = as_number(left, allow_strings)?;
    let right = as_number(right, allow_strings)?;
    left.partial_cmp(&right)
}

/// Order two values numerically. Anything that is not a JSON number does not order.
pub(crate) fn compare_numbers(left: &Value, right: &Value) -> Option<Ordering> {
    numeric_cmp(left, right, false)
}

/// Loose equality between two JSON values.
///
/// ```rust
/// use assertree::predicate::loose_eq;
/// use serde_json::json;
///
/// assert!(loose_eq(&json!(5), &json!("5")));
/// assert!(loose_eq(&json!(5), &json!(5.0)));
/// assert!(loose_eq(&json!(null), &json!(false)));
/// assert!(!loose_eq(&json!("abc"), &json!(0)));
/// ```
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => is_empty_value(other),
        (Value::Bool(b), other) | (other, Value::Bool(b)) => !is_empty_value(other) == *b,
        (Value::Number(_), Value::Number(_))
        | (Value::Number(_), Value::String(_))
        | (Value::String(_), Value::Number(_)) => {
            numeric_cmp(left, right, true) == Some(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => match numeric_cmp(left, right, true) {
            Some(ordering) => ordering == Ordering::Equal,
            None => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| loose_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| loose_eq(x, y)))
        }
        _ => false,
    }
}
