//! Type and emptiness checks on a single value

use serde_json::Value;

use super::operand::{as_number, is_empty_value, kind_of, parse_numeric};
use super::{bool_property, Assertion, Configurable, Operands};
use crate::error::PropertyError;

/// Which check a [`TypeCheck`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Value is `null`.
    Null,
    /// Value is anything but `null`.
    NotNull,
    /// Value is empty (see [`is_empty_value`]).
    Empty,
    /// Value is not empty.
    NotEmpty,
    /// Value is an array or a mapping.
    Array,
    /// Value is a string; empty strings only when `allowEmpty` is set.
    String,
    /// Value is a number, or a numeric string unless `strict`.
    Numeric,
    /// Value is an integer, or integral numeric text unless `strict`.
    Int,
    /// Value has a fractional part, or is a JSON float when `strict`.
    Float,
    /// Value has the JSON kind named by the right-hand value.
    Instance,
}

impl TypeKind {
    /// Names accepted by [`Configurable::set_property`] for this kind.
    pub fn properties(self) -> &'static [&'static str] {
        match self {
            TypeKind::String => &["allowEmpty"],
            TypeKind::Numeric | TypeKind::Int | TypeKind::Float => &["strict"],
            TypeKind::Instance => &["value"],
            _ => &[],
        }
    }
}

/// A single-value type check.
#[derive(Debug, Clone)]
pub struct TypeCheck {
    kind: TypeKind,
    operands: Operands,
    strict: bool,
    allow_empty: bool,
}

impl TypeCheck {
    /// Create a check with default options.
    pub fn new(kind: TypeKind, check: Value) -> Self {
        Self {
            kind,
            operands: Operands::new(check, Value::Null),
            strict: false,
            allow_empty: false,
        }
    }

    /// The check being performed.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Only accept JSON numbers for numeric checks.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Accept the empty string as a string.
    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    fn compute(&self) -> bool {
        let value = &self.operands.check;
        match self.kind {
            TypeKind::Null => value.is_null(),
            TypeKind::NotNull => !value.is_null(),
            TypeKind::Empty => is_empty_value(value),
            TypeKind::NotEmpty => !is_empty_value(value),
            TypeKind::Array => value.is_array() || value.is_object(),
            TypeKind::String => match value {
                Value::String(s) => self.allow_empty || !s.is_empty(),
                _ => false,
            },
            TypeKind::Numeric => as_number(value, !self.strict).is_some(),
            TypeKind::Int => self.is_int(value),
            TypeKind::Float => self.is_float(value),
            TypeKind::Instance => match &self.operands.value {
                Value::String(wanted) if wanted == "number" => value.is_number(),
                Value::String(wanted) => kind_of(value) == wanted,
                _ => false,
            },
        }
    }

    fn is_int(&self, value: &Value) -> bool {
        match value {
            Value::Number(n) if self.strict => n.is_i64(),
            Value::Number(n) => n.is_i64() || n.as_f64().is_some_and(integral_in_i64),
            Value::String(s) if !self.strict => s.trim().parse::<i64>().is_ok(),
            _ => false,
        }
    }

    fn is_float(&self, value: &Value) -> bool {
        match value {
            Value::Number(n) if self.strict => n.is_f64(),
            Value::Number(n) => n.as_f64().is_some_and(|f| f.fract() != 0.0),
            Value::String(s) if !self.strict => {
                parse_numeric(s).is_some_and(|f| f.fract() != 0.0)
            }
            _ => false,
        }
    }
}

// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn integral_in_i64(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Check for `null`.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(is_null(json!(null)).evaluate());
/// assert!(!is_null(json!(0)).evaluate());
/// ```
pub fn is_null(value: Value) -> TypeCheck {
    TypeCheck::new(TypeKind::Null, value)
}

/// Check for anything but `null`.
pub fn is_not_null(value: Value) -> TypeCheck {
    TypeCheck::new(TypeKind::NotNull, value)
}

/// Check for an empty value.
pub fn is_empty(value: Value) -> TypeCheck {
    TypeCheck::new(TypeKind::Empty, value)
}

/// Check for a non-empty value.
pub fn is_not_empty(value: Value) -> TypeCheck {
    TypeCheck::new(TypeKind::NotEmpty, value)
}

/// Check for an array or mapping.
pub fn is_array(value: Value) -> TypeCheck {
    TypeCheck::new(TypeKind::Array, value)
}

/// Check for a non-empty string.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(is_string(json!("a")).evaluate());
/// assert!(!is_string(json!("")).evaluate());
/// assert!(is_string(json!("")).allow_empty(true).evaluate());
/// ```
pub fn is_string(value: Value) -> TypeCheck {
    TypeCheck::new(TypeKind::String, value)
}

/// Check for a number or numeric string.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(is_numeric(json!("4.2")).evaluate());
/// assert!(!is_numeric(json!("4.2")).strict(true).evaluate());
/// ```
pub fn is_numeric(value: Value) -> TypeCheck {
    TypeCheck::new(TypeKind::Numeric, value)
}

/// Check for an integer.
pub fn is_int(value: Value) -> TypeCheck {
    TypeCheck::new(TypeKind::Int, value)
}

/// Check for a number with a fractional part.
pub fn is_float(value: Value) -> TypeCheck {
    TypeCheck::new(TypeKind::Float, value)
}

/// Check that `value` has the JSON kind `kind`.
///
/// Kinds are `null`, `boolean`, `number`, `integer`, `float`, `string`,
/// `array` and `object`.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(is_instance(json!({"a": 1}), "object").evaluate());
/// assert!(is_instance(json!(2), "number").evaluate());
/// assert!(!is_instance(json!(2), "float").evaluate());
/// ```
pub fn is_instance(value: Value, kind: &str) -> TypeCheck {
    let mut check = TypeCheck::new(TypeKind::Instance, value);
    check.operands.value = Value::from(kind);
    check
}

impl Assertion for TypeCheck {
    fn evaluate(&self) -> bool {
        self.operands.memo.get_or_eval(|| self.compute())
    }

    fn last_result(&self) -> Option<bool> {
        self.operands.memo.peek()
    }
}

impl Configurable for TypeCheck {
    fn check_value(&self) -> &Value {
        &self.operands.check
    }

    fn set_check_value(&mut self, value: Value) {
        self.operands.set_check(value);
    }

    fn set_value(&mut self, value: Value) {
        if self.kind == TypeKind::Instance {
            self.operands.set_value(value);
        }
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        if !self.kind.properties().contains(&name) {
            return Err(PropertyError::Unknown(name.to_string()));
        }
        match name {
            "strict" => self.strict = bool_property(name, value)?,
            "allowEmpty" => self.allow_empty = bool_property(name, value)?,
            _ => self.operands.value = value.clone(),
        }
        self.operands.memo.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_checks() {
        assert!(is_not_null(json!(false)).evaluate());
        assert!(!is_not_null(json!(null)).evaluate());
    }

    #[test]
    fn test_emptiness() {
        assert!(is_empty(json!("0")).evaluate());
        assert!(is_not_empty(json!([null])).evaluate());
    }

    #[test]
    fn test_is_array_accepts_mappings() {
        assert!(is_array(json!([])).evaluate());
        assert!(is_array(json!({"k": "v"})).evaluate());
        assert!(!is_array(json!("[]")).evaluate());
    }

    #[test]
    fn test_numeric_loose_and_strict() {
        assert!(is_numeric(json!(" 12 ")).evaluate());
        assert!(!is_numeric(json!("12abc")).evaluate());
        assert!(is_numeric(json!(1.5)).strict(true).evaluate());
        assert!(!is_numeric(json!(true)).evaluate());
    }

    #[test]
    fn test_int() {
        assert!(is_int(json!(3)).evaluate());
        assert!(is_int(json!("3")).evaluate());
        assert!(is_int(json!(3.0)).evaluate());
        assert!(!is_int(json!(3.0)).strict(true).evaluate());
        assert!(!is_int(json!("3")).strict(true).evaluate());
        assert!(!is_int(json!("3.5")).evaluate());
        assert!(!is_int(json!(1e300)).evaluate());
        assert!(!is_int(json!(9.3e18)).evaluate());
        assert!(is_int(json!(-9.2e18)).evaluate());
        assert!(is_int(json!(i64::MAX)).strict(true).evaluate());
        assert!(!is_int(json!(u64::MAX)).evaluate());
        assert!(!is_int(json!(u64::MAX)).strict(true).evaluate());
    }

    #[test]
    fn test_float() {
        assert!(is_float(json!(3.5)).evaluate());
        assert!(is_float(json!("3.5")).evaluate());
        assert!(!is_float(json!(3.0)).evaluate());
        assert!(is_float(json!(3.0)).strict(true).evaluate());
        assert!(!is_float(json!("x")).evaluate());
    }

    #[test]
    fn test_instance_kinds() {
        assert!(is_instance(json!(null), "null").evaluate());
        assert!(is_instance(json!(true), "boolean").evaluate());
        assert!(is_instance(json!(1.5), "number").evaluate());
        assert!(is_instance(json!("s"), "string").evaluate());
        assert!(!is_instance(json!([1]), "object").evaluate());
    }

    #[test]
    fn test_properties_follow_kind() {
        let mut s = is_string(json!(""));
        assert!(!s.evaluate());
        s.set_property("allowEmpty", &json!(true)).unwrap();
        assert!(s.evaluate());
        assert_eq!(
            s.set_property("strict", &json!(true)),
            Err(PropertyError::Unknown("strict".into()))
        );

        let mut inst = TypeCheck::new(TypeKind::Instance, json!([1]));
        inst.set_property("value", &json!("array")).unwrap();
        assert!(inst.evaluate());
        let mut null = is_null(json!(null));
        assert!(null.set_property("value", &json!(1)).is_err());
    }

    #[test]
    fn test_set_value_ignored_without_operand() {
        let mut n = is_null(json!(null));
        n.set_value(json!(1));
        assert!(n.evaluate());
    }
}
