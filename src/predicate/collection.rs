//! Array and mapping assertions

use serde_json::Value;

use super::compare::{equal, greater_than, in_range, less_than};
use super::operand::loose_eq;
use super::{bool_property, number_property, Assertion, AssertionType, Configurable, Operands};
use crate::error::PropertyError;

/// Whether the check value (an array or the values of a mapping) contains
/// the right-hand value.
///
/// Membership is loose unless `strict` is set.
#[derive(Debug, Clone)]
pub struct ArrayContains {
    operands: Operands,
    strict: bool,
}

impl ArrayContains {
    /// Create a loose membership assertion.
    pub fn new(collection: Value, needle: Value) -> Self {
        Self {
            operands: Operands::new(collection, needle),
            strict: false,
        }
    }

    /// Switch between strict and loose membership.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn compute(&self) -> bool {
        let needle = &self.operands.value;
        let matches = |item: &Value| {
            if self.strict {
                item == needle
            } else {
                loose_eq(item, needle)
            }
        };
        match &self.operands.check {
            Value::Array(items) => items.iter().any(matches),
            Value::Object(map) => map.values().any(matches),
            _ => false,
        }
    }
}

/// Create a membership assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(array_contains(json!([1, 2, 3]), json!("2")).evaluate());
/// assert!(!array_contains(json!([1, 2, 3]), json!("2")).strict(true).evaluate());
/// ```
pub fn array_contains(collection: Value, needle: Value) -> ArrayContains {
    ArrayContains::new(collection, needle)
}

impl Assertion for ArrayContains {
    fn evaluate(&self) -> bool {
        self.operands.memo.get_or_eval(|| self.compute())
    }

    fn last_result(&self) -> Option<bool> {
        self.operands.memo.peek()
    }
}

impl Configurable for ArrayContains {
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
            "strict" => self.strict = bool_property(name, value)?,
            _ => return Err(PropertyError::Unknown(name.to_string())),
        }
        self.operands.memo.clear();
        Ok(())
    }
}

impl AssertionType for ArrayContains {
    const PROPERTIES: &'static [&'static str] = &["value", "strict"];

    fn with_check_value(check_value: Value) -> Self {
        ArrayContains::new(check_value, Value::Null)
    }
}

/// Whether the check value has the right-hand value as a key.
///
/// Mappings are looked up by string key (numbers are converted), arrays by
/// index.
#[derive(Debug, Clone)]
pub struct ArrayHasKey {
    operands: Operands,
}

impl ArrayHasKey {
    /// Create a key-presence assertion.
    pub fn new(collection: Value, key: Value) -> Self {
        Self {
            operands: Operands::new(collection, key),
        }
    }

    fn compute(&self) -> bool {
        let key = &self.operands.value;
        match &self.operands.check {
            Value::Object(map) => match key {
                Value::String(k) => map.contains_key(k),
                Value::Number(n) => map.contains_key(&n.to_string()),
                _ => false,
            },
            Value::Array(items) => {
                let index = match key {
                    Value::Number(n) => n.as_u64(),
                    Value::String(s) => s.parse::<u64>().ok(),
                    _ => None,
                };
                index.is_some_and(|i| usize::try_from(i).is_ok_and(|i| i < items.len()))
            }
            _ => false,
        }
    }
}

/// Create a key-presence assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(array_has_key(json!({"id": 1}), json!("id")).evaluate());
/// assert!(array_has_key(json!(["a", "b"]), json!(1)).evaluate());
/// assert!(!array_has_key(json!(["a", "b"]), json!(2)).evaluate());
/// ```
pub fn array_has_key(collection: Value, key: Value) -> ArrayHasKey {
    ArrayHasKey::new(collection, key)
}

impl Assertion for ArrayHasKey {
    fn evaluate(&self) -> bool {
        self.operands.memo.get_or_eval(|| self.compute())
    }

    fn last_result(&self) -> Option<bool> {
        self.operands.memo.peek()
    }
}

impl Configurable for ArrayHasKey {
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
            "value" => {
                self.operands.set_value(value.clone());
                Ok(())
            }
            _ => Err(PropertyError::Unknown(name.to_string())),
        }
    }
}

impl AssertionType for ArrayHasKey {
    const PROPERTIES: &'static [&'static str] = &["value"];

    fn with_check_value(check_value: Value) -> Self {
        ArrayHasKey::new(check_value, Value::Null)
    }
}

/// How a [`Count`] compares the element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountCompare {
    /// Count equals the right-hand value.
    #[default]
    Equal,
    /// Count is greater than the right-hand value.
    GreaterThan,
    /// Count is less than the right-hand value.
    LessThan,
    /// Count lies between `min` and `max`.
    InRange,
}

impl CountCompare {
    fn parse(name: &str, value: &Value) -> Result<Self, PropertyError> {
        match value.as_str() {
            Some("equal") => Ok(CountCompare::Equal),
            Some("greaterThan") => Ok(CountCompare::GreaterThan),
            Some("lessThan") => Ok(CountCompare::LessThan),
            Some("inRange") => Ok(CountCompare::InRange),
            _ => Err(PropertyError::invalid(
                name,
                "one of \"equal\", \"greaterThan\", \"lessThan\", \"inRange\"",
                value,
            )),
        }
    }
}

/// Compares the number of elements of the check value (array or mapping).
///
/// Anything that is not a collection fails.
#[derive(Debug, Clone)]
pub struct Count {
    operands: Operands,
    compare: CountCompare,
    inclusive: bool,
    min: Value,
    max: Value,
    inclusive_min: bool,
    inclusive_max: bool,
}

impl Count {
    /// Create a count assertion comparing for equality with `expected`.
    pub fn new(collection: Value, expected: Value) -> Self {
        Self {
            operands: Operands::new(collection, expected),
            compare: CountCompare::Equal,
            inclusive: false,
            min: Value::Null,
            max: Value::Null,
            inclusive_min: false,
            inclusive_max: false,
        }
    }

    /// Compare with equality.
    pub fn use_equal(mut self) -> Self {
        self.compare = CountCompare::Equal;
        self
    }

    /// Compare with `>` (or `>=`).
    pub fn use_greater_than(mut self, inclusive: bool) -> Self {
        self.compare = CountCompare::GreaterThan;
        self.inclusive = inclusive;
        self
    }

    /// Compare with `<` (or `<=`).
    pub fn use_less_than(mut self, inclusive: bool) -> Self {
        self.compare = CountCompare::LessThan;
        self.inclusive = inclusive;
        self
    }

    /// Compare against a range.
    pub fn use_in_range(
        mut self,
        min: u64,
        max: u64,
        inclusive_min: bool,
        inclusive_max: bool,
    ) -> Self {
        self.compare = CountCompare::InRange;
        self.min = Value::from(min);
        self.max = Value::from(max);
        self.inclusive_min = inclusive_min;
        self.inclusive_max = inclusive_max;
        self
    }

    fn compute(&self) -> bool {
        let size = match &self.operands.check {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => return false,
        };
        let size = Value::from(size as u64);
        let expected = self.operands.value.clone();
        match self.compare {
            CountCompare::Equal => equal(size, expected).strict(false).evaluate(),
            CountCompare::GreaterThan => greater_than(size, expected)
                .inclusive(self.inclusive)
                .evaluate(),
            CountCompare::LessThan => less_than(size, expected)
                .inclusive(self.inclusive)
                .evaluate(),
            CountCompare::InRange => in_range(size, self.min.clone(), self.max.clone())
                .inclusive(self.inclusive_min, self.inclusive_max)
                .evaluate(),
        }
    }
}

/// Create a count assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(count(json!([1, 2, 3]), json!(3)).evaluate());
/// assert!(count(json!([1, 2, 3]), json!(2)).use_greater_than(false).evaluate());
/// assert!(count(json!({"a": 1}), json!(null)).use_in_range(0, 1, false, true).evaluate());
/// ```
pub fn count(collection: Value, expected: Value) -> Count {
    Count::new(collection, expected)
}

impl Assertion for Count {
    fn evaluate(&self) -> bool {
        self.operands.memo.get_or_eval(|| self.compute())
    }

    fn last_result(&self) -> Option<bool> {
        self.operands.memo.peek()
    }
}

impl Configurable for Count {
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
            "value" => self.operands.value = number_property(name, value)?,
            "compare" => self.compare = CountCompare::parse(name, value)?,
            "inclusive" => self.inclusive = bool_property(name, value)?,
            "min" => self.min = number_property(name, value)?,
            "max" => self.max = number_property(name, value)?,
            "inclusiveMin" => self.inclusive_min = bool_property(name, value)?,
            "inclusiveMax" => self.inclusive_max = bool_property(name, value)?,
            _ => return Err(PropertyError::Unknown(name.to_string())),
        }
        self.operands.memo.clear();
        Ok(())
    }
}

impl AssertionType for Count {
    const PROPERTIES: &'static [&'static str] = &[
        "value",
        "compare",
        "inclusive",
        "min",
        "max",
        "inclusiveMin",
        "inclusiveMax",
    ];

    fn with_check_value(check_value: Value) -> Self {
        Count::new(check_value, Value::Null)
    }
}
