//! Equality and ordering assertions

use std::cmp::Ordering;

use serde_json::Value;

use super::combinators::AllOf;
use super::operand::{compare_numbers, loose_eq};
use super::{bool_property, number_property, Assertion, AssertionType, Configurable, Operands};
use crate::error::PropertyError;

/// Equality between the check value and the right-hand value.
///
/// Strict by default: `5` and `"5"` differ, as do `5` and `5.0`. String
/// comparison ignores case unless `caseSensitive` is set.
#[derive(Debug, Clone)]
pub struct Equal {
    operands: Operands,
    strict: bool,
    case_sensitive: bool,
}

impl Equal {
    /// Create a strict, case-insensitive equality assertion.
    pub fn new(check: Value, value: Value) -> Self {
        Self {
            operands: Operands::new(check, value),
            strict: true,
            case_sensitive: false,
        }
    }

    /// Switch between strict and loose comparison.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Switch between case-sensitive and case-insensitive string comparison.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    fn compute(&self) -> bool {
        let (left, right) = (&self.operands.check, &self.operands.value);
        if let (false, Value::String(a), Value::String(b)) = (self.case_sensitive, left, right) {
            return a.eq_ignore_ascii_case(b);
        }
        if self.strict {
            left == right
        } else {
            loose_eq(left, right)
        }
    }
}

/// Create an equality assertion.
///
/// # Example
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(equal(json!(5), json!(5)).evaluate());
/// assert!(!equal(json!(5), json!("5")).evaluate());
/// assert!(equal(json!(5), json!("5")).strict(false).evaluate());
/// assert!(equal(json!("Hello"), json!("hello")).evaluate());
/// ```
pub fn equal(check: Value, value: Value) -> Equal {
    Equal::new(check, value)
}

impl Assertion for Equal {
    fn evaluate(&self) -> bool {
        self.operands.memo.get_or_eval(|| self.compute())
    }

    fn last_result(&self) -> Option<bool> {
        self.operands.memo.peek()
    }
}

impl Configurable for Equal {
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
            "caseSensitive" => self.case_sensitive = bool_property(name, value)?,
            _ => return Err(PropertyError::Unknown(name.to_string())),
        }
        self.operands.memo.clear();
        Ok(())
    }
}

impl AssertionType for Equal {
    const PROPERTIES: &'static [&'static str] = &["value", "strict", "caseSensitive"];

    fn with_check_value(check_value: Value) -> Self {
        Equal::new(check_value, Value::Null)
    }
}

/// Negated [`Equal`], sharing its options.
#[derive(Debug, Clone)]
pub struct NotEqual(Equal);

impl NotEqual {
    /// Switch between strict and loose comparison.
    pub fn strict(self, strict: bool) -> Self {
        NotEqual(self.0.strict(strict))
    }

    /// Switch between case-sensitive and case-insensitive string comparison.
    pub fn case_sensitive(self, case_sensitive: bool) -> Self {
        NotEqual(self.0.case_sensitive(case_sensitive))
    }
}

/// Create an inequality assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(not_equal(json!(5), json!("5")).evaluate());
/// assert!(!not_equal(json!(5), json!("5")).strict(false).evaluate());
/// ```
pub fn not_equal(check: Value, value: Value) -> NotEqual {
    NotEqual(Equal::new(check, value))
}

impl Assertion for NotEqual {
    fn evaluate(&self) -> bool {
        !self.0.evaluate()
    }

    fn last_result(&self) -> Option<bool> {
        self.0.last_result().map(|r| !r)
    }
}

impl Configurable for NotEqual {
    fn check_value(&self) -> &Value {
        self.0.check_value()
    }

    fn set_check_value(&mut self, value: Value) {
        self.0.set_check_value(value);
    }

    fn set_value(&mut self, value: Value) {
        self.0.set_value(value);
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        self.0.set_property(name, value)
    }
}

impl AssertionType for NotEqual {
    const PROPERTIES: &'static [&'static str] = Equal::PROPERTIES;

    fn with_check_value(check_value: Value) -> Self {
        NotEqual(Equal::with_check_value(check_value))
    }
}

/// Ordering assertion between two numbers.
///
/// Strings never compare, even numeric ones.
#[derive(Debug, Clone)]
pub struct Ordered<const GREATER: bool> {
    operands: Operands,
    inclusive: bool,
}

/// `check > value` (or `>=` when inclusive).
pub type GreaterThan = Ordered<true>;

/// `check < value` (or `<=` when inclusive).
pub type LessThan = Ordered<false>;

impl<const GREATER: bool> Ordered<GREATER> {
    /// Create an exclusive ordering assertion.
    pub fn new(check: Value, value: Value) -> Self {
        Self {
            operands: Operands::new(check, value),
            inclusive: false,
        }
    }

    /// Whether equal operands satisfy the assertion.
    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    fn compute(&self) -> bool {
        let wanted = if GREATER {
            Ordering::Greater
        } else {
            Ordering::Less
        };
        match compare_numbers(&self.operands.check, &self.operands.value) {
            Some(Ordering::Equal) => self.inclusive,
            Some(ordering) => ordering == wanted,
            None => false,
        }
    }
}

/// Create a `check > value` assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(greater_than(json!(6), json!(5)).evaluate());
/// assert!(!greater_than(json!(5), json!(5)).evaluate());
/// assert!(greater_than(json!(5), json!(5)).inclusive(true).evaluate());
/// assert!(!greater_than(json!("6"), json!(5)).evaluate());
/// ```
pub fn greater_than(check: Value, value: Value) -> GreaterThan {
    GreaterThan::new(check, value)
}

/// Create a `check < value` assertion.
pub fn less_than(check: Value, value: Value) -> LessThan {
    LessThan::new(check, value)
}

impl<const GREATER: bool> Assertion for Ordered<GREATER> {
    fn evaluate(&self) -> bool {
        self.operands.memo.get_or_eval(|| self.compute())
    }

    fn last_result(&self) -> Option<bool> {
        self.operands.memo.peek()
    }
}

impl<const GREATER: bool> Configurable for Ordered<GREATER> {
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
            "inclusive" => self.inclusive = bool_property(name, value)?,
            _ => return Err(PropertyError::Unknown(name.to_string())),
        }
        self.operands.memo.clear();
        Ok(())
    }
}

impl<const GREATER: bool> AssertionType for Ordered<GREATER> {
    const PROPERTIES: &'static [&'static str] = &["value", "inclusive"];

    fn with_check_value(check_value: Value) -> Self {
        Self::new(check_value, Value::Null)
    }
}

/// Whether the check value lies between `min` and `max`.
///
/// Both bounds are exclusive unless configured otherwise.
#[derive(Debug, Clone)]
pub struct InRange {
    operands: Operands,
    min: Value,
    max: Value,
    inclusive_min: bool,
    inclusive_max: bool,
}

impl InRange {
    /// Create an exclusive range assertion.
    pub fn new(check: Value, min: Value, max: Value) -> Self {
        Self {
            operands: Operands::new(check, Value::Null),
            min,
            max,
            inclusive_min: false,
            inclusive_max: false,
        }
    }

    /// Set both bound inclusivities at once.
    pub fn inclusive(mut self, inclusive_min: bool, inclusive_max: bool) -> Self {
        self.inclusive_min = inclusive_min;
        self.inclusive_max = inclusive_max;
        self
    }

    fn compute(&self) -> bool {
        let check = &self.operands.check;
        AllOf::new()
            .with(greater_than(check.clone(), self.min.clone()).inclusive(self.inclusive_min))
            .with(less_than(check.clone(), self.max.clone()).inclusive(self.inclusive_max))
            .evaluate()
    }
}

/// Create a range assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(in_range(json!(5), json!(1), json!(10)).evaluate());
/// assert!(!in_range(json!(10), json!(1), json!(10)).evaluate());
/// assert!(in_range(json!(10), json!(1), json!(10)).inclusive(false, true).evaluate());
/// ```
pub fn in_range(check: Value, min: Value, max: Value) -> InRange {
    InRange::new(check, min, max)
}

impl Assertion for InRange {
    fn evaluate(&self) -> bool {
        self.operands.memo.get_or_eval(|| self.compute())
    }

    fn last_result(&self) -> Option<bool> {
        self.operands.memo.peek()
    }
}

impl Configurable for InRange {
    fn check_value(&self) -> &Value {
        &self.operands.check
    }

    fn set_check_value(&mut self, value: Value) {
        self.operands.set_check(value);
    }

    fn set_value(&mut self, _value: Value) {}

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        match name {
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

impl AssertionType for InRange {
    const PROPERTIES: &'static [&'static str] = &["min", "max", "inclusiveMin", "inclusiveMax"];

    fn with_check_value(check_value: Value) -> Self {
        InRange::new(check_value, Value::Null, Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equal_strict_and_loose() {
        assert!(equal(json!(5), json!(5)).evaluate());
        assert!(!equal(json!(5), json!("5")).evaluate());
        assert!(equal(json!(5), json!("5")).strict(false).evaluate());
        assert!(!equal(json!(5), json!(5.0)).evaluate());
        assert!(equal(json!(5), json!(5.0)).strict(false).evaluate());
    }

    #[test]
    fn test_equal_case_handling() {
        assert!(equal(json!("Mondo"), json!("mondo")).evaluate());
        assert!(!equal(json!("Mondo"), json!("mondo"))
            .case_sensitive(true)
            .evaluate());
    }

    #[test]
    fn test_equal_folds_ascii_case_only() {
        assert!(equal(json!("ABC-x"), json!("abc-X")).evaluate());
        assert!(!equal(json!("É"), json!("é")).evaluate());
        assert!(equal(json!("É"), json!("É")).evaluate());
    }

    #[test]
    fn test_large_integer_equality() {
        let above = json!(9_007_199_254_740_993_u64);
        let below = json!(9_007_199_254_740_992_u64);
        assert!(!equal(above.clone(), below.clone()).strict(false).evaluate());
        assert!(not_equal(above.clone(), below).strict(false).evaluate());
        assert!(equal(above, json!("9007199254740993")).strict(false).evaluate());
    }

    #[test]
    fn test_equal_property_invalidates_memo() {
        let mut eq = equal(json!(5), json!("5"));
        assert!(!eq.evaluate());
        assert_eq!(eq.last_result(), Some(false));

        eq.set_property("strict", &json!(false)).unwrap();
        assert_eq!(eq.last_result(), None);
        assert!(eq.evaluate());
    }

    #[test]
    fn test_equal_rejects_unknown_property() {
        let mut eq = Equal::with_check_value(json!(1));
        assert_eq!(
            eq.set_property("nope", &json!(1)),
            Err(PropertyError::Unknown("nope".into()))
        );
    }

    #[test]
    fn test_not_equal_mirrors_equal() {
        let ne = not_equal(json!("a"), json!("b"));
        assert!(ne.evaluate());
        assert_eq!(ne.last_result(), Some(true));
    }

    #[test]
    fn test_ordering() {
        assert!(greater_than(json!(2.5), json!(2)).evaluate());
        assert!(!greater_than(json!(2), json!(2)).evaluate());
        assert!(greater_than(json!(2), json!(2)).inclusive(true).evaluate());
        assert!(less_than(json!(1), json!(2)).evaluate());
        assert!(!less_than(json!("1"), json!(2)).evaluate());
        assert!(!less_than(json!(null), json!(2)).evaluate());
    }

    #[test]
    fn test_ordering_large_integers() {
        let above = json!(9_007_199_254_740_993_u64);
        let below = json!(9_007_199_254_740_992_u64);
        assert!(greater_than(above.clone(), below.clone()).evaluate());
        assert!(!greater_than(below.clone(), above.clone()).evaluate());
        assert!(less_than(json!(i64::MIN), json!(i64::MIN + 1)).evaluate());
        assert!(!in_range(below.clone(), below, above).evaluate());
    }

    #[test]
    fn test_ordering_set_value() {
        let mut gt = greater_than(json!(10), json!(5));
        assert!(gt.evaluate());
        gt.set_value(json!(20));
        assert!(!gt.evaluate());
    }

    #[test]
    fn test_in_range_bounds() {
        assert!(in_range(json!(5), json!(1), json!(10)).evaluate());
        assert!(!in_range(json!(1), json!(1), json!(10)).evaluate());
        assert!(in_range(json!(1), json!(1), json!(10))
            .inclusive(true, false)
            .evaluate());
        assert!(!in_range(json!("5"), json!(1), json!(10)).evaluate());
    }

    #[test]
    fn test_in_range_properties() {
        let mut range = InRange::with_check_value(json!(3));
        range.set_property("min", &json!(3)).unwrap();
        range.set_property("max", &json!(4)).unwrap();
        range.set_property("inclusiveMin", &json!(true)).unwrap();
        assert!(range.evaluate());
        assert!(range.set_property("min", &json!("3")).is_err());
    }
}
