//! Assertion predicates and logical combinators
//!
//! An [`Assertion`] is a boolean evaluation over configured operands. Leaf
//! assertions compare a *check value* (the value under test) against an
//! optional right-hand *value*; combinators compose other assertions.
//!
//! Evaluation is memoized: calling [`Assertion::evaluate`] twice computes the
//! result once, and [`Assertion::last_result`] reads it back without
//! evaluating. Every mutation through [`Configurable`] clears the memo.
//!
//! # Example
//!
//! ```rust
//! use assertree::predicate::*;
//! use serde_json::json;
//!
//! let in_stock = greater_than(json!(12), json!(0));
//! let named = starts_with(json!("Widget 3000"), json!("widget"));
//!
//! let rule = in_stock.and(named);
//! assert!(rule.evaluate());
//! ```

mod collection;
mod combinators;
mod compare;
mod operand;
mod pattern;
mod string;
mod types;

pub mod prelude;

use std::cell::Cell;
use std::fmt;

use serde_json::Value;

use crate::error::PropertyError;

pub use collection::{
    array_contains, array_has_key, count, ArrayContains, ArrayHasKey, Count, CountCompare,
};
pub use combinators::{all_of, any_of, from_fn, not, AllOf, AnyOf, AssertionExt, FromFn, Not};
pub use compare::{
    equal, greater_than, in_range, less_than, not_equal, Equal, GreaterThan, InRange, LessThan,
    NotEqual, Ordered,
};
pub use operand::{is_empty_value, kind_of, loose_eq};
pub use pattern::{regex, RegexMatch};
pub use string::{contains, ends_with, starts_with, StringKind, StringMatch};
pub use types::{
    is_array, is_empty, is_float, is_instance, is_int, is_not_empty, is_not_null, is_null,
    is_numeric, is_string, TypeCheck, TypeKind,
};

/// A boolean evaluation over configured operands.
pub trait Assertion: fmt::Debug {
    /// Evaluate the assertion, reusing the memoized result when present.
    fn evaluate(&self) -> bool;

    /// The memoized result of the last evaluation, if any.
    ///
    /// Assertions that do not memoize always return `None`.
    fn last_result(&self) -> Option<bool> {
        None
    }
}

impl<A: Assertion + ?Sized> Assertion for Box<A> {
    #[inline]
    fn evaluate(&self) -> bool {
        (**self).evaluate()
    }

    #[inline]
    fn last_result(&self) -> Option<bool> {
        (**self).last_result()
    }
}

/// An assertion whose operands and options can be changed after construction.
///
/// This is what the declarative executor drives: it builds an assertion from
/// the node's check value, applies each `properties` entry through
/// [`Configurable::set_property`], and optionally replaces the right-hand
/// operand. Every setter invalidates the memoized result.
pub trait Configurable: Assertion {
    /// The value under test.
    fn check_value(&self) -> &Value;

    /// Replace the value under test.
    fn set_check_value(&mut self, value: Value);

    /// Replace the right-hand operand.
    ///
    /// Assertions without a right-hand operand ignore this.
    fn set_value(&mut self, value: Value);

    /// Apply a named option.
    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError>;
}

/// A configurable assertion usable as a declarative `type`.
///
/// Implementing this trait is how a type outside this crate joins the
/// registry: it declares the property names it accepts and how to build an
/// instance from a check value alone.
pub trait AssertionType: Configurable + Sized + 'static {
    /// Names accepted by [`Configurable::set_property`].
    const PROPERTIES: &'static [&'static str];

    /// Build an instance with default options.
    fn with_check_value(check_value: Value) -> Self;
}

/// Memoized evaluation result.
#[derive(Debug, Default, Clone)]
pub(crate) struct Memo(Cell<Option<bool>>);

impl Memo {
    pub(crate) fn get_or_eval(&self, eval: impl FnOnce() -> bool) -> bool {
        if let Some(result) = self.0.get() {
            return result;
        }
        let result = eval();
        self.0.set(Some(result));
        result
    }

    pub(crate) fn peek(&self) -> Option<bool> {
        self.0.get()
    }

    pub(crate) fn clear(&mut self) {
        self.0.set(None);
    }
}

/// Check value, right-hand value and the memo they feed.
#[derive(Debug, Default, Clone)]
pub(crate) struct Operands {
    pub(crate) check: Value,
    pub(crate) value: Value,
    pub(crate) memo: Memo,
}

impl Operands {
    pub(crate) fn new(check: Value, value: Value) -> Self {
        Self {
            check,
            value,
            memo: Memo::default(),
        }
    }

    pub(crate) fn set_check(&mut self, check: Value) {
        self.check = check;
        self.memo.clear();
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
        self.memo.clear();
    }
}

pub(crate) fn bool_property(name: &str, value: &Value) -> Result<bool, PropertyError> {
    value
        .as_bool()
        .ok_or_else(|| PropertyError::invalid(name, "a boolean", value))
}

pub(crate) fn number_property(name: &str, value: &Value) -> Result<Value, PropertyError> {
    if value.is_number() {
        Ok(value.clone())
    } else {
        Err(PropertyError::invalid(name, "a number", value))
    }
}
