//! Logical combinators
//!
//! [`AllOf`] (AND), [`AnyOf`] (OR) and [`Not`] compose other assertions and
//! short-circuit: `AllOf` stops at the first false member, `AnyOf` at the
//! first true one. An empty `AllOf` holds, an empty `AnyOf` does not.

use std::fmt;

use super::Assertion;

/// AND over any number of assertions.
#[derive(Debug, Default)]
pub struct AllOf {
    assertions: Vec<Box<dyn Assertion>>,
}

impl AllOf {
    /// An empty conjunction; evaluates to `true`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assertion.
    pub fn with<A: Assertion + 'static>(mut self, assertion: A) -> Self {
        self.assertions.push(Box::new(assertion));
        self
    }

    /// Append a boxed assertion.
    pub fn push(&mut self, assertion: Box<dyn Assertion>) {
        self.assertions.push(assertion);
    }

    /// Number of member assertions.
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    /// Whether there are no member assertions.
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

impl Assertion for AllOf {
    fn evaluate(&self) -> bool {
        self.assertions.iter().all(|a| a.evaluate())
    }
}

/// Create a conjunction from boxed assertions.
///
/// # Example
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(all_of(vec![]).evaluate());
/// let p = all_of(vec![
///     Box::new(is_numeric(json!(3))) as Box<dyn Assertion>,
///     Box::new(greater_than(json!(3), json!(1))),
/// ]);
/// assert!(p.evaluate());
/// ```
pub fn all_of(assertions: Vec<Box<dyn Assertion>>) -> AllOf {
    AllOf { assertions }
}

/// OR over any number of assertions.
#[derive(Debug, Default)]
pub struct AnyOf {
    assertions: Vec<Box<dyn Assertion>>,
}

impl AnyOf {
    /// An empty disjunction; evaluates to `false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assertion.
    pub fn with<A: Assertion + 'static>(mut self, assertion: A) -> Self {
        self.assertions.push(Box::new(assertion));
        self
    }

    /// Append a boxed assertion.
    pub fn push(&mut self, assertion: Box<dyn Assertion>) {
        self.assertions.push(assertion);
    }

    /// Number of member assertions.
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    /// Whether there are no member assertions.
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

impl Assertion for AnyOf {
    fn evaluate(&self) -> bool {
        self.assertions.iter().any(|a| a.evaluate())
    }
}

/// Create a disjunction from boxed assertions.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// assert!(!any_of(vec![]).evaluate());
/// let p = any_of(vec![
///     Box::new(is_null(json!(1))) as Box<dyn Assertion>,
///     Box::new(is_int(json!(1))),
/// ]);
/// assert!(p.evaluate());
/// ```
pub fn any_of(assertions: Vec<Box<dyn Assertion>>) -> AnyOf {
    AnyOf { assertions }
}

/// Inverts a single assertion.
#[derive(Debug)]
pub struct Not(Box<dyn Assertion>);

impl Assertion for Not {
    fn evaluate(&self) -> bool {
        !self.0.evaluate()
    }

    fn last_result(&self) -> Option<bool> {
        self.0.last_result().map(|r| !r)
    }
}

/// Invert an assertion.
pub fn not<A: Assertion + 'static>(assertion: A) -> Not {
    Not(Box::new(assertion))
}

/// Assertion backed by a closure.
///
/// Useful for ad-hoc checks inside combinators and for observing
/// evaluation in tests.
pub struct FromFn<F>(F);

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn")
    }
}

impl<F: Fn() -> bool> Assertion for FromFn<F> {
    fn evaluate(&self) -> bool {
        (self.0)()
    }
}

/// Wrap a closure as an assertion.
///
/// ```rust
/// use assertree::predicate::*;
///
/// let always = from_fn(|| true);
/// assert!(always.evaluate());
/// ```
pub fn from_fn<F: Fn() -> bool>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// Method-chaining combinators for any assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// let p = is_string(json!("")).or(is_null(json!(""))).not();
/// assert!(p.evaluate());
/// ```
pub trait AssertionExt: Assertion + Sized + 'static {
    /// Both assertions must hold.
    fn and<A: Assertion + 'static>(self, other: A) -> AllOf {
        AllOf::new().with(self).with(other)
    }

    /// Either assertion must hold.
    fn or<A: Assertion + 'static>(self, other: A) -> AnyOf {
        AnyOf::new().with(self).with(other)
    }

    /// Invert this assertion.
    fn not(self) -> Not {
        not(self)
    }
}

impl<A: Assertion + Sized + 'static> AssertionExt for A {}
