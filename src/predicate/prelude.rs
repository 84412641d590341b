//! Predicate prelude for convenient imports
//!
//! This module re-exports the assertion traits and every constructor function.
//!
//! # Example
//!
//! ```rust
//! use assertree::predicate::prelude::*;
//! use serde_json::json;
//!
//! let adult = greater_than(json!(42), json!(18)).inclusive(true);
//! assert!(adult.and(is_int(json!(42))).evaluate());
//! ```

// Core traits
pub use super::{Assertion, AssertionType, Configurable};

// Logical combinators
pub use super::combinators::{all_of, any_of, from_fn, not, AssertionExt};

// Comparison
pub use super::compare::{equal, greater_than, in_range, less_than, not_equal};

// Strings and patterns
pub use super::pattern::regex;
pub use super::string::{contains, ends_with, starts_with};

// Collections
pub use super::collection::{array_contains, array_has_key, count};

// Types
pub use super::types::{
    is_array, is_empty, is_float, is_instance, is_int, is_not_empty, is_not_null, is_null,
    is_numeric, is_string,
};
