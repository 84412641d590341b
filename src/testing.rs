//! Testing utilities
//!
//! Assertion macros for [`Validation`](crate::Validation) results, most
//! useful with [`Validator::inspect`](crate::Validator::inspect).
//!
//! # Examples
//!
//! ```rust
//! use assertree::{assert_failure, assert_success, assert_violations, ConfigError, Validator};
//! use serde_json::json;
//!
//! let validator = Validator::default();
//!
//! let ok = json!({"type": "isNull", "checkValue": null});
//! assert_success!(validator.inspect(ok.as_object().unwrap()));
//!
//! let bad = json!({"type": "isNull"});
//! assert_failure!(validator.inspect(bad.as_object().unwrap()));
//! assert_violations!(
//!     validator.inspect(bad.as_object().unwrap()),
//!     vec![ConfigError::MissingMandatoryKey("checkValue".into())]
//! );
//! ```

/// Assert that a validation succeeds.
///
/// This macro will panic if the validation is a `Failure`.
///
/// # Example
///
/// ```rust
/// use assertree::{Validation, assert_success};
///
/// let val = Validation::<_, Vec<String>>::success(42);
/// assert_success!(val);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation fails.
///
/// This macro will panic if the validation is a `Success`.
///
/// # Example
///
/// ```rust
/// use assertree::{Validation, assert_failure};
///
/// let val = Validation::<i32, _>::failure(vec!["error".to_string()]);
/// assert_failure!(val);
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a validation fails with exactly the given configuration errors, in order.
///
/// The failure value must be [`Violations`](crate::Violations).
///
/// # Example
///
/// ```rust
/// use assertree::{assert_violations, ConfigError, Validation, Violations};
///
/// let val = Validation::<(), _>::failure(Violations::single(ConfigError::UnknownKey("x".into())));
/// assert_violations!(val, vec![ConfigError::UnknownKey("x".into())]);
/// ```
#[macro_export]
macro_rules! assert_violations {
    ($validation:expr, $expected:expr) => {
        match $validation {
            $crate::Validation::Failure(violations) => {
                assert_eq!($crate::Violations::into_vec(violations), $expected);
            }
            $crate::Validation::Success(v) => {
                panic!(
                    "Expected Failure with violations {:?}, got Success: {:?}",
                    $expected, v
                );
            }
        }
    };
}
