//! Validation type for accumulating errors
//!
//! `Validation` is similar to `Result` but combining two failures keeps
//! both error values instead of stopping at the first one. The tree
//! validator uses it to report every problem of a configuration in one pass.
//!
//! # Examples
//!
//! ```
//! use assertree::Validation;
//!
//! let v1 = Validation::<i32, _>::failure(vec!["missing 'type'"]);
//! let v2 = Validation::<i32, _>::failure(vec!["unknown key 'bogus'"]);
//!
//! assert_eq!(
//!     v1.and(v2),
//!     Validation::Failure(vec!["missing 'type'", "unknown key 'bogus'"])
//! );
//! ```

use crate::Semigroup;

/// A validation that either succeeds with a value or fails with accumulated errors
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error value (must implement `Semigroup` for accumulation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Create a validation from a Result
    ///
    /// # Examples
    ///
    /// ```
    /// use assertree::Validation;
    ///
    /// let v = Validation::from_result(Ok::<_, String>(42));
    /// assert_eq!(v, Validation::Success(42));
    /// ```
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::Failure(error),
        }
    }

    /// Convert this validation to a Result
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Transform the success value if present
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Transform the error value if present
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }

    /// Chain a dependent validation
    ///
    /// The function only runs when this validation succeeded, so errors from
    /// the dependent step are never mixed with errors from this one.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> Validation<U, E>,
    {
        match self {
            Validation::Success(value) => f(value),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Combine two validations, accumulating errors using the Semigroup instance
    ///
    /// # Examples
    ///
    /// ```
    /// use assertree::Validation;
    ///
    /// let v1 = Validation::<_, Vec<&str>>::success(1);
    /// let v2 = Validation::<_, Vec<&str>>::success(2);
    /// assert_eq!(v1.and(v2), Validation::Success((1, 2)));
    /// ```
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) => Validation::Failure(e),
            (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }

    /// Combine all validations in a tuple, keeping errors in tuple order
    ///
    /// # Examples
    ///
    /// ```
    /// use assertree::Validation;
    ///
    /// let result = Validation::<(i32, i32, i32), Vec<&str>>::all((
    ///     Validation::success(1),
    ///     Validation::failure(vec!["second"]),
    ///     Validation::failure(vec!["third"]),
    /// ));
    /// assert_eq!(result, Validation::Failure(vec!["second", "third"]));
    /// ```
    pub fn all<V>(validations: V) -> Validation<V::Output, E>
    where
        V: ValidateAll<E, Output = T>,
    {
        validations.validate_all()
    }
}

/// Trait for combining a tuple of validations
pub trait ValidateAll<E: Semigroup> {
    /// The output type when all validations succeed
    type Output;

    /// Combine all validations, accumulating errors
    fn validate_all(self) -> Validation<Self::Output, E>;
}

macro_rules! impl_validate_all {
    ($nested:pat => $first:ident $(, $rest:ident)+) => {
        impl<E: Semigroup, $first $(, $rest)+> ValidateAll<E>
            for (Validation<$first, E>, $(Validation<$rest, E>,)+)
        {
            type Output = ($first, $($rest,)+);

            #[allow(non_snake_case)]
            fn validate_all(self) -> Validation<Self::Output, E> {
                let ($first, $($rest,)+) = self;
                $first
                    $(.and($rest))+
                    .map(|$nested| ($first, $($rest,)+))
            }
        }
    };
}

impl_validate_all!((A, B) => A, B);
impl_validate_all!(((A, B), C) => A, B, C);
impl_validate_all!((((A, B), C), D) => A, B, C, D);
impl_validate_all!(((((A, B), C), D), F) => A, B, C, D, F);
impl_validate_all!((((((A, B), C), D), F), G) => A, B, C, D, F, G);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_accumulates_in_order() {
        let v1 = Validation::<i32, _>::failure(vec!["first"]);
        let v2 = Validation::<i32, _>::failure(vec!["second"]);
        assert_eq!(v1.and(v2), Validation::Failure(vec!["first", "second"]));
    }

    #[test]
    fn test_and_keeps_single_failure() {
        let v1 = Validation::<_, Vec<&str>>::success(1);
        let v2 = Validation::<i32, _>::failure(vec!["second"]);
        assert_eq!(v1.and(v2), Validation::Failure(vec!["second"]));
    }

    #[test]
    fn test_all_flattens_success() {
        let result = Validation::<(i32, &str, bool, char), Vec<&str>>::all((
            Validation::success(1),
            Validation::success("two"),
            Validation::success(true),
            Validation::success('4'),
        ));
        assert_eq!(result, Validation::Success((1, "two", true, '4')));
    }

    #[test]
    fn test_all_collects_every_failure() {
        let result = Validation::<(i32, i32, i32, i32, i32, i32), Vec<u8>>::all((
            Validation::failure(vec![1]),
            Validation::success(2),
            Validation::failure(vec![3]),
            Validation::success(4),
            Validation::success(5),
            Validation::failure(vec![6]),
        ));
        assert_eq!(result, Validation::Failure(vec![1, 3, 6]));
    }

    #[test]
    fn test_and_then_short_circuits() {
        let v = Validation::<i32, Vec<&str>>::failure(vec!["early"]);
        let result = v.and_then(|_| Validation::<i32, _>::failure(vec!["late"]));
        assert_eq!(result, Validation::Failure(vec!["early"]));
    }

    #[test]
    fn test_result_round_trip() {
        assert_eq!(Validation::from_result(Err::<i32, _>("e")).into_result(), Err("e"));
        assert_eq!(Validation::<_, ()>::success(3).into_result(), Ok(3));
    }
}
