//! Semigroup trait for associative merging
//!
//! Two things in this crate are built by repeatedly merging smaller pieces:
//! the list of violations collected while validating a configuration tree,
//! and the payload returned when an assertion tree is executed. Both merge
//! through [`Semigroup::combine`].
//!
//! # Examples
//!
//! ```
//! use assertree::Semigroup;
//!
//! let v1 = vec![1, 2, 3];
//! let v2 = vec![4, 5, 6];
//! assert_eq!(v1.combine(v2), vec![1, 2, 3, 4, 5, 6]);
//! ```

/// A type that supports an associative binary operation
///
/// # Laws
///
/// Implementations must satisfy the associativity law:
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
///
/// `combine` takes both sides by value; clone first if the originals are
/// still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}
