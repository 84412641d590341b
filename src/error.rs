//! Error types
//!
//! Configuration problems are reported as [`ConfigError`] values, collected
//! into [`Violations`] when a whole tree is inspected. Registry mutations
//! fail with [`RegistryError`], and running a validated tree can only fail
//! with [`ExecutionError`].

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::Semigroup;

/// A single problem found while validating a raw assertion configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A required key (`type` or `checkValue`) is absent.
    #[error("missing mandatory key '{0}'")]
    MissingMandatoryKey(String),

    /// A key outside the accepted key set is present while unknown keys are rejected.
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    /// The `type` value is neither a registered key, an invocable, nor an assertion type.
    #[error("invalid value in 'type' key: {0}")]
    InvalidTypeSelector(Value),

    /// A `properties` entry does not name a settable property of the assertion type.
    #[error("invalid property '{name}' in 'properties' key for assertion type '{for_type}'")]
    InvalidPropertyName {
        /// The offending property name.
        name: String,
        /// The assertion type the property was checked against.
        for_type: String,
    },

    /// A key that must hold a mapping holds something else.
    #[error("invalid value in '{0}' key, mapping required")]
    NotAMapping(String),

    /// The nested `children` configuration failed validation.
    #[error("invalid value in 'children' data config: {0}")]
    InvalidChildConfiguration(#[source] Box<ConfigError>),

    /// The tree nests deeper than the configured maximum.
    #[error("configuration nested deeper than {0} levels")]
    DepthExceeded(usize),
}

impl ConfigError {
    /// Wrap this error as the cause of an invalid `children` configuration.
    pub fn in_child(self) -> Self {
        ConfigError::InvalidChildConfiguration(Box::new(self))
    }

    /// Strip every `InvalidChildConfiguration` layer and return the innermost cause.
    ///
    /// ```
    /// use assertree::ConfigError;
    ///
    /// let err = ConfigError::UnknownKey("bogus".into()).in_child().in_child();
    /// assert_eq!(err.root_cause(), &ConfigError::UnknownKey("bogus".into()));
    /// ```
    pub fn root_cause(&self) -> &ConfigError {
        match self {
            ConfigError::InvalidChildConfiguration(cause) => cause.root_cause(),
            other => other,
        }
    }

    /// Number of `children` levels between the reporting node and the cause.
    pub fn child_depth(&self) -> usize {
        match self {
            ConfigError::InvalidChildConfiguration(cause) => 1 + cause.child_depth(),
            _ => 0,
        }
    }
}

/// Every violation found in a configuration tree, in check order.
///
/// Never empty: it is only built from at least one [`ConfigError`].
#[derive(Debug, Clone, PartialEq)]
pub struct Violations {
    first: ConfigError,
    rest: Vec<ConfigError>,
}

impl Violations {
    /// A list holding a single violation.
    pub fn single(error: ConfigError) -> Self {
        Self {
            first: error,
            rest: Vec::new(),
        }
    }

    /// The violation with the highest precedence.
    ///
    /// This is the error fail-fast validation reports.
    pub fn first(&self) -> &ConfigError {
        &self.first
    }

    /// Total number of violations.
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all violations in check order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Consume and return the highest-precedence violation.
    pub fn into_first(self) -> ConfigError {
        self.first
    }

    /// Consume into a plain vector, first violation at index 0.
    pub fn into_vec(self) -> Vec<ConfigError> {
        let mut all = Vec::with_capacity(self.len());
        all.push(self.first);
        all.extend(self.rest);
        all
    }

    /// Wrap every violation as the cause of an invalid `children` configuration.
    pub(crate) fn in_child(self) -> Self {
        Self {
            first: self.first.in_child(),
            rest: self.rest.into_iter().map(ConfigError::in_child).collect(),
        }
    }
}

impl From<ConfigError> for Violations {
    fn from(error: ConfigError) -> Self {
        Violations::single(error)
    }
}

impl Semigroup for Violations {
    fn combine(self, other: Self) -> Self {
        Self {
            first: self.first,
            rest: self.rest.combine(other.into_vec()),
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} configuration violation(s)", self.len())?;
        for error in self.iter() {
            write!(f, "\n  -> {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.first)
    }
}

/// Failures raised by the assertion type registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The selector names no registered key, invocable or assertion type.
    #[error("unknown assertion type '{0}'")]
    UnknownType(String),

    /// The selector is already registered, possibly under another form.
    #[error("assertion type '{0}' is already registered")]
    DuplicateType(String),
}

/// A property value could not be applied to an assertion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// The assertion has no property with this name.
    #[error("unknown property '{0}'")]
    Unknown(String),

    /// The property exists but the value has the wrong shape.
    #[error("property '{name}' expects {expected}, got {found}")]
    InvalidValue {
        /// Property name.
        name: String,
        /// Human readable description of the accepted values.
        expected: &'static str,
        /// The rejected value.
        found: Value,
    },
}

impl PropertyError {
    pub(crate) fn invalid(name: &str, expected: &'static str, found: &Value) -> Self {
        PropertyError::InvalidValue {
            name: name.to_string(),
            expected,
            found: found.clone(),
        }
    }
}

/// Failures raised while running a validated assertion tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    /// A property override could not be applied to the constructed assertion.
    #[error("cannot configure assertion '{assertion}': {source}")]
    InvalidProperty {
        /// The assertion type being configured.
        assertion: String,
        /// What went wrong.
        #[source]
        source: PropertyError,
    },

    /// An invocable selector returned an error.
    #[error("invocable '{name}' failed: {message}")]
    Invocable {
        /// Registered name of the invocable.
        name: String,
        /// Message returned by the invocable.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::MissingMandatoryKey("type".into()).to_string(),
            "missing mandatory key 'type'"
        );
        assert_eq!(
            ConfigError::InvalidTypeSelector(Value::from(42)).to_string(),
            "invalid value in 'type' key: 42"
        );
    }

    #[test]
    fn test_child_wrapping_preserves_message() {
        let err = ConfigError::UnknownKey("bogus".into()).in_child();
        assert_eq!(
            err.to_string(),
            "invalid value in 'children' data config: unknown key 'bogus'"
        );
        assert_eq!(err.child_depth(), 1);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_violations_combine_keeps_order() {
        let v = Violations::single(ConfigError::MissingMandatoryKey("type".into()))
            .combine(Violations::single(ConfigError::UnknownKey("a".into())))
            .combine(Violations::single(ConfigError::UnknownKey("b".into())));

        assert_eq!(v.len(), 3);
        assert_eq!(v.first(), &ConfigError::MissingMandatoryKey("type".into()));
        assert_eq!(
            v.into_vec(),
            vec![
                ConfigError::MissingMandatoryKey("type".into()),
                ConfigError::UnknownKey("a".into()),
                ConfigError::UnknownKey("b".into()),
            ]
        );
    }

    #[test]
    fn test_violations_display_lists_each_error() {
        let v = Violations::single(ConfigError::UnknownKey("a".into()))
            .combine(ConfigError::UnknownKey("b".into()).into());
        let lines: Vec<String> = v.to_string().lines().map(str::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "2 configuration violation(s)",
                "  -> unknown key 'a'",
                "  -> unknown key 'b'",
            ]
        );
    }

    #[test]
    fn test_property_error_message() {
        let err = PropertyError::invalid("strict", "a boolean", &Value::from("yes"));
        assert_eq!(
            err.to_string(),
            "property 'strict' expects a boolean, got \"yes\""
        );
    }
}
