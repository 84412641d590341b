//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Options controlling how raw configurations are validated.
///
/// Configs are pure data: they are threaded into a
/// [`Validator`](crate::Validator) explicitly and never change behind its back.
///
/// # Examples
///
/// ```rust
/// use assertree::ValidatorConfig;
///
/// let config = ValidatorConfig::default();
/// assert!(config.rejects_unknown_keys());
/// assert_eq!(config.max_depth(), 32);
///
/// let lenient = ValidatorConfig::new()
///     .with_unknown_keys_allowed()
///     .with_max_depth(4);
/// assert!(!lenient.rejects_unknown_keys());
/// ```
///
/// Hosts can load it from their own configuration files:
///
/// ```rust
/// use assertree::ValidatorConfig;
///
/// let config: ValidatorConfig =
///     serde_json::from_str(r#"{"rejectUnknownKeys": false}"#).unwrap();
/// assert!(!config.rejects_unknown_keys());
/// assert_eq!(config.max_depth(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    reject_unknown_keys: bool,
    max_depth: usize,
}

impl ValidatorConfig {
    /// Default nesting limit for `children`.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// The default configuration: unknown keys rejected, depth 32.
    pub fn new() -> Self {
        Self {
            reject_unknown_keys: true,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Set whether keys outside the accepted key set are rejected.
    pub fn reject_unknown_keys(mut self, reject: bool) -> Self {
        self.reject_unknown_keys = reject;
        self
    }

    /// Accept and ignore keys outside the accepted key set.
    pub fn with_unknown_keys_allowed(self) -> Self {
        self.reject_unknown_keys(false)
    }

    /// Limit how many `children` levels a tree may nest.
    ///
    /// A depth of 0 only admits a root without children.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether unknown keys are a validation error.
    pub fn rejects_unknown_keys(&self) -> bool {
        self.reject_unknown_keys
    }

    /// Maximum `children` nesting.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
