//! # Assertree
//!
//! Declarative assertion trees over JSON values.
//!
//! A tree is a plain mapping naming an assertion `type`, the `checkValue`
//! under test, optional `properties` overrides, `success` / `fail` payloads
//! and an optional nested `children` node that runs only when its parent
//! succeeds. Mappings are validated once, up front, into an immutable
//! [`DeclarativeNode`]; running a node never fails on configuration.
//!
//! The assertions themselves live in [`predicate`] and can be used directly,
//! composed with AND / OR / NOT.
//!
//! ## Quick Example
//!
//! ```rust
//! use assertree::{DeclarativeNode, Validator};
//! use serde_json::json;
//!
//! let config = json!({
//!     "type": "isNumeric",
//!     "checkValue": "42",
//!     "success": {"numeric": true},
//!     "fail": {"numeric": false},
//!     "children": {
//!         "type": "inRange",
//!         "checkValue": 42,
//!         "properties": {"min": 0, "max": 100},
//!         "success": {"percent": true},
//!         "fail": {"percent": false}
//!     }
//! });
//!
//! let node = Validator::default()
//!     .validate(config.as_object().unwrap())
//!     .unwrap();
//! let result = node.run().unwrap();
//!
//! assert!(result.succeeded);
//! assert_eq!(
//!     serde_json::to_value(&result.payload).unwrap(),
//!     json!({"numeric": true, "percent": true})
//! );
//! ```
//!
//! ## Collecting every problem
//!
//! ```rust
//! use assertree::Validator;
//! use serde_json::json;
//!
//! let config = json!({
//!     "type": "equals",
//!     "bogus": 1,
//!     "properties": {"notARealProp": true}
//! });
//!
//! let violations = Validator::default()
//!     .inspect(config.as_object().unwrap())
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(violations.len(), 3);
//! println!("{violations}");
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod node;
pub mod payload;
pub mod predicate;
pub mod registry;
pub mod semigroup;
pub mod testing;
pub mod validation;
pub mod validator;

// Re-exports
pub use config::ValidatorConfig;
pub use error::{ConfigError, ExecutionError, PropertyError, RegistryError, Violations};
pub use executor::ExecutionResult;
pub use node::{DeclarativeNode, NodeBuilder};
pub use payload::Payload;
pub use registry::{Factory, Invocable, Registry, TypeDescriptor, TypeSelector};
pub use semigroup::Semigroup;
pub use validation::Validation;
pub use validator::Validator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ValidatorConfig;
    pub use crate::error::{ConfigError, ExecutionError, Violations};
    pub use crate::executor::ExecutionResult;
    pub use crate::node::{DeclarativeNode, NodeBuilder};
    pub use crate::predicate::prelude::*;
    pub use crate::registry::{Registry, TypeDescriptor};
    pub use crate::semigroup::Semigroup;
    pub use crate::validation::Validation;
    pub use crate::validator::Validator;
}
