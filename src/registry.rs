//! Assertion type registry
//!
//! Maps the string in a node's `type` key to something that can be run.
//! A selector is one of three disjoint forms, modelled by [`TypeSelector`]:
//!
//! - a built-in key such as `"equals"` or `"inRange"`,
//! - a host-provided [`AssertionType`] registered with [`Registry::register_type`],
//! - an invocable closure registered with [`Registry::register_invocable`].
//!
//! [`Registry::global`] is the read-only built-in table used by default.
//! Hosts that extend the registry own their `Registry` value and hand it to a
//! [`Validator`](crate::Validator).
//!
//! # Example
//!
//! ```rust
//! use assertree::Registry;
//!
//! let registry = Registry::global();
//! assert!(registry.is_known_key("equals"));
//! assert!(registry.class_for("inRange").unwrap().has_property("min"));
//! assert!(registry.resolve("sortOf").is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::error::{ExecutionError, RegistryError};
use crate::predicate::{
    ArrayContains, ArrayHasKey, AssertionType, Configurable, Count, Equal, GreaterThan, InRange,
    LessThan, NotEqual, RegexMatch, StringKind, StringMatch, TypeCheck, TypeKind,
};

/// Builds a fresh assertion seeded with a check value.
pub type Factory = fn(Value) -> Box<dyn Configurable>;

/// Introspectable metadata for a concrete assertion type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    properties: &'static [&'static str],
    factory: Factory,
}

impl TypeDescriptor {
    /// Describe an assertion type from its parts.
    pub fn new(
        name: impl Into<String>,
        properties: &'static [&'static str],
        factory: Factory,
    ) -> Self {
        Self {
            name: name.into(),
            properties,
            factory,
        }
    }

    /// Describe a type implementing [`AssertionType`].
    ///
    /// ```rust
    /// use assertree::predicate::Equal;
    /// use assertree::TypeDescriptor;
    ///
    /// let descriptor = TypeDescriptor::of::<Equal>("sameAs");
    /// assert_eq!(descriptor.name(), "sameAs");
    /// assert!(descriptor.has_property("strict"));
    /// ```
    pub fn of<T: AssertionType>(name: impl Into<String>) -> Self {
        Self::new(name, T::PROPERTIES, build::<T>)
    }

    /// Selector string this type is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settable property names.
    pub fn properties(&self) -> &'static [&'static str] {
        self.properties
    }

    /// Whether `name` is a settable property.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains(&name)
    }

    /// Construct an instance seeded with `check_value`.
    pub fn instantiate(&self, check_value: Value) -> Box<dyn Configurable> {
        (self.factory)(check_value)
    }
}

fn build<T: AssertionType>(check_value: Value) -> Box<dyn Configurable> {
    Box::new(T::with_check_value(check_value))
}

type InvocableFn = dyn Fn(&Value, &Value) -> Result<bool, String> + Send + Sync;

/// A named closure usable as a `type` selector.
///
/// It receives the check value and the right-hand operand (`null` when the
/// node has none) and decides success itself.
#[derive(Clone)]
pub struct Invocable {
    name: String,
    call: Arc<InvocableFn>,
}

impl Invocable {
    /// Wrap a closure under a selector name.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<bool, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            call: Arc::new(f),
        }
    }

    /// Selector string this invocable is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the closure.
    pub fn call(&self, check_value: &Value, value: &Value) -> Result<bool, ExecutionError> {
        (self.call)(check_value, value).map_err(|message| ExecutionError::Invocable {
            name: self.name.clone(),
            message,
        })
    }
}

impl fmt::Debug for Invocable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocable")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A resolved `type` selector.
#[derive(Debug, Clone)]
pub enum TypeSelector {
    /// One of the built-in keys.
    Registered(TypeDescriptor),
    /// A host-provided assertion type.
    External(TypeDescriptor),
    /// A host-provided closure.
    Invocable(Invocable),
}

impl TypeSelector {
    /// The selector string.
    pub fn name(&self) -> &str {
        match self {
            TypeSelector::Registered(d) | TypeSelector::External(d) => d.name(),
            TypeSelector::Invocable(i) => i.name(),
        }
    }

    /// Type metadata, absent for invocables.
    pub fn descriptor(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeSelector::Registered(d) | TypeSelector::External(d) => Some(d),
            TypeSelector::Invocable(_) => None,
        }
    }
}

/// Selector table.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, TypeSelector>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in key.
    pub fn builtin() -> Self {
        let descriptors = [
            TypeDescriptor::of::<Equal>("equals"),
            TypeDescriptor::new("equalsCaseSensitive", Equal::PROPERTIES, |v| {
                Box::new(Equal::with_check_value(v).case_sensitive(true))
            }),
            TypeDescriptor::of::<NotEqual>("notEquals"),
            TypeDescriptor::of::<GreaterThan>("greaterThan"),
            TypeDescriptor::of::<LessThan>("lessThan"),
            TypeDescriptor::of::<InRange>("inRange"),
            TypeDescriptor::new("stringContains", StringMatch::PROPERTIES, |v| {
                Box::new(StringMatch::new(StringKind::Contains, v, Value::Null))
            }),
            TypeDescriptor::new("stringStartsWith", StringMatch::PROPERTIES, |v| {
                Box::new(StringMatch::new(StringKind::StartsWith, v, Value::Null))
            }),
            TypeDescriptor::new("stringEndsWith", StringMatch::PROPERTIES, |v| {
                Box::new(StringMatch::new(StringKind::EndsWith, v, Value::Null))
            }),
            TypeDescriptor::of::<RegexMatch>("regex"),
            TypeDescriptor::of::<ArrayContains>("arrayContains"),
            TypeDescriptor::of::<ArrayHasKey>("arrayHasKey"),
            TypeDescriptor::of::<Count>("count"),
            type_check("isNull", TypeKind::Null, |v| {
                Box::new(TypeCheck::new(TypeKind::Null, v))
            }),
            type_check("isNotNull", TypeKind::NotNull, |v| {
                Box::new(TypeCheck::new(TypeKind::NotNull, v))
            }),
            type_check("isEmpty", TypeKind::Empty, |v| {
                Box::new(TypeCheck::new(TypeKind::Empty, v))
            }),
            type_check("isNotEmpty", TypeKind::NotEmpty, |v| {
                Box::new(TypeCheck::new(TypeKind::NotEmpty, v))
            }),
            type_check("isArray", TypeKind::Array, |v| {
                Box::new(TypeCheck::new(TypeKind::Array, v))
            }),
            type_check("isString", TypeKind::String, |v| {
                Box::new(TypeCheck::new(TypeKind::String, v))
            }),
            type_check("isNumeric", TypeKind::Numeric, |v| {
                Box::new(TypeCheck::new(TypeKind::Numeric, v))
            }),
            type_check("isInt", TypeKind::Int, |v| {
                Box::new(TypeCheck::new(TypeKind::Int, v))
            }),
            type_check("isFloat", TypeKind::Float, |v| {
                Box::new(TypeCheck::new(TypeKind::Float, v))
            }),
            type_check("isInstance", TypeKind::Instance, |v| {
                Box::new(TypeCheck::new(TypeKind::Instance, v))
            }),
        ];

        let entries = descriptors
            .into_iter()
            .map(|d| (d.name().to_string(), TypeSelector::Registered(d)))
            .collect();
        Self { entries }
    }

    /// The process-wide built-in registry, built on first use.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::builtin)
    }

    /// Register a host-provided assertion type.
    ///
    /// ```rust
    /// use assertree::predicate::Equal;
    /// use assertree::{Registry, RegistryError, TypeDescriptor};
    ///
    /// let mut registry = Registry::builtin();
    /// registry.register_type(TypeDescriptor::of::<Equal>("sameAs")).unwrap();
    /// assert!(!registry.is_known_key("sameAs"));
    /// assert!(registry.class_for("sameAs").is_some());
    ///
    /// let clash = registry.register_type(TypeDescriptor::of::<Equal>("equals"));
    /// assert_eq!(clash, Err(RegistryError::DuplicateType("equals".into())));
    /// ```
    pub fn register_type(&mut self, descriptor: TypeDescriptor) -> Result<(), RegistryError> {
        let name = descriptor.name().to_string();
        self.insert(name, TypeSelector::External(descriptor))
    }

    /// Register a closure as a selector.
    ///
    /// ```rust
    /// use assertree::Registry;
    ///
    /// let mut registry = Registry::builtin();
    /// registry
    ///     .register_invocable("isEven", |check, _| {
    ///         check.as_i64().map(|n| n % 2 == 0).ok_or_else(|| "not an integer".to_string())
    ///     })
    ///     .unwrap();
    /// assert!(registry.resolve("isEven").is_ok());
    /// assert!(registry.class_for("isEven").is_none());
    /// ```
    pub fn register_invocable<F>(
        &mut self,
        name: impl Into<String>,
        f: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&Value, &Value) -> Result<bool, String> + Send + Sync + 'static,
    {
        let invocable = Invocable::new(name, f);
        let name = invocable.name().to_string();
        self.insert(name, TypeSelector::Invocable(invocable))
    }

    fn insert(&mut self, name: String, selector: TypeSelector) -> Result<(), RegistryError> {
        if self.entries.contains_key(&name) {
            return Err(RegistryError::DuplicateType(name));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(selector = %name, "registered assertion type");
        self.entries.insert(name, selector);
        Ok(())
    }

    /// Look up a selector.
    pub fn resolve(&self, selector: &str) -> Result<&TypeSelector, RegistryError> {
        self.entries
            .get(selector)
            .ok_or_else(|| RegistryError::UnknownType(selector.to_string()))
    }

    /// Whether `key` is one of the built-in keys.
    pub fn is_known_key(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(TypeSelector::Registered(_)))
    }

    /// Metadata for a built-in key or host-provided assertion type.
    pub fn class_for(&self, key: &str) -> Option<&TypeDescriptor> {
        self.entries.get(key).and_then(TypeSelector::descriptor)
    }

    /// Every registered selector, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered selectors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn type_check(name: &str, kind: TypeKind, factory: Factory) -> TypeDescriptor {
    TypeDescriptor::new(name, kind.properties(), factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Assertion;
    use serde_json::json;

    #[test]
    fn test_builtin_keys() {
        let registry = Registry::builtin();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys.len(), 23);
        for key in ["equals", "equalsCaseSensitive", "regex", "count", "isInstance"] {
            assert!(registry.is_known_key(key), "{key} should be built in");
        }
        assert!(!registry.is_known_key("Equals"));
    }

    #[test]
    fn test_class_for_exposes_properties() {
        let registry = Registry::global();
        let equals = registry.class_for("equals").unwrap();
        assert_eq!(equals.properties(), &["value", "strict", "caseSensitive"]);
        assert!(registry.class_for("isNull").unwrap().properties().is_empty());
        assert!(registry.class_for("isString").unwrap().has_property("allowEmpty"));
        assert!(registry.class_for("nope").is_none());
    }

    #[test]
    fn test_equals_case_sensitive_factory() {
        let registry = Registry::global();
        let mut eq = registry
            .class_for("equalsCaseSensitive")
            .unwrap()
            .instantiate(json!("Mondo"));
        eq.set_value(json!("mondo"));
        assert!(!eq.evaluate());

        let mut loose = registry.class_for("equals").unwrap().instantiate(json!("Mondo"));
        loose.set_value(json!("mondo"));
        assert!(loose.evaluate());
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(
            Registry::global().resolve("sortOf").unwrap_err(),
            RegistryError::UnknownType("sortOf".into())
        );
    }

    #[test]
    fn test_duplicate_names_across_forms() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        registry
            .register_invocable("check", |_, _| Ok(true))
            .unwrap();
        assert_eq!(
            registry.register_type(TypeDescriptor::of::<Equal>("check")),
            Err(RegistryError::DuplicateType("check".into()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invocable_error_maps_to_execution_error() {
        let inv = Invocable::new("boom", |_, _| Err("exploded".to_string()));
        assert_eq!(
            inv.call(&json!(1), &Value::Null),
            Err(ExecutionError::Invocable {
                name: "boom".into(),
                message: "exploded".into(),
            })
        );
        assert_eq!(format!("{inv:?}"), "Invocable { name: \"boom\", .. }");
    }

    #[test]
    fn test_selector_forms() {
        let mut registry = Registry::builtin();
        registry
            .register_type(TypeDescriptor::of::<Equal>("sameAs"))
            .unwrap();
        registry.register_invocable("always", |_, _| Ok(true)).unwrap();

        assert!(matches!(
            registry.resolve("equals"),
            Ok(TypeSelector::Registered(_))
        ));
        assert!(matches!(
            registry.resolve("sameAs"),
            Ok(TypeSelector::External(_))
        ));
        let always = registry.resolve("always").unwrap();
        assert!(matches!(always, TypeSelector::Invocable(_)));
        assert!(always.descriptor().is_none());
        assert_eq!(always.name(), "always");
    }
}
