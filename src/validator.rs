//! Tree validator
//!
//! Checks a raw configuration mapping before it becomes a
//! [`DeclarativeNode`]. Each level of the tree is checked in a fixed order:
//!
//! 1. mandatory keys (`type`, then `checkValue`) and, when enabled, unknown keys
//! 2. the `type` selector
//! 3. `properties` names against the resolved type
//! 4. `success` and `fail` shapes
//! 5. `children`, recursively, with failures wrapped as
//!    [`ConfigError::InvalidChildConfiguration`]
//!
//! [`Validator::inspect`] reports every violation in that order;
//! [`Validator::validate`] reports the first one. A configuration is never
//! partially accepted.
//!
//! # Example
//!
//! ```rust
//! use assertree::{ConfigError, Validator};
//! use serde_json::json;
//!
//! let raw = json!({"checkValue": 1, "bogus": true});
//! let raw = raw.as_object().unwrap();
//!
//! let validator = Validator::default();
//! assert_eq!(
//!     validator.validate(raw).unwrap_err(),
//!     ConfigError::MissingMandatoryKey("type".into())
//! );
//!
//! let all = validator.inspect(raw).into_result().unwrap_err();
//! assert_eq!(all.len(), 2);
//! ```

use serde::de::{self, DeserializeSeed, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::ValidatorConfig;
use crate::error::{ConfigError, Violations};
use crate::node::{
    DeclarativeNode, CHILDREN, FAIL, KEYS, MANDATORY_KEYS, PROPERTIES, RESERVED_PROPERTIES,
    SUCCESS, TYPE,
};
use crate::registry::{Registry, TypeSelector};
use crate::{Semigroup, Validation};

/// Validates raw configurations against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r Registry,
    config: ValidatorConfig,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Validator::new(Registry::global())
    }
}

impl<'r> Validator<'r> {
    /// A validator resolving selectors in `registry`, with the default config.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: ValidatorConfig::default(),
        }
    }

    /// Replace the config.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The registry selectors resolve in.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// The active config.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `raw`, reporting the highest-precedence violation.
    pub fn validate(&self, raw: &Map<String, Value>) -> Result<DeclarativeNode, ConfigError> {
        self.inspect(raw).into_result().map_err(Violations::into_first)
    }

    /// Validate `raw`, reporting every violation in the tree.
    pub fn inspect(&self, raw: &Map<String, Value>) -> Validation<DeclarativeNode, Violations> {
        let result = self.inspect_at(raw, 0);

        #[cfg(feature = "tracing")]
        match &result {
            Validation::Success(node) => tracing::debug!(
                assertion = node.type_name(),
                nodes = node.node_count(),
                "configuration accepted"
            ),
            Validation::Failure(violations) => tracing::debug!(
                violations = violations.len(),
                first = %violations.first(),
                "configuration rejected"
            ),
        }

        result
    }

    fn inspect_at(
        &self,
        raw: &Map<String, Value>,
        depth: usize,
    ) -> Validation<DeclarativeNode, Violations> {
        #[cfg(feature = "tracing")]
        tracing::trace!(depth, "validating node");

        let keys = self.check_keys(raw);
        let selector = self.check_selector(raw);
        let resolved = match &selector {
            Validation::Success(selector) => selector.as_ref(),
            Validation::Failure(_) => None,
        };
        let properties = self.check_properties(raw, resolved);
        let payloads = self.check_payloads(raw);
        let child = self.check_child(raw, depth);

        Validation::all((keys, selector, properties, payloads, child)).and_then(
            |((), selector, (), (), child)| match selector {
                Some(selector) => {
                    Validation::success(DeclarativeNode::from_parts(raw.clone(), selector, child))
                }
                None => Validation::failure(ConfigError::MissingMandatoryKey(TYPE.into()).into()),
            },
        )
    }

    fn check_keys(&self, raw: &Map<String, Value>) -> Validation<(), Violations> {
        let missing = MANDATORY_KEYS
            .iter()
            .filter(|key| !raw.contains_key(**key))
            .map(|key| ConfigError::MissingMandatoryKey(key.to_string()));

        let unknown = raw
            .keys()
            .filter(|key| self.config.rejects_unknown_keys() && !KEYS.contains(&key.as_str()))
            .map(|key| ConfigError::UnknownKey(key.clone()));

        collect(missing.chain(unknown))
    }

    /// `Success(None)` when `type` is absent; that is reported by the key check.
    fn check_selector(
        &self,
        raw: &Map<String, Value>,
    ) -> Validation<Option<TypeSelector>, Violations> {
        let Some(value) = raw.get(TYPE) else {
            return Validation::success(None);
        };
        match value.as_str().map(|name| self.registry.resolve(name)) {
            Some(Ok(selector)) => Validation::success(Some(selector.clone())),
            _ => Validation::failure(ConfigError::InvalidTypeSelector(value.clone()).into()),
        }
    }

    fn check_properties(
        &self,
        raw: &Map<String, Value>,
        selector: Option<&TypeSelector>,
    ) -> Validation<(), Violations> {
        let properties = match raw.get(PROPERTIES) {
            None => return Validation::success(()),
            Some(Value::Object(properties)) => properties,
            Some(_) => {
                return Validation::failure(ConfigError::NotAMapping(PROPERTIES.into()).into())
            }
        };
        // Invocables and unresolved selectors expose no property table.
        let Some(descriptor) = selector.and_then(TypeSelector::descriptor) else {
            return Validation::success(());
        };

        collect(
            properties
                .keys()
                .filter(|name| {
                    !descriptor.has_property(name) && !RESERVED_PROPERTIES.contains(&name.as_str())
                })
                .map(|name| ConfigError::InvalidPropertyName {
                    name: name.clone(),
                    for_type: descriptor.name().to_string(),
                }),
        )
    }

    fn check_payloads(&self, raw: &Map<String, Value>) -> Validation<(), Violations> {
        collect(
            [SUCCESS, FAIL]
                .into_iter()
                .filter(|key| raw.get(*key).is_some_and(|value| !value.is_object()))
                .map(|key| ConfigError::NotAMapping(key.to_string())),
        )
    }

    fn check_child(
        &self,
        raw: &Map<String, Value>,
        depth: usize,
    ) -> Validation<Option<DeclarativeNode>, Violations> {
        match raw.get(CHILDREN) {
            None => Validation::success(None),
            Some(Value::Object(child)) if depth < self.config.max_depth() => self
                .inspect_at(child, depth + 1)
                .map(Some)
                .map_err(Violations::in_child),
            Some(Value::Object(_)) => Validation::failure(
                ConfigError::DepthExceeded(self.config.max_depth()).into(),
            ),
            Some(_) => Validation::failure(ConfigError::NotAMapping(CHILDREN.into()).into()),
        }
    }
}

/// Deserialize a node, resolving selectors in this validator's registry.
///
/// `DeclarativeNode`'s own `Deserialize` impl always uses the global
/// builtin registry; seed a deserializer with a validator to accept types
/// registered by the host.
///
/// ```rust
/// use assertree::predicate::Equal;
/// use assertree::{Registry, TypeDescriptor, Validator};
/// use serde::de::DeserializeSeed;
///
/// let mut registry = Registry::builtin();
/// registry.register_type(TypeDescriptor::of::<Equal>("sameAs")).unwrap();
///
/// let mut json = serde_json::Deserializer::from_str(
///     r#"{"type": "sameAs", "checkValue": 1, "properties": {"value": 1}}"#,
/// );
/// let node = Validator::new(&registry).deserialize(&mut json).unwrap();
/// assert!(node.run().unwrap().succeeded);
/// ```
impl<'de, 'r> DeserializeSeed<'de> for Validator<'r> {
    type Value = DeclarativeNode;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let raw = Map::deserialize(deserializer)?;
        self.validate(&raw).map_err(de::Error::custom)
    }
}

fn collect(errors: impl Iterator<Item = ConfigError>) -> Validation<(), Violations> {
    match errors.map(Violations::single).reduce(Semigroup::combine) {
        Some(violations) => Validation::failure(violations),
        None => Validation::success(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Equal;
    use crate::registry::TypeDescriptor;
    use crate::{assert_failure, assert_success, assert_violations};
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_empty_config_reports_type_first() {
        let validator = Validator::default();
        assert_eq!(
            validator.validate(&Map::new()).unwrap_err(),
            ConfigError::MissingMandatoryKey("type".into())
        );
        assert_violations!(
            validator.inspect(&Map::new()),
            vec![
                ConfigError::MissingMandatoryKey("type".into()),
                ConfigError::MissingMandatoryKey("checkValue".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_keys_toggle() {
        let config = raw(json!({"type": "equals", "checkValue": 1, "bogus": true}));
        let strict = Validator::default();
        assert_eq!(
            strict.validate(&config).unwrap_err(),
            ConfigError::UnknownKey("bogus".into())
        );

        let lenient =
            Validator::default().with_config(ValidatorConfig::new().with_unknown_keys_allowed());
        let node = lenient.validate(&config).unwrap();
        assert_eq!(node.raw().get("bogus"), Some(&json!(true)));
    }

    #[test]
    fn test_invalid_type_selectors() {
        let validator = Validator::default();
        for selector in [json!("sortOf"), json!(42), json!(null), json!({"k": "v"})] {
            let config = raw(json!({"type": selector.clone(), "checkValue": 1}));
            assert_eq!(
                validator.validate(&config).unwrap_err(),
                ConfigError::InvalidTypeSelector(selector)
            );
        }
    }

    #[test]
    fn test_property_names_checked_against_type() {
        let config = raw(json!({
            "type": "equals",
            "checkValue": 1,
            "properties": {"strict": true, "notARealProp": true, "min": 1}
        }));
        assert_violations!(
            Validator::default().inspect(&config),
            vec![
                ConfigError::InvalidPropertyName {
                    name: "min".into(),
                    for_type: "equals".into(),
                },
                ConfigError::InvalidPropertyName {
                    name: "notARealProp".into(),
                    for_type: "equals".into(),
                },
            ]
        );
    }

    #[test]
    fn test_reserved_property_names_pass() {
        let config = raw(json!({
            "type": "equals",
            "checkValue": 1,
            "properties": {"checkValue": 2, "success": {}, "fail": {}}
        }));
        assert_success!(Validator::default().inspect(&config));
    }

    #[test]
    fn test_properties_must_be_mapping() {
        let config = raw(json!({"type": "equals", "checkValue": 1, "properties": [1]}));
        assert_eq!(
            Validator::default().validate(&config).unwrap_err(),
            ConfigError::NotAMapping("properties".into())
        );
    }

    #[test]
    fn test_payloads_must_be_mappings() {
        let config = raw(json!({"type": "equals", "checkValue": 1, "success": "ok", "fail": 0}));
        assert_violations!(
            Validator::default().inspect(&config),
            vec![
                ConfigError::NotAMapping("success".into()),
                ConfigError::NotAMapping("fail".into()),
            ]
        );
    }

    #[test]
    fn test_invocable_properties_not_checked() {
        let mut registry = Registry::builtin();
        registry
            .register_invocable("always", |_, _| Ok(true))
            .unwrap();
        let config = raw(json!({
            "type": "always",
            "checkValue": 1,
            "properties": {"anything": true}
        }));
        assert_success!(Validator::new(&registry).inspect(&config));
    }

    #[test]
    fn test_external_type_properties_checked() {
        let mut registry = Registry::builtin();
        registry
            .register_type(TypeDescriptor::of::<Equal>("sameAs"))
            .unwrap();
        let config = raw(json!({
            "type": "sameAs",
            "checkValue": 1,
            "properties": {"inclusive": true}
        }));
        assert_eq!(
            Validator::new(&registry).validate(&config).unwrap_err(),
            ConfigError::InvalidPropertyName {
                name: "inclusive".into(),
                for_type: "sameAs".into(),
            }
        );
    }

    #[test]
    fn test_child_errors_are_wrapped() {
        let config = raw(json!({
            "type": "equals",
            "checkValue": 1,
            "children": {"type": "equals", "checkValue": 1, "children": {"type": "nope", "checkValue": 1}}
        }));
        let err = Validator::default().validate(&config).unwrap_err();
        assert_eq!(err.child_depth(), 2);
        assert_eq!(
            err.root_cause(),
            &ConfigError::InvalidTypeSelector(json!("nope"))
        );
    }

    #[test]
    fn test_children_must_be_mapping() {
        let config = raw(json!({"type": "equals", "checkValue": 1, "children": [1]}));
        assert_eq!(
            Validator::default().validate(&config).unwrap_err(),
            ConfigError::NotAMapping("children".into())
        );
    }

    #[test]
    fn test_missing_key_precedes_child_error() {
        let config = raw(json!({"type": "equals", "children": {"type": "nope"}}));
        let violations = Validator::default().inspect(&config).into_result().unwrap_err();
        assert_eq!(
            violations.first(),
            &ConfigError::MissingMandatoryKey("checkValue".into())
        );
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_depth_guard() {
        let config = raw(json!({
            "type": "isInt", "checkValue": 1,
            "children": {"type": "isInt", "checkValue": 1,
                "children": {"type": "isInt", "checkValue": 1}}
        }));
        let shallow = Validator::default().with_config(ValidatorConfig::new().with_max_depth(1));
        assert_eq!(
            shallow.validate(&config).unwrap_err(),
            ConfigError::DepthExceeded(1).in_child()
        );

        let deep_enough = Validator::default().with_config(ValidatorConfig::new().with_max_depth(2));
        assert_eq!(deep_enough.validate(&config).unwrap().node_count(), 3);
    }

    #[test]
    fn test_failure_never_yields_node() {
        let config = raw(json!({"type": "equals", "checkValue": 1, "children": {"checkValue": 1}}));
        assert_failure!(Validator::default().inspect(&config));
    }

    #[test]
    fn test_accepts_configuration_verbatim() {
        let config = raw(json!({
            "type": "inRange",
            "checkValue": 5,
            "properties": {"min": 1, "max": 10},
            "success": {"ok": true}
        }));
        let node = Validator::default().validate(&config).unwrap();
        assert_eq!(node.raw(), &config);
        assert!(matches!(node.selector(), TypeSelector::Registered(_)));
    }
}
