//! Declarative nodes
//!
//! A [`DeclarativeNode`] is a raw configuration mapping that passed
//! validation. It keeps that mapping verbatim, together with the selector the
//! `type` key resolved to and its validated `children` node, and cannot be
//! modified afterwards.
//!
//! ```rust
//! use assertree::DeclarativeNode;
//! use serde_json::json;
//!
//! let node: DeclarativeNode = serde_json::from_value(json!({
//!     "type": "greaterThan",
//!     "checkValue": 12,
//!     "properties": {"value": 10},
//!     "success": {"status": "in stock"},
//!     "fail": {"status": "sold out"}
//! }))
//! .unwrap();
//!
//! let result = node.run().unwrap();
//! assert!(result.succeeded);
//! assert_eq!(result.payload.get("status"), Some(&json!("in stock")));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{ConfigError, ExecutionError};
use crate::executor::{self, ExecutionResult};
use crate::registry::TypeSelector;
use crate::validator::Validator;

/// Key holding the type selector.
pub const TYPE: &str = "type";
/// Key holding the value under test.
pub const CHECK_VALUE: &str = "checkValue";
/// Key holding property overrides.
pub const PROPERTIES: &str = "properties";
/// Key holding the nested node.
pub const CHILDREN: &str = "children";
/// Key holding the success payload.
pub const SUCCESS: &str = "success";
/// Key holding the failure payload.
pub const FAIL: &str = "fail";

/// Every key a node may carry.
pub const KEYS: [&str; 6] = [TYPE, CHECK_VALUE, PROPERTIES, CHILDREN, SUCCESS, FAIL];

/// Keys required on every node, in the order they are checked.
pub const MANDATORY_KEYS: [&str; 2] = [TYPE, CHECK_VALUE];

/// Names that never reach an assertion through `properties`.
///
/// They pass validation and are skipped when properties are applied.
pub const RESERVED_PROPERTIES: [&str; 3] = [CHECK_VALUE, SUCCESS, FAIL];

/// A validated assertion configuration.
#[derive(Debug, Clone)]
pub struct DeclarativeNode {
    raw: Map<String, Value>,
    selector: TypeSelector,
    child: Option<Box<DeclarativeNode>>,
}

impl DeclarativeNode {
    /// Validate `raw` against the built-in registry with the default config.
    pub fn new(raw: Map<String, Value>) -> Result<Self, ConfigError> {
        Validator::default().validate(&raw)
    }

    pub(crate) fn from_parts(
        raw: Map<String, Value>,
        selector: TypeSelector,
        child: Option<DeclarativeNode>,
    ) -> Self {
        Self {
            raw,
            selector,
            child: child.map(Box::new),
        }
    }

    /// The accepted configuration, verbatim.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Consume the node and return the accepted configuration.
    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }

    /// The selector `type` resolved to.
    pub fn selector(&self) -> &TypeSelector {
        &self.selector
    }

    /// The `type` string.
    pub fn type_name(&self) -> &str {
        self.selector.name()
    }

    /// The value under test.
    pub fn check_value(&self) -> &Value {
        self.raw.get(CHECK_VALUE).unwrap_or(&Value::Null)
    }

    /// Property overrides, if any.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.raw.get(PROPERTIES).and_then(Value::as_object)
    }

    /// The success payload, if any.
    pub fn success(&self) -> Option<&Map<String, Value>> {
        self.raw.get(SUCCESS).and_then(Value::as_object)
    }

    /// The failure payload, if any.
    pub fn fail(&self) -> Option<&Map<String, Value>> {
        self.raw.get(FAIL).and_then(Value::as_object)
    }

    /// The nested node, if any.
    pub fn children(&self) -> Option<&DeclarativeNode> {
        self.child.as_deref()
    }

    /// Number of nodes in this tree, counting this one.
    pub fn node_count(&self) -> usize {
        1 + self.child.as_ref().map_or(0, |child| child.node_count())
    }

    /// Run this tree. See [`executor::run`].
    pub fn run(&self) -> Result<ExecutionResult, ExecutionError> {
        executor::run(self)
    }

    /// Run this tree against a right-hand operand. See [`executor::run_against`].
    pub fn run_against(&self, subject: &Value) -> Result<ExecutionResult, ExecutionError> {
        executor::run_against(self, subject)
    }
}

impl PartialEq for DeclarativeNode {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Serialize for DeclarativeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Validates against the global builtin registry; seed a deserializer with a
/// [`Validator`] to use another one.
impl<'de> Deserialize<'de> for DeclarativeNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::deserialize(deserializer)?;
        DeclarativeNode::new(raw).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Map<String, Value>> for DeclarativeNode {
    type Error = ConfigError;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        DeclarativeNode::new(raw)
    }
}

/// Programmatic construction of node configurations.
///
/// ```rust
/// use assertree::NodeBuilder;
/// use serde_json::json;
///
/// let node = NodeBuilder::new("equals", 5)
///     .property("strict", false)
///     .on_success("msg", "ok")
///     .on_fail("msg", "no")
///     .child(NodeBuilder::new("isInt", 5).on_success("extra", 1))
///     .build()
///     .unwrap();
///
/// let result = node.run_against(&json!("5")).unwrap();
/// assert!(result.succeeded);
/// assert_eq!(serde_json::to_value(&result.payload).unwrap(), json!({"msg": "ok", "extra": 1}));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeBuilder {
    raw: Map<String, Value>,
}

impl NodeBuilder {
    /// Start a node with its two mandatory keys.
    pub fn new(type_name: impl Into<String>, check_value: impl Into<Value>) -> Self {
        let mut raw = Map::new();
        raw.insert(TYPE.to_string(), Value::String(type_name.into()));
        raw.insert(CHECK_VALUE.to_string(), check_value.into());
        Self { raw }
    }

    /// Add a property override.
    pub fn property(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entry(PROPERTIES, name.into(), value.into())
    }

    /// Add an entry to the success payload.
    pub fn on_success(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entry(SUCCESS, key.into(), value.into())
    }

    /// Add an entry to the failure payload.
    pub fn on_fail(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entry(FAIL, key.into(), value.into())
    }

    /// Nest a node, replacing any previous one.
    pub fn child(mut self, child: NodeBuilder) -> Self {
        self.raw.insert(CHILDREN.to_string(), Value::Object(child.raw));
        self
    }

    /// Set an arbitrary key, including ones validation will reject.
    pub fn raw_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.raw.insert(key.into(), value.into());
        self
    }

    fn entry(mut self, section: &str, key: String, value: Value) -> Self {
        let slot = self
            .raw
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(map) = slot {
            map.insert(key, value);
        }
        self
    }

    /// The configuration built so far.
    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }

    /// Validate against the built-in registry with the default config.
    pub fn build(self) -> Result<DeclarativeNode, ConfigError> {
        DeclarativeNode::new(self.raw)
    }

    /// Validate with a specific validator.
    pub fn build_with(self, validator: &Validator<'_>) -> Result<DeclarativeNode, ConfigError> {
        validator.validate(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_accessors() {
        let node = DeclarativeNode::new(raw(json!({
            "type": "equals",
            "checkValue": 5,
            "properties": {"strict": true},
            "success": {"msg": "ok"},
            "fail": {"msg": "no"},
            "children": {"type": "isInt", "checkValue": 5}
        })))
        .unwrap();

        assert_eq!(node.type_name(), "equals");
        assert_eq!(node.check_value(), &json!(5));
        assert_eq!(node.properties().unwrap().get("strict"), Some(&json!(true)));
        assert_eq!(node.success().unwrap().get("msg"), Some(&json!("ok")));
        assert_eq!(node.fail().unwrap().get("msg"), Some(&json!("no")));
        assert_eq!(node.children().unwrap().type_name(), "isInt");
        assert_eq!(node.node_count(), 2);
    }

    #[test]
    fn test_null_check_value_is_kept() {
        let node = NodeBuilder::new("isNull", Value::Null).build().unwrap();
        assert_eq!(node.check_value(), &Value::Null);
        assert!(node.run().unwrap().succeeded);
    }

    #[test]
    fn test_serializes_as_raw_mapping() {
        let config = json!({"type": "isString", "checkValue": "a"});
        let node = DeclarativeNode::new(raw(config.clone())).unwrap();
        assert_eq!(serde_json::to_value(&node).unwrap(), config);
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_value::<DeclarativeNode>(json!({"checkValue": 1})).unwrap_err();
        assert!(err.to_string().contains("missing mandatory key 'type'"));
    }

    #[test]
    fn test_equality_follows_raw_mapping() {
        let a = NodeBuilder::new("equals", 1).build().unwrap();
        let b = DeclarativeNode::try_from(raw(json!({"checkValue": 1, "type": "equals"}))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_builder_sections() {
        let raw = NodeBuilder::new("count", json!([1, 2]))
            .property("compare", "greaterThan")
            .property("value", 1)
            .on_success("many", true)
            .into_raw();
        assert_eq!(
            Value::Object(raw),
            json!({
                "type": "count",
                "checkValue": [1, 2],
                "properties": {"compare": "greaterThan", "value": 1},
                "success": {"many": true}
            })
        );
    }

    #[test]
    fn test_builder_raw_entry_is_validated() {
        let err = NodeBuilder::new("equals", 1)
            .raw_entry("bogus", true)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownKey("bogus".into()));
    }
}
