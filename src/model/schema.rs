// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declared Property Schemas
//!
//! A [`KindSchema`] is the flattened, ordered description of one entity
//! kind: its external property keys with semantic type, internal key,
//! converter and default, plus the structural attributes that are bound
//! positionally but never rendered as properties (condition, deletion
//! policy, the subnet a route table is associated with, ...).
//!
//! Schemas are composed explicitly: a catalog entry concatenates its own
//! property list with the shared base lists ([`resource_args`],
//! [`conditionable_args`](super::condition::conditionable_args)) when it
//! is built, once, at registry initialization.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::condition::conditionable_args;
use super::expansion::DerivedSibling;
use super::value::Value;
use crate::errors::{TemplateError, TemplateResult};

/// Converts a stored value into its rendered form
pub type Converter = fn(&Value) -> Value;

/// Default converter
pub fn identity(value: &Value) -> Value {
    value.clone()
}

/// Runtime type a property or structural attribute accepts
///
/// `Any` marks an untyped property: it can be set by keyword but never
/// takes part in positional dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Any,
    String,
    Integer,
    Boolean,
    Float,
    List,
    Map,
    Tags,
    Condition,
    /// Any intrinsic function
    Function,
    /// Condition functions only (And, Or, Not, Equals, If)
    ConditionFunction,
    Document,
    /// Wrapped value object of the given kind
    Wrapper(&'static str),
    /// Entity (or reference to one) of the given kind
    Entity(&'static str),
    /// Reference to any named entity
    Named,
}

impl ValueType {
    pub fn is_dispatchable(&self) -> bool {
        !matches!(self, ValueType::Any)
    }

    /// Whether `value` is an instance of this type
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Any, _) => true,
            (ValueType::String, Value::String(_)) => true,
            (ValueType::Integer, Value::Int(_)) => true,
            (ValueType::Boolean, Value::Bool(_)) => true,
            (ValueType::Float, Value::Float(_)) => true,
            (ValueType::List, Value::List(_)) => true,
            (ValueType::Map, Value::Map(_)) => true,
            (ValueType::Tags, Value::Tags(_)) => true,
            (ValueType::Condition, Value::Condition(_)) => true,
            (ValueType::Function, Value::Fn(_)) => true,
            (ValueType::ConditionFunction, Value::Fn(function)) => function.is_condition(),
            (ValueType::Document, Value::Document(_)) => true,
            (ValueType::Wrapper(kind), Value::Wrapped(wrapped)) => wrapped.kind == *kind,
            (ValueType::Entity(kind), Value::Ref(reference)) => {
                reference.kind() == *kind && reference.attribute_name().is_none()
            }
            (ValueType::Entity(kind), Value::Object(entity)) => entity.kind_id() == *kind,
            (ValueType::Named, Value::Ref(reference)) => reference.attribute_name().is_none(),
            (ValueType::Named, Value::Object(entity)) => entity.name().is_some(),
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Wrapper(kind) | ValueType::Entity(kind) => write!(f, "{}", kind),
            other => write!(f, "{:?}", other),
        }
    }
}

/// One declared property
#[derive(Debug, Clone)]
pub struct PropertySpec {
    key: &'static str,
    value_type: ValueType,
    attr: String,
    converter: Converter,
    default: Option<Value>,
}

impl PropertySpec {
    /// Untyped property whose internal key is the snake_cased external key
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            value_type: ValueType::Any,
            attr: snake_case(key),
            converter: identity,
            default: None,
        }
    }

    pub fn typed(key: &'static str, value_type: ValueType) -> Self {
        Self {
            value_type,
            ..Self::new(key)
        }
    }

    /// Store under a different internal key
    pub fn attr(mut self, attr: &str) -> Self {
        self.attr = attr.to_string();
        self
    }

    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn internal_key(&self) -> &str {
        &self.attr
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn convert(&self, value: &Value) -> Value {
        (self.converter)(value)
    }
}

/// Shorthand for an untyped property
pub fn prop(key: &'static str) -> PropertySpec {
    PropertySpec::new(key)
}

/// Shorthand for a typed property
pub fn typed(key: &'static str, value_type: ValueType) -> PropertySpec {
    PropertySpec::typed(key, value_type)
}

/// A name eligible for positional binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: String,
    pub value_type: ValueType,
}

impl ArgSpec {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

/// Which template collection (if any) an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    Parameter,
    Resource,
    Output,
    /// Nested property type, always embedded inline
    Property,
}

impl EntityClass {
    /// Nameable kinds take a leading positional string as their name
    pub fn is_nameable(self) -> bool {
        !matches!(self, EntityClass::Property)
    }
}

/// Retention behaviour when a stack deletes a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeletionPolicy {
    Delete,
    Retain,
    Snapshot,
}

impl DeletionPolicy {
    pub const KIND: &'static str = "DeletionPolicy";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Retain => "Retain",
            Self::Snapshot => "Snapshot",
        }
    }
}

impl From<DeletionPolicy> for Value {
    fn from(policy: DeletionPolicy) -> Self {
        Value::wrapped(DeletionPolicy::KIND, policy.as_str())
    }
}

/// Structural attributes shared by every resource
pub fn resource_args() -> Vec<ArgSpec> {
    let mut args = conditionable_args();
    args.push(ArgSpec::new(
        "deletion_policy",
        ValueType::Wrapper(DeletionPolicy::KIND),
    ));
    args
}

/// Flattened schema of one entity kind
#[derive(Debug, Clone)]
pub struct KindSchema {
    id: &'static str,
    name: &'static str,
    class: EntityClass,
    properties: Vec<PropertySpec>,
    structural: Vec<ArgSpec>,
    derived: Vec<DerivedSibling>,
}

impl KindSchema {
    /// `id` is the external type string for resources (`AWS::EC2::Subnet`),
    /// `name` the short kind name used for the constructor table
    pub fn new(id: &'static str, name: &'static str, class: EntityClass) -> Self {
        Self {
            id,
            name,
            class,
            properties: Vec::new(),
            structural: Vec::new(),
            derived: Vec::new(),
        }
    }

    /// Resource kind with the shared resource structural attributes
    pub fn resource(id: &'static str, name: &'static str) -> Self {
        Self::new(id, name, EntityClass::Resource).structural(resource_args())
    }

    /// Nested property type
    pub fn property_type(id: &'static str, name: &'static str) -> Self {
        Self::new(id, name, EntityClass::Property)
    }

    pub fn properties(mut self, properties: Vec<PropertySpec>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn structural(mut self, structural: Vec<ArgSpec>) -> Self {
        self.structural.extend(structural);
        self
    }

    /// Declare an auxiliary entity implied by a structural attribute
    pub fn derive(mut self, derived: DerivedSibling) -> Self {
        self.structural
            .push(ArgSpec::new(derived.attr(), derived.target_type()));
        self.derived.push(derived);
        self
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn class(&self) -> EntityClass {
        self.class
    }

    /// The fixed type string rendered as `Type` for resources
    pub fn resource_type(&self) -> Option<&'static str> {
        (self.class == EntityClass::Resource).then_some(self.id)
    }

    pub fn property_specs(&self) -> &[PropertySpec] {
        &self.properties
    }

    pub fn derived(&self) -> &[DerivedSibling] {
        &self.derived
    }

    /// Properties with duplicate internal keys removed (first wins)
    fn unique_properties(&self) -> Vec<&PropertySpec> {
        let mut seen = HashSet::new();
        self.properties
            .iter()
            .filter(|p| seen.insert(p.internal_key()))
            .collect()
    }

    /// Every internal key that may be set on an entity of this kind
    pub fn attributes(&self) -> Vec<&str> {
        self.unique_properties()
            .into_iter()
            .map(PropertySpec::internal_key)
            .chain(self.structural.iter().map(|a| a.name.as_str()))
            .collect()
    }

    pub fn has_attribute(&self, attr: &str) -> bool {
        self.attributes().contains(&attr)
    }

    /// Names eligible for positional binding, in declaration order
    pub fn dispatch_candidates(&self) -> Vec<ArgSpec> {
        self.unique_properties()
            .into_iter()
            .filter(|p| p.value_type().is_dispatchable())
            .map(|p| ArgSpec::new(p.internal_key(), p.value_type()))
            .chain(self.structural.iter().cloned())
            .collect()
    }

    /// External keys must be unique; structural names must not shadow properties
    pub fn validate(&self) -> TemplateResult<()> {
        let mut keys = HashSet::new();
        for property in &self.properties {
            if !keys.insert(property.key()) {
                return Err(TemplateError::DuplicateProperty {
                    kind: self.id.to_string(),
                    key: property.key().to_string(),
                });
            }
        }

        let mut attrs: HashSet<&str> = self
            .unique_properties()
            .into_iter()
            .map(PropertySpec::internal_key)
            .collect();
        for arg in &self.structural {
            if !attrs.insert(arg.name.as_str()) {
                return Err(TemplateError::DuplicateProperty {
                    kind: self.id.to_string(),
                    key: arg.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// `SecurityGroupIngress` → `security_group_ingress`, `VPCGatewayAttachment` → `vpc_gateway_attachment`
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_ascii_lowercase());
            let after_word = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            if after_word || (next_is_lower && prev != '_') {
                out.push('_');
            }
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("SecurityGroupIngress", "security_group_ingress")]
    #[test_case("VPCGatewayAttachment", "vpc_gateway_attachment")]
    #[test_case("DHCPOptions", "dhcp_options")]
    #[test_case("CidrIp", "cidr_ip")]
    #[test_case("EIP", "eip")]
    #[test_case("VPCZoneIdentifier", "vpc_zone_identifier")]
    #[test_case("Ipv6CidrBlock", "ipv6_cidr_block")]
    fn test_snake_case(input: &str, expected: &str) {
        assert_eq!(snake_case(input), expected);
    }

    fn port_rule() -> KindSchema {
        KindSchema::resource("Test::Rule", "Rule").properties(vec![
            typed("FromPort", ValueType::Integer).attr("ports"),
            typed("ToPort", ValueType::Integer).attr("ports"),
            prop("Description"),
        ])
    }

    #[test]
    fn test_duplicate_internal_keys_collapse() {
        let schema = port_rule();
        assert_eq!(
            schema.attributes(),
            vec!["ports", "description", "condition", "deletion_policy"]
        );
        let candidates: Vec<_> = schema
            .dispatch_candidates()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(candidates, vec!["ports", "condition", "deletion_policy"]);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_duplicate_external_key_rejected() {
        let schema = KindSchema::resource("Test::Bad", "Bad")
            .properties(vec![prop("Name"), prop("Name").attr("other")]);
        assert_eq!(
            schema.validate(),
            Err(TemplateError::DuplicateProperty {
                kind: "Test::Bad".to_string(),
                key: "Name".to_string(),
            })
        );
    }

    #[test]
    fn test_value_type_matching() {
        assert!(ValueType::String.accepts(&Value::from("x")));
        assert!(!ValueType::Integer.accepts(&Value::from(true)));
        assert!(ValueType::Wrapper("CIDR").accepts(&Value::wrapped("CIDR", "0.0.0.0/0")));
        assert!(!ValueType::Wrapper("CIDR").accepts(&Value::wrapped("IpAddress", "1.2.3.4")));
        assert!(!ValueType::Any.is_dispatchable());
    }

    #[test]
    fn test_resource_type_only_for_resources() {
        assert_eq!(port_rule().resource_type(), Some("Test::Rule"));
        let property = KindSchema::property_type("Test::Inline", "Inline");
        assert_eq!(property.resource_type(), None);
    }
}
