// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dynamic Property Values
//!
//! [`Value`] is what every entity property holds. Besides the JSON scalar
//! and container shapes it carries the typed variants the dispatcher needs
//! to tell arguments apart: wrapped value objects, inline entities,
//! references, condition links, intrinsic functions, tag sets and opaque
//! pre-rendered documents.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::condition::Condition;
use super::entity::Entity;
use super::functions::Intrinsic;
use super::reference::Reference;
use super::schema::EntityClass;
use super::tags::TagSet;
use crate::errors::{TemplateError, TemplateResult};

/// Scalar or container refined with a semantic kind (`CIDR`, `IpProtocol`, ...)
///
/// Serializes exactly as its inner value.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapped {
    pub kind: &'static str,
    pub inner: Box<Value>,
}

/// A property value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Wrapped(Wrapped),
    /// Property-type entity embedded by value; a named entity of any
    /// other class renders as a reference
    Object(Box<Entity>),
    Ref(Reference),
    /// Link to a named condition, rendered as `{"Condition": name}`
    Condition(String),
    Fn(Box<Intrinsic>),
    Tags(TagSet),
    /// Opaque, already rendered document (policy bodies and the like)
    Document(serde_json::Value),
}

impl Value {
    pub fn wrapped(kind: &'static str, inner: impl Into<Value>) -> Self {
        Value::Wrapped(Wrapped {
            kind,
            inner: Box::new(inner.into()),
        })
    }

    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String content, looking through a wrapper
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Wrapped(wrapped) => wrapped.inner.as_str(),
            _ => None,
        }
    }

    /// Name of the entity this value points at, if any
    pub fn target_name(&self) -> Option<&str> {
        match self {
            Value::Ref(reference) => Some(reference.target()),
            Value::Object(entity) => entity.name(),
            _ => None,
        }
    }

    /// Fails if an unnamed parameter, resource or output is embedded
    /// anywhere in this value
    ///
    /// Only property-type entities are ever inlined; everything else must
    /// be renderable as a reference.
    pub fn ensure_referenceable(&self) -> TemplateResult<()> {
        match self {
            Value::Object(entity) => {
                if entity.class() != EntityClass::Property && entity.name().is_none() {
                    return Err(TemplateError::UnnamedReferenceTarget {
                        kind: entity.kind_id().to_string(),
                    });
                }
                Ok(())
            }
            Value::List(items) => items.iter().try_for_each(Value::ensure_referenceable),
            Value::Map(map) => map.values().try_for_each(Value::ensure_referenceable),
            Value::Wrapped(wrapped) => wrapped.inner.ensure_referenceable(),
            Value::Fn(function) => function
                .arguments()
                .into_iter()
                .try_for_each(Value::ensure_referenceable),
            Value::Tags(tags) => tags
                .iter()
                .try_for_each(|tag| tag.value().ensure_referenceable()),
            _ => Ok(()),
        }
    }

    /// Rewrite every reference to `from` of `kind` so it points at `to`
    pub(crate) fn retarget(&mut self, kind: &str, from: &str, to: &str) {
        match self {
            Value::Ref(reference) => reference.retarget(kind, from, to),
            Value::List(items) => items
                .iter_mut()
                .for_each(|item| item.retarget(kind, from, to)),
            Value::Map(map) => map
                .values_mut()
                .for_each(|item| item.retarget(kind, from, to)),
            Value::Wrapped(wrapped) => wrapped.inner.retarget(kind, from, to),
            Value::Fn(function) => function
                .arguments_mut()
                .into_iter()
                .for_each(|item| item.retarget(kind, from, to)),
            Value::Tags(tags) => tags
                .values_mut()
                .for_each(|item| item.retarget(kind, from, to)),
            _ => {}
        }
    }

    /// Human readable runtime type, used in dispatch errors
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "boolean".to_string(),
            Value::Int(_) => "integer".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::String(_) => "string".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Map(_) => "map".to_string(),
            Value::Wrapped(wrapped) => wrapped.kind.to_string(),
            Value::Object(entity) => entity.kind_id().to_string(),
            Value::Ref(reference) => match reference.attribute_name() {
                Some(_) => format!("attribute of {}", reference.kind()),
                None => format!("reference to {}", reference.kind()),
            },
            Value::Condition(_) => "Condition".to_string(),
            Value::Fn(function) => format!("Fn::{}", function.name()),
            Value::Tags(_) => "TagSet".to_string(),
            Value::Document(_) => "document".to_string(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => items.serialize(serializer),
            Value::Map(map) => map.serialize(serializer),
            Value::Wrapped(wrapped) => wrapped.inner.serialize(serializer),
            Value::Object(entity) => match Reference::named(entity) {
                Some(reference) => reference.serialize(serializer),
                None => entity.serialize(serializer),
            },
            Value::Ref(reference) => reference.serialize(serializer),
            Value::Condition(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Condition", name)?;
                map.end()
            }
            Value::Fn(function) => function.serialize(serializer),
            Value::Tags(tags) => tags.serialize(serializer),
            Value::Document(document) => document.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

/// Named entities become references; unnamed ones are embedded and
/// rejected at construction unless they are property types
impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        match Reference::named(&entity) {
            Some(reference) => Value::Ref(reference),
            None => Value::Object(Box::new(entity)),
        }
    }
}

impl From<&Entity> for Value {
    fn from(entity: &Entity) -> Self {
        match Reference::named(entity) {
            Some(reference) => Value::Ref(reference),
            None => Value::Object(Box::new(entity.clone())),
        }
    }
}

impl From<Reference> for Value {
    fn from(reference: Reference) -> Self {
        Value::Ref(reference)
    }
}

impl From<Intrinsic> for Value {
    fn from(function: Intrinsic) -> Self {
        Value::Fn(Box::new(function))
    }
}

impl From<TagSet> for Value {
    fn from(tags: TagSet) -> Self {
        Value::Tags(tags)
    }
}

impl From<&Condition> for Value {
    fn from(condition: &Condition) -> Self {
        Value::Condition(condition.name().to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(document: serde_json::Value) -> Self {
        Value::Document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_serialization() {
        let value = Value::list(vec![
            Value::from(1),
            Value::from("a"),
            Value::from(true),
            Value::Null,
        ]);
        assert_eq!(serde_json::to_value(&value).unwrap(), json!([1, "a", true, null]));
    }

    #[test]
    fn test_wrapped_serializes_as_inner() {
        let value = Value::wrapped("CIDR", "10.0.0.0/8");
        assert_eq!(serde_json::to_value(&value).unwrap(), json!("10.0.0.0/8"));
        assert_eq!(value.type_name(), "CIDR");
        assert_eq!(value.as_str(), Some("10.0.0.0/8"));
    }

    #[test]
    fn test_condition_link() {
        let value = Value::Condition("IsProd".to_string());
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Condition": "IsProd"})
        );
    }

    #[test]
    fn test_document_passthrough() {
        let policy = json!({"Version": "2012-10-17", "Statement": []});
        let value = Value::from(policy.clone());
        assert_eq!(serde_json::to_value(&value).unwrap(), policy);
    }
}
