// Copyright (c) 2025 - Cowboy AI, Inc.
//! Intrinsic Function Nodes
//!
//! Small typed expression trees evaluated by the provisioning service.
//! Each node renders as a single-key map `{"Fn::<Name>": ...}`. Arguments
//! are ordinary [`Value`]s, so embedded named entities render as
//! references and condition links render as `{"Condition": name}`.
//!
//! `Fn::GetAtt` is expressed as an attribute [`Reference`], see [`get_att`].

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::condition::Condition;
use super::entity::Entity;
use super::mapping::Mapping;
use super::reference::Reference;
use super::value::Value;
use crate::errors::TemplateResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Intrinsic {
    Base64(Value),
    FindInMap {
        map: String,
        top_level_key: Value,
        second_level_key: Value,
    },
    GetAzs(Value),
    Join {
        delimiter: String,
        values: Vec<Value>,
    },
    Select {
        index: Value,
        objects: Vec<Value>,
    },
    And(Vec<Value>),
    Or(Vec<Value>),
    Not(Value),
    Equals(Value, Value),
    If {
        condition: String,
        when_true: Value,
        when_false: Value,
    },
}

impl Intrinsic {
    /// Function name without the `Fn::` prefix
    pub fn name(&self) -> &'static str {
        match self {
            Intrinsic::Base64(_) => "Base64",
            Intrinsic::FindInMap { .. } => "FindInMap",
            Intrinsic::GetAzs(_) => "GetAZs",
            Intrinsic::Join { .. } => "Join",
            Intrinsic::Select { .. } => "Select",
            Intrinsic::And(_) => "And",
            Intrinsic::Or(_) => "Or",
            Intrinsic::Not(_) => "Not",
            Intrinsic::Equals(_, _) => "Equals",
            Intrinsic::If { .. } => "If",
        }
    }

    /// Every nested argument value, in rendering order
    pub fn arguments(&self) -> Vec<&Value> {
        match self {
            Intrinsic::Base64(value) | Intrinsic::GetAzs(value) | Intrinsic::Not(value) => {
                vec![value]
            }
            Intrinsic::FindInMap {
                top_level_key,
                second_level_key,
                ..
            } => vec![top_level_key, second_level_key],
            Intrinsic::Join { values, .. } => values.iter().collect(),
            Intrinsic::Select { index, objects } => {
                std::iter::once(index).chain(objects.iter()).collect()
            }
            Intrinsic::And(values) | Intrinsic::Or(values) => values.iter().collect(),
            Intrinsic::Equals(lhs, rhs) => vec![lhs, rhs],
            Intrinsic::If {
                when_true,
                when_false,
                ..
            } => vec![when_true, when_false],
        }
    }

    pub(crate) fn arguments_mut(&mut self) -> Vec<&mut Value> {
        match self {
            Intrinsic::Base64(value) | Intrinsic::GetAzs(value) | Intrinsic::Not(value) => {
                vec![value]
            }
            Intrinsic::FindInMap {
                top_level_key,
                second_level_key,
                ..
            } => vec![top_level_key, second_level_key],
            Intrinsic::Join { values, .. } => values.iter_mut().collect(),
            Intrinsic::Select { index, objects } => {
                std::iter::once(index).chain(objects.iter_mut()).collect()
            }
            Intrinsic::And(values) | Intrinsic::Or(values) => values.iter_mut().collect(),
            Intrinsic::Equals(lhs, rhs) => vec![lhs, rhs],
            Intrinsic::If {
                when_true,
                when_false,
                ..
            } => vec![when_true, when_false],
        }
    }

    /// Condition functions may form the body of a named condition
    pub fn is_condition(&self) -> bool {
        matches!(
            self,
            Intrinsic::And(_)
                | Intrinsic::Or(_)
                | Intrinsic::Not(_)
                | Intrinsic::Equals(_, _)
                | Intrinsic::If { .. }
        )
    }
}

impl Serialize for Intrinsic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = format!("Fn::{}", self.name());
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Intrinsic::Base64(value) | Intrinsic::GetAzs(value) => {
                map.serialize_entry(&key, value)?
            }
            Intrinsic::FindInMap {
                map: name,
                top_level_key,
                second_level_key,
            } => map.serialize_entry(&key, &(name, top_level_key, second_level_key))?,
            Intrinsic::Join { delimiter, values } => {
                map.serialize_entry(&key, &(delimiter, values))?
            }
            Intrinsic::Select { index, objects } => map.serialize_entry(&key, &(index, objects))?,
            Intrinsic::And(conditions) | Intrinsic::Or(conditions) => {
                map.serialize_entry(&key, conditions)?
            }
            Intrinsic::Not(condition) => map.serialize_entry(&key, &[condition])?,
            Intrinsic::Equals(lhs, rhs) => map.serialize_entry(&key, &(lhs, rhs))?,
            Intrinsic::If {
                condition,
                when_true,
                when_false,
            } => map.serialize_entry(&key, &(condition, when_true, when_false))?,
        }
        map.end()
    }
}

fn values<I, T>(items: I) -> Vec<Value>
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    items.into_iter().map(Into::into).collect()
}

pub fn base64(value: impl Into<Value>) -> Intrinsic {
    Intrinsic::Base64(value.into())
}

pub fn find_in_map(
    map: &Mapping,
    top_level_key: impl Into<Value>,
    second_level_key: impl Into<Value>,
) -> Intrinsic {
    Intrinsic::FindInMap {
        map: map.name().to_string(),
        top_level_key: top_level_key.into(),
        second_level_key: second_level_key.into(),
    }
}

/// Availability zones of `region`; an empty string means the stack's region
pub fn get_azs(region: impl Into<Value>) -> Intrinsic {
    Intrinsic::GetAzs(region.into())
}

pub fn join<I, T>(delimiter: impl Into<String>, items: I) -> Intrinsic
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Intrinsic::Join {
        delimiter: delimiter.into(),
        values: values(items),
    }
}

pub fn select<I, T>(index: impl Into<Value>, objects: I) -> Intrinsic
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Intrinsic::Select {
        index: index.into(),
        objects: values(objects),
    }
}

pub fn fn_and<I, T>(conditions: I) -> Intrinsic
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Intrinsic::And(values(conditions))
}

pub fn fn_or<I, T>(conditions: I) -> Intrinsic
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Intrinsic::Or(values(conditions))
}

pub fn fn_not(condition: impl Into<Value>) -> Intrinsic {
    Intrinsic::Not(condition.into())
}

pub fn fn_equals(lhs: impl Into<Value>, rhs: impl Into<Value>) -> Intrinsic {
    Intrinsic::Equals(lhs.into(), rhs.into())
}

pub fn fn_if(
    condition: &Condition,
    when_true: impl Into<Value>,
    when_false: impl Into<Value>,
) -> Intrinsic {
    Intrinsic::If {
        condition: condition.name().to_string(),
        when_true: when_true.into(),
        when_false: when_false.into(),
    }
}

/// `Fn::GetAtt` on a named entity
pub fn get_att(entity: &Entity, attribute: impl Into<String>) -> TemplateResult<Value> {
    Reference::attribute(entity, attribute).map(Value::Ref)
}
