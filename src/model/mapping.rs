// Copyright (c) 2025 - Cowboy AI, Inc.
//! Two-level lookup tables for the Mappings section

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

use super::dispatch::{dispatch, Args};
use super::schema::{ArgSpec, ValueType};
use super::value::Value;
use crate::errors::{TemplateError, TemplateResult};

/// Named mapping of top-level key → second-level key → value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    name: String,
    body: IndexMap<String, IndexMap<String, Value>>,
}

impl Mapping {
    pub const KIND: &'static str = "Mapping";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: IndexMap::new(),
        }
    }

    /// Build from a name string and a map of maps, in either order
    pub fn construct(args: Args) -> TemplateResult<Self> {
        let candidates = vec![
            ArgSpec::new("name", ValueType::String),
            ArgSpec::new("mapping", ValueType::Map),
        ];
        let (positional, keywords) = args.into_parts();
        let mut bound = dispatch(Self::KIND, &candidates, positional, keywords)?;

        let name = match bound.shift_remove("name") {
            Some(Value::String(name)) => name,
            _ => return Err(missing("name")),
        };
        let body = match bound.shift_remove("mapping") {
            Some(Value::Map(top)) => top,
            _ => return Err(missing("mapping")),
        };
        if let Some(unknown) = bound.keys().next() {
            return Err(TemplateError::UnknownAttribute {
                kind: Self::KIND.to_string(),
                attribute: unknown.clone(),
            });
        }

        let mut mapping = Self::new(name);
        for (top, second) in body {
            match second {
                Value::Map(entries) => {
                    mapping.body.insert(top, entries);
                }
                other => {
                    return Err(TemplateError::UnexpectedArgumentType {
                        kind: Self::KIND.to_string(),
                        found: other.type_name(),
                    })
                }
            }
        }
        Ok(mapping)
    }

    /// Copy with one more leaf entry
    pub fn entry(
        mut self,
        top_level_key: impl Into<String>,
        second_level_key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.body
            .entry(top_level_key.into())
            .or_default()
            .insert(second_level_key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, top_level_key: &str, second_level_key: &str) -> Option<&Value> {
        self.body.get(top_level_key)?.get(second_level_key)
    }

    /// Every stored value, top-level key by top-level key
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.body.values().flat_map(|second| second.values())
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

fn missing(argument: &str) -> TemplateError {
    TemplateError::MissingArgument {
        kind: Mapping::KIND.to_string(),
        argument: argument.to_string(),
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}
