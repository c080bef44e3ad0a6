// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed Property Model
//!
//! An [`Entity`] is a value bound to a [`KindSchema`]. Construction binds
//! positional arguments through the dispatcher, validates every key
//! against the schema's attribute set and stores the values by internal
//! key. Entities are immutable by convention: every update goes through
//! [`Entity::with_overrides`] (or a builder built on it) and returns a new
//! value, the sibling list included.
//!
//! # Example
//!
//! ```rust
//! use cim_cloudformation::args;
//! use cim_cloudformation::catalog::ec2;
//! use cim_cloudformation::domain::Cidr;
//!
//! let vpc = ec2::vpc(args!["Main", Cidr::new("10.0.0.0/16").unwrap()]).unwrap();
//! let renamed = vpc.with_overrides(args!["Shared"; enable_dns_support = true]).unwrap();
//! assert_eq!(vpc.name(), Some("Main"));
//! assert_eq!(renamed.name(), Some("Shared"));
//! assert!(!vpc.is_set("enable_dns_support"));
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::debug;

use super::condition::Condition;
use super::dispatch::{dispatch, Args};
use super::schema::{DeletionPolicy, EntityClass, KindSchema};
use super::value::Value;
use crate::errors::{TemplateError, TemplateResult};

#[derive(Debug, Clone)]
pub struct Entity {
    schema: Arc<KindSchema>,
    name: Option<String>,
    values: IndexMap<String, Value>,
    siblings: Vec<Entity>,
}

impl Entity {
    pub fn construct(schema: Arc<KindSchema>, args: Args) -> TemplateResult<Self> {
        let mut entity = Self {
            schema,
            name: None,
            values: IndexMap::new(),
            siblings: Vec::new(),
        };
        entity.apply(args, true)?;
        Ok(entity)
    }

    /// Copy with the given arguments applied under construction rules
    ///
    /// A leading string renames the copy. The original is untouched and
    /// the copy owns its sibling list.
    pub fn with_overrides(&self, args: Args) -> TemplateResult<Self> {
        let mut copy = self.clone();
        copy.apply(args, true)?;
        Ok(copy)
    }

    /// Copy with one positional value bound by type, never as a name
    pub fn attach(&self, value: impl Into<Value>) -> TemplateResult<Self> {
        let mut copy = self.clone();
        copy.apply(Args::new().arg(value), false)?;
        Ok(copy)
    }

    fn apply(&mut self, mut args: Args, allow_name: bool) -> TemplateResult<()> {
        let name = if allow_name && self.class().is_nameable() {
            args.take_name()
        } else {
            None
        };

        let (positional, keywords) = args.into_parts();
        let bound = dispatch(
            self.kind_id(),
            &self.schema.dispatch_candidates(),
            positional,
            keywords,
        )?;

        {
            let attributes = self.schema.attributes();
            if let Some(unknown) = bound
                .keys()
                .find(|key| !attributes.contains(&key.as_str()))
            {
                return Err(TemplateError::UnknownAttribute {
                    kind: self.schema.id().to_string(),
                    attribute: unknown.clone(),
                });
            }
        }

        for value in bound.values() {
            value.ensure_referenceable()?;
        }

        if let Some(name) = name {
            self.rename(name);
        }
        for (key, value) in bound {
            if value.is_null() {
                self.values.shift_remove(&key);
            } else {
                self.values.insert(key, value);
            }
        }
        Ok(())
    }

    /// Renamed copy
    ///
    /// Appended siblings follow: their references to this entity and any
    /// name derived from the old one are rewritten.
    pub fn named(&self, name: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.rename(name.into());
        copy
    }

    fn rename(&mut self, name: String) {
        if let Some(old) = self.name.take().filter(|old| *old != name) {
            debug!(kind = self.kind_id(), from = %old, to = %name, "Renaming entity");
            let kind = self.kind_id();
            for sibling in &mut self.siblings {
                sibling.follow_owner(kind, &old, &name);
            }
        }
        self.name = Some(name);
    }

    fn follow_owner(&mut self, kind: &str, from: &str, to: &str) {
        for value in self.values.values_mut() {
            value.retarget(kind, from, to);
        }
        let followed = self
            .name
            .as_deref()
            .and_then(|name| name.strip_prefix(from))
            .map(|suffix| format!("{}{}", to, suffix));
        if followed.is_some() {
            self.name = followed;
        }
        for sibling in &mut self.siblings {
            sibling.follow_owner(kind, from, to);
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind_id(&self) -> &'static str {
        self.schema.id()
    }

    pub fn class(&self) -> EntityClass {
        self.schema.class()
    }

    pub fn schema(&self) -> &Arc<KindSchema> {
        &self.schema
    }

    /// Stored value by internal key
    pub fn get(&self, attr: &str) -> Option<&Value> {
        self.values.get(attr)
    }

    pub fn is_set(&self, attr: &str) -> bool {
        self.values.contains_key(attr)
    }

    pub fn condition_name(&self) -> Option<&str> {
        match self.values.get("condition") {
            Some(Value::Condition(name)) => Some(name),
            _ => None,
        }
    }

    pub fn with_condition(&self, condition: &Condition) -> TemplateResult<Self> {
        self.with_overrides(Args::new().kw("condition", condition))
    }

    pub fn with_deletion_policy(&self, policy: DeletionPolicy) -> TemplateResult<Self> {
        self.with_overrides(Args::new().kw("deletion_policy", policy))
    }

    /// Copy with `sibling` appended to its own sibling list
    pub fn with_sibling(&self, sibling: Entity) -> Self {
        let mut copy = self.clone();
        copy.siblings.push(sibling);
        copy
    }

    /// Siblings appended by builders, excluding derived ones
    pub fn appended_siblings(&self) -> &[Entity] {
        &self.siblings
    }

    /// All auxiliary entities: those derived from attributes, then the
    /// ones appended by builders
    pub fn siblings(&self) -> TemplateResult<Vec<Entity>> {
        let mut siblings = Vec::with_capacity(self.siblings.len());
        for derived in self.schema.derived() {
            if let Some(sibling) = derived.expand(self)? {
                siblings.push(sibling);
            }
        }
        siblings.extend(self.siblings.iter().cloned());
        Ok(siblings)
    }

    /// Split into the primary entity and its auxiliary entities
    pub fn into_parts(mut self) -> TemplateResult<(Entity, Vec<Entity>)> {
        let siblings = self.siblings()?;
        self.siblings.clear();
        Ok((self, siblings))
    }

    /// Rendered properties in schema order
    pub fn properties(&self) -> IndexMap<&'static str, Value> {
        let mut rendered = IndexMap::new();
        for property in self.schema.property_specs() {
            if let Some(value) = self.values.get(property.internal_key()) {
                rendered.insert(property.key(), property.convert(value));
            } else if let Some(default) = property.default() {
                rendered.insert(property.key(), default.clone());
            }
        }
        rendered
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.kind_id() == other.kind_id()
            && self.name == other.name
            && self.values == other.values
            && self.siblings == other.siblings
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let properties = self.properties();
        match self.class() {
            EntityClass::Resource => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("Type", self.kind_id())?;
                map.serialize_entry("Properties", &properties)?;
                if let Some(condition) = self.condition_name() {
                    map.serialize_entry("Condition", condition)?;
                }
                if let Some(policy) = self.values.get("deletion_policy") {
                    map.serialize_entry("DeletionPolicy", policy)?;
                }
                map.end()
            }
            EntityClass::Output => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in &properties {
                    map.serialize_entry(key, value)?;
                }
                if let Some(condition) = self.condition_name() {
                    map.serialize_entry("Condition", condition)?;
                }
                map.end()
            }
            EntityClass::Parameter | EntityClass::Property => {
                properties.serialize(serializer)
            }
        }
    }
}
