// Copyright (c) 2025 - Cowboy AI, Inc.
//! Template Aggregation
//!
//! A [`Template`] classifies items into five name-keyed collections and
//! renders them as one ordered document. Adding an entity also adds every
//! auxiliary entity it implies, recursively, so a caller never has to know
//! that a route table association or a security group rule exists as a
//! separate resource.
//!
//! Names are last-write-wins within a collection: storing a second item
//! under an existing name drops the first and appends the new one at the
//! end of the collection.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::{PrettyFormatter, Serializer as JsonSerializer};
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::errors::{TemplateError, TemplateResult};
use crate::model::{Condition, Entity, EntityClass, Mapping, Value};

/// Anything that can be stored in a template
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateItem {
    Entity(Entity),
    Condition(Condition),
    Mapping(Mapping),
}

impl From<Entity> for TemplateItem {
    fn from(entity: Entity) -> Self {
        TemplateItem::Entity(entity)
    }
}

impl From<&Entity> for TemplateItem {
    fn from(entity: &Entity) -> Self {
        TemplateItem::Entity(entity.clone())
    }
}

impl From<Condition> for TemplateItem {
    fn from(condition: Condition) -> Self {
        TemplateItem::Condition(condition)
    }
}

impl From<&Condition> for TemplateItem {
    fn from(condition: &Condition) -> Self {
        TemplateItem::Condition(condition.clone())
    }
}

impl From<Mapping> for TemplateItem {
    fn from(mapping: Mapping) -> Self {
        TemplateItem::Mapping(mapping)
    }
}

impl From<&Mapping> for TemplateItem {
    fn from(mapping: &Mapping) -> Self {
        TemplateItem::Mapping(mapping.clone())
    }
}

/// Template format version emitted when none is set
pub const DEFAULT_FORMAT_VERSION: &str = "2010-09-09";

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    description: Option<String>,
    format_version: String,
    parameters: IndexMap<String, Entity>,
    mappings: IndexMap<String, Mapping>,
    conditions: IndexMap<String, Condition>,
    resources: IndexMap<String, Entity>,
    outputs: IndexMap<String, Entity>,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            description: None,
            format_version: DEFAULT_FORMAT_VERSION.to_string(),
            parameters: IndexMap::new(),
            mappings: IndexMap::new(),
            conditions: IndexMap::new(),
            resources: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }
}

/// Store under `name`, moving a replaced entry to the end
fn store<T>(collection: &mut IndexMap<String, T>, section: &str, name: String, item: T) {
    if collection.shift_remove(&name).is_some() {
        warn!("{} '{}' replaced by a later item with the same name", section, name);
    }
    debug!("Added {} '{}'", section, name);
    collection.insert(name, item);
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Parameter,
    Resource,
    Output,
}

/// Classify `entity` and its auxiliary entities, depth first
fn stage(entity: Entity, staged: &mut Vec<(Section, String, Entity)>) -> TemplateResult<()> {
    let section = match entity.class() {
        EntityClass::Parameter => Section::Parameter,
        EntityClass::Resource => Section::Resource,
        EntityClass::Output => Section::Output,
        EntityClass::Property => {
            return Err(TemplateError::CollectionTypeError {
                kind: entity.kind_id().to_string(),
            })
        }
    };
    let name = entity
        .name()
        .ok_or_else(|| TemplateError::UnnamedEntity {
            kind: entity.kind_id().to_string(),
        })?
        .to_string();

    let (primary, siblings) = entity.into_parts()?;
    staged.push((section, name, primary));
    for sibling in siblings {
        stage(sibling, staged)?;
    }
    Ok(())
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_format_version(mut self, version: impl Into<String>) -> Self {
        self.format_version = version.into();
        self
    }

    /// Classify and store `item`, then every auxiliary entity it implies
    ///
    /// Nothing is stored unless every entity in the batch is valid.
    pub fn add(&mut self, item: impl Into<TemplateItem>) -> TemplateResult<()> {
        match item.into() {
            TemplateItem::Condition(condition) => {
                condition
                    .expression()
                    .arguments()
                    .into_iter()
                    .try_for_each(Value::ensure_referenceable)?;
                let name = condition.name().to_string();
                store(&mut self.conditions, "Condition", name, condition);
                Ok(())
            }
            TemplateItem::Mapping(mapping) => {
                mapping.values().try_for_each(Value::ensure_referenceable)?;
                let name = mapping.name().to_string();
                store(&mut self.mappings, "Mapping", name, mapping);
                Ok(())
            }
            TemplateItem::Entity(entity) => self.add_entity(entity),
        }
    }

    /// Add several items in order
    pub fn add_all<I, T>(&mut self, items: I) -> TemplateResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<TemplateItem>,
    {
        items.into_iter().try_for_each(|item| self.add(item))
    }

    fn add_entity(&mut self, entity: Entity) -> TemplateResult<()> {
        let mut staged = Vec::new();
        stage(entity, &mut staged)?;

        for (section, name, entity) in staged {
            match section {
                Section::Parameter => store(&mut self.parameters, "Parameter", name, entity),
                Section::Resource => store(&mut self.resources, "Resource", name, entity),
                Section::Output => store(&mut self.outputs, "Output", name, entity),
            }
        }
        Ok(())
    }

    /// Rename `item` to `name`, add it, and return the stored entity
    pub fn insert(&mut self, name: impl Into<String>, item: &Entity) -> TemplateResult<Entity> {
        let named = item.named(name);
        self.add(named.clone())?;
        Ok(named)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn format_version(&self) -> &str {
        &self.format_version
    }

    pub fn parameters(&self) -> &IndexMap<String, Entity> {
        &self.parameters
    }

    pub fn mappings(&self) -> &IndexMap<String, Mapping> {
        &self.mappings
    }

    pub fn conditions(&self) -> &IndexMap<String, Condition> {
        &self.conditions
    }

    pub fn resources(&self) -> &IndexMap<String, Entity> {
        &self.resources
    }

    pub fn outputs(&self) -> &IndexMap<String, Entity> {
        &self.outputs
    }

    pub fn resource(&self, name: &str) -> Option<&Entity> {
        self.resources.get(name)
    }

    /// Render with the default configuration
    pub fn to_json(&self) -> TemplateResult<String> {
        self.to_json_with(&RenderConfig::default())
    }

    pub fn to_json_with(&self, config: &RenderConfig) -> TemplateResult<String> {
        if config.compact {
            return Ok(serde_json::to_string(self)?);
        }

        let indent = " ".repeat(config.indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut buffer = Vec::new();
        let mut serializer = JsonSerializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(|e| TemplateError::Serialization(e.to_string()))
    }

    /// Render into a `serde_json::Value` document
    pub fn to_value(&self) -> TemplateResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Renders sections in template order
///
/// Parameters, Mappings, Conditions and Outputs are left out while empty;
/// Resources is always present, even as an empty object.
impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("AWSTemplateFormatVersion", &self.format_version)?;
        if let Some(description) = &self.description {
            map.serialize_entry("Description", description)?;
        }
        if !self.parameters.is_empty() {
            map.serialize_entry("Parameters", &self.parameters)?;
        }
        if !self.mappings.is_empty() {
            map.serialize_entry("Mappings", &self.mappings)?;
        }
        if !self.conditions.is_empty() {
            map.serialize_entry("Conditions", &self.conditions)?;
        }
        map.serialize_entry("Resources", &self.resources)?;
        if !self.outputs.is_empty() {
            map.serialize_entry("Outputs", &self.outputs)?;
        }
        map.end()
    }
}
