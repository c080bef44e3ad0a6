// Copyright (c) 2025 - Cowboy AI, Inc.
//! Schema Registry and Factory Table
//!
//! Kinds are registered once, as flattened schemas, and each registration
//! adds a snake_case constructor name to the factory table
//! (`SecurityGroup` → `security_group`). The built-in catalog lives in a
//! process-wide registry initialized on first use.

use indexmap::IndexMap;
use std::sync::{Arc, LazyLock};
use tracing::debug;

use super::dispatch::Args;
use super::entity::Entity;
use super::schema::{snake_case, KindSchema};
use crate::catalog::standard_registry;
use crate::errors::{TemplateError, TemplateResult};

static REGISTRY: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    standard_registry().expect("built-in catalog registers without conflicts")
});

/// The built-in catalog
pub fn registry() -> &'static SchemaRegistry {
    &REGISTRY
}

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    kinds: IndexMap<&'static str, Arc<KindSchema>>,
    constructors: IndexMap<String, &'static str>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add a kind; returns the shared schema
    pub fn register(&mut self, schema: KindSchema) -> TemplateResult<Arc<KindSchema>> {
        schema.validate()?;

        let id = schema.id();
        if self.kinds.contains_key(id) {
            return Err(TemplateError::DuplicateKind(id.to_string()));
        }
        let constructor = snake_case(schema.name());
        if self.constructors.contains_key(&constructor) {
            return Err(TemplateError::DuplicateKind(constructor));
        }

        debug!("Registered kind {} as {}()", id, constructor);
        let schema = Arc::new(schema);
        self.kinds.insert(id, Arc::clone(&schema));
        self.constructors.insert(constructor, id);
        Ok(schema)
    }

    /// Schema by external id (`AWS::EC2::Subnet`)
    pub fn kind(&self, id: &str) -> TemplateResult<Arc<KindSchema>> {
        self.kinds
            .get(id)
            .cloned()
            .ok_or_else(|| TemplateError::UnknownKind(id.to_string()))
    }

    /// Schema by constructor name (`subnet`)
    pub fn constructor(&self, name: &str) -> TemplateResult<Arc<KindSchema>> {
        let id = self
            .constructors
            .get(name)
            .ok_or_else(|| TemplateError::UnknownKind(name.to_string()))?;
        self.kind(id)
    }

    /// Build an entity through the factory table
    pub fn construct(&self, name: &str, args: Args) -> TemplateResult<Entity> {
        Entity::construct(self.constructor(name)?, args)
    }

    pub fn construct_kind(&self, id: &str, args: Args) -> TemplateResult<Entity> {
        Entity::construct(self.kind(id)?, args)
    }

    pub fn constructor_names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
