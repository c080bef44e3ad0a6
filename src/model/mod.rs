// Copyright (c) 2025 - Cowboy AI, Inc.
//! Template Object Model
//!
//! The generic engine behind every template item:
//!
//! - [`schema`] - declared, flattened property schemas
//! - [`dispatch`] - type-based binding of positional arguments
//! - [`entity`] - schema-bound values with copy-with-overrides
//! - [`reference`] - name-only links between entities
//! - [`condition`] / [`functions`] - conditions and intrinsic functions
//! - [`tags`] - ordered, concatenable tag sets
//! - [`expansion`] - auxiliary entities implied by attributes
//! - [`registry`] - kind registry and snake_case factory table

pub mod condition;
pub mod dispatch;
pub mod entity;
pub mod expansion;
pub mod functions;
pub mod mapping;
pub mod reference;
pub mod registry;
pub mod schema;
pub mod tags;
pub mod value;

pub use condition::{conditionable_args, Condition};
pub use dispatch::{dispatch, Args};
pub use entity::Entity;
pub use expansion::{labelled_name, prefix_label, DerivedSibling, NameOrder};
pub use functions::Intrinsic;
pub use mapping::Mapping;
pub use reference::Reference;
pub use registry::{registry, SchemaRegistry};
pub use schema::{
    prop, resource_args, snake_case, typed, ArgSpec, DeletionPolicy, EntityClass, KindSchema,
    PropertySpec, ValueType,
};
pub use tags::{Tag, TagSet};
pub use value::{Value, Wrapped};
