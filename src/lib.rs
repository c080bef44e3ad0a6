//! CloudFormation templates for the Composable Information Machine
//!
//! This crate provides a compositional object model for infrastructure
//! templates: schema-bound entities with type-dispatched constructors,
//! name-only references, tag algebra, conditions and intrinsic functions,
//! auxiliary entities derived from attachments, and an aggregator that
//! renders everything as one ordered document.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod model;
pub mod template;

// Re-export commonly used types
pub use config::RenderConfig;
pub use errors::{TemplateError, TemplateResult};
pub use model::{
    registry, Args, Condition, DeletionPolicy, Entity, Mapping, Reference, Tag, TagSet, Value,
};
pub use template::{Template, TemplateItem};
