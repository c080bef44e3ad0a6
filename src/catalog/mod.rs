// Copyright (c) 2025 - Cowboy AI, Inc.
//! Built-in Kind Catalog
//!
//! Static schema tables for the kinds the crate ships with, plus typed
//! constructor functions and kind-specific builders. Each submodule
//! registers its kinds into a [`SchemaRegistry`]; the process-wide
//! [`registry()`](crate::model::registry) is built from
//! [`standard_registry`].

use tracing::debug;

use crate::errors::{TemplateError, TemplateResult};
use crate::model::{Entity, SchemaRegistry};

pub mod ec2;
pub mod iam;
pub mod outputs;
pub mod parameters;
pub mod pseudo;

/// Generate `pub fn name(args: Args) -> TemplateResult<Entity>` constructors
macro_rules! constructors {
    ($($(#[$meta:meta])* $name:ident => $id:expr),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(
                args: $crate::model::Args,
            ) -> $crate::errors::TemplateResult<$crate::model::Entity> {
                $crate::model::registry().construct_kind($id, args)
            }
        )*
    };
}
pub(crate) use constructors;

/// Registry holding every built-in kind
pub fn standard_registry() -> TemplateResult<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    parameters::register(&mut registry)?;
    outputs::register(&mut registry)?;
    ec2::register(&mut registry)?;
    iam::register(&mut registry)?;
    debug!("Built-in catalog holds {} kinds", registry.len());
    Ok(registry)
}

/// Kind-specific builders refuse entities of another kind
pub(crate) fn expect_kind(entity: &Entity, expected: &str) -> TemplateResult<()> {
    if entity.kind_id() == expected {
        Ok(())
    } else {
        Err(TemplateError::KindMismatch {
            expected: expected.to_string(),
            found: entity.kind_id().to_string(),
        })
    }
}
