// Copyright (c) 2025 - Cowboy AI, Inc.
//! Template Outputs

use crate::errors::TemplateResult;
use crate::model::{
    conditionable_args, prop, typed, EntityClass, KindSchema, SchemaRegistry, ValueType,
};

use super::constructors;

pub const OUTPUT: &str = "Output";

pub(crate) fn register(registry: &mut SchemaRegistry) -> TemplateResult<()> {
    registry.register(
        KindSchema::new(OUTPUT, "Output", EntityClass::Output)
            .properties(vec![
                typed("Description", ValueType::String),
                typed("Value", ValueType::Named),
                prop("Export"),
            ])
            .structural(conditionable_args()),
    )?;
    Ok(())
}

constructors! {
    /// Output; a positional named entity becomes its `Value` reference
    output => OUTPUT,
}
