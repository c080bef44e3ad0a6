// Copyright (c) 2025 - Cowboy AI, Inc.
//! IAM Kinds
//!
//! Policy documents are opaque: they are passed in already rendered (as
//! `serde_json::Value`) and written out untouched.

use crate::errors::TemplateResult;
use crate::model::{prop, typed, Args, Entity, KindSchema, SchemaRegistry, Value, ValueType};

use super::{constructors, expect_kind};

pub const ROLE: &str = "AWS::IAM::Role";
pub const POLICY: &str = "AWS::IAM::Policy";
pub const INSTANCE_PROFILE: &str = "AWS::IAM::InstanceProfile";

pub(crate) fn register(registry: &mut SchemaRegistry) -> TemplateResult<()> {
    registry.register(KindSchema::resource(ROLE, "Role").properties(vec![
        typed("AssumeRolePolicyDocument", ValueType::Document),
        prop("ManagedPolicyArns"),
        prop("Path"),
        prop("Policies"),
    ]))?;
    registry.register(KindSchema::resource(POLICY, "Policy").properties(vec![
        prop("Groups"),
        typed("PolicyDocument", ValueType::Document),
        typed("PolicyName", ValueType::String),
        typed("Roles", ValueType::List),
        prop("Users"),
    ]))?;
    registry.register(KindSchema::resource(INSTANCE_PROFILE, "InstanceProfile").properties(vec![
        typed("Path", ValueType::String),
        typed("Roles", ValueType::List),
    ]))?;
    Ok(())
}

constructors! {
    role => ROLE,
    policy => POLICY,
    instance_profile => INSTANCE_PROFILE,
}

/// Instance profile wrapping a single role
pub fn instance_profile_for(name: &str, role: &Entity) -> TemplateResult<Entity> {
    expect_kind(role, ROLE)?;
    instance_profile(
        Args::new()
            .arg(name)
            .arg("/")
            .arg(Value::list([role])),
    )
}
