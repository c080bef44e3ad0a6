// Copyright (c) 2025 - Cowboy AI, Inc.
//! Template Parameters

use crate::errors::TemplateResult;
use crate::model::{
    prop, typed, Args, Entity, EntityClass, KindSchema, SchemaRegistry, Value, ValueType,
};

use super::constructors;

pub const PARAMETER: &str = "Parameter";

/// Declared type of a parameter's input value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterType(&'static str);

impl ParameterType {
    pub const KIND: &'static str = "ParameterType";

    pub const STRING: Self = Self("String");
    pub const NUMBER: Self = Self("Number");
    pub const LIST_NUMBER: Self = Self("List<Number>");
    pub const COMMA_DELIMITED_LIST: Self = Self("CommaDelimitedList");
    pub const KEY_PAIR: Self = Self("AWS::EC2::KeyPair::KeyName");
    pub const SECURITY_GROUP: Self = Self("AWS::EC2::SecurityGroup::Id");
    pub const SUBNET: Self = Self("AWS::EC2::Subnet::Id");
    pub const VPC: Self = Self("AWS::EC2::VPC::Id");
    pub const LIST_SECURITY_GROUP: Self = Self("List<AWS::EC2::SecurityGroup::Id>");
    pub const LIST_SUBNET: Self = Self("List<AWS::EC2::Subnet::Id>");
    pub const LIST_VPC: Self = Self("List<AWS::EC2::VPC::Id>");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl From<ParameterType> for Value {
    fn from(kind: ParameterType) -> Self {
        Value::wrapped(ParameterType::KIND, kind.0)
    }
}

pub(crate) fn register(registry: &mut SchemaRegistry) -> TemplateResult<()> {
    registry.register(
        KindSchema::new(PARAMETER, "Parameter", EntityClass::Parameter).properties(vec![
            typed("Type", ValueType::Wrapper(ParameterType::KIND)),
            typed("Description", ValueType::String),
            prop("Default"),
            prop("AllowedValues"),
            prop("AllowedPattern"),
            prop("ConstraintDescription"),
            prop("MaxLength"),
            prop("MinLength"),
            prop("MaxValue"),
            prop("MinValue"),
            prop("NoEcho"),
        ]),
    )?;
    Ok(())
}

constructors! {
    /// Parameter of any type; pass a [`ParameterType`] positionally
    parameter => PARAMETER,
}

fn parameter_of(kind: ParameterType, args: Args) -> TemplateResult<Entity> {
    parameter(args.kw("type", kind))
}

pub fn string_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::STRING, args)
}

pub fn number_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::NUMBER, args)
}

pub fn list_number_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::LIST_NUMBER, args)
}

pub fn comma_delimited_list_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::COMMA_DELIMITED_LIST, args)
}

pub fn key_pair_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::KEY_PAIR, args)
}

pub fn security_group_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::SECURITY_GROUP, args)
}

pub fn subnet_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::SUBNET, args)
}

pub fn vpc_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::VPC, args)
}

pub fn list_security_group_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::LIST_SECURITY_GROUP, args)
}

pub fn list_subnet_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::LIST_SUBNET, args)
}

pub fn list_vpc_parameter(args: Args) -> TemplateResult<Entity> {
    parameter_of(ParameterType::LIST_VPC, args)
}
