// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pseudo parameters predefined by the provisioning service
//!
//! They are never declared in a template; they exist only as references.

use crate::model::Reference;

/// Kind carried by pseudo parameter references
pub const PSEUDO_PARAMETER: &str = "AWS::PseudoParameter";

pub fn account_id() -> Reference {
    Reference::by_name("AWS::AccountId", PSEUDO_PARAMETER)
}

pub fn notification_arns() -> Reference {
    Reference::by_name("AWS::NotificationARNs", PSEUDO_PARAMETER)
}

/// Removes the property it is assigned to
pub fn no_value() -> Reference {
    Reference::by_name("AWS::NoValue", PSEUDO_PARAMETER)
}

pub fn region() -> Reference {
    Reference::by_name("AWS::Region", PSEUDO_PARAMETER)
}

pub fn stack_id() -> Reference {
    Reference::by_name("AWS::StackId", PSEUDO_PARAMETER)
}

pub fn stack_name() -> Reference {
    Reference::by_name("AWS::StackName", PSEUDO_PARAMETER)
}
