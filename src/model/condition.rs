// Copyright (c) 2025 - Cowboy AI, Inc.
//! Named Conditions
//!
//! A [`Condition`] is a named boolean expression built from condition
//! functions. Conditionable kinds (resources, outputs) carry an optional
//! `condition` structural attribute that links to one by name and renders
//! as `"Condition": <name>` beside the entity's properties.

use serde::ser::{Serialize, Serializer};

use super::dispatch::{dispatch, Args};
use super::functions::Intrinsic;
use super::schema::{ArgSpec, ValueType};
use super::value::Value;
use crate::errors::{TemplateError, TemplateResult};

/// Structural attribute shared by every conditionable kind
pub fn conditionable_args() -> Vec<ArgSpec> {
    vec![ArgSpec::new("condition", ValueType::Condition)]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    name: String,
    expression: Intrinsic,
}

impl Condition {
    pub const KIND: &'static str = "Condition";

    pub fn new(name: impl Into<String>, expression: Intrinsic) -> Self {
        Self {
            name: name.into(),
            expression,
        }
    }

    /// Build from positional and keyword arguments: a name string and a
    /// condition function, in either order
    pub fn construct(args: Args) -> TemplateResult<Self> {
        let candidates = vec![
            ArgSpec::new("name", ValueType::String),
            ArgSpec::new("expression", ValueType::ConditionFunction),
        ];
        let (positional, keywords) = args.into_parts();
        let mut bound = dispatch(Self::KIND, &candidates, positional, keywords)?;

        if let Some(unknown) = bound
            .keys()
            .find(|key| !candidates.iter().any(|c| &c.name == *key))
        {
            return Err(TemplateError::UnknownAttribute {
                kind: Self::KIND.to_string(),
                attribute: unknown.clone(),
            });
        }

        let name = match bound.shift_remove("name") {
            Some(Value::String(name)) => name,
            _ => return Err(missing("name")),
        };
        let expression = match bound.shift_remove("expression") {
            Some(Value::Fn(function)) if function.is_condition() => *function,
            _ => return Err(missing("expression")),
        };
        Ok(Self::new(name, expression))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> &Intrinsic {
        &self.expression
    }
}

fn missing(argument: &str) -> TemplateError {
    TemplateError::MissingArgument {
        kind: Condition::KIND.to_string(),
        argument: argument.to_string(),
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.expression.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::functions::{base64, fn_equals};
    use serde_json::json;

    #[test]
    fn test_positional_order_does_not_matter() {
        let expr = fn_equals("prod", "prod");
        let a = Condition::construct(Args::new().arg("IsProd").arg(expr.clone())).unwrap();
        let b = Condition::construct(Args::new().arg(expr).arg("IsProd")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name(), "IsProd");
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            json!({"Fn::Equals": ["prod", "prod"]})
        );
    }

    #[test]
    fn test_non_condition_function_rejected() {
        let err = Condition::construct(Args::new().arg("Encoded").arg(base64("x"))).unwrap_err();
        assert!(matches!(err, TemplateError::UnexpectedArgumentType { .. }));
    }

    #[test]
    fn test_missing_expression() {
        let err = Condition::construct(Args::new().arg("IsProd")).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingArgument {
                kind: "Condition".to_string(),
                argument: "expression".to_string()
            }
        );
    }
}
