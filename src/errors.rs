// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for template construction and aggregation

use thiserror::Error;

use crate::domain::{DomainNameError, NetworkError};

/// Errors raised while building entities or assembling a template
///
/// All of these are raised synchronously at construction or aggregation
/// time. Nothing is recovered internally; a build script is expected to
/// abort on the first error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TemplateError {
    /// Keyword argument not declared by the kind's schema
    #[error("{kind}() got unexpected keyword argument '{attribute}'")]
    UnknownAttribute { kind: String, attribute: String },

    /// Positional argument matches no declared type
    #[error("{kind}() got argument of unexpected type '{found}'")]
    UnexpectedArgumentType { kind: String, found: String },

    /// Positional argument matches more than one declared type
    #[error("{kind}() got ambiguous argument of type '{found}': matches both '{first}' and '{second}'")]
    AmbiguousArgumentType {
        kind: String,
        found: String,
        first: String,
        second: String,
    },

    /// Positional argument resolved to a name already bound by keyword
    #[error("{kind}() got multiple values for argument '{attribute}'")]
    ConflictingBinding { kind: String, attribute: String },

    /// More positional arguments than dispatch candidates
    #[error("{kind}() takes at most {max} positional argument(s) ({given} given)")]
    TooManyArguments {
        kind: String,
        max: usize,
        given: usize,
    },

    /// Required argument absent
    #[error("{kind}() missing required argument '{argument}'")]
    MissingArgument { kind: String, argument: String },

    /// Reference built against an entity without an assigned name
    #[error("cannot reference unnamed {kind}")]
    UnnamedReferenceTarget { kind: String },

    /// TagSet concatenated with something that is not a TagSet
    #[error("cannot merge 'TagSet' and '{found}' objects")]
    MergeTypeError { found: String },

    /// Item of a kind that has no template collection
    #[error("argument of kind '{kind}' is not valid in a template")]
    CollectionTypeError { kind: String },

    /// Entity added to a template without an assigned name
    #[error("cannot add unnamed {kind} to a template")]
    UnnamedEntity { kind: String },

    /// Kind or constructor not present in the registry
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    /// Kind or constructor registered twice
    #[error("entity kind already registered: {0}")]
    DuplicateKind(String),

    /// Schema declares the same external key twice
    #[error("{kind} declares property '{key}' more than once")]
    DuplicateProperty { kind: String, key: String },

    /// Kind-specific builder invoked on another kind
    #[error("expected {expected}, got {found}")]
    KindMismatch { expected: String, found: String },

    /// Invalid network value object
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Invalid domain name value object
    #[error(transparent)]
    DomainName(#[from] DomainNameError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TemplateError::UnknownAttribute {
            kind: "AWS::EC2::Subnet".to_string(),
            attribute: "colour".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "AWS::EC2::Subnet() got unexpected keyword argument 'colour'"
        );

        let err = TemplateError::MergeTypeError {
            found: "string".to_string(),
        };
        assert_eq!(err.to_string(), "cannot merge 'TagSet' and 'string' objects");
    }

    #[test]
    fn test_network_error_conversion() {
        let err: TemplateError = NetworkError::InvalidCidr("10.0.0.0".to_string()).into();
        assert!(matches!(err, TemplateError::Network(_)));
        assert_eq!(err.to_string(), "Invalid CIDR notation: 10.0.0.0");
    }
}
