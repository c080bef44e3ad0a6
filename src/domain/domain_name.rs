// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Name Value Object
//!
//! Used for DHCP option sets and hosted zones. Validation follows RFC 1123
//! label rules; a single trailing dot (absolute form) is accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::Value;

/// Domain name validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainNameError {
    #[error("Domain name is empty")]
    Empty,

    #[error("Domain name exceeds maximum length of 253 characters: {0}")]
    TooLong(usize),

    #[error("Label exceeds maximum length of 63 characters: {0}")]
    LabelTooLong(String),

    #[error("Invalid character in domain name: {0}")]
    InvalidCharacter(char),

    #[error("Label cannot start or end with hyphen: {0}")]
    InvalidLabelFormat(String),
}

/// DNS domain name such as `internal.example.com`
///
/// # Examples
///
/// ```rust
/// use cim_cloudformation::domain::DomainName;
///
/// assert!(DomainName::new("internal.example.com").is_ok());
/// assert!(DomainName::new("example.com.").is_ok());
/// assert!(DomainName::new("bad..example").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Wrapper kind used for dispatch
    pub const KIND: &'static str = "DomainName";

    pub const MAX_LENGTH: usize = 253;
    pub const MAX_LABEL_LENGTH: usize = 63;

    pub fn new(name: impl Into<String>) -> Result<Self, DomainNameError> {
        let name = name.into();
        let body = name.strip_suffix('.').unwrap_or(&name);

        if body.is_empty() {
            return Err(DomainNameError::Empty);
        }
        if body.len() > Self::MAX_LENGTH {
            return Err(DomainNameError::TooLong(body.len()));
        }
        for label in body.split('.') {
            Self::validate_label(label)?;
        }

        Ok(Self(name))
    }

    fn validate_label(label: &str) -> Result<(), DomainNameError> {
        if label.is_empty() {
            return Err(DomainNameError::Empty);
        }
        if label.len() > Self::MAX_LABEL_LENGTH {
            return Err(DomainNameError::LabelTooLong(label.to_string()));
        }
        if let Some(ch) = label
            .chars()
            .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-')
        {
            return Err(DomainNameError::InvalidCharacter(ch));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainNameError::InvalidLabelFormat(label.to_string()));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Labels from left to right, ignoring a trailing dot
    pub fn labels(&self) -> Vec<&str> {
        self.0.trim_end_matches('.').split('.').collect()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for DomainName {
    type Error = DomainNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DomainName> for Value {
    fn from(name: DomainName) -> Self {
        Value::wrapped(DomainName::KIND, name.0)
    }
}
