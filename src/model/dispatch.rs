// Copyright (c) 2025 - Cowboy AI, Inc.
//! Positional Argument Dispatch
//!
//! Entity kinds are assembled by concatenating partial schemas, so a fixed
//! positional order would shift whenever a base list grows. Instead each
//! positional argument is bound to the single declared name whose type it
//! satisfies; argument order does not matter as long as the runtime types
//! are pairwise distinguishable.

use indexmap::IndexMap;
use tracing::trace;

use super::schema::ArgSpec;
use super::value::Value;
use crate::errors::{TemplateError, TemplateResult};

/// Constructor arguments: positional values and keyword overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    keywords: IndexMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument (internal key)
    pub fn kw(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn into_parts(self) -> (Vec<Value>, IndexMap<String, Value>) {
        (self.positional, self.keywords)
    }

    /// Remove and return a leading positional string
    pub(crate) fn take_name(&mut self) -> Option<String> {
        match self.positional.first() {
            Some(Value::String(_)) => match self.positional.remove(0) {
                Value::String(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Build [`Args`] from positional values and `key = value` keywords
///
/// ```rust
/// use cim_cloudformation::args;
///
/// let args = args!["Web", 80; description = "web tier"];
/// assert_eq!(args.positional().len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::model::Args::new()
    };
    ($($arg:expr),* ; $($key:ident = $value:expr),+ $(,)?) => {
        $crate::model::Args::new()
            $(.arg($arg))*
            $(.kw(stringify!($key), $value))+
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::model::Args::new()$(.arg($arg))+
    };
}

/// Bind positional arguments to candidate names by runtime type
///
/// Returns the keyword map extended with one entry per positional argument.
pub fn dispatch(
    kind: &str,
    candidates: &[ArgSpec],
    positional: Vec<Value>,
    mut keywords: IndexMap<String, Value>,
) -> TemplateResult<IndexMap<String, Value>> {
    if positional.len() > candidates.len() {
        return Err(TemplateError::TooManyArguments {
            kind: kind.to_string(),
            max: candidates.len(),
            given: positional.len(),
        });
    }

    for value in positional {
        let mut matches = candidates
            .iter()
            .filter(|candidate| candidate.value_type.accepts(&value));

        let Some(first) = matches.next() else {
            return Err(TemplateError::UnexpectedArgumentType {
                kind: kind.to_string(),
                found: value.type_name(),
            });
        };
        if let Some(second) = matches.next() {
            return Err(TemplateError::AmbiguousArgumentType {
                kind: kind.to_string(),
                found: value.type_name(),
                first: first.name.clone(),
                second: second.name.clone(),
            });
        }
        if keywords.contains_key(&first.name) {
            return Err(TemplateError::ConflictingBinding {
                kind: kind.to_string(),
                attribute: first.name.clone(),
            });
        }

        trace!("{}: bound {} argument to '{}'", kind, value.type_name(), first.name);
        keywords.insert(first.name.clone(), value);
    }

    Ok(keywords)
}
