// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tag Algebra
//!
//! A [`TagSet`] is an ordered sequence of key/value annotations.
//! Concatenation appends and never deduplicates, so a later tag with the
//! same key shadows an earlier one only in the eyes of the consumer.
//! Typical use is a base set per deployment extended with a per-resource
//! `Name` tag:
//!
//! ```rust
//! use cim_cloudformation::model::TagSet;
//!
//! let base = TagSet::from_pairs([("Environment", "prod"), ("Team", "infra")]);
//! let web = base.clone() + TagSet::from_pairs([("Name", "web")]);
//! assert_eq!(web.len(), 3);
//! assert_eq!(base.len(), 2);
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::Add;

use super::value::Value;
use crate::errors::{TemplateError, TemplateResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    key: String,
    value: Value,
    propagate_at_launch: Option<bool>,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            propagate_at_launch: None,
        }
    }

    pub fn propagate_at_launch(mut self, propagate: bool) -> Self {
        self.propagate_at_launch = Some(propagate);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.propagate_at_launch.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("Key", &self.key)?;
        map.serialize_entry("Value", &self.value)?;
        if let Some(propagate) = self.propagate_at_launch {
            map.serialize_entry("PropagateAtLaunch", &propagate)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    /// Positional tags first, then keyword shorthand pairs
    pub fn new<T, K, V>(tags: T, kwtags: impl IntoIterator<Item = (K, V)>) -> Self
    where
        T: IntoIterator<Item = Tag>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut set = Self::from_tags(tags);
        set.tags
            .extend(kwtags.into_iter().map(|(k, v)| Tag::new(k, v)));
        set
    }

    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::from_tags(pairs.into_iter().map(|(k, v)| Tag::new(k, v)))
    }

    /// Copy with one more tag appended
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    pub fn concat(&self, other: &TagSet) -> TagSet {
        let mut tags = self.tags.clone();
        tags.extend(other.tags.iter().cloned());
        TagSet { tags }
    }

    /// Concatenate with a dynamic value; null is the identity
    pub fn merge(&self, other: &Value) -> TemplateResult<TagSet> {
        match other {
            Value::Tags(tags) => Ok(self.concat(tags)),
            Value::Null => Ok(self.clone()),
            found => Err(TemplateError::MergeTypeError {
                found: found.type_name(),
            }),
        }
    }

    /// Copy with `PropagateAtLaunch` set on every tag
    pub fn propagating(&self, propagate: bool) -> TagSet {
        TagSet {
            tags: self
                .tags
                .iter()
                .cloned()
                .map(|tag| tag.propagate_at_launch(propagate))
                .collect(),
        }
    }

    /// Effective value for `key`; the last occurrence wins
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tags
            .iter()
            .rev()
            .find(|tag| tag.key == key)
            .map(|tag| &tag.value)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.tags.iter_mut().map(|tag| &mut tag.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }
}

impl Add for TagSet {
    type Output = TagSet;

    fn add(mut self, rhs: TagSet) -> TagSet {
        self.tags.extend(rhs.tags);
        self
    }
}

impl Add<Option<TagSet>> for TagSet {
    type Output = TagSet;

    fn add(self, rhs: Option<TagSet>) -> TagSet {
        match rhs {
            Some(rhs) => self + rhs,
            None => self,
        }
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tags.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_positional_before_keyword() {
        let tags = TagSet::new(vec![Tag::new("Name", "web")], [("Team", "infra")]);
        assert_eq!(
            serde_json::to_value(&tags).unwrap(),
            json!([
                {"Key": "Name", "Value": "web"},
                {"Key": "Team", "Value": "infra"}
            ])
        );
    }

    #[test]
    fn test_concatenation_keeps_duplicates() {
        let base = TagSet::from_pairs([("Name", "base")]);
        let specific = TagSet::from_pairs([("Name", "web")]);
        let merged = base.clone() + specific;
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("Name"), Some(&Value::from("web")));
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_merge_with_nothing_is_identity() {
        let base = TagSet::from_pairs([("Env", "dev")]);
        assert_eq!(base.merge(&Value::Null).unwrap(), base);
        assert_eq!(base.clone() + None, base);
    }

    #[test]
    fn test_merge_with_non_tags_fails() {
        let base = TagSet::from_pairs([("Env", "dev")]);
        assert_eq!(
            base.merge(&Value::from("Env=dev")),
            Err(TemplateError::MergeTypeError {
                found: "string".to_string()
            })
        );
    }

    #[test]
    fn test_propagating() {
        let tags = TagSet::from_pairs([("Env", "dev")]).propagating(true);
        assert_eq!(
            serde_json::to_value(&tags).unwrap(),
            json!([{"Key": "Env", "Value": "dev", "PropagateAtLaunch": true}])
        );
    }
}
