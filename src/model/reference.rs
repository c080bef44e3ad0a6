// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reference Resolution
//!
//! A [`Reference`] is a name-only pointer to another entity. It never owns
//! the target, it only remembers the assigned name and the target's kind
//! (the kind is what positional dispatch matches against). At
//! serialization time a plain reference renders as `{"Ref": name}` and an
//! attribute reference as `{"Fn::GetAtt": [name, attribute]}`, so the
//! document holds graph edges instead of inlined copies.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::entity::Entity;
use crate::errors::{TemplateError, TemplateResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    target: String,
    kind: &'static str,
    attribute: Option<String>,
}

impl Reference {
    /// Reference the entity itself
    ///
    /// Fails with `UnnamedReferenceTarget` if the entity has no name.
    pub fn to(entity: &Entity) -> TemplateResult<Self> {
        Self::named(entity).ok_or_else(|| TemplateError::UnnamedReferenceTarget {
            kind: entity.kind_id().to_string(),
        })
    }

    /// Reference a derived attribute of the entity (`Fn::GetAtt`)
    pub fn attribute(entity: &Entity, attribute: impl Into<String>) -> TemplateResult<Self> {
        let mut reference = Self::to(entity)?;
        reference.attribute = Some(attribute.into());
        Ok(reference)
    }

    /// Reference an entity known only by name, such as a pseudo parameter
    pub fn by_name(target: impl Into<String>, kind: &'static str) -> Self {
        Self {
            target: target.into(),
            kind,
            attribute: None,
        }
    }

    pub(crate) fn named(entity: &Entity) -> Option<Self> {
        entity
            .name()
            .map(|name| Self::by_name(name, entity.kind_id()))
    }

    /// Point a reference to `from` of `kind` at `to` instead
    pub(crate) fn retarget(&mut self, kind: &str, from: &str, to: &str) {
        if self.kind == kind && self.target == from {
            self.target = to.to_string();
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute.as_deref()
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match &self.attribute {
            None => map.serialize_entry("Ref", &self.target)?,
            Some(attribute) => map.serialize_entry("Fn::GetAtt", &(&self.target, attribute))?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Args, EntityClass, KindSchema};
    use serde_json::json;
    use std::sync::Arc;

    fn kind() -> Arc<KindSchema> {
        Arc::new(KindSchema::new("Test::Thing", "Thing", EntityClass::Resource))
    }

    #[test]
    fn test_reference_serialization() {
        let thing = Entity::construct(kind(), Args::new().arg("Thing1")).unwrap();
        let reference = Reference::to(&thing).unwrap();
        assert_eq!(serde_json::to_value(&reference).unwrap(), json!({"Ref": "Thing1"}));

        let attribute = Reference::attribute(&thing, "PublicIp").unwrap();
        assert_eq!(
            serde_json::to_value(&attribute).unwrap(),
            json!({"Fn::GetAtt": ["Thing1", "PublicIp"]})
        );
    }

    #[test]
    fn test_unnamed_target_is_rejected() {
        let thing = Entity::construct(kind(), Args::new()).unwrap();
        assert_eq!(
            Reference::to(&thing),
            Err(TemplateError::UnnamedReferenceTarget {
                kind: "Test::Thing".to_string()
            })
        );
    }
}
