// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sibling/Derived-Entity Expansion
//!
//! Some attributes imply an auxiliary entity in the final document:
//! associating a route table with a subnet needs a
//! `SubnetRouteTableAssociation`, attaching a gateway to a VPC needs a
//! `VPCGatewayAttachment`. A [`DerivedSibling`] declares such an attribute
//! on the owner's schema. The auxiliary entity is never stored: it is
//! computed from the owner's current attributes whenever siblings are
//! collected, so two copies of an owner can never share one.
//!
//! Builder-style siblings (security group rules, routes, ACL entries) are
//! appended explicitly with [`Entity::with_sibling`] and named with
//! [`labelled_name`].

use std::sync::Arc;
use tracing::debug;

use super::dispatch::Args;
use super::entity::Entity;
use super::schema::{KindSchema, ValueType};
use super::value::Value;
use crate::errors::{TemplateError, TemplateResult};

/// Which participant's name comes first in the auxiliary entity's name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOrder {
    OwnerFirst,
    TargetFirst,
}

/// Auxiliary entity implied by setting `attr` on the owner
#[derive(Debug, Clone)]
pub struct DerivedSibling {
    attr: &'static str,
    target_kind: &'static str,
    schema: Arc<KindSchema>,
    owner_key: &'static str,
    target_key: &'static str,
    order: NameOrder,
    suffix: &'static str,
}

impl DerivedSibling {
    /// `owner_key` and `target_key` are the auxiliary kind's internal keys
    /// that receive references to the two participants
    pub fn new(
        attr: &'static str,
        target_kind: &'static str,
        schema: Arc<KindSchema>,
        owner_key: &'static str,
        target_key: &'static str,
    ) -> Self {
        Self {
            attr,
            target_kind,
            schema,
            owner_key,
            target_key,
            order: NameOrder::OwnerFirst,
            suffix: "Association",
        }
    }

    pub fn order(mut self, order: NameOrder) -> Self {
        self.order = order;
        self
    }

    pub fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn attr(&self) -> &'static str {
        self.attr
    }

    pub fn target_type(&self) -> ValueType {
        ValueType::Entity(self.target_kind)
    }

    pub fn schema(&self) -> &Arc<KindSchema> {
        &self.schema
    }

    /// Deterministic name: both participant names plus the role suffix
    pub fn sibling_name(&self, owner: &str, target: &str) -> String {
        match self.order {
            NameOrder::OwnerFirst => format!("{}{}{}", owner, target, self.suffix),
            NameOrder::TargetFirst => format!("{}{}{}", target, owner, self.suffix),
        }
    }

    /// Build the auxiliary entity for `owner`, if the attribute is set
    pub fn expand(&self, owner: &Entity) -> TemplateResult<Option<Entity>> {
        let target = match owner.get(self.attr) {
            Some(target) if !target.is_null() => target,
            _ => return Ok(None),
        };

        let owner_name = participant_name(owner)?;
        let target_name = target
            .target_name()
            .ok_or_else(|| TemplateError::UnnamedReferenceTarget {
                kind: self.target_kind.to_string(),
            })?;
        let name = self.sibling_name(owner_name, target_name);

        let args = Args::new()
            .arg(name.as_str())
            .kw(self.owner_key, owner)
            .kw(self.target_key, target.clone());
        let sibling = Entity::construct(Arc::clone(&self.schema), args)?;

        debug!("Derived {} '{}' from {}", sibling.kind_id(), name, owner_name);
        Ok(Some(sibling))
    }
}

/// Name of an entity taking part in a generated sibling
pub fn participant_name(entity: &Entity) -> TemplateResult<&str> {
    entity
        .name()
        .ok_or_else(|| TemplateError::UnnamedReferenceTarget {
            kind: entity.kind_id().to_string(),
        })
}

/// `<owner><role><label>`, with the 1-based ordinal standing in for a
/// missing label
pub fn labelled_name(owner: &str, role: &str, label: Option<&str>, ordinal: usize) -> String {
    match label {
        Some(label) => format!("{}{}{}", owner, role, label),
        None => format!("{}{}{}", owner, role, ordinal),
    }
}

/// Replace a leading positional label with the prefixed sibling name
///
/// Returns the rewritten arguments; an unlabelled call gets the ordinal
/// fallback name prepended.
pub fn prefix_label(args: Args, owner: &str, role: &str, ordinal: usize) -> Args {
    let (mut positional, keywords) = args.into_parts();
    let label = match positional.first() {
        Some(Value::String(label)) => Some(label.clone()),
        _ => None,
    };
    let name = labelled_name(owner, role, label.as_deref(), ordinal);
    match label {
        Some(_) => positional[0] = Value::String(name),
        None => positional.insert(0, Value::String(name)),
    }

    let mut args = Args::new();
    for value in positional {
        args = args.arg(value);
    }
    for (key, value) in keywords {
        args = args.kw(key, value);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::{typed, EntityClass};

    fn kinds() -> (Arc<KindSchema>, Arc<KindSchema>) {
        let association = Arc::new(KindSchema::resource("Test::Association", "Association").properties(vec![
            typed("OwnerId", ValueType::Entity("Test::Owner")),
            typed("TargetId", ValueType::Entity("Test::Target")),
        ]));
        let owner = KindSchema::resource("Test::Owner", "Owner").derive(
            DerivedSibling::new("target", "Test::Target", association, "owner_id", "target_id")
                .order(NameOrder::TargetFirst),
        );
        let target = KindSchema::new("Test::Target", "Target", EntityClass::Resource);
        (Arc::new(owner), Arc::new(target))
    }

    #[test]
    fn test_target_first_naming() {
        let (owner_kind, target_kind) = kinds();
        let target = Entity::construct(target_kind, Args::new().arg("Subnet1")).unwrap();
        let owner = Entity::construct(owner_kind, Args::new().arg("RT1").arg(&target)).unwrap();

        let derived = &owner.schema().derived()[0];
        let sibling = derived.expand(&owner).unwrap().unwrap();
        assert_eq!(sibling.name(), Some("Subnet1RT1Association"));
        assert_eq!(sibling.get("owner_id").and_then(Value::target_name), Some("RT1"));
        assert_eq!(sibling.get("target_id").and_then(Value::target_name), Some("Subnet1"));
    }

    #[test]
    fn test_unset_attribute_derives_nothing() {
        let (owner_kind, _) = kinds();
        let owner = Entity::construct(owner_kind, Args::new().arg("RT1")).unwrap();
        assert!(owner.schema().derived()[0].expand(&owner).unwrap().is_none());
    }

    #[test]
    fn test_labelled_name_fallback() {
        assert_eq!(labelled_name("Web", "Inbound", Some("HTTP"), 1), "WebInboundHTTP");
        assert_eq!(labelled_name("Web", "Outbound", None, 2), "WebOutbound2");
    }

    #[test]
    fn test_prefix_label() {
        let args = prefix_label(Args::new().arg("SSH").arg(22), "Web", "Inbound", 1);
        assert_eq!(args.positional()[0], Value::from("WebInboundSSH"));
        let args = prefix_label(Args::new().arg(22), "Web", "Inbound", 3);
        assert_eq!(args.positional()[0], Value::from("WebInbound3"));
        assert_eq!(args.positional().len(), 2);
    }
}
