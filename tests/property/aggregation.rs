// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Template Aggregation
//!
//! Names are unique per collection with last-write-wins semantics, and
//! adding an entity adds every auxiliary entity it implies.

use cim_cloudformation::catalog::ec2::{self, SecurityGroupRules};
use cim_cloudformation::domain::{Cidr, IpProtocol, PortRange};
use cim_cloudformation::{args, Args, Template};
use proptest::prelude::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Names drawn from a small alphabet so collisions are common
fn resource_name() -> impl Strategy<Value = String> {
    "(Alpha|Bravo|Charlie|Delta)"
}

fn rule_ports() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(1u16..1024, 0..10)
}

/// Names in the order of their last occurrence
fn last_occurrence_order(names: &[String]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for name in names {
        order.retain(|existing| existing != name);
        order.push(name.clone());
    }
    order
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: One entry per name, ordered by the last write
    #[test]
    fn prop_names_are_unique(names in prop::collection::vec(resource_name(), 0..20)) {
        let mut template = Template::new();
        for name in &names {
            let gateway = ec2::internet_gateway(Args::new().arg(name.as_str())).unwrap();
            template.add(gateway).unwrap();
        }

        let stored: Vec<String> = template.resources().keys().cloned().collect();
        prop_assert_eq!(stored, last_occurrence_order(&names));
    }

    /// Property: The last item stored under a name is the one rendered
    #[test]
    fn prop_last_write_wins(names in prop::collection::vec(resource_name(), 1..20)) {
        let mut template = Template::new();
        for (index, name) in names.iter().enumerate() {
            let entity = if index % 2 == 0 {
                ec2::vpc(args![name.as_str()]).unwrap()
            } else {
                ec2::internet_gateway(args![name.as_str()]).unwrap()
            };
            template.add(entity).unwrap();
        }

        for name in last_occurrence_order(&names) {
            let last = names.iter().rposition(|candidate| *candidate == name).unwrap();
            let expected = if last % 2 == 0 { ec2::VPC } else { ec2::INTERNET_GATEWAY };
            prop_assert_eq!(template.resource(&name).unwrap().kind_id(), expected);
        }
    }

    /// Property: A security group with N rules becomes N + 1 resources
    #[test]
    fn prop_rules_become_resources(ports in rule_ports()) {
        let mut group = ec2::security_group(args!["Web", "web tier"]).unwrap();
        for port in &ports {
            group = group
                .ingress(args![IpProtocol::Tcp, PortRange::single(*port), Cidr::all()])
                .unwrap();
        }

        let mut template = Template::new();
        template.add(&group).unwrap();
        prop_assert_eq!(template.resources().len(), ports.len() + 1);

        let rendered = template.to_value().unwrap();
        for (ordinal, port) in ports.iter().enumerate() {
            let rule = &rendered["Resources"][format!("WebInbound{}", ordinal + 1)];
            prop_assert_eq!(&rule["Properties"]["FromPort"], &serde_json::json!(port));
            prop_assert_eq!(&rule["Properties"]["GroupId"], &serde_json::json!({"Ref": "Web"}));
        }
    }

    /// Property: Rendering does not depend on how often it is done
    #[test]
    fn prop_rendering_is_deterministic(names in prop::collection::vec(resource_name(), 0..8)) {
        let mut template = Template::new();
        for name in &names {
            template.add(ec2::vpc(args![name.as_str()]).unwrap()).unwrap();
        }
        prop_assert_eq!(template.to_json().unwrap(), template.to_json().unwrap());
    }
}
