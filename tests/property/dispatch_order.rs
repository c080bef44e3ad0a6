// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Positional Dispatch
//!
//! Positional arguments bind by runtime type, so any permutation of
//! distinguishable arguments must build the same entity, and the rendered
//! properties must be exactly the ones that were given (plus defaults).

use cim_cloudformation::catalog::ec2;
use cim_cloudformation::domain::{AvailabilityZone, Cidr, IpProtocol, PortRange};
use cim_cloudformation::{Args, Entity, TagSet, TemplateResult, Value};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Property Test Strategies
// ============================================================================

fn protocol() -> impl Strategy<Value = IpProtocol> {
    prop_oneof![
        Just(IpProtocol::Tcp),
        Just(IpProtocol::Udp),
        Just(IpProtocol::Icmp),
        Just(IpProtocol::All),
        (50u8..60).prop_map(IpProtocol::Number),
    ]
}

fn port_range() -> impl Strategy<Value = PortRange> {
    (any::<u16>(), any::<u16>())
        .prop_map(|(a, b)| PortRange::range(a.min(b), a.max(b)).unwrap())
}

fn cidr() -> impl Strategy<Value = Cidr> {
    (any::<u8>(), 16u8..=28).prop_map(|(octet, prefix)| {
        Cidr::new(format!("10.{}.0.0/{}", octet, prefix)).unwrap()
    })
}

fn zone() -> impl Strategy<Value = AvailabilityZone> {
    "us-(east|west)-[12][abc]".prop_map(|zone| AvailabilityZone::new(zone))
}

/// Every argument of an ingress rule, shuffled
fn ingress_arguments() -> impl Strategy<Value = (Vec<Value>, Vec<Value>)> {
    (protocol(), port_range(), cidr()).prop_flat_map(|(protocol, ports, cidr)| {
        let source = ec2::security_group(Args::new().arg("Source")).unwrap();
        let ordered = vec![
            Value::from(protocol),
            Value::from(ports),
            Value::from(cidr),
            Value::from(&source),
        ];
        (Just(ordered.clone()), Just(ordered).prop_shuffle())
    })
}

type Constructor = fn(Args) -> TemplateResult<Entity>;

fn build(constructor: Constructor, values: Vec<Value>) -> Entity {
    let args = values
        .into_iter()
        .fold(Args::new().arg("Rule"), |args, value| args.arg(value));
    constructor(args).unwrap()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Argument order does not matter
    #[test]
    fn prop_ingress_order_independent((ordered, shuffled) in ingress_arguments()) {
        let expected = build(ec2::security_group_ingress, ordered);
        let actual = build(ec2::security_group_ingress, shuffled);

        prop_assert_eq!(
            serde_json::to_value(&actual).unwrap(),
            serde_json::to_value(&expected).unwrap()
        );
        prop_assert_eq!(actual, expected);
    }

    /// Property: A port range always renders as both FromPort and ToPort
    #[test]
    fn prop_port_range_splits(ports in port_range(), protocol in protocol()) {
        let rule = build(
            ec2::security_group_egress,
            vec![Value::from(protocol), Value::from(ports)],
        );
        let rendered = serde_json::to_value(&rule).unwrap();

        let properties = &rendered["Properties"];
        prop_assert_eq!(&properties["FromPort"], &json!(ports.from_port()));
        prop_assert_eq!(&properties["ToPort"], &json!(ports.to_port()));
        prop_assert_eq!(&properties["IpProtocol"], &json!(protocol.number()));
    }

    /// Property: Exactly the given properties are rendered
    ///
    /// A subnet has no defaults, so the rendered property count equals the
    /// number of arguments given, in whatever order they were passed.
    #[test]
    fn prop_subnet_renders_only_present_properties(
        maybe_zone in proptest::option::of(zone()),
        maybe_cidr in proptest::option::of(cidr()),
        tagged in any::<bool>(),
        with_vpc in any::<bool>(),
    ) {
        let vpc = ec2::vpc(Args::new().arg("Main")).unwrap();
        let mut values = Vec::new();
        let mut expected = Vec::new();
        if let Some(zone) = maybe_zone {
            values.push(Value::from(zone));
            expected.push("AvailabilityZone");
        }
        if let Some(cidr) = maybe_cidr {
            values.push(Value::from(cidr));
            expected.push("CidrBlock");
        }
        if with_vpc {
            values.push(Value::from(&vpc));
            expected.push("VpcId");
        }
        if tagged {
            values.push(Value::from(TagSet::from_pairs([("Name", "subnet")])));
            expected.push("Tags");
        }
        values.reverse();

        let subnet = build(ec2::subnet, values);
        let rendered = serde_json::to_value(&subnet).unwrap();
        let mut keys: Vec<&str> = rendered["Properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(keys, expected);
    }

    /// Property: Defaults are rendered whenever the value is not given
    #[test]
    fn prop_security_group_defaults_present(description in "[a-z ]{1,20}") {
        let group = build(ec2::security_group, vec![Value::from(description.clone())]);
        let rendered = serde_json::to_value(&group).unwrap();

        let properties = &rendered["Properties"];
        prop_assert_eq!(&properties["GroupDescription"], &json!(description));
        prop_assert_eq!(&properties["SecurityGroupIngress"], &json!([]));
        prop_assert_eq!(&properties["SecurityGroupEgress"], &json!([]));
    }
}
