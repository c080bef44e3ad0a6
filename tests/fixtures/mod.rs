// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-cloudformation
//!
//! Builds small, fixed networks shared by the integration tests. Every
//! fixture uses literal names and addresses so rendered documents can be
//! compared against hand-written JSON.

#![allow(dead_code)]

use cim_cloudformation::catalog::ec2::{self, RouteTableRoutes, SecurityGroupRules};
use cim_cloudformation::domain::{AvailabilityZone, Cidr, IpProtocol, PortRange};
use cim_cloudformation::{args, Entity, TagSet, TemplateResult};

pub const VPC_CIDR: &str = "10.0.0.0/16";
pub const SUBNET_CIDR: &str = "10.0.1.0/24";
pub const ZONE: &str = "us-east-1a";

pub fn team_tags() -> TagSet {
    TagSet::from_pairs([("Team", "platform"), ("CostCenter", "42")])
}

pub fn vpc_fixture() -> TemplateResult<Entity> {
    ec2::vpc(args!["Main", Cidr::new(VPC_CIDR)?, team_tags()])
}

pub fn subnet_fixture(vpc: &Entity) -> TemplateResult<Entity> {
    ec2::subnet(args![
        "Subnet1",
        Cidr::new(SUBNET_CIDR)?,
        AvailabilityZone::new(ZONE),
        vpc
    ])
}

/// Security group "Web" with one inbound and one outbound HTTP rule
pub fn web_group_fixture() -> TemplateResult<Entity> {
    ec2::security_group(args!["Web", "web tier"])?
        .ingress(args!["HTTP", IpProtocol::Tcp, PortRange::HTTP, Cidr::all()])?
        .egress(args!["HTTP", IpProtocol::Tcp, PortRange::HTTP, Cidr::all()])
}

/// Route table "RT1" associated with `subnet`, routing everything to `gateway`
pub fn route_table_fixture(
    vpc: &Entity,
    subnet: &Entity,
    gateway: &Entity,
) -> TemplateResult<Entity> {
    ec2::route_table(args!["RT1", vpc, subnet])?.route(args!["Default", Cidr::all(), gateway])
}
