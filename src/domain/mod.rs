// Copyright (c) 2025 - Cowboy AI, Inc.
//! Infrastructure Value Objects
//!
//! Typed scalar values used as resource properties. Each validates its
//! invariants on construction and converts into a wrapped
//! [`Value`](crate::model::Value) tagged with its `KIND`, which is what the
//! positional dispatcher matches on.
//!
//! - [`Cidr`] - CIDR block (`10.0.0.0/16`)
//! - [`IpAddress`] - single IPv4/IPv6 address
//! - [`IpProtocol`] - protocol number (tcp, udp, icmp, all)
//! - [`PortRange`] - inclusive port range feeding `FromPort`/`ToPort`
//! - [`AvailabilityZone`] - zone name
//! - [`DomainName`] - RFC 1123 domain name

pub mod domain_name;
pub mod network;

pub use domain_name::{DomainName, DomainNameError};
pub use network::{
    port_from, port_to, AvailabilityZone, Cidr, IpAddress, IpProtocol, NetworkError, PortRange,
};
