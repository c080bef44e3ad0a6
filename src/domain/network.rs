// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants
//!
//! Each value object converts into a typed wrapped [`Value`] so the
//! positional dispatcher can tell a CIDR block from an IP address or a
//! port range even though all of them render as plain JSON scalars.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

use crate::model::Value;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32 for IPv4, 0-128 for IPv6)")]
    InvalidPrefixLength(u8),

    #[error("Invalid port range: {0}")]
    InvalidPortRange(String),
}

fn max_prefix(address: &IpAddr) -> u8 {
    match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

/// CIDR block value object
///
/// Invariants:
/// - Valid IP address format
/// - Prefix length present and within range for the address family
///
/// # Examples
///
/// ```rust
/// use cim_cloudformation::domain::Cidr;
///
/// let block = Cidr::new("10.20.0.0/16").unwrap();
/// assert_eq!(block.prefix_length(), 16);
/// assert!(Cidr::new("10.20.0.0").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cidr {
    address: IpAddr,
    prefix_length: u8,
}

impl Cidr {
    /// Wrapper kind used for dispatch
    pub const KIND: &'static str = "CIDR";

    /// Parse a CIDR block such as `"10.0.0.0/16"`
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, NetworkError> {
        let cidr = cidr.as_ref();
        let (addr_str, prefix_str) = cidr
            .split_once('/')
            .ok_or_else(|| NetworkError::InvalidCidr(cidr.to_string()))?;

        let address = IpAddr::from_str(addr_str)
            .map_err(|_| NetworkError::InvalidIpAddress(addr_str.to_string()))?;

        let prefix_length = prefix_str
            .parse::<u8>()
            .map_err(|_| NetworkError::InvalidCidr(cidr.to_string()))?;

        if prefix_length > max_prefix(&address) {
            return Err(NetworkError::InvalidPrefixLength(prefix_length));
        }

        Ok(Self {
            address,
            prefix_length,
        })
    }

    /// The block covering every IPv4 address (`0.0.0.0/0`)
    pub fn all() -> Self {
        Self {
            address: IpAddr::from([0, 0, 0, 0]),
            prefix_length: 0,
        }
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_length)
    }
}

impl FromStr for Cidr {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Cidr> for Value {
    fn from(cidr: Cidr) -> Self {
        Value::wrapped(Cidr::KIND, cidr.to_string())
    }
}

/// Single IP address value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IpAddress(IpAddr);

impl IpAddress {
    /// Wrapper kind used for dispatch
    pub const KIND: &'static str = "IpAddress";

    pub fn new(address: impl AsRef<str>) -> Result<Self, NetworkError> {
        let address = address.as_ref();
        IpAddr::from_str(address)
            .map(Self)
            .map_err(|_| NetworkError::InvalidIpAddress(address.to_string()))
    }

    pub fn localhost() -> Self {
        Self(IpAddr::from([127, 0, 0, 1]))
    }

    pub fn address(&self) -> IpAddr {
        self.0
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<IpAddress> for Value {
    fn from(address: IpAddress) -> Self {
        Value::wrapped(IpAddress::KIND, address.to_string())
    }
}

/// IP protocol, rendered as its protocol number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpProtocol {
    Icmp,
    Tcp,
    Udp,
    /// Every protocol (`-1`)
    All,
    Number(u8),
}

impl IpProtocol {
    /// Wrapper kind used for dispatch
    pub const KIND: &'static str = "IpProtocol";

    pub fn number(&self) -> i64 {
        match self {
            Self::Icmp => 1,
            Self::Tcp => 6,
            Self::Udp => 17,
            Self::All => -1,
            Self::Number(n) => i64::from(*n),
        }
    }
}

impl From<IpProtocol> for Value {
    fn from(protocol: IpProtocol) -> Self {
        Value::wrapped(IpProtocol::KIND, protocol.number())
    }
}

/// Inclusive port range
///
/// # Examples
///
/// ```rust
/// use cim_cloudformation::domain::PortRange;
///
/// let range = PortRange::parse("1024-65535").unwrap();
/// assert_eq!((range.from_port(), range.to_port()), (1024, 65535));
/// assert_eq!(PortRange::parse("443").unwrap(), PortRange::HTTPS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRange {
    from: u16,
    to: u16,
}

impl PortRange {
    /// Wrapper kind used for dispatch
    pub const KIND: &'static str = "PortRange";

    pub const ALL: Self = Self::range_unchecked(0, 65535);
    pub const EPHEMERAL: Self = Self::range_unchecked(1024, 65535);
    pub const EPHEMERAL_ELB: Self = Self::range_unchecked(1024, 65535);
    pub const EPHEMERAL_LINUX: Self = Self::range_unchecked(32768, 61000);

    pub const SSH: Self = Self::single(22);
    pub const SMTP: Self = Self::single(25);
    pub const DNS: Self = Self::single(53);
    pub const HTTP: Self = Self::single(80);
    pub const POP3: Self = Self::single(110);
    pub const NTP: Self = Self::single(123);
    pub const IMAP: Self = Self::single(143);
    pub const LDAP: Self = Self::single(389);
    pub const HTTPS: Self = Self::single(443);
    pub const SMTPS: Self = Self::single(465);
    pub const IMAPS: Self = Self::single(993);
    pub const POP3S: Self = Self::single(995);
    pub const MSSQL: Self = Self::single(1433);
    pub const MYSQL: Self = Self::single(3306);
    pub const RDP: Self = Self::single(3389);
    pub const POSTGRESQL: Self = Self::single(5432);

    const fn range_unchecked(from: u16, to: u16) -> Self {
        Self { from, to }
    }

    /// A range holding exactly one port
    pub const fn single(port: u16) -> Self {
        Self { from: port, to: port }
    }

    /// A range `from..=to`
    pub fn range(from: u16, to: u16) -> Result<Self, NetworkError> {
        if from > to {
            return Err(NetworkError::InvalidPortRange(format!("{}-{}", from, to)));
        }
        Ok(Self { from, to })
    }

    /// Parse `"80"` or `"1024-65535"`
    pub fn parse(ports: impl AsRef<str>) -> Result<Self, NetworkError> {
        let ports = ports.as_ref().trim();
        let invalid = || NetworkError::InvalidPortRange(ports.to_string());

        match ports.split_once('-') {
            Some((from, to)) => {
                let from = from.parse::<u16>().map_err(|_| invalid())?;
                let to = to.trim_start_matches('-').parse::<u16>().map_err(|_| invalid())?;
                Self::range(from, to)
            }
            None => ports.parse::<u16>().map(Self::single).map_err(|_| invalid()),
        }
    }

    pub fn from_port(&self) -> u16 {
        self.from
    }

    pub fn to_port(&self) -> u16 {
        self.to
    }
}

impl From<PortRange> for Value {
    fn from(range: PortRange) -> Self {
        let mut bounds = IndexMap::new();
        bounds.insert("From".to_string(), Value::Int(i64::from(range.from)));
        bounds.insert("To".to_string(), Value::Int(i64::from(range.to)));
        Value::wrapped(PortRange::KIND, Value::Map(bounds))
    }
}

fn port_bound(value: &Value, bound: &str) -> Value {
    match value {
        Value::Wrapped(wrapped) if wrapped.kind == PortRange::KIND => match &*wrapped.inner {
            Value::Map(bounds) => bounds.get(bound).cloned().unwrap_or(Value::Null),
            other => other.clone(),
        },
        other => other.clone(),
    }
}

/// Converter extracting the lower bound of a port range property
pub fn port_from(value: &Value) -> Value {
    port_bound(value, "From")
}

/// Converter extracting the upper bound of a port range property
pub fn port_to(value: &Value) -> Value {
    port_bound(value, "To")
}

/// Availability zone name such as `us-west-2a`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityZone(String);

impl AvailabilityZone {
    /// Wrapper kind used for dispatch
    pub const KIND: &'static str = "AvailabilityZone";

    pub fn new(zone: impl Into<String>) -> Self {
        Self(zone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<AvailabilityZone> for Value {
    fn from(zone: AvailabilityZone) -> Self {
        Value::wrapped(AvailabilityZone::KIND, zone.0)
    }
}
