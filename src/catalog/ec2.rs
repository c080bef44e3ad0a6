// Copyright (c) 2025 - Cowboy AI, Inc.
//! EC2 Networking and Compute Kinds
//!
//! Kind ids are the resource type strings. Attachments that need their own
//! resource are declared as derived siblings:
//!
//! - `VPC.dhcp_options` → `<vpc><options>Association`
//! - `InternetGateway.vpc` → `<gateway><vpc>Attachment`
//! - `RouteTable.subnet` → `<subnet><table>Association`
//! - `NetworkAcl.subnet` → `<subnet><acl>Association`
//!
//! Rules, routes, ACL entries and volume attachments are appended by the
//! builder traits at the bottom of this module.

use serde_json::json;
use tracing::debug;

use crate::domain::{port_from, port_to, AvailabilityZone, Cidr, DomainName, IpAddress, IpProtocol, PortRange};
use crate::errors::TemplateResult;
use crate::model::expansion::participant_name;
use crate::model::{
    prefix_label, prop, typed, Args, DerivedSibling, Entity, KindSchema, NameOrder,
    SchemaRegistry, Value, ValueType,
};

use super::{constructors, expect_kind};

pub const VPC: &str = "AWS::EC2::VPC";
pub const DHCP_OPTIONS: &str = "AWS::EC2::DHCPOptions";
pub const VPC_DHCP_OPTIONS_ASSOCIATION: &str = "AWS::EC2::VPCDHCPOptionsAssociation";
pub const INTERNET_GATEWAY: &str = "AWS::EC2::InternetGateway";
pub const VPC_GATEWAY_ATTACHMENT: &str = "AWS::EC2::VPCGatewayAttachment";
pub const SUBNET: &str = "AWS::EC2::Subnet";
pub const ROUTE_TABLE: &str = "AWS::EC2::RouteTable";
pub const ROUTE: &str = "AWS::EC2::Route";
pub const SUBNET_ROUTE_TABLE_ASSOCIATION: &str = "AWS::EC2::SubnetRouteTableAssociation";
pub const NETWORK_ACL: &str = "AWS::EC2::NetworkAcl";
pub const NETWORK_ACL_ENTRY: &str = "AWS::EC2::NetworkAclEntry";
pub const SUBNET_NETWORK_ACL_ASSOCIATION: &str = "AWS::EC2::SubnetNetworkAclAssociation";
pub const SECURITY_GROUP: &str = "AWS::EC2::SecurityGroup";
pub const SECURITY_GROUP_INGRESS: &str = "AWS::EC2::SecurityGroupIngress";
pub const SECURITY_GROUP_EGRESS: &str = "AWS::EC2::SecurityGroupEgress";
pub const INSTANCE: &str = "AWS::EC2::Instance";
pub const VOLUME: &str = "AWS::EC2::Volume";
pub const VOLUME_ATTACHMENT: &str = "AWS::EC2::VolumeAttachment";
pub const EIP: &str = "AWS::EC2::EIP";
pub const ICMP: &str = "AWS::EC2::NetworkAclEntry.Icmp";

/// Whether an ACL entry admits or drops matching traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AclAction {
    Allow,
    Deny,
}

impl AclAction {
    pub const KIND: &'static str = "AclAction";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

impl From<AclAction> for Value {
    fn from(action: AclAction) -> Self {
        Value::wrapped(AclAction::KIND, action.as_str())
    }
}

/// Hardware tenancy of instances launched into a VPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tenancy {
    Default,
    Dedicated,
}

impl Tenancy {
    pub const KIND: &'static str = "Tenancy";
}

impl From<Tenancy> for Value {
    fn from(tenancy: Tenancy) -> Self {
        let text = match tenancy {
            Tenancy::Default => "default",
            Tenancy::Dedicated => "dedicated",
        };
        Value::wrapped(Tenancy::KIND, text)
    }
}

/// Machine image identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    pub const KIND: &'static str = "ImageId";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<ImageId> for Value {
    fn from(id: ImageId) -> Self {
        Value::wrapped(ImageId::KIND, id.0)
    }
}

pub const DOMAIN_NAME_SERVERS: &str = "DomainNameServers";

/// Name server list for a DHCP option set
pub fn domain_name_servers<I, T>(servers: I) -> Value
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Value::wrapped(DOMAIN_NAME_SERVERS, Value::list(servers))
}

/// The provider's own resolver, the default name server list
pub fn aws_provided_dns() -> Value {
    domain_name_servers(["AmazonProvidedDNS"])
}

fn entity(kind: &'static str) -> ValueType {
    ValueType::Entity(kind)
}

fn tags() -> crate::model::PropertySpec {
    typed("Tags", ValueType::Tags)
}

pub(crate) fn register(registry: &mut SchemaRegistry) -> TemplateResult<()> {
    let cidr = ValueType::Wrapper(Cidr::KIND);
    let zone = ValueType::Wrapper(AvailabilityZone::KIND);
    let protocol = ValueType::Wrapper(IpProtocol::KIND);
    let ports = ValueType::Wrapper(PortRange::KIND);

    let dhcp_association = registry.register(
        KindSchema::resource(VPC_DHCP_OPTIONS_ASSOCIATION, "VPCDHCPOptionsAssociation")
            .properties(vec![
                typed("DhcpOptionsId", entity(DHCP_OPTIONS)),
                typed("VpcId", entity(VPC)),
            ]),
    )?;
    let gateway_attachment = registry.register(
        KindSchema::resource(VPC_GATEWAY_ATTACHMENT, "VPCGatewayAttachment").properties(vec![
            typed("VpcId", entity(VPC)),
            typed("InternetGatewayId", entity(INTERNET_GATEWAY)),
            prop("VpnGatewayId"),
        ]),
    )?;
    let route_table_association = registry.register(
        KindSchema::resource(SUBNET_ROUTE_TABLE_ASSOCIATION, "SubnetRouteTableAssociation")
            .properties(vec![
                typed("RouteTableId", entity(ROUTE_TABLE)),
                typed("SubnetId", entity(SUBNET)),
            ]),
    )?;
    let acl_association = registry.register(
        KindSchema::resource(SUBNET_NETWORK_ACL_ASSOCIATION, "SubnetNetworkAclAssociation")
            .properties(vec![
                typed("SubnetId", entity(SUBNET)),
                typed("NetworkAclId", entity(NETWORK_ACL)),
            ]),
    )?;

    registry.register(
        KindSchema::resource(VPC, "VPC")
            .properties(vec![
                typed("CidrBlock", cidr),
                prop("EnableDnsSupport"),
                prop("EnableDnsHostnames"),
                typed("InstanceTenancy", ValueType::Wrapper(Tenancy::KIND)),
                tags(),
            ])
            .derive(DerivedSibling::new(
                "dhcp_options",
                DHCP_OPTIONS,
                dhcp_association,
                "vpc_id",
                "dhcp_options_id",
            )),
    )?;
    registry.register(KindSchema::resource(DHCP_OPTIONS, "DHCPOptions").properties(vec![
        typed("DomainName", ValueType::Wrapper(DomainName::KIND)),
        typed("DomainNameServers", ValueType::Wrapper(DOMAIN_NAME_SERVERS))
            .default_value(aws_provided_dns()),
        prop("NetbiosNameServers"),
        prop("NetbiosNodeType"),
        prop("NtpServers"),
        tags(),
    ]))?;
    registry.register(
        KindSchema::resource(INTERNET_GATEWAY, "InternetGateway")
            .properties(vec![tags()])
            .derive(
                DerivedSibling::new(
                    "vpc",
                    VPC,
                    gateway_attachment,
                    "internet_gateway_id",
                    "vpc_id",
                )
                .suffix("Attachment"),
            ),
    )?;
    registry.register(KindSchema::resource(SUBNET, "Subnet").properties(vec![
        typed("AvailabilityZone", zone),
        typed("CidrBlock", cidr),
        prop("MapPublicIpOnLaunch"),
        typed("VpcId", entity(VPC)),
        tags(),
    ]))?;
    registry.register(
        KindSchema::resource(ROUTE_TABLE, "RouteTable")
            .properties(vec![typed("VpcId", entity(VPC)), tags()])
            .derive(
                DerivedSibling::new(
                    "subnet",
                    SUBNET,
                    route_table_association,
                    "route_table_id",
                    "subnet_id",
                )
                .order(NameOrder::TargetFirst),
            ),
    )?;
    registry.register(KindSchema::resource(ROUTE, "Route").properties(vec![
        typed("DestinationCidrBlock", cidr),
        typed("GatewayId", entity(INTERNET_GATEWAY)),
        typed("InstanceId", entity(INSTANCE)),
        prop("NetworkInterfaceId"),
        typed("RouteTableId", entity(ROUTE_TABLE)),
        prop("VpcPeeringConnectionId"),
    ]))?;
    registry.register(
        KindSchema::resource(NETWORK_ACL, "NetworkAcl")
            .properties(vec![typed("VpcId", entity(VPC)), tags()])
            .derive(
                DerivedSibling::new(
                    "subnet",
                    SUBNET,
                    acl_association,
                    "network_acl_id",
                    "subnet_id",
                )
                .order(NameOrder::TargetFirst),
            ),
    )?;
    registry.register(KindSchema::property_type(ICMP, "ICMP").properties(vec![
        typed("Code", ValueType::Integer),
        typed("Type", ValueType::Integer),
    ]))?;
    registry.register(KindSchema::resource(NETWORK_ACL_ENTRY, "NetworkAclEntry").properties(vec![
        typed("CidrBlock", cidr),
        typed("Egress", ValueType::Boolean),
        typed("Icmp", entity(ICMP)),
        typed("NetworkAclId", entity(NETWORK_ACL)),
        typed("PortRange", ports),
        typed("Protocol", protocol),
        typed("RuleAction", ValueType::Wrapper(AclAction::KIND)),
        typed("RuleNumber", ValueType::Integer),
    ]))?;
    registry.register(KindSchema::resource(SECURITY_GROUP, "SecurityGroup").properties(vec![
        typed("VpcId", entity(VPC)),
        typed("GroupDescription", ValueType::String),
        prop("SecurityGroupEgress").default_value(Value::List(Vec::new())),
        prop("SecurityGroupIngress").default_value(Value::List(Vec::new())),
        tags(),
    ]))?;
    registry.register(
        KindSchema::resource(SECURITY_GROUP_INGRESS, "SecurityGroupIngress").properties(vec![
            typed("CidrIp", cidr),
            typed("SourceSecurityGroupId", entity(SECURITY_GROUP)),
            prop("SourceSecurityGroupName"),
            prop("SourceSecurityGroupOwnerId"),
            typed("IpProtocol", protocol),
            typed("FromPort", ports).attr("port_range").converter(port_from),
            typed("ToPort", ports).attr("port_range").converter(port_to),
            prop("GroupId"),
            prop("GroupName"),
        ]),
    )?;
    registry.register(
        KindSchema::resource(SECURITY_GROUP_EGRESS, "SecurityGroupEgress").properties(vec![
            typed("CidrIp", cidr),
            typed("DestinationSecurityGroupId", entity(SECURITY_GROUP)),
            typed("IpProtocol", protocol),
            typed("FromPort", ports).attr("port_range").converter(port_from),
            typed("ToPort", ports).attr("port_range").converter(port_to),
            prop("GroupId"),
        ]),
    )?;
    registry.register(KindSchema::resource(INSTANCE, "Instance").properties(vec![
        typed("AvailabilityZone", zone),
        prop("BlockDeviceMappings"),
        prop("DisableApiTermination"),
        prop("EbsOptimized"),
        prop("IamInstanceProfile"),
        typed("ImageId", ValueType::Wrapper(ImageId::KIND)),
        prop("InstanceInitiatedShutdownBehavior"),
        prop("InstanceType"),
        prop("KeyName"),
        prop("Monitoring"),
        prop("NetworkInterfaces"),
        typed("PrivateIpAddress", ValueType::Wrapper(IpAddress::KIND)),
        prop("SecurityGroupIds"),
        prop("SourceDestCheck"),
        typed("SubnetId", entity(SUBNET)),
        tags(),
        prop("UserData"),
        prop("Volumes"),
    ]))?;
    registry.register(KindSchema::resource(VOLUME, "Volume").properties(vec![
        typed("AvailabilityZone", zone),
        prop("Encrypted"),
        prop("Iops"),
        prop("Size"),
        prop("SnapshotId"),
        tags(),
        prop("VolumeType"),
    ]))?;
    registry.register(KindSchema::resource(VOLUME_ATTACHMENT, "VolumeAttachment").properties(vec![
        prop("Device"),
        typed("InstanceId", entity(INSTANCE)),
        typed("VolumeId", entity(VOLUME)),
    ]))?;
    registry.register(KindSchema::resource(EIP, "EIP").properties(vec![
        prop("Domain"),
        typed("InstanceId", entity(INSTANCE)),
    ]))?;
    Ok(())
}

constructors! {
    vpc => VPC,
    dhcp_options => DHCP_OPTIONS,
    vpc_dhcp_options_association => VPC_DHCP_OPTIONS_ASSOCIATION,
    internet_gateway => INTERNET_GATEWAY,
    vpc_gateway_attachment => VPC_GATEWAY_ATTACHMENT,
    subnet => SUBNET,
    route_table => ROUTE_TABLE,
    route => ROUTE,
    subnet_route_table_association => SUBNET_ROUTE_TABLE_ASSOCIATION,
    network_acl => NETWORK_ACL,
    network_acl_entry => NETWORK_ACL_ENTRY,
    subnet_network_acl_association => SUBNET_NETWORK_ACL_ASSOCIATION,
    security_group => SECURITY_GROUP,
    security_group_ingress => SECURITY_GROUP_INGRESS,
    security_group_egress => SECURITY_GROUP_EGRESS,
    instance => INSTANCE,
    volume => VOLUME,
    volume_attachment => VOLUME_ATTACHMENT,
    eip => EIP,
    /// Inline ICMP type/code for ACL entries
    icmp => ICMP,
}

/// VPC with DNS resolution and DNS hostnames enabled
pub fn vpc_with_dns(args: Args) -> TemplateResult<Entity> {
    vpc(args
        .kw("enable_dns_support", true)
        .kw("enable_dns_hostnames", true))
}

/// Ingress and egress rules as separate rule resources
pub trait SecurityGroupRules: Sized {
    /// Append an inbound rule named `<group>Inbound<label>`
    fn ingress(&self, args: Args) -> TemplateResult<Self>;

    /// Append an outbound rule named `<group>Outbound<label>`
    fn egress(&self, args: Args) -> TemplateResult<Self>;
}

impl SecurityGroupRules for Entity {
    fn ingress(&self, args: Args) -> TemplateResult<Self> {
        expect_kind(self, SECURITY_GROUP)?;
        let group = participant_name(self)?;
        let ordinal = self.appended_siblings().len() + 1;
        let rule = security_group_ingress(
            prefix_label(args, group, "Inbound", ordinal).kw("group_id", self),
        )?;
        debug!("Security group {} gained ingress rule {:?}", group, rule.name());
        Ok(self.with_sibling(rule))
    }

    fn egress(&self, args: Args) -> TemplateResult<Self> {
        expect_kind(self, SECURITY_GROUP)?;
        let group = participant_name(self)?;
        let ordinal = self.appended_siblings().len() + 1;
        let rule = security_group_egress(
            prefix_label(args, group, "Outbound", ordinal).kw("group_id", self),
        )?;
        debug!("Security group {} gained egress rule {:?}", group, rule.name());
        Ok(self.with_sibling(rule))
    }
}

pub trait RouteTableRoutes: Sized {
    /// Append a route; unnamed routes become `<table>Route<n>`
    fn route(&self, args: Args) -> TemplateResult<Self>;
}

impl RouteTableRoutes for Entity {
    fn route(&self, args: Args) -> TemplateResult<Self> {
        expect_kind(self, ROUTE_TABLE)?;
        let table = participant_name(self)?;
        let args = match args.positional().first() {
            Some(Value::String(_)) => args,
            _ => {
                let ordinal = self.appended_siblings().len() + 1;
                prefix_label(args, table, "Route", ordinal)
            }
        };
        let route = route(args.kw("route_table_id", self))?;
        debug!("Route table {} gained route {:?}", table, route.name());
        Ok(self.with_sibling(route))
    }
}

pub trait NetworkAclEntries: Sized {
    /// Append an entry as given; unnamed entries become `<acl>Entry<n>`
    fn entry(&self, args: Args) -> TemplateResult<Self>;
    fn allow_ingress(&self, args: Args) -> TemplateResult<Self>;
    fn deny_ingress(&self, args: Args) -> TemplateResult<Self>;
    fn allow_egress(&self, args: Args) -> TemplateResult<Self>;
    fn deny_egress(&self, args: Args) -> TemplateResult<Self>;
}

fn acl_rule(acl: &Entity, args: Args, action: AclAction, egress: bool) -> TemplateResult<Entity> {
    let direction = if egress { "Egress" } else { "Ingress" };
    let role = format!("{}{}", action.label(), direction);
    let owner = participant_name(acl)?;
    let ordinal = acl.appended_siblings().len() + 1;
    let args = prefix_label(args, owner, &role, ordinal)
        .kw("rule_action", action)
        .kw("egress", egress);
    acl.entry(args)
}

impl NetworkAclEntries for Entity {
    fn entry(&self, args: Args) -> TemplateResult<Self> {
        expect_kind(self, NETWORK_ACL)?;
        let acl = participant_name(self)?;
        let args = match args.positional().first() {
            Some(Value::String(_)) => args,
            _ => {
                let ordinal = self.appended_siblings().len() + 1;
                prefix_label(args, acl, "Entry", ordinal)
            }
        };
        let entry = network_acl_entry(args.kw("network_acl_id", self))?;
        debug!("Network ACL {} gained entry {:?}", acl, entry.name());
        Ok(self.with_sibling(entry))
    }

    fn allow_ingress(&self, args: Args) -> TemplateResult<Self> {
        acl_rule(self, args, AclAction::Allow, false)
    }

    fn deny_ingress(&self, args: Args) -> TemplateResult<Self> {
        acl_rule(self, args, AclAction::Deny, false)
    }

    fn allow_egress(&self, args: Args) -> TemplateResult<Self> {
        acl_rule(self, args, AclAction::Allow, true)
    }

    fn deny_egress(&self, args: Args) -> TemplateResult<Self> {
        acl_rule(self, args, AclAction::Deny, true)
    }
}

pub trait InstanceVolumes: Sized {
    /// Attach `volume` at `device` through a `<instance><volume>Attachment`
    fn attach_volume(&self, volume: &Entity, device: &str) -> TemplateResult<Self>;
}

impl InstanceVolumes for Entity {
    fn attach_volume(&self, volume: &Entity, device: &str) -> TemplateResult<Self> {
        expect_kind(self, INSTANCE)?;
        expect_kind(volume, VOLUME)?;
        let name = format!(
            "{}{}Attachment",
            participant_name(self)?,
            participant_name(volume)?
        );
        let attachment = volume_attachment(
            Args::new()
                .arg(name)
                .arg(self)
                .arg(volume)
                .kw("device", device),
        )?;
        Ok(self.with_sibling(attachment))
    }
}

/// Allow-all ICMP, as an inline ACL entry property
pub fn icmp_any() -> TemplateResult<Entity> {
    icmp(Args::new().kw("code", -1).kw("type", -1))
}

/// Opaque `BlockDeviceMappings` entry for an EBS root volume
pub fn ebs_root_device(device: &str, size_gb: u32) -> Value {
    Value::Document(json!([{
        "DeviceName": device,
        "Ebs": {"VolumeSize": size_gb, "DeleteOnTermination": true}
    }]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::errors::TemplateError;
    use crate::model::TagSet;
    use pretty_assertions::assert_eq;

    fn web_group() -> Entity {
        security_group(args!["Web", "web tier"]).unwrap()
    }

    #[test]
    fn test_security_group_defaults() {
        let rendered = serde_json::to_value(web_group()).unwrap();
        assert_eq!(
            rendered,
            json!({
                "Type": "AWS::EC2::SecurityGroup",
                "Properties": {
                    "GroupDescription": "web tier",
                    "SecurityGroupEgress": [],
                    "SecurityGroupIngress": []
                }
            })
        );
    }

    #[test]
    fn test_ingress_rule_shares_port_range() {
        let group = web_group()
            .ingress(args!["HTTP", IpProtocol::Tcp, PortRange::HTTP, Cidr::all()])
            .unwrap();
        let rule = &group.appended_siblings()[0];
        assert_eq!(rule.name(), Some("WebInboundHTTP"));
        assert_eq!(
            serde_json::to_value(rule).unwrap(),
            json!({
                "Type": "AWS::EC2::SecurityGroupIngress",
                "Properties": {
                    "CidrIp": "0.0.0.0/0",
                    "IpProtocol": 6,
                    "FromPort": 80,
                    "ToPort": 80,
                    "GroupId": {"Ref": "Web"}
                }
            })
        );
    }

    #[test]
    fn test_rule_ordinal_fallback() {
        let group = web_group()
            .ingress(args![IpProtocol::Tcp, PortRange::SSH])
            .unwrap()
            .egress(args![IpProtocol::All, Cidr::all()])
            .unwrap();
        let names: Vec<_> = group.appended_siblings().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec![Some("WebInbound1"), Some("WebOutbound2")]);
    }

    #[test]
    fn test_builder_on_wrong_kind() {
        let vpc = vpc(args!["Main"]).unwrap();
        assert_eq!(
            vpc.ingress(args![]).unwrap_err(),
            TemplateError::KindMismatch {
                expected: SECURITY_GROUP.to_string(),
                found: VPC.to_string(),
            }
        );
    }

    #[test]
    fn test_gateway_attachment_is_derived() {
        let main = vpc(args!["Main", Cidr::new("10.0.0.0/16").unwrap()]).unwrap();
        let gateway = internet_gateway(args!["Gateway", &main]).unwrap();
        let siblings = gateway.siblings().unwrap();
        assert_eq!(siblings.len(), 1);
        assert_eq!(siblings[0].name(), Some("GatewayMainAttachment"));
        assert_eq!(
            serde_json::to_value(&siblings[0]).unwrap()["Properties"],
            json!({"VpcId": {"Ref": "Main"}, "InternetGatewayId": {"Ref": "Gateway"}})
        );
    }

    #[test]
    fn test_dhcp_options_association_and_default() {
        let options = dhcp_options(args![
            "Options",
            DomainName::new("internal.example.com").unwrap()
        ])
        .unwrap();
        assert_eq!(
            serde_json::to_value(&options).unwrap()["Properties"]["DomainNameServers"],
            json!(["AmazonProvidedDNS"])
        );

        let main = vpc(args!["Main", &options]).unwrap();
        let siblings = main.siblings().unwrap();
        assert_eq!(siblings[0].name(), Some("MainOptionsAssociation"));
        assert_eq!(siblings[0].kind_id(), VPC_DHCP_OPTIONS_ASSOCIATION);
    }

    #[test]
    fn test_routes() {
        let main = vpc(args!["Main"]).unwrap();
        let gateway = internet_gateway(args!["Gateway"]).unwrap();
        let table = route_table(args!["Public", &main])
            .unwrap()
            .route(args!["DefaultRoute", Cidr::all(), &gateway])
            .unwrap()
            .route(args![Cidr::new("192.168.0.0/16").unwrap()])
            .unwrap();

        let names: Vec<_> = table.appended_siblings().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec![Some("DefaultRoute"), Some("PublicRoute2")]);
        assert_eq!(
            table.appended_siblings()[0].get("route_table_id"),
            Some(&Value::from(&table))
        );
    }

    #[test]
    fn test_acl_entries() {
        let acl = network_acl(args!["Acl"])
            .unwrap()
            .allow_ingress(args!["HTTP", 100, IpProtocol::Tcp, PortRange::HTTP, Cidr::all()])
            .unwrap()
            .deny_egress(args![200, IpProtocol::All, Cidr::all()])
            .unwrap();

        let entries = acl.appended_siblings();
        assert_eq!(entries[0].name(), Some("AclAllowIngressHTTP"));
        assert_eq!(entries[1].name(), Some("AclDenyEgress2"));
        let rendered = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(
            rendered["Properties"],
            json!({
                "CidrBlock": "0.0.0.0/0",
                "Egress": false,
                "NetworkAclId": {"Ref": "Acl"},
                "PortRange": {"From": 80, "To": 80},
                "Protocol": 6,
                "RuleAction": "allow",
                "RuleNumber": 100
            })
        );
    }

    #[test]
    fn test_inline_icmp_property() {
        let acl = network_acl(args!["Acl"]).unwrap();
        let entry = acl
            .entry(args!["Ping", icmp_any().unwrap(), IpProtocol::Icmp, AclAction::Allow])
            .unwrap();
        let rendered = serde_json::to_value(&entry.appended_siblings()[0]).unwrap();
        assert_eq!(rendered["Properties"]["Icmp"], json!({"Code": -1, "Type": -1}));
    }

    #[test]
    fn test_attach_volume() {
        let host = instance(args!["Host", ImageId::new("ami-12345678")]).unwrap();
        let data = volume(args!["Data"; size = 100]).unwrap();
        let host = host.attach_volume(&data, "/dev/sdf").unwrap();
        let attachment = &host.appended_siblings()[0];
        assert_eq!(attachment.name(), Some("HostDataAttachment"));
        assert_eq!(
            serde_json::to_value(attachment).unwrap()["Properties"],
            json!({
                "Device": "/dev/sdf",
                "InstanceId": {"Ref": "Host"},
                "VolumeId": {"Ref": "Data"}
            })
        );
    }

    #[test]
    fn test_vpc_with_dns() {
        let main = vpc_with_dns(args!["Main", TagSet::from_pairs([("Name", "main")])]).unwrap();
        let rendered = serde_json::to_value(&main).unwrap();
        assert_eq!(
            rendered["Properties"],
            json!({
                "EnableDnsSupport": true,
                "EnableDnsHostnames": true,
                "Tags": [{"Key": "Name", "Value": "main"}]
            })
        );
    }
}
