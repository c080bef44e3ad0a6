// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stack Template Generator
//!
//! Builds a VPC with a public subnet, an internet gateway and a web
//! security group for one deployment, and prints the template as JSON.
//!
//! Run with: cargo run --bin stack-template -- <dev|stage|prod>
//!
//! Output formatting follows CFN_TEMPLATE_INDENT and CFN_TEMPLATE_COMPACT.

use anyhow::{bail, Context, Result};
use cim_cloudformation::{
    args,
    catalog::{
        ec2::{self, RouteTableRoutes, SecurityGroupRules},
        outputs, parameters, pseudo,
    },
    domain::{AvailabilityZone, Cidr, IpProtocol, PortRange},
    model::functions::{fn_equals, join},
    Condition, DeletionPolicy, RenderConfig, TagSet, Template, Value,
};
use tracing::info;

/// Address plan for one deployment
#[derive(Debug, Clone)]
struct Deployment {
    name: &'static str,
    vpc_cidr: &'static str,
    subnet_cidr: &'static str,
    zone: &'static str,
}

impl Deployment {
    fn from_arg(arg: &str) -> Result<Self> {
        let deployment = match arg {
            "dev" => Self {
                name: "dev",
                vpc_cidr: "10.10.0.0/16",
                subnet_cidr: "10.10.1.0/24",
                zone: "us-west-2a",
            },
            "stage" => Self {
                name: "stage",
                vpc_cidr: "10.20.0.0/16",
                subnet_cidr: "10.20.1.0/24",
                zone: "us-west-2b",
            },
            "prod" => Self {
                name: "prod",
                vpc_cidr: "10.30.0.0/16",
                subnet_cidr: "10.30.1.0/24",
                zone: "us-west-2c",
            },
            other => bail!("unknown deployment '{}', expected dev, stage or prod", other),
        };
        Ok(deployment)
    }

    fn tags(&self) -> TagSet {
        TagSet::from_pairs([("Deployment", self.name), ("ManagedBy", "stack-template")])
    }
}

fn build(deployment: &Deployment) -> Result<Template> {
    let base_tags = deployment.tags();
    let mut template =
        Template::new().with_description(format!("{} network stack", deployment.name));

    let environment = parameters::string_parameter(args![
        "Environment",
        "Deployment the stack belongs to";
        default = deployment.name
    ])?;
    let is_prod = Condition::new("IsProd", fn_equals(&environment, "prod"));

    let vpc = ec2::vpc_with_dns(args![
        "Vpc",
        Cidr::new(deployment.vpc_cidr)?,
        base_tags.clone()
            + TagSet::from_pairs([(
                "Name",
                join("-", [Value::from(pseudo::stack_name()), Value::from("vpc")])
            )])
    ])?;
    let gateway = ec2::internet_gateway(args!["Gateway", &vpc, base_tags.clone()])?;
    let subnet = ec2::subnet(args![
        "Public",
        Cidr::new(deployment.subnet_cidr)?,
        AvailabilityZone::new(deployment.zone),
        &vpc,
        base_tags.clone().tag("Name", "public")
    ])?;
    let routes = ec2::route_table(args!["PublicRoutes", &vpc, &subnet, base_tags.clone()])?
        .route(args!["DefaultRoute", Cidr::all(), &gateway])?;

    let web = ec2::security_group(args!["Web", "web tier", &vpc, base_tags.clone()])?;
    let web = web
        .ingress(args!["HTTP", IpProtocol::Tcp, PortRange::HTTP, Cidr::all()])?
        .ingress(args!["HTTPS", IpProtocol::Tcp, PortRange::HTTPS, Cidr::all()])?
        .egress(args!["HTTPS", IpProtocol::Tcp, PortRange::HTTPS, Cidr::all()])?;
    let subnet = subnet.with_deletion_policy(DeletionPolicy::Retain)?;

    template.add(environment)?;
    template.add(&is_prod)?;
    template.add_all([&vpc, &gateway, &subnet, &routes, &web])?;
    template.add(outputs::output(args!["VpcId", &vpc, "Network for this deployment"])?)?;
    template.add(outputs::output(args!["PublicSubnetId", &subnet, &is_prod])?)?;

    info!(
        "Built {} template with {} resources",
        deployment.name,
        template.resources().len()
    );
    Ok(template)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let arg = std::env::args().nth(1).unwrap_or_else(|| "dev".to_string());
    let deployment = Deployment::from_arg(&arg)?;
    info!("Generating template for deployment: {}", deployment.name);

    let template = build(&deployment).context("Failed to build template")?;
    let json = template
        .to_json_with(&RenderConfig::from_env())
        .context("Failed to render template")?;

    println!("{}", json);
    Ok(())
}
