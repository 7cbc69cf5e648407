//! Static type registry mapping node type tags to rendering constructs.
//!
//! The registry is a closed enumeration of recognized tags, each carrying
//! the import module, class name, and category of the construct emitted for
//! it in generated code. Lookups are pure: no I/O, no mutation, and the
//! same tag always maps to the same descriptor within a process. Unknown
//! tags are surfaced as [`Lookup::Unknown`] so the caller decides policy;
//! the renderer substitutes [`fallback`] and reports a warning.
//!
//! Adding a tag means adding a [`NodeKind`] variant and one row in
//! [`NodeKind::construct`]; no control flow elsewhere changes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Recognized node type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Compute
    Ec2,
    Lambda,
    Ecs,
    Eks,
    // Network
    Vpc,
    Alb,
    Nlb,
    Waf,
    Route53,
    Cloudfront,
    ApiGateway,
    // Storage
    S3,
    Efs,
    Ebs,
    // Database
    Rds,
    Aurora,
    Dynamodb,
    Elasticache,
    // Integration
    Sqs,
    Sns,
    Kinesis,
    // On-prem
    Nginx,
    Postgresql,
    Ollama,
    Lancedb,
    // Generic
    GenericCompute,
    GenericDatabase,
    GenericStorage,
    Custom,
}

/// Rendering construct descriptor for a node kind.
///
/// `module` and `class` identify the import used in generated code;
/// `category` is a coarse grouping label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Construct {
    pub module: &'static str,
    pub class: &'static str,
    pub category: &'static str,
}

/// Result of a registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The tag maps to a recognized kind.
    Known(NodeKind),
    /// The tag is not in the registry; the caller decides policy.
    Unknown,
}

impl NodeKind {
    /// Returns the tag string this kind is declared with.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Ec2 => "ec2",
            NodeKind::Lambda => "lambda",
            NodeKind::Ecs => "ecs",
            NodeKind::Eks => "eks",
            NodeKind::Vpc => "vpc",
            NodeKind::Alb => "alb",
            NodeKind::Nlb => "nlb",
            NodeKind::Waf => "waf",
            NodeKind::Route53 => "route53",
            NodeKind::Cloudfront => "cloudfront",
            NodeKind::ApiGateway => "api_gateway",
            NodeKind::S3 => "s3",
            NodeKind::Efs => "efs",
            NodeKind::Ebs => "ebs",
            NodeKind::Rds => "rds",
            NodeKind::Aurora => "aurora",
            NodeKind::Dynamodb => "dynamodb",
            NodeKind::Elasticache => "elasticache",
            NodeKind::Sqs => "sqs",
            NodeKind::Sns => "sns",
            NodeKind::Kinesis => "kinesis",
            NodeKind::Nginx => "nginx",
            NodeKind::Postgresql => "postgresql",
            NodeKind::Ollama => "ollama",
            NodeKind::Lancedb => "lancedb",
            NodeKind::GenericCompute => "generic_compute",
            NodeKind::GenericDatabase => "generic_database",
            NodeKind::GenericStorage => "generic_storage",
            NodeKind::Custom => "custom",
        }
    }

    /// Returns the rendering construct for this kind.
    ///
    /// The mapping is total over [`NodeKind`]; this cannot fail.
    pub fn construct(&self) -> Construct {
        match self {
            NodeKind::Ec2 => construct("diagrams.aws.compute", "EC2", "compute"),
            NodeKind::Lambda => construct("diagrams.aws.compute", "Lambda", "compute"),
            NodeKind::Ecs => construct("diagrams.aws.compute", "ECS", "compute"),
            NodeKind::Eks => construct("diagrams.aws.compute", "EKS", "compute"),
            NodeKind::Vpc => construct("diagrams.aws.network", "VPC", "network"),
            NodeKind::Alb => construct("diagrams.aws.network", "ALB", "network"),
            NodeKind::Nlb => construct("diagrams.aws.network", "NLB", "network"),
            NodeKind::Waf => construct("diagrams.aws.security", "WAF", "security"),
            NodeKind::Route53 => construct("diagrams.aws.network", "Route53", "network"),
            NodeKind::Cloudfront => construct("diagrams.aws.network", "CloudFront", "network"),
            NodeKind::ApiGateway => construct("diagrams.aws.network", "APIGateway", "network"),
            NodeKind::S3 => construct("diagrams.aws.storage", "S3", "storage"),
            NodeKind::Efs => construct("diagrams.aws.storage", "EFS", "storage"),
            NodeKind::Ebs => construct("diagrams.aws.storage", "EBS", "storage"),
            NodeKind::Rds => construct("diagrams.aws.database", "RDS", "database"),
            NodeKind::Aurora => construct("diagrams.aws.database", "Aurora", "database"),
            NodeKind::Dynamodb => construct("diagrams.aws.database", "Dynamodb", "database"),
            NodeKind::Elasticache => {
                construct("diagrams.aws.database", "ElastiCache", "database")
            }
            NodeKind::Sqs => construct("diagrams.aws.integration", "SQS", "integration"),
            NodeKind::Sns => construct("diagrams.aws.integration", "SNS", "integration"),
            NodeKind::Kinesis => construct("diagrams.aws.analytics", "Kinesis", "integration"),
            NodeKind::Nginx => construct("diagrams.onprem.network", "Nginx", "network"),
            NodeKind::Postgresql => {
                construct("diagrams.onprem.database", "PostgreSQL", "database")
            }
            NodeKind::Ollama => construct("diagrams.onprem.compute", "Server", "compute"),
            NodeKind::Lancedb => construct("diagrams.onprem.compute", "Server", "database"),
            NodeKind::GenericCompute => {
                construct("diagrams.onprem.compute", "Server", "generic")
            }
            NodeKind::GenericDatabase => {
                construct("diagrams.onprem.database", "PostgreSQL", "generic")
            }
            NodeKind::GenericStorage => construct("diagrams.aws.storage", "S3", "generic"),
            NodeKind::Custom => construct("diagrams.onprem.compute", "Server", "generic"),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

const fn construct(
    module: &'static str,
    class: &'static str,
    category: &'static str,
) -> Construct {
    Construct {
        module,
        class,
        category,
    }
}

/// All recognized kinds, in declaration order.
pub const ALL_KINDS: &[NodeKind] = &[
    NodeKind::Ec2,
    NodeKind::Lambda,
    NodeKind::Ecs,
    NodeKind::Eks,
    NodeKind::Vpc,
    NodeKind::Alb,
    NodeKind::Nlb,
    NodeKind::Waf,
    NodeKind::Route53,
    NodeKind::Cloudfront,
    NodeKind::ApiGateway,
    NodeKind::S3,
    NodeKind::Efs,
    NodeKind::Ebs,
    NodeKind::Rds,
    NodeKind::Aurora,
    NodeKind::Dynamodb,
    NodeKind::Elasticache,
    NodeKind::Sqs,
    NodeKind::Sns,
    NodeKind::Kinesis,
    NodeKind::Nginx,
    NodeKind::Postgresql,
    NodeKind::Ollama,
    NodeKind::Lancedb,
    NodeKind::GenericCompute,
    NodeKind::GenericDatabase,
    NodeKind::GenericStorage,
    NodeKind::Custom,
];

/// Looks up a type tag, case-insensitively and ignoring surrounding whitespace.
pub fn lookup(tag: &str) -> Lookup {
    let normalized = tag.trim().to_ascii_lowercase();
    ALL_KINDS
        .iter()
        .find(|kind| kind.tag() == normalized)
        .map_or(Lookup::Unknown, |kind| Lookup::Known(*kind))
}

/// The generic construct substituted for unknown tags.
pub fn fallback() -> Construct {
    NodeKind::GenericCompute.construct()
}
