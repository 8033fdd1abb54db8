use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for detail a scanner could not resolve. A record field is
/// never omitted; it carries this sentinel instead.
pub const NOT_AVAILABLE: &str = "N/A";

/// Region sentinel for resources whose home region could not be resolved
/// (e.g. a bucket whose location lookup was denied).
pub const REGION_UNKNOWN: &str = "unknown";

/// Service families this crate knows how to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "EC2")]
    Ec2,
    #[serde(rename = "RDS")]
    Rds,
    Lambda,
    #[serde(rename = "VPC")]
    Vpc,
    #[serde(rename = "ELB")]
    Elb,
    CloudFormation,
    #[serde(rename = "ECS")]
    Ecs,
    #[serde(rename = "SNS")]
    Sns,
    #[serde(rename = "SQS")]
    Sqs,
    #[serde(rename = "DynamoDB")]
    DynamoDb,
    S3,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Ec2 => "EC2",
            ServiceType::Rds => "RDS",
            ServiceType::Lambda => "Lambda",
            ServiceType::Vpc => "VPC",
            ServiceType::Elb => "ELB",
            ServiceType::CloudFormation => "CloudFormation",
            ServiceType::Ecs => "ECS",
            ServiceType::Sns => "SNS",
            ServiceType::Sqs => "SQS",
            ServiceType::DynamoDb => "DynamoDB",
            ServiceType::S3 => "S3",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One inventoried resource. Immutable once a scanner emits it; the
/// orchestrator and aggregator only read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    pub service_type: ServiceType,
    pub resource_type: String,
    pub resource_id: String,
    pub name: String,
    pub state: String,
    /// Region the resource belongs to: a region code, [`REGION_UNKNOWN`],
    /// or the global scope identifier.
    pub region: String,
    /// Open, service-specific extras (capacity, engine, CIDR, counts, ...).
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl ResourceRecord {
    /// Stable ordering for deterministic response bodies.
    pub fn sort_key(&self) -> (ServiceType, &str) {
        (self.service_type, self.resource_id.as_str())
    }
}
