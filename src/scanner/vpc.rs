use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_ec2 as ec2;
use serde_json::json;

use super::ec2::{convert_tags, name_from_tags};
use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, NOT_AVAILABLE};

pub struct VpcScanner;

impl VpcScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VpcScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for VpcScanner {
    fn name(&self) -> &'static str {
        "vpc"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::Vpc
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = ec2::Client::new(&conf);

        let resp = client
            .describe_vpcs()
            .send()
            .await
            .map_err(|e| ScanError::api("vpc", e))?;

        let mut out = Vec::new();
        for vpc in resp.vpcs() {
            let Some(vpc_id) = vpc.vpc_id() else {
                continue;
            };

            let mut attributes = HashMap::new();
            attributes.insert(
                "cidr_block".to_string(),
                json!(vpc.cidr_block().unwrap_or(NOT_AVAILABLE)),
            );
            attributes.insert(
                "is_default".to_string(),
                json!(vpc.is_default().unwrap_or(false)),
            );

            out.push(ResourceRecord {
                service_type: ServiceType::Vpc,
                resource_type: "VPC".to_string(),
                resource_id: vpc_id.to_string(),
                name: name_from_tags(vpc.tags()),
                state: vpc
                    .state()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                region: scope.to_string(),
                attributes,
                tags: convert_tags(vpc.tags()),
            });
        }

        Ok(out)
    }
}
