use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_ec2 as ec2;
use serde_json::json;

use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, Tag, NOT_AVAILABLE};

pub struct Ec2Scanner;

impl Ec2Scanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Ec2Scanner {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn convert_tags(tags: &[ec2::types::Tag]) -> Vec<Tag> {
    tags.iter()
        .filter_map(|t| {
            let k = t.key()?;
            let v = t.value()?;
            Some(Tag::new(k, v))
        })
        .collect()
}

pub(crate) fn name_from_tags(tags: &[ec2::types::Tag]) -> String {
    tags.iter()
        .find(|t| t.key() == Some("Name"))
        .and_then(|t| t.value())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

#[async_trait]
impl Scanner for Ec2Scanner {
    fn name(&self) -> &'static str {
        "ec2"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::Ec2
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = ec2::Client::new(&conf);

        let resp = client
            .describe_instances()
            .send()
            .await
            .map_err(|e| ScanError::api("ec2", e))?;

        let mut out = Vec::new();
        for reservation in resp.reservations() {
            for inst in reservation.instances() {
                let Some(instance_id) = inst.instance_id() else {
                    continue;
                };

                let state = inst
                    .state()
                    .and_then(|s| s.name())
                    .map(|n| n.as_str().to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());

                let mut attributes = HashMap::new();
                attributes.insert(
                    "availability_zone".to_string(),
                    json!(inst
                        .placement()
                        .and_then(|p| p.availability_zone())
                        .unwrap_or(NOT_AVAILABLE)),
                );
                attributes.insert(
                    "instance_type".to_string(),
                    json!(inst
                        .instance_type()
                        .map(|t| t.as_str())
                        .unwrap_or(NOT_AVAILABLE)),
                );
                attributes.insert(
                    "launch_time".to_string(),
                    json!(inst
                        .launch_time()
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string())),
                );

                out.push(ResourceRecord {
                    service_type: ServiceType::Ec2,
                    resource_type: "Instance".to_string(),
                    resource_id: instance_id.to_string(),
                    name: name_from_tags(inst.tags()),
                    state,
                    region: scope.to_string(),
                    attributes,
                    tags: convert_tags(inst.tags()),
                });
            }
        }

        Ok(out)
    }
}
