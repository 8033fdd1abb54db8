use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_cloudformation as cfn;
use serde_json::json;

use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, Tag, NOT_AVAILABLE};

pub struct CloudFormationScanner;

impl CloudFormationScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CloudFormationScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for CloudFormationScanner {
    fn name(&self) -> &'static str {
        "cloudformation"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::CloudFormation
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = cfn::Client::new(&conf);

        let resp = client
            .describe_stacks()
            .send()
            .await
            .map_err(|e| ScanError::api("cloudformation", e))?;

        let mut out = Vec::new();
        for stack in resp.stacks() {
            let Some(name) = stack.stack_name() else {
                continue;
            };

            let mut attributes = HashMap::new();
            attributes.insert(
                "creation_time".to_string(),
                json!(stack
                    .creation_time()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())),
            );
            attributes.insert(
                "template_description".to_string(),
                json!(stack.description().unwrap_or(NOT_AVAILABLE)),
            );

            let tags = stack
                .tags()
                .iter()
                .filter_map(|t| {
                    let k = t.key()?;
                    let v = t.value()?;
                    Some(Tag::new(k, v))
                })
                .collect();

            out.push(ResourceRecord {
                service_type: ServiceType::CloudFormation,
                resource_type: "Stack".to_string(),
                resource_id: name.to_string(),
                name: name.to_string(),
                state: stack
                    .stack_status()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                region: scope.to_string(),
                attributes,
                tags,
            });
        }

        Ok(out)
    }
}
