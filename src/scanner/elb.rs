use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_elasticloadbalancingv2 as elbv2;
use serde_json::json;

use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, NOT_AVAILABLE};

pub struct ElbScanner;

impl ElbScanner {
    pub fn new() -> Self {
        Self
    }

    fn resource_type(kind: Option<&elbv2::types::LoadBalancerTypeEnum>) -> &'static str {
        match kind.map(|t| t.as_str()) {
            Some("application") => "Application Load Balancer",
            Some("network") => "Network Load Balancer",
            Some("gateway") => "Gateway Load Balancer",
            _ => "Load Balancer",
        }
    }
}

impl Default for ElbScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for ElbScanner {
    fn name(&self) -> &'static str {
        "elb"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::Elb
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = elbv2::Client::new(&conf);

        let resp = client
            .describe_load_balancers()
            .send()
            .await
            .map_err(|e| ScanError::api("elb", e))?;

        let mut out = Vec::new();
        for lb in resp.load_balancers() {
            let Some(name) = lb.load_balancer_name() else {
                continue;
            };

            let zones = lb
                .availability_zones()
                .iter()
                .filter_map(|az| az.zone_name())
                .collect::<Vec<_>>()
                .join(", ");

            let mut attributes = HashMap::new();
            attributes.insert("availability_zones".to_string(), json!(zones));
            attributes.insert(
                "scheme".to_string(),
                json!(lb.scheme().map(|s| s.as_str()).unwrap_or(NOT_AVAILABLE)),
            );
            attributes.insert(
                "vpc_id".to_string(),
                json!(lb.vpc_id().unwrap_or(NOT_AVAILABLE)),
            );
            attributes.insert(
                "created_time".to_string(),
                json!(lb
                    .created_time()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())),
            );

            out.push(ResourceRecord {
                service_type: ServiceType::Elb,
                resource_type: Self::resource_type(lb.r#type()).to_string(),
                resource_id: name.to_string(),
                name: name.to_string(),
                state: lb
                    .state()
                    .and_then(|s| s.code())
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                region: scope.to_string(),
                attributes,
                tags: Vec::new(),
            });
        }

        Ok(out)
    }
}
