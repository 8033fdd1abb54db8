use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_ecs as ecs;
use serde_json::json;

use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, Tag, NOT_AVAILABLE};

pub struct EcsScanner;

impl EcsScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EcsScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for EcsScanner {
    fn name(&self) -> &'static str {
        "ecs"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::Ecs
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = ecs::Client::new(&conf);

        let listed = client
            .list_clusters()
            .send()
            .await
            .map_err(|e| ScanError::api("ecs", e))?;

        let arns = listed.cluster_arns();
        if arns.is_empty() {
            return Ok(Vec::new());
        }

        let described = client
            .describe_clusters()
            .set_clusters(Some(arns.to_vec()))
            .send()
            .await
            .map_err(|e| ScanError::api("ecs", e))?;

        let mut out = Vec::new();
        for cluster in described.clusters() {
            let Some(name) = cluster.cluster_name() else {
                continue;
            };

            let mut attributes = HashMap::new();
            attributes.insert(
                "running_tasks".to_string(),
                json!(cluster.running_tasks_count()),
            );
            attributes.insert(
                "pending_tasks".to_string(),
                json!(cluster.pending_tasks_count()),
            );
            attributes.insert(
                "active_services".to_string(),
                json!(cluster.active_services_count()),
            );

            let tags = cluster
                .tags()
                .iter()
                .filter_map(|t| {
                    let k = t.key()?;
                    let v = t.value()?;
                    Some(Tag::new(k, v))
                })
                .collect();

            out.push(ResourceRecord {
                service_type: ServiceType::Ecs,
                resource_type: "Cluster".to_string(),
                resource_id: name.to_string(),
                name: name.to_string(),
                state: cluster.status().unwrap_or(NOT_AVAILABLE).to_string(),
                region: scope.to_string(),
                attributes,
                tags,
            });
        }

        Ok(out)
    }
}
