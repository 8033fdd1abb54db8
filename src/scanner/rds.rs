use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_rds as rds;
use serde_json::json;

use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, NOT_AVAILABLE};

pub struct RdsScanner;

impl RdsScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RdsScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for RdsScanner {
    fn name(&self) -> &'static str {
        "rds"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::Rds
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = rds::Client::new(&conf);

        let resp = client
            .describe_db_instances()
            .send()
            .await
            .map_err(|e| ScanError::api("rds", e))?;

        let mut out = Vec::new();
        for db in resp.db_instances() {
            let Some(identifier) = db.db_instance_identifier() else {
                continue;
            };

            let mut attributes = HashMap::new();
            attributes.insert(
                "availability_zone".to_string(),
                json!(db.availability_zone().unwrap_or(NOT_AVAILABLE)),
            );
            attributes.insert(
                "instance_type".to_string(),
                json!(db.db_instance_class().unwrap_or(NOT_AVAILABLE)),
            );
            attributes.insert(
                "engine".to_string(),
                json!(db.engine().unwrap_or(NOT_AVAILABLE)),
            );
            attributes.insert(
                "created_time".to_string(),
                json!(db
                    .instance_create_time()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())),
            );

            out.push(ResourceRecord {
                service_type: ServiceType::Rds,
                resource_type: "DB Instance".to_string(),
                resource_id: identifier.to_string(),
                name: identifier.to_string(),
                state: db
                    .db_instance_status()
                    .unwrap_or(NOT_AVAILABLE)
                    .to_string(),
                region: scope.to_string(),
                attributes,
                tags: Vec::new(),
            });
        }

        Ok(out)
    }
}
