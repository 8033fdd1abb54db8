use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb as dynamodb;
use serde_json::json;

use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, NOT_AVAILABLE};

pub struct DynamoDbScanner;

impl DynamoDbScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DynamoDbScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for DynamoDbScanner {
    fn name(&self) -> &'static str {
        "dynamodb"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::DynamoDb
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = dynamodb::Client::new(&conf);

        let resp = client
            .list_tables()
            .send()
            .await
            .map_err(|e| ScanError::api("dynamodb", e))?;

        let mut out = Vec::new();
        for table_name in resp.table_names() {
            let mut state = NOT_AVAILABLE.to_string();
            let mut attributes = HashMap::new();

            match client.describe_table().table_name(table_name).send().await {
                Ok(described) => {
                    if let Some(table) = described.table() {
                        if let Some(status) = table.table_status() {
                            state = status.as_str().to_string();
                        }
                        if let Some(count) = table.item_count() {
                            attributes.insert("item_count".to_string(), json!(count));
                        }
                        if let Some(size) = table.table_size_bytes() {
                            attributes.insert("table_size_bytes".to_string(), json!(size));
                        }
                        attributes.insert(
                            "billing_mode".to_string(),
                            json!(table
                                .billing_mode_summary()
                                .and_then(|b| b.billing_mode())
                                .map(|m| m.as_str())
                                .unwrap_or(NOT_AVAILABLE)),
                        );
                        attributes.insert(
                            "created_time".to_string(),
                            json!(table
                                .creation_date_time()
                                .map(|t| t.to_string())
                                .unwrap_or_else(|| NOT_AVAILABLE.to_string())),
                        );
                    }
                }
                Err(err) => {
                    tracing::warn!(table = %table_name, error = %err, "dynamodb table details unavailable");
                }
            }

            out.push(ResourceRecord {
                service_type: ServiceType::DynamoDb,
                resource_type: "Table".to_string(),
                resource_id: table_name.clone(),
                name: table_name.clone(),
                state,
                region: scope.to_string(),
                attributes,
                tags: Vec::new(),
            });
        }

        Ok(out)
    }
}
