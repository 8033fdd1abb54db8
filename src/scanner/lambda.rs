use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_lambda as lambda;
use serde_json::json;

use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, NOT_AVAILABLE};

pub struct LambdaScanner;

impl LambdaScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LambdaScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for LambdaScanner {
    fn name(&self) -> &'static str {
        "lambda"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::Lambda
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = lambda::Client::new(&conf);

        let resp = client
            .list_functions()
            .send()
            .await
            .map_err(|e| ScanError::api("lambda", e))?;

        let mut out = Vec::new();
        for function in resp.functions() {
            let Some(name) = function.function_name() else {
                continue;
            };

            let mut attributes = HashMap::new();
            attributes.insert(
                "runtime".to_string(),
                json!(function
                    .runtime()
                    .map(|r| r.as_str())
                    .unwrap_or(NOT_AVAILABLE)),
            );
            if let Some(memory) = function.memory_size() {
                attributes.insert("memory_size".to_string(), json!(memory));
            }
            attributes.insert(
                "last_modified".to_string(),
                json!(function.last_modified().unwrap_or(NOT_AVAILABLE)),
            );

            out.push(ResourceRecord {
                service_type: ServiceType::Lambda,
                resource_type: "Function".to_string(),
                resource_id: name.to_string(),
                name: name.to_string(),
                state: function
                    .state()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                region: scope.to_string(),
                attributes,
                tags: Vec::new(),
            });
        }

        Ok(out)
    }
}
