use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_sqs as sqs;
use aws_sdk_sqs::types::QueueAttributeName;
use serde_json::json;

use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, NOT_AVAILABLE};

pub struct SqsScanner;

impl SqsScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SqsScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for SqsScanner {
    fn name(&self) -> &'static str {
        "sqs"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::Sqs
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = sqs::Client::new(&conf);

        let resp = client
            .list_queues()
            .send()
            .await
            .map_err(|e| ScanError::api("sqs", e))?;

        let mut out = Vec::new();
        for url in resp.queue_urls() {
            let name = url.rsplit('/').next().unwrap_or(url.as_str()).to_string();

            let mut attrs: HashMap<String, String> = HashMap::new();
            match client
                .get_queue_attributes()
                .queue_url(url)
                .attribute_names(QueueAttributeName::All)
                .send()
                .await
            {
                Ok(attrs_resp) => {
                    if let Some(map) = attrs_resp.attributes() {
                        for (k, v) in map {
                            attrs.insert(k.as_str().to_string(), v.clone());
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(queue = %name, error = %err, "sqs queue attributes unavailable");
                }
            }

            let mut attributes = HashMap::new();
            attributes.insert(
                "messages_available".to_string(),
                json!(attrs
                    .get("ApproximateNumberOfMessages")
                    .map(String::as_str)
                    .unwrap_or("0")),
            );
            attributes.insert(
                "messages_in_flight".to_string(),
                json!(attrs
                    .get("ApproximateNumberOfMessagesNotVisible")
                    .map(String::as_str)
                    .unwrap_or("0")),
            );
            attributes.insert(
                "created_timestamp".to_string(),
                json!(attrs
                    .get("CreatedTimestamp")
                    .map(String::as_str)
                    .unwrap_or(NOT_AVAILABLE)),
            );

            out.push(ResourceRecord {
                service_type: ServiceType::Sqs,
                resource_type: "Queue".to_string(),
                resource_id: name.clone(),
                name,
                state: "Active".to_string(),
                region: scope.to_string(),
                attributes,
                tags: Vec::new(),
            });
        }

        Ok(out)
    }
}
