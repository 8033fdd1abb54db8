use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_sns as sns;
use serde_json::json;

use super::{regional_config, Scanner};
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, NOT_AVAILABLE};

pub struct SnsScanner;

impl SnsScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SnsScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for SnsScanner {
    fn name(&self) -> &'static str {
        "sns"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::Sns
    }

    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = regional_config(scope).await;
        let client = sns::Client::new(&conf);

        let resp = client
            .list_topics()
            .send()
            .await
            .map_err(|e| ScanError::api("sns", e))?;

        let mut out = Vec::new();
        for topic in resp.topics() {
            let Some(arn) = topic.topic_arn() else {
                continue;
            };
            let name = arn.rsplit(':').next().unwrap_or(arn).to_string();

            // Attribute lookup failing for one topic degrades that record,
            // it does not fail the scan.
            let mut attributes = HashMap::new();
            match client.get_topic_attributes().topic_arn(arn).send().await {
                Ok(attrs_resp) => {
                    let attrs = attrs_resp.attributes().cloned().unwrap_or_default();
                    attributes.insert(
                        "subscriptions_confirmed".to_string(),
                        json!(attrs
                            .get("SubscriptionsConfirmed")
                            .map(String::as_str)
                            .unwrap_or("0")),
                    );
                    attributes.insert(
                        "subscriptions_pending".to_string(),
                        json!(attrs
                            .get("SubscriptionsPending")
                            .map(String::as_str)
                            .unwrap_or("0")),
                    );
                    attributes.insert(
                        "display_name".to_string(),
                        json!(attrs
                            .get("DisplayName")
                            .map(String::as_str)
                            .unwrap_or(NOT_AVAILABLE)),
                    );
                }
                Err(err) => {
                    tracing::warn!(topic = %name, error = %err, "sns topic attributes unavailable");
                }
            }

            out.push(ResourceRecord {
                service_type: ServiceType::Sns,
                resource_type: "Topic".to_string(),
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
