use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3 as s3;
use serde_json::json;

use super::Scanner;
use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType, NOT_AVAILABLE, REGION_UNKNOWN};

/// Global scanner: buckets are listed once per run, not per region. Each
/// record carries the bucket's own resolved region so regional views can
/// claim it afterwards.
pub struct S3Scanner;

impl S3Scanner {
    pub fn new() -> Self {
        Self
    }

    async fn bucket_region(client: &s3::Client, bucket: &str) -> String {
        match client.get_bucket_location().bucket(bucket).send().await {
            Ok(resp) => match resp.location_constraint() {
                // us-east-1 reports an empty constraint
                Some(c) if !c.as_str().is_empty() => c.as_str().to_string(),
                _ => "us-east-1".to_string(),
            },
            Err(_) => REGION_UNKNOWN.to_string(),
        }
    }
}

impl Default for S3Scanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scanner for S3Scanner {
    fn name(&self) -> &'static str {
        "s3"
    }

    fn service_type(&self) -> ServiceType {
        ServiceType::S3
    }

    async fn scan(&self, _scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
        let conf = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let client = s3::Client::new(&conf);

        let resp = client
            .list_buckets()
            .send()
            .await
            .map_err(|e| ScanError::api("s3", e))?;

        let mut out = Vec::new();
        for bucket in resp.buckets() {
            let Some(name) = bucket.name() else {
                continue;
            };

            let region = Self::bucket_region(&client, name).await;

            let mut attributes = HashMap::new();
            attributes.insert(
                "created_date".to_string(),
                json!(bucket
                    .creation_date()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())),
            );

            out.push(ResourceRecord {
                service_type: ServiceType::S3,
                resource_type: "Bucket".to_string(),
                resource_id: name.to_string(),
                name: name.to_string(),
                state: "Active".to_string(),
                region,
                attributes,
                tags: Vec::new(),
            });
        }

        Ok(out)
    }
}
