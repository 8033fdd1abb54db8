use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{InventoryError, ScanError, ScannerFailure, ScopeError};
use crate::orchestrator::Orchestrator;
use crate::record::{ResourceRecord, ServiceType};
use crate::scanner::ScannerRegistry;
use crate::scope::{AwsScopeEnumerator, ScopeEnumerator};
use crate::summary::{summarize, summarize_by_region, RegionSummary};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeListing {
    pub scopes: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub resources: Vec<ResourceRecord>,
    pub total_count: usize,
    pub service_summary: BTreeMap<ServiceType, usize>,
    pub scopes_scanned: usize,
    pub scope_errors: Vec<ScopeError>,
    pub scanner_failures: Vec<ScannerFailure>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionReport {
    pub region: String,
    pub resources: Vec<ResourceRecord>,
    pub total_count: usize,
    pub service_summary: BTreeMap<ServiceType, usize>,
    pub scanner_failures: Vec<ScannerFailure>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub region_summary: BTreeMap<String, RegionSummary>,
    pub total_regions: usize,
    pub scope_errors: Vec<ScopeError>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Facade the HTTP collaborator talks to. Wires the scope enumerator to
/// the orchestrator and shapes results into serializable reports.
pub struct Inventory {
    scopes: Arc<dyn ScopeEnumerator>,
    orchestrator: Orchestrator,
}

impl Inventory {
    pub fn new(scopes: Arc<dyn ScopeEnumerator>, orchestrator: Orchestrator) -> Self {
        Self {
            scopes,
            orchestrator,
        }
    }

    /// Default AWS wiring: region enumeration via EC2, the full scanner set.
    pub fn aws(concurrency: usize) -> Self {
        let registry = Arc::new(ScannerRegistry::aws_defaults());
        Self::new(
            Arc::new(AwsScopeEnumerator::new()),
            Orchestrator::new(registry).with_concurrency(concurrency),
        )
    }

    pub async fn list_scopes(&self) -> Result<ScopeListing, InventoryError> {
        let scopes = self.enumerate().await?;
        Ok(ScopeListing {
            count: scopes.len(),
            scopes,
        })
    }

    pub async fn scan_all(&self) -> Result<InventoryReport, InventoryError> {
        let scopes = self.enumerate().await?;
        let outcome = self.orchestrator.scan_all(&scopes).await?;

        let mut resources = outcome.records;
        sort_records(&mut resources);

        Ok(InventoryReport {
            total_count: resources.len(),
            service_summary: summarize(&resources),
            scopes_scanned: outcome.scopes_scanned,
            scope_errors: outcome.scope_errors,
            scanner_failures: outcome.scanner_failures,
            resources,
            generated_at: Utc::now(),
        })
    }

    /// One region's view, including the global records it owns. Always
    /// succeeds; missing pieces show up as scanner failures.
    pub async fn scan_region(&self, region: &str) -> RegionReport {
        let scan = self.orchestrator.scan_one(region).await;

        let mut resources = scan.records;
        sort_records(&mut resources);

        RegionReport {
            region: region.to_string(),
            total_count: resources.len(),
            service_summary: summarize(&resources),
            scanner_failures: scan.failures,
            resources,
            generated_at: Utc::now(),
        }
    }

    pub async fn summarize_all(&self) -> Result<SummaryReport, InventoryError> {
        let scopes = self.enumerate().await?;
        let outcome = self.orchestrator.scan_all(&scopes).await?;

        Ok(SummaryReport {
            region_summary: summarize_by_region(&outcome.records, &scopes),
            total_regions: scopes.len(),
            scope_errors: outcome.scope_errors,
            generated_at: Utc::now(),
        })
    }

    pub fn health(&self) -> Health {
        Health {
            status: "healthy",
            timestamp: Utc::now(),
        }
    }

    async fn enumerate(&self) -> Result<Vec<String>, InventoryError> {
        let scopes = self.scopes.scopes().await.map_err(|err| match err {
            ScanError::Credentials(message) => InventoryError::Credentials(message),
            other => {
                tracing::error!(error = %other, "scope enumeration failed");
                InventoryError::NoScopes
            }
        })?;
        if scopes.is_empty() {
            return Err(InventoryError::NoScopes);
        }
        Ok(scopes)
    }
}

fn sort_records(records: &mut [ResourceRecord]) {
    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::Inventory;
    use crate::error::{InventoryError, ScanError};
    use crate::orchestrator::Orchestrator;
    use crate::record::{ServiceType, REGION_UNKNOWN};
    use crate::scanner::stub::{record, StubScanner};
    use crate::scanner::{ScannerRegistry, ScopeKind};
    use crate::scope::{ScopeEnumerator, GLOBAL_SCOPE};

    struct FixedScopes(Vec<String>);

    #[async_trait]
    impl ScopeEnumerator for FixedScopes {
        async fn scopes(&self) -> Result<Vec<String>, ScanError> {
            Ok(self.0.clone())
        }
    }

    /// Two regions; us-east-1 has three instances and a failing database
    /// scanner; us-west-2 is empty; a global storage scanner owns one
    /// bucket in us-east-1 and one in an unresolvable region.
    fn two_region_inventory() -> Inventory {
        let mut registry = ScannerRegistry::new();
        registry.register(
            ScopeKind::Regional,
            Arc::new(
                StubScanner::new("compute", ServiceType::Ec2).yields(
                    "us-east-1",
                    vec![
                        record(ServiceType::Ec2, "i-1", "us-east-1"),
                        record(ServiceType::Ec2, "i-2", "us-east-1"),
                        record(ServiceType::Ec2, "i-3", "us-east-1"),
                    ],
                ),
            ),
        );
        registry.register(
            ScopeKind::Regional,
            Arc::new(StubScanner::new("database", ServiceType::Rds).fails_in("us-east-1")),
        );
        registry.register(
            ScopeKind::Global,
            Arc::new(StubScanner::new("storage", ServiceType::S3).yields(
                GLOBAL_SCOPE,
                vec![
                    record(ServiceType::S3, "bucket-a", "us-east-1"),
                    record(ServiceType::S3, "bucket-b", REGION_UNKNOWN),
                ],
            )),
        );

        Inventory::new(
            Arc::new(FixedScopes(vec![
                "us-east-1".to_string(),
                "us-west-2".to_string(),
            ])),
            Orchestrator::new(Arc::new(registry)),
        )
    }

    #[tokio::test]
    async fn scan_all_merges_regional_and_global_records() {
        let inventory = two_region_inventory();
        let report = inventory.scan_all().await.unwrap();

        assert_eq!(report.total_count, 5);
        assert_eq!(report.scopes_scanned, 2);
        assert_eq!(report.service_summary[&ServiceType::Ec2], 3);
        assert_eq!(report.service_summary[&ServiceType::S3], 2);
        assert!(report.scope_errors.is_empty());
        assert_eq!(report.scanner_failures.len(), 1);
        assert_eq!(report.scanner_failures[0].scanner, "database");

        // stable ordering: service family, then resource id
        let ids: Vec<_> = report
            .resources
            .iter()
            .map(|r| r.resource_id.as_str())
            .collect();
        assert_eq!(ids, vec!["i-1", "i-2", "i-3", "bucket-a", "bucket-b"]);
    }

    #[tokio::test]
    async fn summary_folds_global_records_and_keeps_empty_regions() {
        let inventory = two_region_inventory();
        let report = inventory.summarize_all().await.unwrap();

        assert_eq!(report.total_regions, 2);

        let east = &report.region_summary["us-east-1"];
        assert_eq!(east.total, 4);
        assert_eq!(east.service_counts[&ServiceType::Ec2], 3);
        assert_eq!(east.service_counts[&ServiceType::S3], 1);

        let west = &report.region_summary["us-west-2"];
        assert_eq!(west.total, 0);
        assert!(west.service_counts.is_empty());

        let unknown = &report.region_summary[REGION_UNKNOWN];
        assert_eq!(unknown.total, 1);
        assert_eq!(unknown.service_counts[&ServiceType::S3], 1);
    }

    #[tokio::test]
    async fn region_view_filters_global_records_by_ownership() {
        let inventory = two_region_inventory();

        let east = inventory.scan_region("us-east-1").await;
        assert_eq!(east.total_count, 4);
        assert_eq!(east.service_summary[&ServiceType::S3], 1);
        assert_eq!(east.scanner_failures.len(), 1);

        let west = inventory.scan_region("us-west-2").await;
        assert_eq!(west.total_count, 0);
        assert!(west.scanner_failures.is_empty());
    }

    #[tokio::test]
    async fn empty_enumeration_is_fatal_everywhere() {
        let inventory = Inventory::new(
            Arc::new(FixedScopes(Vec::new())),
            Orchestrator::new(Arc::new(ScannerRegistry::new())),
        );

        assert!(matches!(
            inventory.scan_all().await.unwrap_err(),
            InventoryError::NoScopes
        ));
        assert!(matches!(
            inventory.summarize_all().await.unwrap_err(),
            InventoryError::NoScopes
        ));
        assert!(matches!(
            inventory.list_scopes().await.unwrap_err(),
            InventoryError::NoScopes
        ));
    }

    #[tokio::test]
    async fn credential_failure_is_distinguished() {
        struct NoCreds;

        #[async_trait]
        impl ScopeEnumerator for NoCreds {
            async fn scopes(&self) -> Result<Vec<String>, ScanError> {
                Err(ScanError::Credentials("no provider in chain".to_string()))
            }
        }

        let inventory = Inventory::new(
            Arc::new(NoCreds),
            Orchestrator::new(Arc::new(ScannerRegistry::new())),
        );

        assert!(matches!(
            inventory.scan_all().await.unwrap_err(),
            InventoryError::Credentials(_)
        ));
    }

    #[tokio::test]
    async fn health_is_constant() {
        let inventory = two_region_inventory();
        assert_eq!(inventory.health().status, "healthy");
    }
}
