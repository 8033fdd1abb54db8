use std::sync::Arc;

use crate::error::ScannerFailure;
use crate::record::ResourceRecord;
use crate::scanner::Scanner;

/// Outcome of scanning one scope: whatever records could be gathered,
/// plus the scanner failures absorbed along the way.
#[derive(Debug)]
pub struct ScopeScan {
    pub scope: String,
    pub records: Vec<ResourceRecord>,
    pub failures: Vec<ScannerFailure>,
}

/// Runs every scanner for one scope, sequentially. Never fails as a
/// whole: a scanner error shrinks the result and is recorded, siblings
/// keep running.
pub async fn run_scope(scope: &str, scanners: &[Arc<dyn Scanner>]) -> ScopeScan {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for scanner in scanners {
        match scanner.scan(scope).await {
            Ok(mut found) => {
                tracing::debug!(scanner = scanner.name(), scope, count = found.len(), "scan done");
                records.append(&mut found);
            }
            Err(err) => {
                tracing::warn!(scanner = scanner.name(), scope, error = %err, "scanner failed");
                failures.push(ScannerFailure {
                    scope: scope.to_string(),
                    scanner: scanner.name().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    ScopeScan {
        scope: scope.to_string(),
        records,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::run_scope;
    use crate::record::ServiceType;
    use crate::scanner::stub::{record, StubScanner};
    use crate::scanner::Scanner;

    #[tokio::test]
    async fn failing_scanner_does_not_abort_siblings() {
        let scanners: Vec<Arc<dyn Scanner>> = vec![
            Arc::new(
                StubScanner::new("compute", ServiceType::Ec2)
                    .yields("eu-west-1", vec![record(ServiceType::Ec2, "i-1", "eu-west-1")]),
            ),
            Arc::new(StubScanner::new("database", ServiceType::Rds).fails_in("eu-west-1")),
            Arc::new(
                StubScanner::new("tables", ServiceType::DynamoDb)
                    .yields("eu-west-1", vec![record(ServiceType::DynamoDb, "t-1", "eu-west-1")]),
            ),
        ];

        let scan = run_scope("eu-west-1", &scanners).await;

        assert_eq!(scan.scope, "eu-west-1");
        assert_eq!(scan.records.len(), 2);
        assert_eq!(scan.failures.len(), 1);
        assert_eq!(scan.failures[0].scanner, "database");
        assert_eq!(scan.failures[0].scope, "eu-west-1");
    }

    #[tokio::test]
    async fn empty_scanner_set_yields_empty_scan() {
        let scan = run_scope("eu-west-1", &[]).await;
        assert!(scan.records.is_empty());
        assert!(scan.failures.is_empty());
    }
}
