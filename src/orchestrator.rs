use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::error::{InventoryError, ScannerFailure, ScopeError};
use crate::record::ResourceRecord;
use crate::scanner::{ScannerRegistry, ScopeKind};
use crate::scope::GLOBAL_SCOPE;
use crate::task::{run_scope, ScopeScan};

/// Ceiling on concurrent in-flight scope tasks. Bounds the number of
/// simultaneous outbound call chains so a large region list does not
/// trip provider throttling.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Merged result of one full scan run.
#[derive(Debug)]
pub struct ScanOutcome {
    pub records: Vec<ResourceRecord>,
    /// Scopes whose task failed at the orchestration level (panic).
    pub scope_errors: Vec<ScopeError>,
    /// Scanner failures absorbed inside scope tasks, kept for diagnosis.
    pub scanner_failures: Vec<ScannerFailure>,
    pub scopes_scanned: usize,
}

/// Fans scope scan tasks out onto a bounded pool and merges the results.
pub struct Orchestrator {
    registry: Arc<ScannerRegistry>,
    concurrency: usize,
}

impl Orchestrator {
    pub fn new(registry: Arc<ScannerRegistry>) -> Self {
        Self {
            registry,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// Scans every scope plus the global services and merges everything
    /// into one record set. Waits for all tasks; a failing task never
    /// cancels its siblings. Fails only when there is nothing to scan.
    pub async fn scan_all(&self, scopes: &[String]) -> Result<ScanOutcome, InventoryError> {
        if scopes.is_empty() {
            return Err(InventoryError::NoScopes);
        }

        // Global services run once, outside the per-scope fan-out.
        let global = run_scope(GLOBAL_SCOPE, self.registry.scanners_for(ScopeKind::Global)).await;
        let mut records = global.records;
        let mut scanner_failures = global.failures;
        let mut scope_errors = Vec::new();

        let mut tasks = stream::iter(scopes.iter().cloned())
            .map(|scope| {
                let registry = Arc::clone(&self.registry);
                async move {
                    let task_scope = scope.clone();
                    let handle = tokio::spawn(async move {
                        run_scope(&task_scope, registry.scanners_for(ScopeKind::Regional)).await
                    });
                    (scope, handle.await)
                }
            })
            .buffer_unordered(self.concurrency);

        // Sole merge point; completion order is whatever the pool delivers.
        while let Some((scope, joined)) = tasks.next().await {
            match joined {
                Ok(scan) => {
                    records.extend(scan.records);
                    scanner_failures.extend(scan.failures);
                }
                Err(err) => {
                    tracing::error!(scope = %scope, error = %err, "scope task failed");
                    scope_errors.push(ScopeError {
                        scope,
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(ScanOutcome {
            records,
            scope_errors,
            scanner_failures,
            scopes_scanned: scopes.len(),
        })
    }

    /// Scans a single scope, then claims the global records whose own
    /// declared region matches it.
    pub async fn scan_one(&self, scope: &str) -> ScopeScan {
        let mut scan = run_scope(scope, self.registry.scanners_for(ScopeKind::Regional)).await;

        let global = run_scope(GLOBAL_SCOPE, self.registry.scanners_for(ScopeKind::Global)).await;
        scan.records
            .extend(global.records.into_iter().filter(|r| r.region == scope));
        scan.failures.extend(global.failures);

        scan
    }
}
