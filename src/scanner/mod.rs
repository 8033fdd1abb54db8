mod cloudformation;
mod dynamodb;
mod ec2;
mod ecs;
mod elb;
mod lambda;
mod rds;
mod s3;
mod sns;
mod sqs;
mod vpc;

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_types::region::Region;

use crate::error::ScanError;
use crate::record::{ResourceRecord, ServiceType};

pub use cloudformation::CloudFormationScanner;
pub use dynamodb::DynamoDbScanner;
pub use ec2::Ec2Scanner;
pub use ecs::EcsScanner;
pub use elb::ElbScanner;
pub use lambda::LambdaScanner;
pub use rds::RdsScanner;
pub use s3::S3Scanner;
pub use sns::SnsScanner;
pub use sqs::SqsScanner;
pub use vpc::VpcScanner;

/// Discovers resources of one kind within one scope. Implementations
/// must only fail on total call failure (auth, network, throttling);
/// a missing sub-detail degrades to a sentinel, never to an error.
#[async_trait]
pub trait Scanner: Send + Sync {
    fn name(&self) -> &'static str;
    fn service_type(&self) -> ServiceType;
    async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError>;
}

/// Whether a scanner runs once per region or once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Regional,
    Global,
}

/// Ordered scanner sets per scope kind. Order only affects diagnostic
/// output; scanners within a scope are independent.
pub struct ScannerRegistry {
    regional: Vec<Arc<dyn Scanner>>,
    global: Vec<Arc<dyn Scanner>>,
}

impl ScannerRegistry {
    pub fn new() -> Self {
        Self {
            regional: Vec::new(),
            global: Vec::new(),
        }
    }

    /// The full AWS scanner set.
    pub fn aws_defaults() -> Self {
        let mut reg = Self::new();
        reg.register(ScopeKind::Regional, Arc::new(Ec2Scanner::new()));
        reg.register(ScopeKind::Regional, Arc::new(RdsScanner::new()));
        reg.register(ScopeKind::Regional, Arc::new(LambdaScanner::new()));
        reg.register(ScopeKind::Regional, Arc::new(VpcScanner::new()));
        reg.register(ScopeKind::Regional, Arc::new(ElbScanner::new()));
        reg.register(ScopeKind::Regional, Arc::new(CloudFormationScanner::new()));
        reg.register(ScopeKind::Regional, Arc::new(EcsScanner::new()));
        reg.register(ScopeKind::Regional, Arc::new(SnsScanner::new()));
        reg.register(ScopeKind::Regional, Arc::new(SqsScanner::new()));
        reg.register(ScopeKind::Regional, Arc::new(DynamoDbScanner::new()));
        reg.register(ScopeKind::Global, Arc::new(S3Scanner::new()));
        reg
    }

    pub fn register(&mut self, kind: ScopeKind, scanner: Arc<dyn Scanner>) {
        match kind {
            ScopeKind::Regional => self.regional.push(scanner),
            ScopeKind::Global => self.global.push(scanner),
        }
    }

    pub fn scanners_for(&self, kind: ScopeKind) -> &[Arc<dyn Scanner>] {
        match kind {
            ScopeKind::Regional => &self.regional,
            ScopeKind::Global => &self.global,
        }
    }
}

impl Default for ScannerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// SDK config pinned to the scope's region. Built per scan call so a
/// scanner instance stays region-free.
pub(crate) async fn regional_config(scope: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(scope.to_string()))
        .load()
        .await
}

#[cfg(test)]
pub(crate) mod stub {
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::Scanner;
    use crate::error::ScanError;
    use crate::record::{ResourceRecord, ServiceType, NOT_AVAILABLE};

    /// Tracks how many scans are running at once and the highest value
    /// that counter ever reached.
    #[derive(Default)]
    pub(crate) struct InFlight {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl InFlight {
        pub(crate) fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    /// Canned-response scanner for orchestration tests.
    pub(crate) struct StubScanner {
        name: &'static str,
        service: ServiceType,
        by_scope: HashMap<String, Vec<ResourceRecord>>,
        fail_in: HashSet<String>,
        delay: Option<Duration>,
        in_flight: Option<Arc<InFlight>>,
    }

    impl StubScanner {
        pub(crate) fn new(name: &'static str, service: ServiceType) -> Self {
            Self {
                name,
                service,
                by_scope: HashMap::new(),
                fail_in: HashSet::new(),
                delay: None,
                in_flight: None,
            }
        }

        pub(crate) fn yields(mut self, scope: &str, records: Vec<ResourceRecord>) -> Self {
            self.by_scope.insert(scope.to_string(), records);
            self
        }

        pub(crate) fn fails_in(mut self, scope: &str) -> Self {
            self.fail_in.insert(scope.to_string());
            self
        }

        pub(crate) fn with_delay(mut self, delay: Duration, in_flight: Arc<InFlight>) -> Self {
            self.delay = Some(delay);
            self.in_flight = Some(in_flight);
            self
        }
    }

    #[async_trait]
    impl Scanner for StubScanner {
        fn name(&self) -> &'static str {
            self.name
        }

        fn service_type(&self) -> ServiceType {
            self.service
        }

        async fn scan(&self, scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
            if let (Some(delay), Some(in_flight)) = (self.delay, self.in_flight.as_ref()) {
                let now = in_flight.current.fetch_add(1, Ordering::SeqCst) + 1;
                in_flight.peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                in_flight.current.fetch_sub(1, Ordering::SeqCst);
            }
            if self.fail_in.contains(scope) {
                return Err(ScanError::api(self.name, anyhow!("throttled")));
            }
            Ok(self.by_scope.get(scope).cloned().unwrap_or_default())
        }
    }

    /// Scanner that panics, to exercise scope-level failure capture.
    pub(crate) struct PanickingScanner;

    #[async_trait]
    impl Scanner for PanickingScanner {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn service_type(&self) -> ServiceType {
            ServiceType::Ec2
        }

        async fn scan(&self, _scope: &str) -> Result<Vec<ResourceRecord>, ScanError> {
            panic!("scanner blew up");
        }
    }

    pub(crate) fn record(service: ServiceType, id: &str, region: &str) -> ResourceRecord {
        ResourceRecord {
            service_type: service,
            resource_type: service.as_str().to_string(),
            resource_id: id.to_string(),
            name: NOT_AVAILABLE.to_string(),
            state: "active".to_string(),
            region: region.to_string(),
            attributes: HashMap::new(),
            tags: Vec::new(),
        }
    }
}
