//! AWS resource inventory: fans per-service scanners out across regions
//! with bounded concurrency, isolates partial failures, and aggregates
//! the merged record set into stable summaries.

pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod out;
pub mod record;
pub mod scanner;
pub mod scope;
pub mod summary;
pub mod task;

pub use api::Inventory;
pub use error::{InventoryError, ScanError, ScannerFailure, ScopeError};
pub use orchestrator::{Orchestrator, ScanOutcome, DEFAULT_CONCURRENCY};
pub use record::{ResourceRecord, ServiceType, Tag, NOT_AVAILABLE, REGION_UNKNOWN};
pub use scanner::{Scanner, ScannerRegistry, ScopeKind};
pub use scope::{AwsScopeEnumerator, ScopeEnumerator, GLOBAL_SCOPE};
pub use summary::{summarize, summarize_by_region, RegionSummary};
