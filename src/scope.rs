use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ec2 as ec2;
use aws_sdk_sts as sts;

use crate::error::ScanError;

/// Identifier for the single non-regional scope. Global-service scanners
/// receive it in place of a region code.
pub const GLOBAL_SCOPE: &str = "global";

/// Produces the ordered set of scan scopes for one orchestration run.
#[async_trait]
pub trait ScopeEnumerator: Send + Sync {
    async fn scopes(&self) -> Result<Vec<String>, ScanError>;
}

/// Enumerates AWS regions via EC2 `DescribeRegions`, probing credentials
/// once beforehand so an unauthenticated run fails before any fan-out.
pub struct AwsScopeEnumerator;

impl AwsScopeEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AwsScopeEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScopeEnumerator for AwsScopeEnumerator {
    async fn scopes(&self) -> Result<Vec<String>, ScanError> {
        probe_credentials().await?;

        let conf = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let client = ec2::Client::new(&conf);
        let resp = client
            .describe_regions()
            .send()
            .await
            .map_err(|e| ScanError::api("regions", e))?;

        let regions = resp
            .regions()
            .iter()
            .filter_map(|r| r.region_name().map(|s| s.to_string()))
            .collect();
        Ok(regions)
    }
}

/// One STS `GetCallerIdentity` round trip. An auth failure here would hit
/// every subsequent call, so it is surfaced as a distinct error instead
/// of letting every scanner fail individually.
pub async fn probe_credentials() -> Result<(), ScanError> {
    let conf = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = sts::Client::new(&conf);
    client
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| ScanError::Credentials(e.to_string()))?;
    Ok(())
}
