use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{ResourceRecord, ServiceType};

/// Per-region rollup. `total` always equals the sum of `service_counts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub total: usize,
    pub service_counts: BTreeMap<ServiceType, usize>,
}

/// Count of records per service family. Pure function of the input;
/// input order is irrelevant.
pub fn summarize(records: &[ResourceRecord]) -> BTreeMap<ServiceType, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.service_type).or_insert(0) += 1;
    }
    counts
}

/// Per-region rollup over the record set. Every attempted scope appears,
/// even with zero results. Records are bucketed by their own declared
/// region, which is how global-service records land in the region that
/// owns them; a record whose region was never attempted (including the
/// unknown sentinel) gets its own bucket rather than being dropped.
pub fn summarize_by_region(
    records: &[ResourceRecord],
    attempted: &[String],
) -> BTreeMap<String, RegionSummary> {
    let mut out: BTreeMap<String, RegionSummary> = attempted
        .iter()
        .map(|scope| (scope.clone(), RegionSummary::default()))
        .collect();

    for record in records {
        let bucket = out.entry(record.region.clone()).or_default();
        bucket.total += 1;
        *bucket.service_counts.entry(record.service_type).or_insert(0) += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{summarize, summarize_by_region};
    use crate::record::{ServiceType, REGION_UNKNOWN};
    use crate::scanner::stub::record;

    #[test]
    fn summarize_is_order_independent() {
        let mut records = vec![
            record(ServiceType::Ec2, "i-1", "us-east-1"),
            record(ServiceType::Rds, "db-1", "us-east-1"),
            record(ServiceType::Ec2, "i-2", "us-west-2"),
            record(ServiceType::S3, "bucket", "us-east-1"),
        ];

        let forward = summarize(&records);
        records.reverse();
        let reversed = summarize(&records);

        assert_eq!(forward, reversed);
        assert_eq!(forward[&ServiceType::Ec2], 2);
        assert_eq!(forward[&ServiceType::Rds], 1);
        assert_eq!(forward[&ServiceType::S3], 1);
        // applying it again changes nothing
        assert_eq!(summarize(&records), reversed);
    }

    #[test]
    fn attempted_scopes_appear_even_when_empty() {
        let records = vec![record(ServiceType::Ec2, "i-1", "us-east-1")];
        let attempted = vec!["us-east-1".to_string(), "us-west-2".to_string()];

        let by_region = summarize_by_region(&records, &attempted);

        assert_eq!(by_region.len(), 2);
        assert_eq!(by_region["us-west-2"].total, 0);
        assert!(by_region["us-west-2"].service_counts.is_empty());
        assert_eq!(by_region["us-east-1"].total, 1);
    }

    #[test]
    fn global_records_fold_into_their_owning_region() {
        let records = vec![
            record(ServiceType::Ec2, "i-1", "us-east-1"),
            record(ServiceType::Ec2, "i-2", "us-east-1"),
            record(ServiceType::S3, "bucket-a", "us-east-1"),
            record(ServiceType::S3, "bucket-b", REGION_UNKNOWN),
        ];
        let attempted = vec!["us-east-1".to_string(), "us-west-2".to_string()];

        let by_region = summarize_by_region(&records, &attempted);

        let east = &by_region["us-east-1"];
        assert_eq!(east.total, 3);
        assert_eq!(east.service_counts[&ServiceType::Ec2], 2);
        assert_eq!(east.service_counts[&ServiceType::S3], 1);

        // a region never attempted still gets a bucket for its records
        let unknown = &by_region[REGION_UNKNOWN];
        assert_eq!(unknown.total, 1);
        assert_eq!(unknown.service_counts[&ServiceType::S3], 1);
    }

    #[test]
    fn totals_equal_the_sum_of_per_type_counts() {
        let records = vec![
            record(ServiceType::Ec2, "i-1", "us-east-1"),
            record(ServiceType::Rds, "db-1", "us-east-1"),
            record(ServiceType::S3, "bucket-a", "us-east-1"),
        ];
        let attempted = vec!["us-east-1".to_string()];

        for summary in summarize_by_region(&records, &attempted).values() {
            assert_eq!(summary.total, summary.service_counts.values().sum::<usize>());
        }
    }
}
