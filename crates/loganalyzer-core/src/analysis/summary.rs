use super::{Analyzer, SummaryStats, median};
use crate::Result;
use crate::log::RequestRecord;
use std::collections::HashSet;

/// Whole-log totals, independent of the URL ranking
pub struct SummaryAnalyzer;

impl Analyzer for SummaryAnalyzer {
    type Output = SummaryStats;

    fn analyze(&self, records: &[RequestRecord]) -> Result<Self::Output> {
        tracing::debug!("Analyzing request summary statistics");

        if records.is_empty() {
            return Ok(SummaryStats::default());
        }

        let total_requests = records.len();
        let total_time: f64 = records.iter().map(|r| r.duration).sum();

        let unique_urls = records
            .iter()
            .map(|r| r.url.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut durations: Vec<f64> = records.iter().map(|r| r.duration).collect();
        let median_time = median(&mut durations);

        tracing::debug!(
            "Summary analysis complete: {} requests, {} URLs",
            total_requests,
            unique_urls
        );

        Ok(SummaryStats {
            total_requests,
            unique_urls,
            total_time,
            average_time: total_time / total_requests as f64,
            median_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals() {
        let records = vec![
            RequestRecord::new("/a", 1.0),
            RequestRecord::new("/a", 3.0),
            RequestRecord::new("/b", 2.0),
        ];

        let summary = SummaryAnalyzer.analyze(&records).unwrap();
        assert_eq!(summary.total_requests, 3);
        assert_eq!(summary.unique_urls, 2);
        assert_eq!(summary.total_time, 6.0);
        assert_eq!(summary.average_time, 2.0);
        assert_eq!(summary.median_time, 2.0);
    }

    #[test]
    fn test_summary_empty() {
        let summary = SummaryAnalyzer.analyze(&[]).unwrap();
        assert_eq!(summary, SummaryStats::default());
    }
}
