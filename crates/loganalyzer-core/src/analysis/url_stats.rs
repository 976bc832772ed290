use super::{Analyzer, UrlStats, median, percentage};
use crate::log::RequestRecord;
use crate::{Error, Result};
use std::collections::HashMap;

/// Ranks URLs by total request time and keeps the `report_size` slowest
pub struct UrlStatsAnalyzer {
    report_size: usize,
}

impl UrlStatsAnalyzer {
    /// A report size of zero is rejected rather than producing an empty
    /// report
    pub fn new(report_size: usize) -> Result<Self> {
        if report_size == 0 {
            return Err(Error::InvalidConfiguration(
                "Report size must be at least 1".to_string(),
            ));
        }
        Ok(Self { report_size })
    }
}

/// Durations collected for one URL, in first-seen order of the URL
struct UrlGroup<'a> {
    url: &'a str,
    durations: Vec<f64>,
    time_sum: f64,
}

impl Analyzer for UrlStatsAnalyzer {
    type Output = Vec<UrlStats>;

    fn analyze(&self, records: &[RequestRecord]) -> Result<Self::Output> {
        tracing::debug!("Aggregating {} request records by URL", records.len());

        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<UrlGroup<'_>> = Vec::new();

        for record in records {
            let slot = *index.entry(record.url.as_str()).or_insert_with(|| {
                groups.push(UrlGroup {
                    url: record.url.as_str(),
                    durations: Vec::new(),
                    time_sum: 0.0,
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            group.durations.push(record.duration);
            group.time_sum += record.duration;
        }

        let total_count = records.len() as f64;
        let total_time: f64 = groups.iter().map(|g| g.time_sum).sum();

        // sort_by is stable, so equal sums keep first-seen order
        groups.sort_by(|a, b| b.time_sum.total_cmp(&a.time_sum));
        groups.truncate(self.report_size);

        let stats: Vec<UrlStats> = groups
            .into_iter()
            .map(|mut group| {
                let count = group.durations.len();
                let time_max = group.durations.iter().copied().fold(0.0, f64::max);
                let time_med = median(&mut group.durations);

                UrlStats {
                    url: group.url.to_string(),
                    count,
                    count_perc: percentage(count as f64, total_count),
                    time_sum: group.time_sum,
                    time_perc: percentage(group.time_sum, total_time),
                    time_avg: group.time_sum / count as f64,
                    time_max,
                    time_med,
                }
            })
            .collect();

        tracing::debug!(
            "URL aggregation complete: {} of {} URLs reported",
            stats.len(),
            index.len()
        );

        Ok(stats)
    }
}

/// Group `records` by URL and return the `report_size` URLs with the
/// largest total request time
pub fn aggregate(records: &[RequestRecord], report_size: usize) -> Result<Vec<UrlStats>> {
    UrlStatsAnalyzer::new(report_size)?.analyze(records)
}
