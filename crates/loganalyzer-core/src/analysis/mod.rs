mod summary;
mod url_stats;

pub use summary::SummaryAnalyzer;
pub use url_stats::{UrlStatsAnalyzer, aggregate};

use crate::log::RequestRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: SummaryStats,
    pub urls: Vec<UrlStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_requests: usize,
    pub unique_urls: usize,
    pub total_time: f64,
    pub average_time: f64,
    pub median_time: f64,
}

/// Timing statistics for every request sharing one URL.
///
/// Field names are the keys the report template reads from `table_json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlStats {
    pub url: String,
    pub count: usize,
    /// Share of all requests, in percent
    pub count_perc: f64,
    pub time_sum: f64,
    /// Share of the total request time, in percent
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, records: &[RequestRecord]) -> crate::Result<Self::Output>;
}

/// Median of a non-empty sample; sorts `values` in place
pub(crate) fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len().is_multiple_of(2) {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// `part` as a percentage of `total`, or 0 when there is no total
pub(crate) fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}
