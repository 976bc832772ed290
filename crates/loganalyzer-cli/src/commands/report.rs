use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use loganalyzer_core::analysis::{Analyzer, SummaryAnalyzer, SummaryStats, UrlStatsAnalyzer};
use loganalyzer_core::config::Config;
use loganalyzer_core::locate::find_latest_log;
use loganalyzer_core::log::LogParser;
use loganalyzer_core::report::ReportWriter;
use std::path::PathBuf;

/// What a report run produced
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub log_path: PathBuf,
    pub report_path: PathBuf,
    pub summary: SummaryStats,
    pub reported_urls: usize,
    pub skipped_lines: usize,
}

/// Build the report for the latest log in `config.log_dir`.
///
/// Returns `None` when the directory holds no matching log. The report
/// file is named after `date`.
pub fn generate_report(config: &Config, date: NaiveDate) -> Result<Option<ReportOutcome>> {
    let latest = find_latest_log(&config.log_dir).with_context(|| {
        format!(
            "Failed to scan log directory '{}'",
            config.log_dir.display()
        )
    })?;

    let Some(latest) = latest else {
        return Ok(None);
    };

    tracing::info!(
        log = %latest.path.display(),
        log_date = %latest.date,
        "Processing latest log file"
    );

    let parser = LogParser::with_methods(&config.methods)?;
    let analyzer = UrlStatsAnalyzer::new(config.report_size)?;

    let parsed = parser
        .parse_file(&latest.path)
        .with_context(|| format!("Failed to parse log file '{}'", latest.path.display()))?;

    let summary = SummaryAnalyzer.analyze(&parsed.records)?;
    let rows = analyzer.analyze(&parsed.records)?;

    let writer = ReportWriter::new(&config.report_dir, &config.report_template);
    let report_path = writer
        .write(&rows, date)
        .with_context(|| format!("Failed to write report to '{}'", config.report_dir.display()))?;

    Ok(Some(ReportOutcome {
        log_path: latest.path,
        report_path,
        summary,
        reported_urls: rows.len(),
        skipped_lines: parsed.skipped(),
    }))
}

pub fn execute(config: &Config) -> Result<()> {
    let today = Local::now().date_naive();

    match generate_report(config, today)? {
        Some(outcome) => {
            tracing::info!(
                requests = outcome.summary.total_requests,
                urls = outcome.summary.unique_urls,
                reported = outcome.reported_urls,
                skipped_lines = outcome.skipped_lines,
                "Report generated: {}",
                outcome.report_path.display()
            );
            println!("{}", outcome.report_path.display());
        }
        None => {
            tracing::info!(
                log_dir = %config.log_dir.display(),
                "No log files found. Exiting."
            );
        }
    }

    Ok(())
}
