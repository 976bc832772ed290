use crate::OutputFormat;
use anyhow::Result;
use loganalyzer_core::analysis::{AnalysisReport, Analyzer, SummaryAnalyzer, UrlStatsAnalyzer};
use loganalyzer_core::log::LogParser;
use std::path::Path;

/// Parse one log file and rank its `top` slowest URLs
pub fn analyze_log(file: &Path, top: usize, methods: &[String]) -> Result<AnalysisReport> {
    tracing::debug!("Reading log file: {}", file.display());

    let parser = LogParser::with_methods(methods)?;
    let analyzer = UrlStatsAnalyzer::new(top)?;

    let parsed = parser.parse_file(file)?;
    if parsed.skipped() > 0 {
        tracing::debug!("{} lines did not match the log format", parsed.skipped());
    }

    let summary = SummaryAnalyzer.analyze(&parsed.records)?;
    let urls = analyzer.analyze(&parsed.records)?;

    Ok(AnalysisReport { summary, urls })
}

pub fn execute(file: &Path, top: usize, methods: &[String], format: OutputFormat) -> Result<()> {
    tracing::info!("Extracting statistics from log file: {}", file.display());

    let report = analyze_log(file, top, methods)?;
    tracing::debug!("Rendering {} URLs as {}", report.urls.len(), format.as_str());

    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Table => output_table(&report)?,
        OutputFormat::Pretty => output_pretty(&report)?,
    }

    Ok(())
}

fn output_pretty(report: &AnalysisReport) -> Result<()> {
    use console::style;

    println!("\n{}", style("Access Log Report").bold().cyan());
    println!("{}", style("=================").cyan());

    println!("\n{}", style("Summary:").bold());
    println!("  Requests:      {}", report.summary.total_requests);
    println!("  Unique URLs:   {}", report.summary.unique_urls);
    println!("  Total Time:    {:.3} s", report.summary.total_time);
    println!("  Average Time:  {:.3} s", report.summary.average_time);
    println!("  Median Time:   {:.3} s", report.summary.median_time);

    if !report.urls.is_empty() {
        println!("\n{}", style("Slowest URLs:").bold());
        for (i, stats) in report.urls.iter().enumerate() {
            println!(
                "  {}. [{:.3} s, {:.2}%] {} requests, avg {:.3} s, med {:.3} s, max {:.3} s - {}",
                i + 1,
                stats.time_sum,
                stats.time_perc,
                stats.count,
                stats.time_avg,
                stats.time_med,
                stats.time_max,
                stats.url
            );
        }
    }

    println!();
    Ok(())
}

fn output_json(report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

fn output_table(report: &AnalysisReport) -> Result<()> {
    println!("url,count,count_perc,time_sum,time_perc,time_avg,time_max,time_med");
    for stats in &report.urls {
        println!(
            "{},{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
            csv_field(&stats.url),
            stats.count,
            stats.count_perc,
            stats.time_sum,
            stats.time_perc,
            stats.time_avg,
            stats.time_max,
            stats.time_med
        );
    }
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
