use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Directive used for the subscriber's filter
pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        "log_analyzer=debug,loganalyzer_cli=debug,loganalyzer_core=debug"
    } else {
        "log_analyzer=info,loganalyzer_cli=info"
    }
}

/// Install the global subscriber.
///
/// With a log file, events are appended to it as JSON lines with ISO-8601
/// timestamps. Otherwise they go to stderr in the compact text format.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::new(filter_directive(verbose));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .json()
                .flatten_event(true)
                .try_init()
                .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize logging: {}", e)),
    }
}
