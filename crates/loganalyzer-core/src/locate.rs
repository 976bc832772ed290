use crate::log::Compression;
use crate::{Error, Result};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Rotated ui access logs: `nginx-access-ui.log-YYYYMMDD`, optionally gzipped
pub const LOG_FILE_PATTERN: &str = r"^nginx-access-ui\.log-(\d{8})(\.gz)?$";

lazy_static! {
    static ref LOG_FILE_RE: Regex = Regex::new(LOG_FILE_PATTERN).unwrap();
}

/// The newest log file found in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestLog {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub compression: Compression,
}

/// Find the most recent ui access log in `dir`
pub fn find_latest_log(dir: &Path) -> Result<Option<LatestLog>> {
    find_latest_log_matching(dir, &LOG_FILE_RE)
}

/// Find the file in `dir` whose name matches `pattern` and carries the
/// latest date.
///
/// The first capture group of `pattern` must hold the date as `YYYYMMDD`.
/// Names whose date does not exist on the calendar are ignored.
pub fn find_latest_log_matching(dir: &Path, pattern: &Regex) -> Result<Option<LatestLog>> {
    if pattern.captures_len() < 2 {
        return Err(Error::InvalidPattern(format!(
            "Pattern '{}' has no date capture group",
            pattern.as_str()
        )));
    }

    tracing::debug!("Scanning {} for log files", dir.display());

    let mut latest: Option<LatestLog> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };

        let Some(date) = pattern
            .captures(name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y%m%d").ok())
        else {
            continue;
        };

        if latest.as_ref().is_none_or(|current| date > current.date) {
            let path = entry.path();
            latest = Some(LatestLog {
                compression: Compression::from_path(&path),
                path,
                date,
            });
        }
    }

    match &latest {
        Some(log) => tracing::debug!("Latest log file: {}", log.path.display()),
        None => tracing::debug!("No log files matched in {}", dir.display()),
    }

    Ok(latest)
}
