use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single access log line that carried both a request path and a
/// request time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub url: String,
    /// Request processing time in seconds
    pub duration: f64,
}

impl RequestRecord {
    pub fn new(url: impl Into<String>, duration: f64) -> Self {
        Self {
            url: url.into(),
            duration,
        }
    }
}

/// Records extracted from one log source, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    pub records: Vec<RequestRecord>,
    /// Number of lines read, matched or not
    pub lines: usize,
}

impl ParsedLog {
    /// Lines that did not yield a record
    pub fn skipped(&self) -> usize {
        self.lines.saturating_sub(self.records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Encoding of a log source on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compression {
    Plain,
    Gzip,
}

impl Compression {
    /// Detect the compression from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gzip,
            _ => Compression::Plain,
        }
    }
}
