use super::types::{Compression, ParsedLog, RequestRecord};
use crate::{Error, Result};
use flate2::read::MultiGzDecoder;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Methods recognised in the quoted request line unless configured otherwise
pub const DEFAULT_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

lazy_static! {
    // $request_time is the last field of the ui log format
    static ref REQUEST_TIME_RE: Regex = Regex::new(r"(?:^|\s)(\d+\.\d+)$").unwrap();
}

/// Extracts request records from access log lines.
///
/// A line yields a record only when both the quoted request line
/// (`"GET /path HTTP/1.1"`) and the trailing request time are present.
/// Lines are handled independently; nothing from one line can end up in
/// the record of another.
#[derive(Debug, Clone)]
pub struct LogParser {
    request_re: Regex,
}

impl LogParser {
    pub fn new() -> Self {
        Self {
            request_re: build_request_regex(&DEFAULT_METHODS)
                .expect("default request pattern is valid"),
        }
    }

    /// Build a parser recognising the given HTTP methods
    pub fn with_methods<S: AsRef<str>>(methods: &[S]) -> Result<Self> {
        if methods.is_empty() {
            return Err(Error::InvalidConfiguration(
                "At least one HTTP method is required".to_string(),
            ));
        }

        let mut normalized = Vec::with_capacity(methods.len());
        for method in methods {
            let method = method.as_ref().trim();
            if method.is_empty() || !method.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::InvalidConfiguration(format!(
                    "Invalid HTTP method '{}'",
                    method
                )));
            }
            normalized.push(method.to_uppercase());
        }

        Ok(Self {
            request_re: build_request_regex(&normalized)?,
        })
    }

    /// Parse a single line, returning a record only if both the URL and
    /// the request time are found on it
    pub fn parse_line(&self, line: &str) -> Option<RequestRecord> {
        let line = line.trim_end();

        let url = self.request_re.captures(line)?.get(1)?.as_str();
        let time = REQUEST_TIME_RE.captures(line)?.get(1)?.as_str();

        let duration: f64 = time.parse().ok()?;
        if !duration.is_finite() || duration < 0.0 {
            return None;
        }

        Some(RequestRecord::new(url, duration))
    }

    /// Parse every line of a text reader, keeping file order
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<ParsedLog> {
        let mut parsed = ParsedLog::default();
        let mut line = String::new();

        loop {
            line.clear();
            let read = reader.read_line(&mut line).map_err(read_error)?;
            if read == 0 {
                break;
            }

            parsed.lines += 1;
            if let Some(record) = self.parse_line(&line) {
                parsed.records.push(record);
            }
        }

        tracing::debug!(
            "Parsed {} records from {} lines ({} skipped)",
            parsed.records.len(),
            parsed.lines,
            parsed.skipped()
        );

        Ok(parsed)
    }

    /// Parse a raw byte source, decompressing it first when needed
    pub fn parse_source<R: Read>(&self, source: R, compression: Compression) -> Result<ParsedLog> {
        match compression {
            Compression::Gzip => self.parse_reader(BufReader::new(MultiGzDecoder::new(source))),
            Compression::Plain => self.parse_reader(BufReader::new(source)),
        }
    }

    /// Open and parse a log file; `.gz` files are decompressed on the fly
    pub fn parse_file(&self, path: &Path) -> Result<ParsedLog> {
        tracing::debug!("Reading log file from: {}", path.display());

        let file = File::open(path)?;
        let parsed = self.parse_source(file, Compression::from_path(path))?;

        tracing::info!(
            "Parsed {} with {} records",
            path.display(),
            parsed.records.len()
        );

        Ok(parsed)
    }

    /// Parse in-memory log text
    pub fn parse_str(&self, content: &str) -> ParsedLog {
        let mut parsed = ParsedLog::default();
        for line in content.lines() {
            parsed.lines += 1;
            if let Some(record) = self.parse_line(line) {
                parsed.records.push(record);
            }
        }
        parsed
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

fn build_request_regex<S: AsRef<str>>(methods: &[S]) -> Result<Regex> {
    let alternatives: Vec<String> = methods
        .iter()
        .map(|m| regex::escape(m.as_ref()))
        .collect();
    let pattern = format!(r#""(?:{}) (/[^\s"]*)[^"]*""#, alternatives.join("|"));

    Regex::new(&pattern).map_err(|e| Error::InvalidPattern(format!("{}: {}", pattern, e)))
}

/// Corrupt compressed data and non UTF-8 text are decode failures; any
/// other read error keeps its I/O kind
fn read_error(err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof => {
            Error::Decode(err.to_string())
        }
        _ => Error::Io(err),
    }
}
