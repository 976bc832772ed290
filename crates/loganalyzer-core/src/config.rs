use crate::log::DEFAULT_METHODS;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Analyzer settings.
///
/// Read from a JSON object with upper-case keys. Every key is optional and
/// falls back to its default, so a file only needs to list what it changes:
///
/// ```json
/// {"REPORT_SIZE": 20, "LOG_DIR": "/var/log/nginx"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of URLs in the report (`REPORT_SIZE`, default 10)
    #[serde(rename = "REPORT_SIZE")]
    pub report_size: usize,

    /// Where reports are written (`REPORT_DIR`, default `./reports`)
    #[serde(rename = "REPORT_DIR")]
    pub report_dir: PathBuf,

    /// Where rotated access logs are looked up (`LOG_DIR`, default `./log`)
    #[serde(rename = "LOG_DIR")]
    pub log_dir: PathBuf,

    /// Structured log output file (`LOG_FILE`); stderr when unset
    #[serde(rename = "LOG_FILE", skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// HTML template with a `$table_json` placeholder (`REPORT_TEMPLATE`)
    #[serde(rename = "REPORT_TEMPLATE")]
    pub report_template: PathBuf,

    /// HTTP methods counted as requests (`METHODS`)
    #[serde(rename = "METHODS")]
    pub methods: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_size: 10,
            report_dir: PathBuf::from("./reports"),
            log_dir: PathBuf::from("./log"),
            log_file: None,
            report_template: PathBuf::from("./report.html"),
            methods: DEFAULT_METHODS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load a config file, overriding defaults with the keys it sets
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading config from: {}", path.display());

        let file = File::open(path)?;
        let config: Config = serde_json::from_reader(BufReader::new(file))?;

        Ok(config)
    }

    /// Check the values that cannot be enforced by the types alone
    pub fn validate(&self) -> Result<()> {
        if self.report_size == 0 {
            return Err(Error::InvalidConfiguration(
                "REPORT_SIZE must be at least 1".to_string(),
            ));
        }
        if self.methods.is_empty() {
            return Err(Error::InvalidConfiguration(
                "METHODS must list at least one HTTP method".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_values_override_defaults() {
        let config: Config = r#"{
            "REPORT_SIZE": 20,
            "REPORT_DIR": "/tmp/reports",
            "LOG_DIR": "/tmp/logs"
        }"#
        .parse()
        .unwrap();

        assert_eq!(config.report_size, 20);
        assert_eq!(config.report_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.log_file, None);
        assert_eq!(config.report_template, PathBuf::from("./report.html"));
        assert_eq!(config.methods, vec!["GET", "POST", "PUT", "DELETE"]);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: Config = "{}".parse().unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config: Config = r#"{"REPORT_SIZE": 3, "ERROR_THRESHOLD": 0.5}"#.parse().unwrap();
        assert_eq!(config.report_size, 3);
    }

    #[test]
    fn test_invalid_json() {
        let result: Result<Config> = "{not json".parse();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_negative_report_size_rejected() {
        let result: Result<Config> = r#"{"REPORT_SIZE": -1}"#.parse();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_zero_report_size() {
        let config: Config = r#"{"REPORT_SIZE": 0}"#.parse().unwrap();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_empty_methods() {
        let config: Config = r#"{"METHODS": []}"#.parse().unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/config.json"));
        match result {
            Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"LOG_FILE": "/tmp/analyzer.log"}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/analyzer.log")));
        assert_eq!(config.report_size, 10);
    }
}
