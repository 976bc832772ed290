use anyhow::{Context, Result};
use loganalyzer_core::config::Config;
use std::path::Path;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Load and validate the analyzer config.
///
/// An explicitly requested file must exist. Without one, `config.json` is
/// used when present and the built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                Config::from_file(path)
                    .with_context(|| format!("Failed to load config file '{}'", path.display()))?
            } else {
                Config::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_missing_config_fails() {
        let result = load_config(Some(Path::new("/nonexistent/config.json")));
        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("/nonexistent/config.json"));
    }

    #[test]
    fn test_explicit_config_is_validated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"REPORT_SIZE": 0}"#).unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_config_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"REPORT_SIZE": 5}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.report_size, 5);
    }
}
