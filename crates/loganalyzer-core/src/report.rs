use crate::analysis::UrlStats;
use crate::{Error, Result};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder in the report template replaced by the statistics table
pub const TABLE_PLACEHOLDER: &str = "$table_json";

lazy_static! {
    static ref TABLE_PLACEHOLDER_RE: Regex =
        Regex::new(r"\$(?:\{table_json\}|table_json\b)").unwrap();
}

/// Substitute the JSON-encoded rows into `template`.
///
/// Both `$table_json` and `${table_json}` are replaced; any other `$` text
/// in the template is left as it is.
pub fn render(template: &str, rows: &[UrlStats]) -> Result<String> {
    let table_json = serde_json::to_string(rows).map_err(|e| Error::Serialize(e.to_string()))?;

    Ok(TABLE_PLACEHOLDER_RE
        .replace_all(template, NoExpand(&table_json))
        .into_owned())
}

/// Writes HTML reports into a directory, one file per day
pub struct ReportWriter {
    report_dir: PathBuf,
    template_path: PathBuf,
}

impl ReportWriter {
    pub fn new(report_dir: impl Into<PathBuf>, template_path: impl Into<PathBuf>) -> Self {
        Self {
            report_dir: report_dir.into(),
            template_path: template_path.into(),
        }
    }

    /// Path of the report for `date`: `<report_dir>/report-YYYY.MM.DD.html`
    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.report_dir
            .join(format!("report-{}.html", date.format("%Y.%m.%d")))
    }

    /// Render `rows` and write the report for `date`, returning its path
    pub fn write(&self, rows: &[UrlStats], date: NaiveDate) -> Result<PathBuf> {
        tracing::debug!("Reading report template from: {}", self.template_path.display());

        let template = fs::read_to_string(&self.template_path)?;
        let content = render(&template, rows)?;

        ensure_dir(&self.report_dir)?;
        let path = self.report_path(date);
        fs::write(&path, content)?;

        tracing::debug!("Wrote report with {} rows to {}", rows.len(), path.display());

        Ok(path)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        tracing::debug!("Creating report directory: {}", dir.display());
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
