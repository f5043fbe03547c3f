//! Application settings.

use std::path::PathBuf;

/// Environment variable that overrides [`Config::data_file`].
pub const DATA_FILE_ENV: &str = "TRAFFICLOG_FILE";

/// Paths and labels used by the store and exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backing CSV file.
    pub data_file: PathBuf,
    /// Title band of the PDF report.
    pub report_title: String,
    /// Default file name of the CSV export.
    pub csv_report_name: String,
    /// Default file name of the PDF export.
    pub pdf_report_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("Violations.csv"),
            report_title: "Traffic Violation Report".to_string(),
            csv_report_name: "Report.csv".to_string(),
            pdf_report_name: "Report.pdf".to_string(),
        }
    }
}

impl Config {
    /// Defaults, with the data file taken from `TRAFFICLOG_FILE` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            config.data_file = PathBuf::from(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::Config;

    #[test]
    fn defaults_match_the_stock_file_names() {
        let config = Config::default();
        assert_eq!(config.data_file, Path::new("Violations.csv"));
        assert_eq!(config.report_title, "Traffic Violation Report");
        assert_eq!(config.csv_report_name, "Report.csv");
        assert_eq!(config.pdf_report_name, "Report.pdf");
    }
}
