//! World Bank pipeline configuration

use std::path::PathBuf;
use std::time::Duration;

/// One indicator to extract: API code plus the value column name.
///
/// The column name doubles as the output file stem
/// (`life_expectancy` → `life_expectancy.csv`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSpec {
    /// World Bank indicator code (e.g. "SP.DYN.LE00.IN")
    pub code: String,
    /// Column name for the value field in the export
    pub column: String,
}

impl IndicatorSpec {
    pub fn new(code: &str, column: &str) -> Self {
        Self {
            code: code.to_string(),
            column: column.to_string(),
        }
    }
}

/// Runtime configuration for the World Bank pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL
    pub base_url: String,
    /// Indicators to extract, processed in order
    pub indicators: Vec<IndicatorSpec>,
    /// Output directory for CSV files
    pub output_dir: PathBuf,
    /// Inclusive year range kept in the export
    pub year_range: (i32, i32),
    /// Attempts per indicator before giving up
    pub max_retries: u32,
    /// Deadline for a single request attempt
    pub request_timeout: Duration,
    /// Requested page size; one page is expected to hold a full series
    pub per_page: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://api.worldbank.org/v2".to_string(),
            indicators: vec![
                IndicatorSpec::new("SP.DYN.LE00.IN", "life_expectancy"),
                IndicatorSpec::new("SH.XPD.CHEX.PC.CD", "health_spend_pc"),
                IndicatorSpec::new("NY.GDP.PCAP.CD", "gdp_pc"),
            ],
            output_dir: PathBuf::from("wb_exports"),
            year_range: (2000, 2023),
            max_retries: 3,
            request_timeout: Duration::from_secs(60),
            per_page: 20_000,
        }
    }
}
