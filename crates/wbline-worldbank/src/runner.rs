//! Pipeline orchestration for World Bank indicator exports

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use wbline_core::{CsvSink, cleanup_tmp_files};

use crate::config::Config;
use crate::fetch::fetch_indicator;
use crate::transform::IndicatorRow;

/// Pipeline execution summary
#[derive(Debug)]
pub struct Summary {
    pub total_indicators: usize,
    pub total_rows: usize,
    pub elapsed: std::time::Duration,
}

/// Run the World Bank export pipeline.
///
/// Indicators are processed sequentially in config order. The first
/// exhausted fetch aborts the run; exports already finalized stay on
/// disk.
pub fn run(config: &Config) -> Result<Summary> {
    let start = Instant::now();

    fs::create_dir_all(&config.output_dir).context("Failed to create output directory")?;
    cleanup_tmp_files(&config.output_dir).context("Failed to clean up stale tmp files")?;
    log::info!("Export directory: {}", config.output_dir.display());

    let mut total_rows = 0;
    for spec in &config.indicators {
        log::info!("Fetching {} -> {} ...", spec.code, spec.column);
        let rows = fetch_indicator(config, &spec.code)?;
        let written = export_rows(&rows, &spec.column, &config.output_dir, config.year_range)?;
        log::info!(
            "Saved: {} ({written} rows)",
            config.output_dir.join(format!("{}.csv", spec.column)).display()
        );
        total_rows += written;
    }

    let summary = Summary {
        total_indicators: config.indicators.len(),
        total_rows,
        elapsed: start.elapsed(),
    };

    log::info!("=== World Bank Export Summary ===");
    log::info!("Indicators: {}", summary.total_indicators);
    log::info!("Rows: {}", summary.total_rows);
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok(summary)
}

/// Filter rows to the inclusive year range and write one CSV export.
///
/// Returns the number of rows written.
fn export_rows(
    rows: &[IndicatorRow],
    column: &str,
    output_dir: &Path,
    (from, to): (i32, i32),
) -> Result<usize> {
    let mut sink = CsvSink::new(column, output_dir, &IndicatorRow::header(column))
        .with_context(|| format!("Failed to create CSV sink for {column}"))?;

    for row in rows.iter().filter(|r| r.year >= from && r.year <= to) {
        sink.write_record(&row.to_record())?;
    }

    sink.finalize()
        .with_context(|| format!("Failed to finalize {column}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(iso3: &str, year: i32, value: Option<f64>) -> IndicatorRow {
        IndicatorRow {
            country_iso3: iso3.to_string(),
            country_name: "Kenya".to_string(),
            year,
            value,
            indicator_code: Some("SP.DYN.LE00.IN".to_string()),
            indicator_name: Some("Life expectancy at birth".to_string()),
        }
    }

    fn read_rows(path: &Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().clone();
        let records = reader.records().map(|r| r.unwrap()).collect();
        (headers, records)
    }

    #[test]
    fn export_filters_year_range() {
        let dir = TempDir::new().unwrap();
        let rows = vec![
            row("KEN", 1999, Some(50.1)),
            row("KEN", 2000, Some(50.9)),
            row("KEN", 2023, Some(62.9)),
            row("KEN", 2024, Some(63.1)),
        ];

        let written = export_rows(&rows, "life_expectancy", dir.path(), (2000, 2023)).unwrap();
        assert_eq!(written, 2);

        let (_, records) = read_rows(&dir.path().join("life_expectancy.csv"));
        let years: Vec<&str> = records.iter().map(|r| &r[2]).collect();
        assert_eq!(years, vec!["2000", "2023"]);
    }

    #[test]
    fn export_writes_header_with_value_column() {
        let dir = TempDir::new().unwrap();
        export_rows(&[], "gdp_pc", dir.path(), (2000, 2023)).unwrap();

        let (headers, records) = read_rows(&dir.path().join("gdp_pc.csv"));
        assert_eq!(
            headers,
            vec![
                "country_iso3",
                "country_name",
                "year",
                "gdp_pc",
                "indicator_code",
                "indicator_name"
            ]
        );
        assert!(records.is_empty());
    }

    #[test]
    fn export_keeps_null_values_as_empty_fields() {
        let dir = TempDir::new().unwrap();
        let rows = vec![row("KEN", 2015, None)];

        let written = export_rows(&rows, "life_expectancy", dir.path(), (2000, 2023)).unwrap();
        assert_eq!(written, 1);

        let (_, records) = read_rows(&dir.path().join("life_expectancy.csv"));
        assert_eq!(&records[0][3], "");
    }

    #[test]
    fn export_overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gdp_pc.csv"), "stale,content\n").unwrap();

        export_rows(&[row("KEN", 2015, Some(1450.3))], "gdp_pc", dir.path(), (2000, 2023)).unwrap();

        let (_, records) = read_rows(&dir.path().join("gdp_pc.csv"));
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "KEN");
    }

    #[test]
    fn export_round_trips_rows() {
        let dir = TempDir::new().unwrap();
        let rows = vec![
            row("KEN", 2015, Some(61.2)),
            row("KEN", 2016, None),
            row("", 2017, Some(12345.678901)),
        ];

        export_rows(&rows, "life_expectancy", dir.path(), (2000, 2023)).unwrap();

        let (_, records) = read_rows(&dir.path().join("life_expectancy.csv"));
        let reread: Vec<IndicatorRow> = records
            .iter()
            .map(|r| IndicatorRow {
                country_iso3: r[0].to_string(),
                country_name: r[1].to_string(),
                year: r[2].parse().unwrap(),
                value: if r[3].is_empty() {
                    None
                } else {
                    Some(r[3].parse().unwrap())
                },
                indicator_code: Some(r[4].to_string()),
                indicator_name: Some(r[5].to_string()),
            })
            .collect();
        assert_eq!(reread, rows);
    }
}
