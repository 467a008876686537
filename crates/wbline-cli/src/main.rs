//! wbline - World Bank indicator export CLI
//!
//! Fetches socioeconomic indicator series from the World Bank v2 API and
//! writes one tidy CSV per indicator.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use wbline_worldbank::{Config, IndicatorSpec};

#[derive(Parser)]
#[command(name = "wbline")]
#[command(about = "World Bank indicator CSV exporter")]
#[command(version)]
struct Cli {
    /// Output directory for CSV files
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indicator to fetch as CODE=COLUMN (repeatable, replaces the defaults)
    #[arg(short, long = "indicator", value_name = "CODE=COLUMN")]
    indicators: Vec<String>,

    /// First year kept in the export
    #[arg(long)]
    from_year: Option<i32>,

    /// Last year kept in the export
    #[arg(long)]
    to_year: Option<i32>,

    /// Attempts per indicator before giving up
    #[arg(long)]
    max_retries: Option<u32>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    wbline_core::init_logging(false, cli.debug);

    let mut config = Config::default();
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if !cli.indicators.is_empty() {
        config.indicators = cli
            .indicators
            .iter()
            .map(|arg| parse_indicator(arg))
            .collect::<Result<Vec<_>>>()?;
    }
    if let Some(from) = cli.from_year {
        config.year_range.0 = from;
    }
    if let Some(to) = cli.to_year {
        config.year_range.1 = to;
    }
    if let Some(retries) = cli.max_retries {
        config.max_retries = retries;
    }

    let summary = wbline_worldbank::run(&config)?;

    log::info!(
        "All indicators exported successfully ({} rows in {:.1}s)",
        summary.total_rows,
        summary.elapsed.as_secs_f64()
    );

    Ok(())
}

/// Parse a CODE=COLUMN indicator argument
fn parse_indicator(arg: &str) -> Result<IndicatorSpec> {
    match arg.split_once('=') {
        Some((code, column)) if !code.is_empty() && !column.is_empty() => {
            Ok(IndicatorSpec::new(code, column))
        }
        _ => anyhow::bail!("Invalid indicator {arg:?}, expected CODE=COLUMN"),
    }
}
