//! Perfume EDA - command line entry point
//!
//! Prints the listing report, writes the PNG charts and optionally opens the
//! interactive dashboard.

use anyhow::{anyhow, Result};
use clap::Parser;
use perfume_eda::config::{DEFAULT_MEN_PATH, DEFAULT_WOMEN_PATH};
use perfume_eda::{gui, AnalysisConfig, AnalysisPipeline, LoaderError};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Exploratory analysis of men's and women's perfume listings"
)]
struct Cli {
    /// Men's listings CSV
    #[arg(long, default_value = DEFAULT_MEN_PATH)]
    men: PathBuf,

    /// Women's listings CSV
    #[arg(long, default_value = DEFAULT_WOMEN_PATH)]
    women: PathBuf,

    /// Directory for the PNG charts
    #[arg(short, long, default_value = "charts")]
    output_dir: PathBuf,

    /// Number of bins in the price histogram
    #[arg(long, default_value_t = 30)]
    bins: usize,

    /// Length of the item location tables
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Chart width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Write the summary as JSON to this path
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Open the written charts with the system viewer
    #[arg(long)]
    open: bool,

    /// Show the interactive dashboard after the report
    #[arg(long)]
    gui: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl From<Cli> for AnalysisConfig {
    fn from(cli: Cli) -> Self {
        AnalysisConfig {
            men_path: cli.men,
            women_path: cli.women,
            output_dir: cli.output_dir,
            histogram_bins: cli.bins,
            top_n: cli.top,
            chart_width: cli.width,
            chart_height: cli.height,
            open_charts: cli.open,
            gui: cli.gui,
            summary_json: cli.summary_json,
            ..Default::default()
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(config: AnalysisConfig) -> Result<()> {
    debug!("Configuration: {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let output = AnalysisPipeline::analyze(&config, &mut out)?;
    drop(out);

    let charts = AnalysisPipeline::render_charts(&config, &output)?;
    info!(
        "Wrote {} charts to {}",
        charts.len(),
        config.output_dir.display()
    );

    if let Some(path) = &config.summary_json {
        AnalysisPipeline::write_summary_json(&output.summary, path)?;
    }

    if config.open_charts {
        for path in &charts {
            if let Err(e) = open::that(path) {
                warn!("Could not open {}: {}", path.display(), e);
            }
        }
    }

    if config.gui {
        gui::run_dashboard(output.chart_data, output.summary)
            .map_err(|e| anyhow!("Dashboard error: {}", e))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(LoaderError::FileNotFound(path)) = e.downcast_ref::<LoaderError>() {
                error!("Input file missing: {}", path.display());
                eprintln!(
                    "Error: cannot find CSV file {}. Check that the file path is correct.",
                    path.display()
                );
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["perfume-eda"]);
        let config: AnalysisConfig = cli.into();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "perfume-eda",
            "--men",
            "m.csv",
            "--women",
            "w.csv",
            "--bins",
            "12",
            "--gui",
        ]);
        let config: AnalysisConfig = cli.into();
        assert_eq!(config.men_path, PathBuf::from("m.csv"));
        assert_eq!(config.women_path, PathBuf::from("w.csv"));
        assert_eq!(config.histogram_bins, 12);
        assert!(config.gui);
        assert!(!config.open_charts);
    }
}
