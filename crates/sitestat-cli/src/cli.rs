use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "SiteStat CLI - Site-resolved vacancy thermodynamics of multi-component alloys from insertion energetics and volumetrics.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for beta-grid evaluation.
    /// Defaults to the number of available logical cores.
    #[cfg(feature = "parallel")]
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Vacancy concentration, formation energy and formation volume on the beta grid.
    Formations(AnalysisArgs),
    /// Chemical potential of every species of each system.
    Potentials(AnalysisArgs),
    /// Occupation fluctuation on the beta grid.
    Fluctuation(AnalysisArgs),
    /// Histograms of local formation energies and volumes per species.
    Histogram(HistogramArgs),
    /// Vacancy characteristics of many frames at fixed temperatures.
    Sweep(SweepArgs),
    /// Check a configuration file without running any analysis.
    Validate(ValidateArgs),
}

/// Arguments shared by every analysis subcommand.
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Path to the configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override `final-step`, the timestep of the analyzed frame.
    #[arg(long, value_name = "INT")]
    pub step: Option<u64>,

    /// Override `data.output-dir`.
    #[arg(short, long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub beta_grid: BetaGridArgs,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S beta-grid.num=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Overrides for a linear beta grid. Any of them turns the grid linear.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct BetaGridArgs {
    /// First beta of the grid (1/eV).
    #[arg(long, value_name = "FLOAT")]
    pub beta_start: Option<f64>,

    /// Last beta of the grid (1/eV), included.
    #[arg(long, value_name = "FLOAT")]
    pub beta_stop: Option<f64>,

    /// Number of grid points.
    #[arg(long, value_name = "INT")]
    pub beta_num: Option<usize>,
}

impl BetaGridArgs {
    pub fn is_set(&self) -> bool {
        self.beta_start.is_some() || self.beta_stop.is_some() || self.beta_num.is_some()
    }
}

#[derive(Args, Debug, Clone)]
pub struct HistogramArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Number of equal-width bins per histogram.
    #[arg(short, long, value_name = "INT", default_value_t = sitestat::core::thermo::summary::DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Override `steps`. Comma-separated timesteps.
    #[arg(long, value_name = "INT,...", value_delimiter = ',')]
    pub steps: Vec<u64>,

    /// Override `sweep.temperatures`. Comma-separated temperatures in kelvin.
    #[arg(long, value_name = "FLOAT,...", value_delimiter = ',')]
    pub temperatures: Vec<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,
}
