use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "starcut",
    version,
    about = "Star-rating cutpoint classification and weighted rating CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rate one entity: per-measure stars, bands, and the weighted overall
    Rate(RateCommand),
    /// Re-rate with hypothetical measure values and report the deltas
    Simulate(SimulateCommand),
    /// Show the value range each star rating occupies for a measure
    Bands(BandsCommand),
    /// Check the data feeds for cutpoint and weight issues
    Validate(ValidateCommand),
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct RateCommand {
    /// Data directory holding measures.json, cutpoints/, performance.json
    pub data_dir: PathBuf,

    /// Contract/entity id; falls back to engine.default_entity
    #[arg(long)]
    pub entity: Option<String>,

    /// Star year; falls back to engine.default_year, then the latest
    /// cutpoint year
    #[arg(long)]
    pub year: Option<i32>,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct SimulateCommand {
    pub data_dir: PathBuf,

    #[arg(long)]
    pub entity: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,

    /// Hypothetical value for a measure, as measure_key=value; repeatable.
    /// An override is withdrawn by omitting its flag, never by a sentinel.
    #[arg(long = "set", value_name = "MEASURE=VALUE", value_parser = parse_override)]
    pub set: Vec<(String, f64)>,

    /// JSON file of {"measure_key": value} overrides; --set entries win
    #[arg(long)]
    pub overrides: Option<PathBuf>,
}

#[derive(Args)]
pub struct BandsCommand {
    pub data_dir: PathBuf,

    #[arg(long)]
    pub measure: String,

    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub data_dir: PathBuf,
}

fn parse_override(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected MEASURE=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty measure key in '{raw}'"));
    }
    let value: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number in '{raw}'"))?;
    Ok((key.to_string(), value))
}
