mod cli;
mod config;
mod engine;
mod error;
mod feed;
mod report;
mod types;

use crate::error::{Result, StarcutError};
use crate::types::config::StarcutConfig;
use crate::types::rating::RatingReport;
use chrono::Utc;
use clap::Parser;
use std::collections::BTreeMap;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Rate(cmd) => {
            let cfg = config::load_config(&cmd.data_dir)?.unwrap_or_default();
            let data = feed::load(&cmd.data_dir)?;
            let findings = feed::validate::validate(&data);
            let year = resolve_year(cmd.year, &cfg, &data)?;
            let entity = resolve_entity(cmd.entity, &cfg)?;

            let (measures, aggregate) = engine::rate_entity(&data, &entity, year)?;
            let report = RatingReport {
                entity_id: entity,
                year,
                generated_at: Utc::now().to_rfc3339(),
                feed_digests: data.digests.clone(),
                measures,
                aggregate,
                simulation: None,
            };
            let rendered = report::render(&report, output_format(&cmd.format), cfg.decimals())?;
            println!("{rendered}");
            Ok(findings_exit_code(&findings))
        }
        cli::Commands::Simulate(cmd) => {
            let cfg = config::load_config(&cmd.data_dir)?.unwrap_or_default();
            let data = feed::load(&cmd.data_dir)?;
            let findings = feed::validate::validate(&data);
            let year = resolve_year(cmd.year, &cfg, &data)?;
            let entity = resolve_entity(cmd.entity, &cfg)?;

            let mut overrides: BTreeMap<String, f64> = BTreeMap::new();
            if let Some(path) = &cmd.overrides {
                let bytes = std::fs::read(path)?;
                let from_file: BTreeMap<String, f64> = serde_json::from_slice(&bytes)
                    .map_err(|e| StarcutError::FeedParse(format!("{}: {e}", path.display())))?;
                overrides.extend(from_file);
            }
            overrides.extend(cmd.set.iter().cloned());

            let (measures, aggregate) = engine::rate_entity(&data, &entity, year)?;
            let inputs = engine::simulation_inputs(&data, &measures, year);
            let simulation = engine::simulate::simulate(&inputs, &overrides)?;

            let report = RatingReport {
                entity_id: entity,
                year,
                generated_at: Utc::now().to_rfc3339(),
                feed_digests: data.digests.clone(),
                measures,
                aggregate,
                simulation: Some(simulation),
            };
            let rendered = report::render(&report, output_format(&cmd.format), cfg.decimals())?;
            println!("{rendered}");
            Ok(findings_exit_code(&findings))
        }
        cli::Commands::Bands(cmd) => {
            let cfg = config::load_config(&cmd.data_dir)?.unwrap_or_default();
            let data = feed::load(&cmd.data_dir)?;
            let year = resolve_year(cmd.year, &cfg, &data)?;
            let measure = data
                .measure(&cmd.measure)
                .ok_or_else(|| StarcutError::UnknownMeasure(cmd.measure.clone()))?;

            println!(
                "bands for {} ({}) in {}:",
                measure.measure_key,
                if measure.lower_is_better {
                    "lower is better"
                } else {
                    "higher is better"
                },
                year
            );
            match data.cutpoints_for(&cmd.measure, year) {
                Some(cuts) => {
                    for rating in (1..=5u8).rev() {
                        println!(
                            "  {rating}: {}",
                            engine::band::band_range(rating, cuts, measure.lower_is_better)
                        );
                    }
                }
                None => println!("  no cutpoints published for {year}"),
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate(cmd) => {
            let data = feed::load(&cmd.data_dir)?;
            let findings = feed::validate::validate(&data);

            if findings.is_empty() {
                println!("validate: no findings");
                return Ok(exit_code::SUCCESS);
            }

            for finding in &findings {
                let level = if finding.blocking { "BLOCKING" } else { "WARN" };
                println!("[{}] {}: {}", level, finding.id, finding.message);
            }

            Ok(findings_exit_code(&findings))
        }
    }
}

fn findings_exit_code(findings: &[feed::validate::Finding]) -> i32 {
    if findings.iter().any(|finding| finding.blocking) {
        exit_code::BLOCKING
    } else if findings.is_empty() {
        exit_code::SUCCESS
    } else {
        exit_code::WARNINGS
    }
}

fn resolve_year(flag: Option<i32>, cfg: &StarcutConfig, data: &feed::DataSet) -> Result<i32> {
    flag.or_else(|| cfg.default_year())
        .or_else(|| data.years().last().copied())
        .ok_or_else(|| {
            StarcutError::InvalidYear(
                "no cutpoint years in feed; pass --year or set engine.default_year".to_string(),
            )
        })
}

fn resolve_entity(flag: Option<String>, cfg: &StarcutConfig) -> Result<String> {
    flag.or_else(|| cfg.default_entity().map(str::to_string))
        .ok_or_else(|| {
            StarcutError::UnknownEntity(
                "none specified; pass --entity or set engine.default_entity".to_string(),
            )
        })
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
