//! Entry point for the SeaVis application.
//! Handles CLI parsing and logging setup, then runs the yearly pipeline and
//! writes the variation report.

use clap::Parser;
use sea_vis::cli::Args;
use sea_vis::config::RunConfig;
use sea_vis::metadata::print_dataset_summary;
use sea_vis::parallel::ParallelConfig;
use sea_vis::pipeline;
use sea_vis::stats::{format_report, write_report};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    println!(
        r#"
------------------------------------------------------------------
   ____             __     ___
  / ___|  ___  __ _ \ \   / (_)___
  \___ \ / _ \/ _` | \ \ / /| / __|
   ___) |  __/ (_| |  \ V / | \__ \
  |____/ \___|\__,_|   \_/  |_|___/
          Seasonal wind composites from NetCDF
------------------------------------------------------------------
"#
    );

    match execute(&args) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> sea_vis::Result<ExitCode> {
    if let Some(path) = &args.inspect {
        let file = netcdf::open(path)?;
        println!("Successfully opened NetCDF file: {}", path.display());
        print_dataset_summary(&file);
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            RunConfig::from_file(path)?
        }
        None => RunConfig::default(),
    };
    args.apply_to(&mut config);

    ParallelConfig::new(args.threads).setup_global_pool()?;

    let years = &args.years.0;
    info!(count = years.len(), "starting run");
    let summary = pipeline::run(&config, years)?;

    for (year, e) in &summary.failures {
        warn!(year = %year.label(), error = %e, "year was skipped");
    }

    let summaries = match summary.ledger.summarize() {
        Ok(summaries) => summaries,
        Err(e) => {
            error!(error = %e, "no seasonal statistics were collected");
            return Ok(ExitCode::FAILURE);
        }
    };

    let lines = format_report(&summaries);
    for line in &lines {
        println!("{line}");
    }
    let log_path = write_report(&config.log_dir, &lines, &chrono::Local::now())?;
    info!(path = %log_path.display(), "Saved variation log");

    if summary.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!(
            failed = summary.failures.len(),
            processed = summary.processed.len(),
            "some years could not be processed"
        );
        Ok(ExitCode::FAILURE)
    }
}
