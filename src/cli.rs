//! Command-line interface options using `clap` for the SeaVis application.

use crate::config::RunConfig;
use crate::dataset::YearId;
use crate::season::SeasonPreset;
use clap::Parser;
use std::path::PathBuf;

/// Seasonal wind composites from yearly NetCDF files
#[derive(Parser, Debug)]
#[command(
    name = "SeaVis",
    version,
    about = "Render seasonal wind composites and summarize their year-to-year variation"
)]
pub struct Args {
    /// JSON run configuration. Flags below override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Years to process, formatted as a range `11-22` or a list `11,12,15`
    #[arg(short, long, value_parser = parse_years_arg, default_value = "11-22")]
    pub years: YearSpec,

    /// Directory the dataset path template is resolved against
    #[arg(long)]
    pub data_root: Option<PathBuf>,

    /// Root directory for the per-season images
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Directory for the variation log
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Season partition of the year
    #[arg(long, value_enum)]
    pub seasons: Option<SeasonPreset>,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Print the dimensions and variables of a NetCDF file and exit
    #[arg(long)]
    pub inspect: Option<PathBuf>,
}

/// Years named on the command line, in the order given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSpec(pub Vec<YearId>);

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_to(&self, config: &mut RunConfig) {
        if let Some(root) = &self.data_root {
            config.data_root = root.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
        if let Some(preset) = self.seasons {
            config.seasons = preset.build();
        }
    }
}

fn parse_year(s: &str) -> Result<u32, String> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid year '{}': expected a non-negative integer", s.trim()))
}

/// Parse `start-end` (inclusive) or a comma-separated list. Repeated years
/// are kept once.
pub fn parse_years_arg(s: &str) -> Result<YearSpec, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Invalid format: Expected 'start-end' or 'y1,y2,...'.".to_string());
    }

    let years: Vec<YearId> = match s.split_once('-') {
        Some((start, end)) => {
            let start = parse_year(start)?;
            let end = parse_year(end)?;
            if start > end {
                return Err(format!("Invalid range: {start} is after {end}"));
            }
            (start..=end).map(YearId).collect()
        }
        None => s
            .split(',')
            .map(|part| parse_year(part).map(YearId))
            .collect::<Result<_, _>>()?,
    };

    let mut unique = Vec::with_capacity(years.len());
    for year in years {
        if !unique.contains(&year) {
            unique.push(year);
        }
    }
    Ok(YearSpec(unique))
}
