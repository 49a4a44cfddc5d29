//! Cross-year variation of seasonal magnitude extremes
//!
//! The ledger is an ordinary value passed into each year's processing, so a
//! single year can be processed and checked in isolation. Seasons and years
//! keep the order in which they were first recorded.

use crate::errors::{Result, SeaVisError};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

/// Min/max magnitude of one season in one year
#[derive(Debug, Clone, PartialEq)]
pub struct YearSample {
    pub year: String,
    pub min: f64,
    pub max: f64,
}

/// Min/max samples collected for each season across years
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsLedger {
    seasons: Vec<(String, Vec<YearSample>)>,
}

impl StatsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, year: &str, season: &str, min: f64, max: f64) {
        let sample = YearSample {
            year: year.to_string(),
            min,
            max,
        };
        match self.seasons.iter_mut().find(|(name, _)| name == season) {
            Some((_, samples)) => samples.push(sample),
            None => self.seasons.push((season.to_string(), vec![sample])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.iter().all(|(_, samples)| samples.is_empty())
    }

    pub fn samples(&self, season: &str) -> Option<&[YearSample]> {
        self.seasons
            .iter()
            .find(|(name, _)| name == season)
            .map(|(_, samples)| samples.as_slice())
    }

    /// Fold another ledger's samples into this one
    pub fn merge(&mut self, other: StatsLedger) {
        for (season, samples) in other.seasons {
            for sample in samples {
                self.record(&sample.year, &season, sample.min, sample.max);
            }
        }
    }

    /// Mean extremes per season and each year's deviation from them.
    ///
    /// # Errors
    ///
    /// Returns `EmptyStatistics` if nothing has been recorded.
    pub fn summarize(&self) -> Result<Vec<SeasonSummary>> {
        if self.is_empty() {
            return Err(SeaVisError::EmptyStatistics);
        }

        Ok(self
            .seasons
            .iter()
            .filter(|(_, samples)| !samples.is_empty())
            .map(|(season, samples)| {
                let n = samples.len() as f64;
                let mean_min = samples.iter().map(|s| s.min).sum::<f64>() / n;
                let mean_max = samples.iter().map(|s| s.max).sum::<f64>() / n;
                let deviations = samples
                    .iter()
                    .map(|s| YearDeviation {
                        year: s.year.clone(),
                        min: s.min,
                        max: s.max,
                        min_deviation: s.min - mean_min,
                        max_deviation: s.max - mean_max,
                    })
                    .collect();
                SeasonSummary {
                    season: season.clone(),
                    mean_min,
                    mean_max,
                    deviations,
                }
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearDeviation {
    pub year: String,
    pub min: f64,
    pub max: f64,
    pub min_deviation: f64,
    pub max_deviation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSummary {
    pub season: String,
    pub mean_min: f64,
    pub mean_max: f64,
    pub deviations: Vec<YearDeviation>,
}

/// Human-readable report, one entry per line
pub fn format_report(summaries: &[SeasonSummary]) -> Vec<String> {
    let mut lines = Vec::new();
    for summary in summaries {
        lines.push(format!("\nSeason: {}", summary.season));
        lines.push(format!("  Average Min Magnitude: {:.4}", summary.mean_min));
        lines.push(format!("  Average Max Magnitude: {:.4}", summary.mean_max));
        lines.push("  Year-wise deviations:".to_string());
        for d in &summary.deviations {
            lines.push(format!(
                "    Year: {} | Min: {:.4} (dev: {:+.4}), Max: {:.4} (dev: {:+.4})",
                d.year, d.min, d.min_deviation, d.max, d.max_deviation
            ));
        }
    }
    lines
}

/// `variation_log_%Y%m%d_%H%M%S.txt`
pub fn log_file_name<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("variation_log_{}.txt", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Write the report lines to a timestamped file in `dir`.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created or the file
/// cannot be written.
pub fn write_report<Tz>(dir: &Path, lines: &[String], timestamp: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fs::create_dir_all(dir)?;
    let path = dir.join(log_file_name(timestamp));

    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(&path, content)?;
    Ok(path)
}
