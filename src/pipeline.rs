//! Year-by-year processing: load → subset → composite → render → record
//!
//! Each year is processed on its own with a fresh ledger that is merged into
//! the run ledger only when every season of that year succeeded, so a year
//! that fails halfway leaves no partial statistics behind.

use crate::aggregate::{magnitude, signed_magnitude, MaskedGrid};
use crate::config::{ColorField, RunConfig};
use crate::dataset::{FieldSource, YearDataset, YearId};
use crate::errors::{Result, SeaVisError};
use crate::region::RegionSubset;
use crate::render::coastline::Coastline;
use crate::render::text::FontBook;
use crate::render::{MapRenderer, PlotRequest};
use crate::season::Season;
use crate::stats::StatsLedger;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Averaged fields of one season over the region
#[derive(Debug, Clone)]
pub struct SeasonComposite {
    pub season: String,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub u: MaskedGrid,
    pub v: MaskedGrid,
    /// The layer drawn in color and summarized in the statistics
    pub color: MaskedGrid,
}

/// Compute the composite for `season` from an open source.
///
/// # Errors
///
/// Returns any error raised while reading slices or combining grids.
pub fn season_composite<S>(
    config: &RunConfig,
    source: &S,
    region: &RegionSubset,
    season: &Season,
) -> Result<SeasonComposite>
where
    S: FieldSource + ?Sized,
{
    let names = &config.variables;
    let wind = config.wind_aggregator();
    let u = wind.composite(source, &names.u, &season.days, region)?;
    let v = wind.composite(source, &names.v, &season.days, region)?;

    let color = match config.color_field {
        ColorField::SignedMagnitude => signed_magnitude(&u, &v)?,
        ColorField::Magnitude => magnitude(&u, &v)?,
        ColorField::Scalar => {
            let scalar = names.scalar.as_deref().ok_or_else(|| {
                SeaVisError::InvalidConfig(
                    "scalar color layer selected without a scalar variable".to_string(),
                )
            })?;
            config
                .scalar_aggregator()
                .composite(source, scalar, &season.days, region)?
        }
    };

    Ok(SeasonComposite {
        season: season.name.clone(),
        lat: region.lat().to_vec(),
        lon: region.lon().to_vec(),
        u,
        v,
        color,
    })
}

/// Result of one rendered season
#[derive(Debug, Clone)]
pub struct SeasonOutcome {
    pub season: String,
    pub image: PathBuf,
    /// `None` when the color layer had no valid cell
    pub extremes: Option<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct YearReport {
    pub year: YearId,
    pub seasons: Vec<SeasonOutcome>,
}

/// Process every configured season of one year from an already open source.
///
/// # Errors
///
/// Returns the first error hit; the caller decides whether the run goes on.
pub fn process_source<S>(
    config: &RunConfig,
    renderer: &MapRenderer,
    source: &S,
    year: YearId,
    ledger: &mut StatsLedger,
) -> Result<YearReport>
where
    S: FieldSource + ?Sized,
{
    config.seasons.validate(source.time_len())?;
    let region = RegionSubset::new(source.lat(), source.lon(), &config.region)?;
    let (rows, cols) = region.shape();
    info!(year = %year.label(), rows, cols, "resolved region");

    let year_label = year.label();
    let mut seasons = Vec::with_capacity(config.seasons.len());

    for season in &config.seasons {
        let outcome = render_season(config, renderer, source, &region, season, &year_label);
        let (composite, image) = match outcome {
            Ok(done) => done,
            Err(e) => {
                error!(year = %year_label, season = %season.name, error = %e, "season failed");
                return Err(e);
            }
        };

        let extremes = composite.color.min_max();
        match extremes {
            Some((min, max)) => {
                info!(
                    season = %season.name,
                    "Season: {}, Min Magnitude: {:.4}, Max Magnitude: {:.4}",
                    season.name,
                    min,
                    max
                );
                ledger.record(&year_label, &season.name, min, max);
            }
            None => warn!(
                year = %year_label,
                season = %season.name,
                "every cell is missing; season left out of the statistics"
            ),
        }

        seasons.push(SeasonOutcome {
            season: season.name.clone(),
            image,
            extremes,
        });
    }

    Ok(YearReport { year, seasons })
}

fn render_season<S>(
    config: &RunConfig,
    renderer: &MapRenderer,
    source: &S,
    region: &RegionSubset,
    season: &Season,
    year_label: &str,
) -> Result<(SeasonComposite, PathBuf)>
where
    S: FieldSource + ?Sized,
{
    let composite = season_composite(config, source, region, season)?;
    let request = PlotRequest {
        season: &season.name,
        year_label,
        lat: &composite.lat,
        lon: &composite.lon,
        color_field: &composite.color,
        u: &composite.u,
        v: &composite.v,
    };
    let image = renderer.save(&request, &config.output_dir)?;
    Ok((composite, image))
}

/// Open the dataset for `year`, process it, and release the file.
///
/// # Errors
///
/// Returns `DatasetNotFound` if the year file is missing, or any error from
/// [`process_source`].
pub fn process_year(
    config: &RunConfig,
    renderer: &MapRenderer,
    year: YearId,
    ledger: &mut StatsLedger,
) -> Result<YearReport> {
    info!(year = %year.label(), "Processing data for year");
    let dataset = YearDataset::open(&config.locator(), year, &config.variables)?;
    info!(path = %dataset.path().display(), "Reading NetCDF file");

    let report = process_source(config, renderer, &dataset, year, ledger)?;
    drop(dataset);
    info!(year = %year.label(), "Closed dataset");
    Ok(report)
}

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: Vec<YearReport>,
    pub failures: Vec<(YearId, SeaVisError)>,
    pub ledger: StatsLedger,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build the renderer described by `config`.
///
/// # Errors
///
/// Returns an error for an invalid style or an unreadable coastline file.
pub fn build_renderer(config: &RunConfig) -> Result<MapRenderer> {
    let fonts = FontBook::load(config.font_path.as_deref());
    let renderer = MapRenderer::new(config.render.clone(), config.region, fonts)?;
    match &config.coastline_path {
        Some(path) => Ok(renderer.with_coastline(Coastline::load(path)?)),
        None => Ok(renderer),
    }
}

/// Process `years` in order. A failing year is logged and recorded in the
/// summary; the remaining years still run.
///
/// # Errors
///
/// Returns an error only if the configuration or renderer is unusable.
pub fn run(config: &RunConfig, years: &[YearId]) -> Result<RunSummary> {
    config.validate()?;
    let renderer = build_renderer(config)?;
    let mut summary = RunSummary::default();

    for &year in years {
        let mut year_ledger = StatsLedger::new();
        match process_year(config, &renderer, year, &mut year_ledger) {
            Ok(report) => {
                summary.ledger.merge(year_ledger);
                summary.processed.push(report);
                info!(year = %year.label(), "Completed processing");
            }
            Err(e) => {
                error!(
                    year = %year.label(),
                    path = %config.locator().path_for(year).display(),
                    error = %e,
                    "year aborted"
                );
                summary.failures.push((year, e));
            }
        }
    }

    Ok(summary)
}
