//! SeaVis: seasonal wind composites from yearly NetCDF files
//!
//! For every year in a run, SeaVis opens the year's combined NetCDF file,
//! cuts out a latitude/longitude box, averages the daily wind components over
//! each season, renders a map of the composite, and records the extremes of
//! the colored field. Once every year is done, the recorded extremes are
//! turned into a per-season report of cross-year means and deviations.
//!
//! ## Module Organization
//!
//! - [`dataset`]: locating and reading year files
//! - [`region`]: bounding-box subsetting of the grid
//! - [`season`]: seasons as named day-of-year index sets
//! - [`aggregate`]: masked seasonal means and derived magnitudes
//! - [`render`]: map images with colorbar, quiver arrows and land mask
//! - [`stats`]: cross-year variation ledger and report
//! - [`pipeline`]: the year-by-year driver
//! - [`config`]: run configuration
//! - [`metadata`]: dataset inspection
//! - [`parallel`]: parallel processing configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sea_vis::prelude::*;
//!
//! let config = RunConfig::default();
//! let years: Vec<YearId> = (11..=22).map(YearId).collect();
//! let summary = sea_vis::pipeline::run(&config, &years).unwrap();
//! for line in format_report(&summary.ledger.summarize().unwrap()) {
//!     println!("{line}");
//! }
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod metadata;
pub mod parallel;
pub mod pipeline;
pub mod region;
pub mod render;
pub mod season;
pub mod stats;

pub use errors::*;

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::aggregate::{MaskedGrid, SeasonalAggregator};
    pub use crate::config::{ColorField, RunConfig};
    pub use crate::dataset::{FieldSource, InMemoryFields, YearDataset, YearId};
    pub use crate::errors::{Result, SeaVisError};
    pub use crate::parallel::ParallelConfig;
    pub use crate::region::{BoundingBox, RegionSubset};
    pub use crate::render::{MapRenderer, RenderStyle};
    pub use crate::season::{Season, SeasonSet};
    pub use crate::stats::{format_report, StatsLedger};
}
