//! Run configuration
//!
//! Every tunable of a run lives in [`RunConfig`]. The defaults reproduce the
//! Bay of Bengal satellite-wind run; a JSON file can override any subset of
//! fields, and command-line flags override the file.

use crate::aggregate::{SeasonalAggregator, DEFAULT_MISSING_THRESHOLD};
use crate::dataset::{DatasetLocator, VariableNames};
use crate::errors::{Result, SeaVisError};
use crate::region::BoundingBox;
use crate::render::RenderStyle;
use crate::season::SeasonSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which quantity is drawn as the color layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorField {
    /// `|w| · sign(u) · sign(v)` of the composite wind
    SignedMagnitude,
    /// `|w|` of the composite wind
    Magnitude,
    /// Composite of the configured scalar variable
    Scalar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory the path template is resolved against
    pub data_root: PathBuf,
    /// Dataset path with `{year}` placeholders
    pub path_template: String,
    pub variables: VariableNames,
    pub region: BoundingBox,
    pub seasons: SeasonSet,
    /// Values at or above this are treated as missing
    pub missing_threshold: f64,
    /// Divisor applied to the wind components before averaging
    pub conversion_divisor: f64,
    pub color_field: ColorField,
    /// Divisor applied to the scalar field before averaging
    pub scalar_divisor: f64,
    pub render: RenderStyle,
    pub font_path: Option<PathBuf>,
    pub coastline_path: Option<PathBuf>,
    /// Root for the per-season image directories
    pub output_dir: PathBuf,
    /// Directory for the variation log
    pub log_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("."),
            path_template: DatasetLocator::DEFAULT_TEMPLATE.to_string(),
            variables: VariableNames::default(),
            region: BoundingBox::bay_of_bengal(),
            seasons: SeasonSet::quarterly(),
            missing_threshold: DEFAULT_MISSING_THRESHOLD,
            conversion_divisor: 100.0,
            color_field: ColorField::SignedMagnitude,
            scalar_divisor: 980.0,
            render: RenderStyle::default(),
            font_path: None,
            coastline_path: None,
            output_dir: PathBuf::from("Image_output"),
            log_dir: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    /// Load a JSON configuration; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or `ConfigError`
    /// if it is not valid JSON for this structure.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check settings that would otherwise fail halfway through a run.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for inverted region bounds, a zero or
    /// non-finite divisor, a missing scalar variable when the scalar color
    /// layer is selected, or an invalid render style.
    pub fn validate(&self) -> Result<()> {
        let r = &self.region;
        if r.lat_min > r.lat_max || r.lon_min > r.lon_max {
            return Err(SeaVisError::InvalidConfig(format!(
                "region bounds are inverted: lat [{}, {}], lon [{}, {}]",
                r.lat_min, r.lat_max, r.lon_min, r.lon_max
            )));
        }
        for divisor in [self.conversion_divisor, self.scalar_divisor] {
            if divisor == 0.0 || !divisor.is_finite() {
                return Err(SeaVisError::InvalidConfig(format!(
                    "unit conversion divisors must be finite and non-zero, found {divisor}"
                )));
            }
        }
        if self.color_field == ColorField::Scalar && self.variables.scalar.is_none() {
            return Err(SeaVisError::InvalidConfig(
                "color_field 'scalar' needs variables.scalar to name a variable".to_string(),
            ));
        }
        self.render.validate()
    }

    pub fn locator(&self) -> DatasetLocator {
        DatasetLocator::new(&self.data_root, &self.path_template)
    }

    pub fn wind_aggregator(&self) -> SeasonalAggregator {
        SeasonalAggregator::new(self.missing_threshold, self.conversion_divisor)
    }

    pub fn scalar_aggregator(&self) -> SeasonalAggregator {
        SeasonalAggregator::new(self.missing_threshold, self.scalar_divisor)
    }
}
