//! Per-year gridded datasets
//!
//! This module locates the NetCDF file for a year, checks that its wind (and
//! optional scalar) fields line up with the coordinate arrays, and hands out
//! one `(lat, lon)` slice per time step. The file handle stays open for as
//! long as the [`YearDataset`] lives, which is the span of one year's seasons.

use crate::errors::{Result, SeaVisError};
use ndarray::{Array2, Array3, Axis};
use netcdf::File;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Year identifier as it appears in the on-disk naming convention.
///
/// Short ids (`6`, `11`) are expanded to full years for labels; anything at or
/// above 100 is assumed to already be a full year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearId(pub u32);

impl YearId {
    /// Full calendar year used in titles, filenames and the variation log
    #[must_use]
    pub fn label(self) -> String {
        match self.0 {
            id if id < 10 => format!("200{id}"),
            id if id < 100 => format!("20{id}"),
            id => id.to_string(),
        }
    }
}

impl fmt::Display for YearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names of the variables read from each year file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableNames {
    pub lat: String,
    pub lon: String,
    pub u: String,
    pub v: String,
    /// Optional scalar field (e.g. pressure) used as the color layer
    pub scalar: Option<String>,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            lat: "lat".to_string(),
            lon: "lon".to_string(),
            u: "un".to_string(),
            v: "vn".to_string(),
            scalar: None,
        }
    }
}

impl VariableNames {
    /// Every `(time, lat, lon)` field this run needs
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = vec![self.u.as_str(), self.v.as_str()];
        if let Some(scalar) = &self.scalar {
            fields.push(scalar.as_str());
        }
        fields
    }
}

/// Resolves year ids to dataset paths through a `{year}` template
#[derive(Debug, Clone)]
pub struct DatasetLocator {
    root: PathBuf,
    template: String,
}

impl DatasetLocator {
    pub const DEFAULT_TEMPLATE: &'static str = "Year_{year}/year_{year}_combined.nc";

    pub fn new(root: impl Into<PathBuf>, template: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            template: template.into(),
        }
    }

    pub fn path_for(&self, year: YearId) -> PathBuf {
        let relative = self.template.replace("{year}", &year.to_string());
        self.root.join(relative)
    }
}

impl Default for DatasetLocator {
    fn default() -> Self {
        Self::new(".", Self::DEFAULT_TEMPLATE)
    }
}

/// Anything that can serve daily `(lat, lon)` slices of named fields
pub trait FieldSource {
    /// Latitude coordinate values, one per grid row
    fn lat(&self) -> &[f64];

    /// Longitude coordinate values, one per grid column
    fn lon(&self) -> &[f64];

    /// Number of time steps shared by all fields
    fn time_len(&self) -> usize;

    /// Read the full-grid slice of `variable` at time index `t`
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unknown, `t` is out of range, or
    /// the underlying read fails.
    fn day_slice(&self, variable: &str, t: usize) -> Result<Array2<f32>>;
}

/// An open year file with validated coordinates
pub struct YearDataset {
    file: File,
    path: PathBuf,
    lat: Vec<f64>,
    lon: Vec<f64>,
    time_len: usize,
}

impl YearDataset {
    /// Locate and open the dataset for `year`.
    ///
    /// # Errors
    ///
    /// Returns `DatasetNotFound` if no file exists at the resolved path, and
    /// `VariableNotFound` or `ShapeMismatch` if the file does not carry the
    /// configured variables on a consistent grid.
    pub fn open(locator: &DatasetLocator, year: YearId, names: &VariableNames) -> Result<Self> {
        let path = locator.path_for(year);
        Self::open_path(&path, year, names)
    }

    /// Open a dataset from an explicit path
    ///
    /// # Errors
    ///
    /// Same as [`YearDataset::open`].
    pub fn open_path(path: &Path, year: YearId, names: &VariableNames) -> Result<Self> {
        if !path.is_file() {
            return Err(SeaVisError::DatasetNotFound {
                year: year.label(),
                path: path.to_path_buf(),
            });
        }

        let file = netcdf::open(path)?;
        let lat = read_coordinate(&file, &names.lat)?;
        let lon = read_coordinate(&file, &names.lon)?;

        let mut time_len: Option<usize> = None;
        for field in names.fields() {
            let var = file
                .variable(field)
                .ok_or_else(|| SeaVisError::VariableNotFound {
                    var: field.to_string(),
                })?;
            let shape: Vec<usize> = var.dimensions().iter().map(netcdf::Dimension::len).collect();

            let consistent = shape.len() == 3
                && shape[1] == lat.len()
                && shape[2] == lon.len()
                && time_len.map_or(true, |t| t == shape[0]);
            if !consistent {
                return Err(SeaVisError::ShapeMismatch {
                    var: field.to_string(),
                    found: shape,
                    lat_len: lat.len(),
                    lon_len: lon.len(),
                });
            }
            time_len = Some(shape[0]);
        }

        let time_len = time_len.unwrap_or(0);
        debug!(
            path = %path.display(),
            time_len,
            lat_len = lat.len(),
            lon_len = lon.len(),
            "opened year dataset"
        );

        Ok(Self {
            file,
            path: path.to_path_buf(),
            lat,
            lon,
            time_len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FieldSource for YearDataset {
    fn lat(&self) -> &[f64] {
        &self.lat
    }

    fn lon(&self) -> &[f64] {
        &self.lon
    }

    fn time_len(&self) -> usize {
        self.time_len
    }

    fn day_slice(&self, variable: &str, t: usize) -> Result<Array2<f32>> {
        if t >= self.time_len {
            return Err(SeaVisError::InvalidSeason(format!(
                "time index {t} is outside {} ({} steps)",
                self.path.display(),
                self.time_len
            )));
        }

        let var = self
            .file
            .variable(variable)
            .ok_or_else(|| SeaVisError::VariableNotFound {
                var: variable.to_string(),
            })?;

        let (nlat, nlon) = (self.lat.len(), self.lon.len());
        let values = var.get_values::<f32, _>((t..t + 1, 0..nlat, 0..nlon))?;
        Ok(Array2::from_shape_vec((nlat, nlon), values)?)
    }
}

/// Fields held in memory, for synthetic runs and tests
#[derive(Debug, Clone)]
pub struct InMemoryFields {
    lat: Vec<f64>,
    lon: Vec<f64>,
    time_len: usize,
    fields: HashMap<String, Array3<f32>>,
}

impl InMemoryFields {
    pub fn new(lat: Vec<f64>, lon: Vec<f64>, time_len: usize) -> Self {
        Self {
            lat,
            lon,
            time_len,
            fields: HashMap::new(),
        }
    }

    /// Add a `(time, lat, lon)` field.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the array does not match the grid.
    pub fn with_field(mut self, name: impl Into<String>, data: Array3<f32>) -> Result<Self> {
        let name = name.into();
        let (t, ny, nx) = data.dim();
        if t != self.time_len || ny != self.lat.len() || nx != self.lon.len() {
            return Err(SeaVisError::ShapeMismatch {
                var: name,
                found: data.shape().to_vec(),
                lat_len: self.lat.len(),
                lon_len: self.lon.len(),
            });
        }
        self.fields.insert(name, data);
        Ok(self)
    }
}

impl FieldSource for InMemoryFields {
    fn lat(&self) -> &[f64] {
        &self.lat
    }

    fn lon(&self) -> &[f64] {
        &self.lon
    }

    fn time_len(&self) -> usize {
        self.time_len
    }

    fn day_slice(&self, variable: &str, t: usize) -> Result<Array2<f32>> {
        let field = self
            .fields
            .get(variable)
            .ok_or_else(|| SeaVisError::VariableNotFound {
                var: variable.to_string(),
            })?;
        if t >= self.time_len {
            return Err(SeaVisError::InvalidSeason(format!(
                "time index {t} is outside the {} in-memory steps",
                self.time_len
            )));
        }
        Ok(field.index_axis(Axis(0), t).to_owned())
    }
}

fn read_coordinate(file: &File, name: &str) -> Result<Vec<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| SeaVisError::VariableNotFound {
            var: name.to_string(),
        })?;
    Ok(var.get_values::<f64, _>(..)?)
}
