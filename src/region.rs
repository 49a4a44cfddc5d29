//! Regional subsetting of lat/lon grids
//!
//! The bounding box is applied to each axis independently, the same way an
//! outer-product index (`ix_`) selection works: every selected latitude row is
//! combined with every selected longitude column.

use crate::errors::{Result, SeaVisError};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Inclusive latitude/longitude rectangle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub const fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// 5–30 °N, 75–100 °E
    pub const fn bay_of_bengal() -> Self {
        Self::new(5.0, 30.0, 75.0, 100.0)
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::bay_of_bengal()
    }
}

/// Indices of all coordinates with `lower <= value <= upper`, in array order
pub fn axis_indices(coords: &[f64], lower: f64, upper: f64) -> Vec<usize> {
    coords
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value >= lower && value <= upper)
        .map(|(i, _)| i)
        .collect()
}

/// Index lists and subset coordinates for one bounding box on one grid
#[derive(Debug, Clone)]
pub struct RegionSubset {
    lat_indices: Vec<usize>,
    lon_indices: Vec<usize>,
    lat: Array1<f64>,
    lon: Array1<f64>,
}

impl RegionSubset {
    /// Resolve `bbox` against the grid's coordinate arrays.
    ///
    /// # Errors
    ///
    /// Returns `EmptyRegion` naming the first axis on which no coordinate
    /// falls inside the bounds.
    pub fn new(lat: &[f64], lon: &[f64], bbox: &BoundingBox) -> Result<Self> {
        let lat_indices = axis_indices(lat, bbox.lat_min, bbox.lat_max);
        if lat_indices.is_empty() {
            return Err(SeaVisError::EmptyRegion {
                axis: "latitude",
                lower: bbox.lat_min,
                upper: bbox.lat_max,
            });
        }

        let lon_indices = axis_indices(lon, bbox.lon_min, bbox.lon_max);
        if lon_indices.is_empty() {
            return Err(SeaVisError::EmptyRegion {
                axis: "longitude",
                lower: bbox.lon_min,
                upper: bbox.lon_max,
            });
        }

        let lat = lat_indices.iter().map(|&i| lat[i]).collect();
        let lon = lon_indices.iter().map(|&i| lon[i]).collect();

        Ok(Self {
            lat_indices,
            lon_indices,
            lat,
            lon,
        })
    }

    pub fn lat_indices(&self) -> &[usize] {
        &self.lat_indices
    }

    pub fn lon_indices(&self) -> &[usize] {
        &self.lon_indices
    }

    /// Latitudes of the selected rows
    pub fn lat(&self) -> &Array1<f64> {
        &self.lat
    }

    /// Longitudes of the selected columns
    pub fn lon(&self) -> &Array1<f64> {
        &self.lon
    }

    /// (rows, columns) of every subset slice
    pub fn shape(&self) -> (usize, usize) {
        (self.lat_indices.len(), self.lon_indices.len())
    }

    /// Restrict a full `(lat, lon)` slice to the region
    pub fn apply(&self, slice: ArrayView2<'_, f32>) -> Array2<f32> {
        slice
            .select(Axis(0), &self.lat_indices)
            .select(Axis(1), &self.lon_indices)
    }
}
