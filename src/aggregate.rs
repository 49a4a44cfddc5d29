//! Seasonal composites with sentinel masking
//!
//! Daily slices are subset to the region, values at or above the missing
//! threshold are masked out, the rest are divided by the unit-conversion
//! factor, and the survivors are averaged per cell. A cell that never has a
//! valid value stays missing in the composite; it is never averaged to zero
//! and never carries NaN into later arithmetic.

use crate::dataset::FieldSource;
use crate::errors::{Result, SeaVisError};
use crate::region::RegionSubset;
use ndarray::{Array2, ArrayView2, ArrayView3, Axis, Zip};
use tracing::debug;

/// Values at or above this magnitude are fill values in the source files
pub const DEFAULT_MISSING_THRESHOLD: f64 = 1.0e30;

/// A 2-D grid where every cell is either a value or explicitly missing
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedGrid {
    values: Array2<f64>,
    valid: Array2<bool>,
}

impl MaskedGrid {
    /// Pair values with a validity mask.
    ///
    /// # Errors
    ///
    /// Returns an error if the two arrays differ in shape.
    pub fn new(values: Array2<f64>, valid: Array2<bool>) -> Result<Self> {
        if values.dim() != valid.dim() {
            return Err(SeaVisError::Generic(format!(
                "mask shape {:?} does not match value shape {:?}",
                valid.dim(),
                values.dim()
            )));
        }
        let values = Zip::from(&values)
            .and(&valid)
            .map_collect(|&v, &ok| if ok { v } else { f64::NAN });
        Ok(Self { values, valid })
    }

    /// Every cell valid and equal to `value`
    pub fn filled(shape: (usize, usize), value: f64) -> Self {
        Self {
            values: Array2::from_elem(shape, value),
            valid: Array2::from_elem(shape, true),
        }
    }

    /// Build from optional cells; `None` becomes missing
    pub fn from_options(cells: &Array2<Option<f64>>) -> Self {
        Self {
            values: cells.mapv(|c| c.unwrap_or(f64::NAN)),
            valid: cells.mapv(|c| c.is_some()),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        match self.valid.get((row, col)) {
            Some(true) => self.values.get((row, col)).copied(),
            _ => None,
        }
    }

    /// Raw values; missing cells hold NaN
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn valid(&self) -> &Array2<bool> {
        &self.valid
    }

    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&ok| ok).count()
    }

    pub fn is_all_missing(&self) -> bool {
        self.valid_count() == 0
    }

    /// Smallest and largest valid value, or `None` if every cell is missing
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.valid_values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .zip(self.valid.iter())
            .filter(|&(_, &ok)| ok)
            .map(|(&v, _)| v)
    }

    /// Combine two grids cell by cell; missing in either input is missing
    ///
    /// # Errors
    ///
    /// Returns an error if the grids differ in shape.
    pub fn zip_with<F>(&self, other: &MaskedGrid, f: F) -> Result<MaskedGrid>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.dim() != other.dim() {
            return Err(SeaVisError::Generic(format!(
                "cannot combine grids of shape {:?} and {:?}",
                self.dim(),
                other.dim()
            )));
        }

        let valid = Zip::from(&self.valid)
            .and(&other.valid)
            .map_collect(|&a, &b| a && b);
        let values = Zip::from(&self.values)
            .and(&other.values)
            .and(&valid)
            .map_collect(|&a, &b, &ok| if ok { f(a, b) } else { f64::NAN });

        Ok(MaskedGrid { values, valid })
    }
}

/// Running per-cell sum and count over a season's days
struct MeanAccumulator {
    sum: Array2<f64>,
    count: Array2<u32>,
}

impl MeanAccumulator {
    fn new(shape: (usize, usize)) -> Self {
        Self {
            sum: Array2::zeros(shape),
            count: Array2::zeros(shape),
        }
    }

    fn add(&mut self, slice: ArrayView2<'_, f32>, threshold: f64, divisor: f64) {
        Zip::from(&mut self.sum)
            .and(&mut self.count)
            .and(&slice)
            .par_for_each(|sum, count, &raw| {
                let value = f64::from(raw);
                if value.is_finite() && value < threshold {
                    *sum += value / divisor;
                    *count += 1;
                }
            });
    }

    fn finish(self) -> MaskedGrid {
        let valid = self.count.mapv(|c| c > 0);
        let values = Zip::from(&self.sum)
            .and(&self.count)
            .map_collect(|&s, &c| if c > 0 { s / f64::from(c) } else { f64::NAN });
        MaskedGrid { values, valid }
    }
}

/// Masked time-averaging with a unit-conversion divisor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalAggregator {
    pub missing_threshold: f64,
    pub divisor: f64,
}

impl SeasonalAggregator {
    pub fn new(missing_threshold: f64, divisor: f64) -> Self {
        Self {
            missing_threshold,
            divisor,
        }
    }

    /// Mask fill values in one slice and apply the unit conversion
    pub fn mask_and_scale(&self, slice: ArrayView2<'_, f32>) -> MaskedGrid {
        let mut acc = MeanAccumulator::new(slice.dim());
        acc.add(slice, self.missing_threshold, self.divisor);
        acc.finish()
    }

    /// Mean over axis 0 of a `(day, lat, lon)` stack, ignoring masked entries
    pub fn masked_mean(&self, stack: ArrayView3<'_, f32>) -> MaskedGrid {
        let (_, ny, nx) = stack.dim();
        let mut acc = MeanAccumulator::new((ny, nx));
        for day in stack.axis_iter(Axis(0)) {
            acc.add(day, self.missing_threshold, self.divisor);
        }
        acc.finish()
    }

    /// Seasonal composite of `variable` over `days`, restricted to `region`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeason` if `days` is empty, or any error raised while
    /// reading a daily slice.
    pub fn composite<S>(
        &self,
        source: &S,
        variable: &str,
        days: &[usize],
        region: &RegionSubset,
    ) -> Result<MaskedGrid>
    where
        S: FieldSource + ?Sized,
    {
        if days.is_empty() {
            return Err(SeaVisError::InvalidSeason(format!(
                "no days selected for '{variable}'"
            )));
        }

        let mut acc = MeanAccumulator::new(region.shape());
        for &day in days {
            let full = source.day_slice(variable, day)?;
            let subset = region.apply(full.view());
            acc.add(subset.view(), self.missing_threshold, self.divisor);
        }

        let composite = acc.finish();
        debug!(
            variable,
            days = days.len(),
            valid_cells = composite.valid_count(),
            "computed composite"
        );
        Ok(composite)
    }
}

impl Default for SeasonalAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_THRESHOLD, 1.0)
    }
}

/// Sign with `sign(0) == 0`
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `sqrt(u² + v²) · sign(u) · sign(v)`.
///
/// Not a true magnitude: cells where the components disagree in sign come out
/// negative, and cells with a zero component come out zero.
///
/// # Errors
///
/// Returns an error if the component grids differ in shape.
pub fn signed_magnitude(u: &MaskedGrid, v: &MaskedGrid) -> Result<MaskedGrid> {
    u.zip_with(v, |a, b| a.hypot(b) * sign(a) * sign(b))
}

/// Euclidean magnitude of the two components
///
/// # Errors
///
/// Returns an error if the component grids differ in shape.
pub fn magnitude(u: &MaskedGrid, v: &MaskedGrid) -> Result<MaskedGrid> {
    u.zip_with(v, f64::hypot)
}

/// Percentile `q` (0–100) of the valid cells, linearly interpolated between
/// the two nearest ranks. `None` when no cell is valid.
pub fn percentile(grid: &MaskedGrid, q: f64) -> Option<f64> {
    let mut values: Vec<f64> = grid.valid_values().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (values.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * weight)
}
