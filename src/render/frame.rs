//! Plate carrée placement of a bounding box inside the image

use crate::region::BoundingBox;

/// Pixel rectangle holding the map, with equal degrees per pixel on both axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    pub extent: BoundingBox,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl MapFrame {
    /// Fit `extent` into the image minus the given margins, preserving aspect
    pub fn fit(
        extent: BoundingBox,
        image_width: u32,
        image_height: u32,
        margins: Margins,
    ) -> Self {
        let avail_w = (image_width as f32 - margins.left - margins.right).max(1.0);
        let avail_h = (image_height as f32 - margins.top - margins.bottom).max(1.0);

        let lon_span = extent.lon_span().max(f64::EPSILON) as f32;
        let lat_span = extent.lat_span().max(f64::EPSILON) as f32;
        let deg_per_px = (lon_span / avail_w).max(lat_span / avail_h);

        let width = lon_span / deg_per_px;
        let height = lat_span / deg_per_px;

        Self {
            extent,
            left: margins.left + (avail_w - width) / 2.0,
            top: margins.top + (avail_h - height) / 2.0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f32, f32) {
        let fx = (lon - self.extent.lon_min) / self.extent.lon_span();
        let fy = (self.extent.lat_max - lat) / self.extent.lat_span();
        (
            self.left + fx as f32 * self.width,
            self.top + fy as f32 * self.height,
        )
    }

    pub fn to_geo(&self, x: f32, y: f32) -> (f64, f64) {
        let fx = f64::from((x - self.left) / self.width);
        let fy = f64::from((y - self.top) / self.height);
        (
            self.extent.lon_min + fx * self.extent.lon_span(),
            self.extent.lat_max - fy * self.extent.lat_span(),
        )
    }
}

/// Space reserved around the map for title, labels and colorbar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    /// Margins proportional to the image size
    pub fn for_image(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            left: w * 0.09,
            right: w * 0.17,
            top: h * 0.08,
            bottom: h * 0.07,
        }
    }
}

/// Fractional index of `value` along a monotonic coordinate array.
///
/// Values within half a spacing beyond either end are clamped to that end;
/// anything further out is `None`.
pub fn fractional_index(coords: &[f64], value: f64) -> Option<f64> {
    let n = coords.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(0.0);
    }

    let ascending = coords[n - 1] >= coords[0];
    let (first, last) = (coords[0], coords[n - 1]);
    let half_first = (coords[1] - coords[0]).abs() / 2.0;
    let half_last = (coords[n - 1] - coords[n - 2]).abs() / 2.0;

    let before_start = if ascending { value < first } else { value > first };
    let after_end = if ascending { value > last } else { value < last };

    if before_start {
        return ((value - first).abs() <= half_first).then_some(0.0);
    }
    if after_end {
        return ((value - last).abs() <= half_last).then_some((n - 1) as f64);
    }

    for i in 0..n - 1 {
        let (a, b) = (coords[i], coords[i + 1]);
        let inside = if ascending {
            value >= a && value <= b
        } else {
            value <= a && value >= b
        };
        if inside {
            let span = b - a;
            let t = if span == 0.0 { 0.0 } else { (value - a) / span };
            return Some(i as f64 + t);
        }
    }
    None
}
