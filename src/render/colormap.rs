//! Diverging color scale with distinct out-of-range and missing colors

use crate::errors::{Result, SeaVisError};
use image::Rgba;

/// Red/blue diverging ramp, low values blue and high values red
const RD_BU_R: [[u8; 3]; 11] = [
    [5, 48, 97],
    [33, 102, 172],
    [67, 147, 195],
    [146, 197, 222],
    [209, 229, 240],
    [247, 247, 247],
    [253, 219, 199],
    [244, 165, 130],
    [214, 96, 77],
    [178, 24, 43],
    [103, 0, 31],
];

/// Parse `#RRGGBB` into an opaque color
pub fn parse_hex(hex: &str) -> Result<Rgba<u8>> {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };

    match (digits.len(), channel(0..2), channel(2..4), channel(4..6)) {
        (6, Some(r), Some(g), Some(b)) => Ok(Rgba([r, g, b, 255])),
        _ => Err(SeaVisError::InvalidConfig(format!("invalid color '{hex}'"))),
    }
}

/// Sample the ramp at `t` in `[0, 1]`
pub fn ramp(t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (RD_BU_R.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(RD_BU_R.len() - 1);
    let frac = scaled - lower as f64;

    let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - frac) + f64::from(b) * frac).round() as u8;
    let (a, b) = (RD_BU_R[lower], RD_BU_R[upper]);
    Rgba([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 255])
}

/// Maps field values to colors between fixed bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub vmin: f64,
    pub vmax: f64,
    pub over: Rgba<u8>,
    pub under: Rgba<u8>,
    pub missing: Rgba<u8>,
}

impl ColorScale {
    /// Position of `value` inside the bounds, `None` outside them
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !(self.vmin..=self.vmax).contains(&value) {
            return None;
        }
        let span = self.vmax - self.vmin;
        if span <= 0.0 {
            return Some(0.5);
        }
        Some((value - self.vmin) / span)
    }

    pub fn color_for(&self, value: Option<f64>) -> Rgba<u8> {
        match value {
            None => self.missing,
            Some(v) if v.is_nan() => self.missing,
            Some(v) if v > self.vmax => self.over,
            Some(v) if v < self.vmin => self.under,
            Some(v) => ramp(self.normalize(v).unwrap_or(0.5)),
        }
    }

    /// Evenly spaced tick values from `vmin` to `vmax`
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.vmin];
        }
        let step = (self.vmax - self.vmin) / (count - 1) as f64;
        (0..count).map(|i| self.vmin + step * i as f64).collect()
    }
}
