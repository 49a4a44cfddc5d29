//! Coastline polylines read from a plain-text `lon lat` file
//!
//! The format is the one GMT and most coastline extractors emit: one point
//! per line, with segments separated by a line starting with `>` or by a blank
//! line. Lines starting with `#` are comments.

use crate::errors::{Result, SeaVisError};
use crate::region::BoundingBox;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coastline {
    segments: Vec<Vec<(f64, f64)>>,
}

impl Coastline {
    /// Read a coastline file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or `InvalidConfig`
    /// naming the line number of the first malformed point.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            SeaVisError::InvalidConfig(msg) => {
                SeaVisError::InvalidConfig(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parse coastline text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a point line that does not hold two numbers.
    pub fn parse(content: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() || line.starts_with('>') {
                if current.len() > 1 {
                    segments.push(std::mem::take(&mut current));
                }
                current.clear();
                continue;
            }

            let mut fields = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .map(str::parse::<f64>);
            match (fields.next(), fields.next()) {
                (Some(Ok(lon)), Some(Ok(lat))) => current.push((lon, lat)),
                _ => {
                    return Err(SeaVisError::InvalidConfig(format!(
                        "line {}: expected 'lon lat', found '{line}'",
                        line_no + 1
                    )))
                }
            }
        }
        if current.len() > 1 {
            segments.push(current);
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Vec<(f64, f64)>] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Clip the segment `a`–`b` to `bbox` (Liang–Barsky); `None` if fully outside
pub fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    bbox: &BoundingBox,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let edges = [
        (-dx, a.0 - bbox.lon_min),
        (dx, bbox.lon_max - a.0),
        (-dy, a.1 - bbox.lat_min),
        (dy, bbox.lat_max - a.1),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}
