//! Map rendering for seasonal composites
//!
//! One raster per (season, year): a pseudocolor field clipped to fixed
//! bounds, missing cells painted as land with a black outline, optional
//! coastline polylines, dashed gridlines with degree labels, a down-sampled
//! arrow overlay, a colorbar with extension triangles, and a title.
//!
//! - [`colormap`]: value → color mapping with over/under/missing colors
//! - [`frame`]: plate carrée placement of the region in the image
//! - [`coastline`]: optional `lon lat` polyline files
//! - [`text`]: TrueType labels

pub mod coastline;
pub mod colormap;
pub mod frame;
pub mod text;

use crate::aggregate::{magnitude, percentile, MaskedGrid};
use crate::errors::{Result, SeaVisError};
use crate::region::BoundingBox;
use coastline::{clip_segment, Coastline};
use colormap::{parse_hex, ramp, ColorScale};
use frame::{fractional_index, MapFrame, Margins};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use text::{Anchor, FontBook};
use tracing::{debug, info};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GRID_GREY: Rgba<u8> = Rgba([166, 166, 166, 255]);

/// Finest gridline spacing accepted, in degrees
pub const MIN_GRID_STEP: f64 = 0.01;

/// Arrow overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuiverStyle {
    /// Draw an arrow every `stride` grid points on both axes
    pub stride: usize,
    /// Data units per plot width; larger values give shorter arrows
    pub scale: f64,
    /// Shaft width as a fraction of the plot width
    pub width_fraction: f64,
    /// Head width in multiples of the shaft width
    pub head_width: f64,
    /// Head length in multiples of the shaft width
    pub head_length: f64,
    /// Hide arrows whose magnitude is at or above this percentile
    pub percentile_cutoff: Option<f64>,
    pub color: String,
}

impl Default for QuiverStyle {
    fn default() -> Self {
        Self {
            stride: 8,
            scale: 30.0,
            width_fraction: 0.002,
            head_width: 3.0,
            head_length: 5.0,
            percentile_cutoff: None,
            color: "#000000".to_string(),
        }
    }
}

/// Everything about the look of a map that is fixed for a whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub width: u32,
    pub height: u32,
    pub vmin: f64,
    pub vmax: f64,
    /// Color for values outside `[vmin, vmax]`
    pub out_of_range_color: String,
    /// Color for cells with no data
    pub land_color: String,
    pub coast_color: String,
    pub colorbar_label: String,
    pub colorbar_ticks: usize,
    pub quiver: QuiverStyle,
    /// Gridline spacing in degrees
    pub grid_step: f64,
    pub title_prefix: String,
    pub region_name: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1600,
            vmin: -0.3,
            vmax: 0.3,
            out_of_range_color: "#D3D3D3".to_string(),
            land_color: "#FFFFFF".to_string(),
            coast_color: "#000000".to_string(),
            colorbar_label: "Wind Vector Magnitude (cm/s)".to_string(),
            colorbar_ticks: 5,
            quiver: QuiverStyle::default(),
            grid_step: 5.0,
            title_prefix: "Satellite".to_string(),
            region_name: "Bay of Bengal".to_string(),
        }
    }
}

impl RenderStyle {
    /// Check sizes, spacings and colors before anything is drawn.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty image, a quiver scale that is not
    /// a positive finite number, a negative, non-finite or too fine gridline
    /// step (zero turns gridlines off), or any error from
    /// [`RenderStyle::color_scale`].
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SeaVisError::InvalidConfig(format!(
                "image size must be non-zero, found {}x{}",
                self.width, self.height
            )));
        }
        let scale = self.quiver.scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SeaVisError::InvalidConfig(format!(
                "quiver scale must be a positive finite number, found {scale}"
            )));
        }
        let step = self.grid_step;
        if !step.is_finite() || step < 0.0 || (step > 0.0 && step < MIN_GRID_STEP) {
            return Err(SeaVisError::InvalidConfig(format!(
                "grid_step must be 0 or at least {MIN_GRID_STEP} degrees, found {step}"
            )));
        }
        self.color_scale()?;
        parse_hex(&self.coast_color)?;
        parse_hex(&self.quiver.color)?;
        Ok(())
    }

    /// Color scale for the pseudocolor layer.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed hex colors or inverted bounds.
    pub fn color_scale(&self) -> Result<ColorScale> {
        if self.vmin.is_nan() || self.vmax.is_nan() || self.vmin > self.vmax {
            return Err(SeaVisError::InvalidConfig(format!(
                "color bounds must satisfy vmin <= vmax, found vmin {} and vmax {}",
                self.vmin, self.vmax
            )));
        }
        let neutral = parse_hex(&self.out_of_range_color)?;
        Ok(ColorScale {
            vmin: self.vmin,
            vmax: self.vmax,
            over: neutral,
            under: neutral,
            missing: parse_hex(&self.land_color)?,
        })
    }

    pub fn title(&self, season: &str, year_label: &str) -> String {
        format!(
            "{} : {} {} ({})",
            self.title_prefix, season, year_label, self.region_name
        )
    }
}

/// Inputs for one map
pub struct PlotRequest<'a> {
    pub season: &'a str,
    pub year_label: &'a str,
    /// Latitudes of the composite rows
    pub lat: &'a [f64],
    /// Longitudes of the composite columns
    pub lon: &'a [f64],
    /// Field drawn as color
    pub color_field: &'a MaskedGrid,
    pub u: &'a MaskedGrid,
    pub v: &'a MaskedGrid,
}

/// `{output_dir}/{season}/{season}-{year}.png`
pub fn output_path(output_dir: &Path, season: &str, year_label: &str) -> PathBuf {
    output_dir
        .join(season)
        .join(format!("{season}-{year_label}.png"))
}

/// Draws composites onto rasters with a fixed style and map extent
pub struct MapRenderer {
    style: RenderStyle,
    extent: BoundingBox,
    scale: ColorScale,
    coast: Rgba<u8>,
    arrow: Rgba<u8>,
    fonts: FontBook,
    coastline: Option<Coastline>,
}

impl MapRenderer {
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `style` does not pass
    /// [`RenderStyle::validate`].
    pub fn new(style: RenderStyle, extent: BoundingBox, fonts: FontBook) -> Result<Self> {
        style.validate()?;
        Ok(Self {
            scale: style.color_scale()?,
            coast: parse_hex(&style.coast_color)?,
            arrow: parse_hex(&style.quiver.color)?,
            style,
            extent,
            fonts,
            coastline: None,
        })
    }

    pub fn with_coastline(mut self, coastline: Coastline) -> Self {
        self.coastline = Some(coastline);
        self
    }

    /// Render and write the map to its per-season path under `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the season directory cannot be created, and
    /// `Render` if the image cannot be encoded or written.
    pub fn save(&self, request: &PlotRequest<'_>, output_dir: &Path) -> Result<PathBuf> {
        let path = output_path(output_dir, request.season, request.year_label);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let img = self.render(request)?;
        img.save(&path).map_err(|source| SeaVisError::Render {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "saved plot");
        Ok(path)
    }

    /// Render the map into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the component grids do not match the coordinates.
    pub fn render(&self, request: &PlotRequest<'_>) -> Result<RgbaImage> {
        let expected = (request.lat.len(), request.lon.len());
        for grid in [request.color_field, request.u, request.v] {
            if grid.dim() != expected {
                return Err(SeaVisError::Generic(format!(
                    "grid shape {:?} does not match coordinates {:?}",
                    grid.dim(),
                    expected
                )));
            }
        }

        let (width, height) = (self.style.width, self.style.height);
        let mut img = RgbaImage::from_pixel(width, height, WHITE);
        let frame = MapFrame::fit(self.extent, width, height, Margins::for_image(width, height));

        self.draw_field(&mut img, &frame, request);
        self.draw_land_outline(&mut img, &frame, request);
        if let Some(coastline) = &self.coastline {
            self.draw_coastline(&mut img, &frame, coastline);
        }
        self.draw_gridlines(&mut img, &frame);
        self.draw_quiver(&mut img, &frame, request)?;
        draw_rect_outline(&mut img, &frame, BLACK, self.px(2.0));
        self.draw_colorbar(&mut img, &frame);

        let title = self.style.title(request.season, request.year_label);
        let size = self.px(40.0);
        self.fonts.draw(
            &mut img,
            &title,
            (frame.left + frame.width / 2.0) as i32,
            (frame.top - size * 1.8) as i32,
            size,
            Anchor::Center,
            BLACK,
        );

        Ok(img)
    }

    /// Pixel size scaled from a 1600-pixel-high reference image
    fn px(&self, reference: f32) -> f32 {
        reference * self.style.height as f32 / 1600.0
    }

    fn draw_field(&self, img: &mut RgbaImage, frame: &MapFrame, request: &PlotRequest<'_>) {
        let x0 = frame.left.floor().max(0.0) as u32;
        let x1 = (frame.right().ceil() as u32).min(img.width());
        let y0 = frame.top.floor().max(0.0) as u32;
        let y1 = (frame.bottom().ceil() as u32).min(img.height());

        let cols: Vec<Option<f64>> = (x0..x1)
            .map(|x| fractional_index(request.lon, frame.to_geo(x as f32 + 0.5, 0.0).0))
            .collect();
        let rows: Vec<Option<f64>> = (y0..y1)
            .map(|y| fractional_index(request.lat, frame.to_geo(0.0, y as f32 + 0.5).1))
            .collect();

        for (y, fy) in (y0..y1).zip(rows.iter()) {
            let Some(fy) = fy else { continue };
            for (x, fx) in (x0..x1).zip(cols.iter()) {
                let Some(fx) = fx else { continue };
                let value = sample_grid(request.color_field, *fy, *fx);
                img.put_pixel(x, y, self.scale.color_for(value));
            }
        }
    }

    fn draw_land_outline(&self, img: &mut RgbaImage, frame: &MapFrame, request: &PlotRequest<'_>) {
        let grid = request.color_field;
        let (ny, nx) = grid.dim();
        let lat_edges = cell_edges(request.lat);
        let lon_edges = cell_edges(request.lon);
        let width = self.px(4.0);
        let is_valid = |r: usize, c: usize| grid.get(r, c).is_some();

        let mut edges = Vec::new();
        for r in 0..ny {
            for c in 0..nx {
                if c + 1 < nx && is_valid(r, c) != is_valid(r, c + 1) {
                    let lon = lon_edges[c + 1];
                    edges.push(((lon, lat_edges[r]), (lon, lat_edges[r + 1])));
                }
                if r + 1 < ny && is_valid(r, c) != is_valid(r + 1, c) {
                    let lat = lat_edges[r + 1];
                    edges.push(((lon_edges[c], lat), (lon_edges[c + 1], lat)));
                }
            }
        }

        for (a, b) in edges {
            if let Some((a, b)) = clip_segment(a, b, &frame.extent) {
                draw_thick_line(img, frame.to_pixel(a.0, a.1), frame.to_pixel(b.0, b.1), width, self.coast);
            }
        }
    }

    fn draw_coastline(&self, img: &mut RgbaImage, frame: &MapFrame, coastline: &Coastline) {
        let width = self.px(4.0);
        for segment in coastline.segments() {
            for pair in segment.windows(2) {
                if let Some((a, b)) = clip_segment(pair[0], pair[1], &frame.extent) {
                    draw_thick_line(img, frame.to_pixel(a.0, a.1), frame.to_pixel(b.0, b.1), width, self.coast);
                }
            }
        }
    }

    fn draw_gridlines(&self, img: &mut RgbaImage, frame: &MapFrame) {
        let step = self.style.grid_step;
        if step <= 0.0 {
            return;
        }
        let extent = frame.extent;
        let line_width = self.px(3.0);
        let dash = (self.px(14.0), self.px(9.0));
        let label_size = self.px(32.0);

        for lon in grid_values(extent.lon_min, extent.lon_max, step) {
            let top = frame.to_pixel(lon, extent.lat_max);
            let bottom = frame.to_pixel(lon, extent.lat_min);
            draw_dashed_line(img, top, bottom, line_width, dash, GRID_GREY);
            self.fonts.draw(
                img,
                &format_lon(lon),
                bottom.0 as i32,
                (bottom.1 + self.px(10.0)) as i32,
                label_size,
                Anchor::Center,
                BLACK,
            );
        }

        for lat in grid_values(extent.lat_min, extent.lat_max, step) {
            let left = frame.to_pixel(extent.lon_min, lat);
            let right = frame.to_pixel(extent.lon_max, lat);
            draw_dashed_line(img, left, right, line_width, dash, GRID_GREY);
            let (_, text_h) = self.fonts.measure("0", label_size);
            self.fonts.draw(
                img,
                &format_lat(lat),
                (left.0 - self.px(12.0)) as i32,
                (left.1 - text_h as f32 / 2.0) as i32,
                label_size,
                Anchor::Right,
                BLACK,
            );
        }
    }

    fn draw_quiver(
        &self,
        img: &mut RgbaImage,
        frame: &MapFrame,
        request: &PlotRequest<'_>,
    ) -> Result<()> {
        let quiver = &self.style.quiver;
        let stride = quiver.stride.max(1);
        let speed = magnitude(request.u, request.v)?;
        let cutoff = quiver
            .percentile_cutoff
            .and_then(|q| percentile(&speed, q));

        let shaft = (quiver.width_fraction * f64::from(frame.width)).max(1.0) as f32;
        let head_w = shaft * quiver.head_width as f32;
        let head_l = shaft * quiver.head_length as f32;
        let (ny, nx) = speed.dim();
        let mut drawn = 0_usize;
        let mut skipped = 0_usize;

        for r in (0..ny).step_by(stride) {
            for c in (0..nx).step_by(stride) {
                let (Some(u), Some(v), Some(mag)) =
                    (request.u.get(r, c), request.v.get(r, c), speed.get(r, c))
                else {
                    continue;
                };
                if cutoff.is_some_and(|limit| mag >= limit) || mag <= 0.0 {
                    continue;
                }
                if !frame.extent.contains(request.lat[r], request.lon[c]) {
                    continue;
                }

                let tail = frame.to_pixel(request.lon[c], request.lat[r]);
                let length = (mag / quiver.scale * f64::from(frame.width)) as f32;
                let dir = ((u / mag) as f32, (-v / mag) as f32);
                // Arrows running off the raster are dropped whole
                let tip = (tail.0 + dir.0 * length, tail.1 + dir.1 * length);
                if !length.is_finite() || !inside_image(img, tip) {
                    skipped += 1;
                    continue;
                }
                draw_arrow(img, tail, dir, length, shaft, head_w, head_l, self.arrow);
                drawn += 1;
            }
        }

        debug!(arrows = drawn, skipped, stride, "drew quiver overlay");
        Ok(())
    }

    fn draw_colorbar(&self, img: &mut RgbaImage, frame: &MapFrame) {
        let w = self.style.width as f32;
        let bar_w = w * 0.025;
        let tri = bar_w * 1.2;
        let x0 = frame.right() + w * 0.03;
        let top = frame.top + frame.height * 0.1 + tri;
        let bar_h = frame.height * 0.8 - 2.0 * tri;
        if bar_h <= 1.0 {
            return;
        }

        for dy in 0..bar_h.round() as u32 {
            let t = 1.0 - (f64::from(dy) + 0.5) / f64::from(bar_h);
            let color = ramp(t);
            let y = top + dy as f32;
            draw_line_segment_mut(img, (x0, y), (x0 + bar_w, y), color);
        }

        let bottom = top + bar_h;
        fill_polygon(
            img,
            &[(x0, top), (x0 + bar_w / 2.0, top - tri), (x0 + bar_w, top)],
            self.scale.over,
        );
        fill_polygon(
            img,
            &[(x0, bottom), (x0 + bar_w, bottom), (x0 + bar_w / 2.0, bottom + tri)],
            self.scale.under,
        );

        let outline = [
            (x0, top),
            (x0 + bar_w / 2.0, top - tri),
            (x0 + bar_w, top),
            (x0 + bar_w, bottom),
            (x0 + bar_w / 2.0, bottom + tri),
            (x0, bottom),
            (x0, top),
        ];
        for pair in outline.windows(2) {
            draw_thick_line(img, pair[0], pair[1], self.px(2.0), BLACK);
        }

        let tick_size = self.px(28.0);
        let (_, text_h) = self.fonts.measure("0", tick_size);
        for value in self.scale.ticks(self.style.colorbar_ticks) {
            let t = self.scale.normalize(value).unwrap_or(0.0) as f32;
            let y = bottom - t * bar_h;
            draw_thick_line(img, (x0 + bar_w, y), (x0 + bar_w + self.px(10.0), y), self.px(2.0), BLACK);
            self.fonts.draw(
                img,
                &format!("{value:.2}"),
                (x0 + bar_w + self.px(16.0)) as i32,
                (y - text_h as f32 / 2.0) as i32,
                tick_size,
                Anchor::Left,
                BLACK,
            );
        }

        self.fonts.draw_vertical(
            img,
            &self.style.colorbar_label,
            (x0 + bar_w + w * 0.075) as i32,
            (top + bar_h / 2.0) as i32,
            self.px(30.0),
            BLACK,
        );
    }
}

/// Bilinear interpolation where all four neighbours are valid, nearest cell otherwise
fn sample_grid(grid: &MaskedGrid, fy: f64, fx: f64) -> Option<f64> {
    let (ny, nx) = grid.dim();
    if ny == 0 || nx == 0 {
        return None;
    }
    let r0 = (fy.floor().max(0.0) as usize).min(ny - 1);
    let c0 = (fx.floor().max(0.0) as usize).min(nx - 1);
    let r1 = (r0 + 1).min(ny - 1);
    let c1 = (c0 + 1).min(nx - 1);
    let (ty, tx) = (fy - r0 as f64, fx - c0 as f64);

    match (grid.get(r0, c0), grid.get(r0, c1), grid.get(r1, c0), grid.get(r1, c1)) {
        (Some(a), Some(b), Some(c), Some(d)) => {
            let top = a + (b - a) * tx;
            let bottom = c + (d - c) * tx;
            Some(top + (bottom - top) * ty)
        }
        _ => {
            let r = (fy.round().max(0.0) as usize).min(ny - 1);
            let c = (fx.round().max(0.0) as usize).min(nx - 1);
            grid.get(r, c)
        }
    }
}

fn inside_image(img: &RgbaImage, (x, y): (f32, f32)) -> bool {
    x >= 0.0 && y >= 0.0 && x <= img.width() as f32 && y <= img.height() as f32
}

/// Cell boundaries halfway between neighbouring coordinates, extended at the ends
fn cell_edges(coords: &[f64]) -> Vec<f64> {
    match coords.len() {
        0 => Vec::new(),
        1 => vec![coords[0] - 0.5, coords[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(coords[0] - (coords[1] - coords[0]) / 2.0);
            edges.extend(coords.windows(2).map(|w| (w[0] + w[1]) / 2.0));
            edges.push(coords[n - 1] + (coords[n - 1] - coords[n - 2]) / 2.0);
            edges
        }
    }
}

/// Multiples of `step` inside `[lower, upper]`
fn grid_values(lower: f64, upper: f64, step: f64) -> Vec<f64> {
    let first = (lower / step).ceil() as i64;
    let last = (upper / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn format_degrees(value: f64) -> String {
    let magnitude = value.abs();
    if (magnitude - magnitude.round()).abs() < 1e-9 {
        format!("{magnitude:.0}°")
    } else {
        format!("{magnitude}°")
    }
}

pub fn format_lon(lon: f64) -> String {
    match lon {
        l if l > 0.0 => format!("{}E", format_degrees(l)),
        l if l < 0.0 => format!("{}W", format_degrees(l)),
        _ => "0°".to_string(),
    }
}

pub fn format_lat(lat: f64) -> String {
    match lat {
        l if l > 0.0 => format!("{}N", format_degrees(l)),
        l if l < 0.0 => format!("{}S", format_degrees(l)),
        _ => "0°".to_string(),
    }
}

fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>) {
    let mut poly: Vec<Point<i32>> = points
        .iter()
        .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
        .collect();
    poly.dedup();
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    if poly.len() >= 3 {
        draw_polygon_mut(img, &poly, color);
    }
}

fn draw_thick_line(img: &mut RgbaImage, a: (f32, f32), b: (f32, f32), width: f32, color: Rgba<u8>) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = dx.hypot(dy);
    if width <= 1.5 || len < 0.5 {
        draw_line_segment_mut(img, a, b, color);
        return;
    }

    let half = width / 2.0;
    let (nx, ny) = (-dy / len * half, dx / len * half);
    fill_polygon(
        img,
        &[
            (a.0 + nx, a.1 + ny),
            (b.0 + nx, b.1 + ny),
            (b.0 - nx, b.1 - ny),
            (a.0 - nx, a.1 - ny),
        ],
        color,
    );
    draw_line_segment_mut(img, a, b, color);
}

fn draw_dashed_line(
    img: &mut RgbaImage,
    a: (f32, f32),
    b: (f32, f32),
    width: f32,
    (on, off): (f32, f32),
    color: Rgba<u8>,
) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = dx.hypot(dy);
    if len < 0.5 || on <= 0.0 {
        return;
    }
    let (ux, uy) = (dx / len, dy / len);

    let mut pos = 0.0;
    while pos < len {
        let end = (pos + on).min(len);
        draw_thick_line(
            img,
            (a.0 + ux * pos, a.1 + uy * pos),
            (a.0 + ux * end, a.1 + uy * end),
            width,
            color,
        );
        pos = end + off;
    }
}

fn draw_rect_outline(img: &mut RgbaImage, frame: &MapFrame, color: Rgba<u8>, width: f32) {
    let corners = [
        (frame.left, frame.top),
        (frame.right(), frame.top),
        (frame.right(), frame.bottom()),
        (frame.left, frame.bottom()),
        (frame.left, frame.top),
    ];
    for pair in corners.windows(2) {
        draw_thick_line(img, pair[0], pair[1], width, color);
    }
}

/// Tail-anchored arrow; short arrows keep a head scaled down to their length
#[allow(clippy::too_many_arguments)]
fn draw_arrow(
    img: &mut RgbaImage,
    tail: (f32, f32),
    dir: (f32, f32),
    length: f32,
    shaft: f32,
    head_w: f32,
    head_l: f32,
    color: Rgba<u8>,
) {
    if length < 1.0 {
        return;
    }
    let shrink = (length / head_l).min(1.0);
    let (head_l, head_w) = (head_l * shrink, head_w * shrink);

    let tip = (tail.0 + dir.0 * length, tail.1 + dir.1 * length);
    let base = (tip.0 - dir.0 * head_l, tip.1 - dir.1 * head_l);
    if length > head_l {
        draw_thick_line(img, tail, base, shaft, color);
    }

    let (nx, ny) = (-dir.1 * head_w / 2.0, dir.0 * head_w / 2.0);
    fill_polygon(
        img,
        &[tip, (base.0 + nx, base.1 + ny), (base.0 - nx, base.1 - ny)],
        color,
    );
}
