//! TrueType text for titles, tick labels and the colorbar label
//!
//! No font is bundled. The configured font is tried first, then a handful of
//! common system locations. Without any font the map is still drawn, only
//! the text is left out.

use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Horizontal anchor for [`FontBook::draw`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// The font used for every label on a map, if one could be loaded
pub struct FontBook {
    font: Option<Font<'static>>,
}

impl FontBook {
    /// Load `preferred` if given, otherwise the first readable system font
    pub fn load(preferred: Option<&Path>) -> Self {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            if let Some(font) = Font::try_from_vec(bytes) {
                debug!(path = %path.display(), "loaded label font");
                return Self { font: Some(font) };
            }
            warn!(path = %path.display(), "file is not a usable TrueType font");
        }

        warn!("no TrueType font found; maps will be rendered without text");
        Self { font: None }
    }

    /// A font book that never draws text
    pub fn disabled() -> Self {
        Self { font: None }
    }

    /// Width and height in pixels of `text` at `size`
    pub fn measure(&self, text: &str, size: f32) -> (i32, i32) {
        let Some(font) = &self.font else {
            return (0, 0);
        };
        let scale = Scale::uniform(size);
        let metrics = font.v_metrics(scale);
        let width = font
            .layout(text, scale, point(0.0, metrics.ascent))
            .filter_map(|g| g.pixel_bounding_box())
            .map(|bb| bb.max.x)
            .max()
            .unwrap_or(0);
        let height = (metrics.ascent - metrics.descent).ceil() as i32;
        (width, height)
    }

    /// Draw `text` with its top edge at `y`, anchored horizontally at `x`
    pub fn draw(
        &self,
        img: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        size: f32,
        anchor: Anchor,
        color: Rgba<u8>,
    ) {
        let Some(font) = &self.font else {
            return;
        };
        let (width, _) = self.measure(text, size);
        let x = match anchor {
            Anchor::Left => x,
            Anchor::Center => x - width / 2,
            Anchor::Right => x - width,
        };
        draw_text_mut(img, color, x, y, Scale::uniform(size), font, text);
    }

    /// Draw `text` rotated a quarter turn counter-clockwise, centered on (cx, cy)
    pub fn draw_vertical(
        &self,
        img: &mut RgbaImage,
        text: &str,
        cx: i32,
        cy: i32,
        size: f32,
        color: Rgba<u8>,
    ) {
        if self.font.is_none() {
            return;
        }
        let (width, height) = self.measure(text, size);
        if width <= 0 || height <= 0 {
            return;
        }

        let mut strip = RgbaImage::from_pixel(width as u32 + 2, height as u32 + 2, Rgba([0, 0, 0, 0]));
        self.draw(&mut strip, text, 1, 1, size, Anchor::Left, color);
        let rotated = imageops::rotate270(&strip);

        let x = i64::from(cx) - i64::from(rotated.width()) / 2;
        let y = i64::from(cy) - i64::from(rotated.height()) / 2;
        imageops::overlay(img, &rotated, x, y);
    }
}
