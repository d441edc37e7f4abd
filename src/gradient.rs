//! Palette sampling and gradient composition.
//!
//! The source image is split into [`BLOCK_WIDTH`]-wide column blocks. Each
//! block is area-averaged down to one base color (weighted by alpha, so
//! transparent pixels contribute nothing), that color is run through
//! [`adjust`], and the pair is rendered as a vertical gradient strip
//! `GRADIENT_DEPTH + 1` source-heights tall. Columns that do not fill a whole
//! block are dropped.

use crate::color::{adjust, AdjustmentParameters, Color};
use image::{imageops, GenericImageView, Rgba, RgbaImage};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

pub const BLOCK_WIDTH: u32 = 32;
pub const GRADIENT_DEPTH: u32 = 10;

const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);

/// Base and adjusted color of one column block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub index: u32,
    pub base: [u8; 4],
    pub target: [u8; 4],
}

impl PaletteEntry {
    pub fn base_color(&self) -> Color {
        Rgba(self.base)
    }

    pub fn target_color(&self) -> Color {
        Rgba(self.target)
    }
}

/// Sampled palette of a source image, as written by the CLI's `--palette`.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteReport {
    pub source_width: u32,
    pub source_height: u32,
    pub parameters: AdjustmentParameters,
    pub blocks: Vec<PaletteEntry>,
}

impl PaletteReport {
    pub fn new(source: &RgbaImage, params: &AdjustmentParameters) -> Self {
        Self::from_palette(source, params, sample_palette(source, params))
    }

    /// Wrap an already sampled palette.
    pub fn from_palette(
        source: &RgbaImage,
        params: &AdjustmentParameters,
        blocks: Vec<PaletteEntry>,
    ) -> Self {
        Self {
            source_width: source.width(),
            source_height: source.height(),
            parameters: *params,
            blocks,
        }
    }
}

/// Number of whole blocks that fit in `width`.
pub fn block_count(width: u32) -> u32 {
    width / BLOCK_WIDTH
}

/// Output dimensions for a source of the given size.
pub fn output_dimensions(width: u32, height: u32) -> (u32, u32) {
    (
        block_count(width) * BLOCK_WIDTH,
        height * (GRADIENT_DEPTH + 1),
    )
}

/// Area-average block `index` down to a single opaque color.
///
/// Channels are averaged premultiplied by alpha and divided back by the
/// total alpha. A block with no visible pixel samples as black.
pub fn sample_block(source: &RgbaImage, index: u32) -> Color {
    let block = imageops::crop_imm(source, index * BLOCK_WIDTH, 0, BLOCK_WIDTH, source.height());

    let mut weighted = [0u64; 3];
    let mut coverage = 0u64;
    for (_, _, pixel) in block.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u64;
        weighted[0] += r as u64 * alpha;
        weighted[1] += g as u64 * alpha;
        weighted[2] += b as u64 * alpha;
        coverage += alpha;
    }

    if coverage == 0 {
        return Rgba([0, 0, 0, 255]);
    }
    let [r, g, b] = weighted.map(|sum| ((sum + coverage / 2) / coverage).min(255) as u8);
    Rgba([r, g, b, 255])
}

/// Base and adjusted color for every whole block, in block order.
pub fn sample_palette(source: &RgbaImage, params: &AdjustmentParameters) -> Vec<PaletteEntry> {
    if source.height() == 0 {
        return Vec::new();
    }

    (0..block_count(source.width()))
        .into_par_iter()
        .map(|index| {
            let base = sample_block(source, index);
            let target = adjust(base, params);
            PaletteEntry {
                index,
                base: base.0,
                target: target.0,
            }
        })
        .collect()
}

/// Linear interpolation between two colors over `height` rows.
pub fn gradient_column(start: Color, end: Color, height: u32) -> Vec<Color> {
    let span = height.saturating_sub(1).max(1) as f64;

    (0..height)
        .map(|row| {
            let t = row as f64 / span;
            let mut pixel = [0u8; 4];
            for (channel, value) in pixel.iter_mut().enumerate() {
                let from = start.0[channel] as f64;
                let to = end.0[channel] as f64;
                *value = (from + (to - from) * t).round() as u8;
            }
            Rgba(pixel)
        })
        .collect()
}

/// A `width` x `height` strip whose every row is one interpolated color.
pub fn gradient_strip(start: Color, end: Color, width: u32, height: u32) -> RgbaImage {
    let column = gradient_column(start, end, height);
    RgbaImage::from_fn(width, height, |_, y| column[y as usize])
}

/// Render the palette gradient of `source`.
///
/// Returns `None` for an empty source. A source narrower than one block
/// yields a zero-width raster of the full output height.
pub fn compose(source: &RgbaImage, params: &AdjustmentParameters) -> Option<RgbaImage> {
    if source.width() == 0 || source.height() == 0 {
        return None;
    }

    let palette = sample_palette(source, params);
    Some(render_palette(&palette, source.height()))
}

/// Paint each palette entry as a gradient strip at its block's offset.
pub fn render_palette(palette: &[PaletteEntry], source_height: u32) -> RgbaImage {
    let start_time = Instant::now();
    let width = palette.len() as u32 * BLOCK_WIDTH;
    let height = source_height * (GRADIENT_DEPTH + 1);
    let mut output = RgbaImage::from_pixel(width, height, TRANSPARENT);

    let strips: Vec<(u32, RgbaImage)> = palette
        .par_iter()
        .map(|entry| {
            let strip = gradient_strip(entry.base_color(), entry.target_color(), BLOCK_WIDTH, height);
            (entry.index, strip)
        })
        .collect();

    for (index, strip) in &strips {
        imageops::replace(&mut output, strip, (index * BLOCK_WIDTH) as i64, 0);
    }

    debug!(
        "Composed {} blocks into {}x{} in {:.2?}",
        strips.len(),
        width,
        height,
        start_time.elapsed()
    );

    output
}
