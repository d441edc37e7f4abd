//! Color adjustment in HSV space.
//!
//! Every adjustment is a pure function of a base color and an
//! [`AdjustmentParameters`] snapshot: hue is rotated cyclically, saturation and
//! brightness are scaled, and contrast is applied around a fixed pivot on the
//! brightness-adjusted value.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// An RGBA color with 8-bit channels.
pub type Color = Rgba<u8>;

pub const HUE_SHIFT_RANGE: RangeInclusive<f64> = -60.0..=60.0;
pub const SATURATION_RANGE: RangeInclusive<f64> = 0.0..=2.0;
pub const BRIGHTNESS_RANGE: RangeInclusive<f64> = 0.0..=2.0;
pub const CONTRAST_RANGE: RangeInclusive<f64> = 0.0..=2.0;

/// Midpoint of the value channel that contrast scales around.
pub const CONTRAST_PIVOT: f64 = 0.5;

const UNIT_RANGE: RangeInclusive<f64> = 0.0..=1.0;
const CHANNEL_RANGE: RangeInclusive<f64> = 0.0..=255.0;

/// Clamp `value` into `range`. NaN collapses to the lower bound.
pub fn clamp(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        return *range.start();
    }
    value.max(*range.start()).min(*range.end())
}

/// Scale a normalized channel back to 8 bits, rounding to nearest.
///
/// Truncating here would pull every channel down after an HSV round trip.
fn to_channel(value: f64) -> u8 {
    clamp((value * 255.0).round(), &CHANNEL_RANGE) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentParameters {
    pub hue_shift_degrees: f64,
    pub saturation_factor: f64,
    pub brightness_factor: f64,
    pub contrast_factor: f64,
}

impl Default for AdjustmentParameters {
    fn default() -> Self {
        Self {
            hue_shift_degrees: 0.0,  // -60 to +60
            saturation_factor: 1.0,  // 0.0 to 2.0 (1.0 = no change)
            brightness_factor: 1.0,  // 0.0 to 2.0 (1.0 = no change)
            contrast_factor: 1.0,    // 0.0 to 2.0 (1.0 = no change)
        }
    }
}

impl AdjustmentParameters {
    /// Snapshot with every field pulled into its control range.
    pub fn clamped(self) -> Self {
        Self {
            hue_shift_degrees: clamp(self.hue_shift_degrees, &HUE_SHIFT_RANGE),
            saturation_factor: clamp(self.saturation_factor, &SATURATION_RANGE),
            brightness_factor: clamp(self.brightness_factor, &BRIGHTNESS_RANGE),
            contrast_factor: clamp(self.contrast_factor, &CONTRAST_RANGE),
        }
    }
}

/// Convert normalized RGB to HSV, all components in [0, 1].
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    if delta == 0.0 {
        return (0.0, 0.0, v);
    }
    let s = delta / max;

    let h = if max == r {
        (g - b) / delta
    } else if max == g {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    ((h / 6.0).rem_euclid(1.0), s, v)
}

/// Convert HSV (all components in [0, 1]) back to normalized RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Apply hue, saturation, brightness and contrast to `base`, keeping its alpha.
pub fn adjust(base: Color, params: &AdjustmentParameters) -> Color {
    let [r, g, b, a] = base.0;
    let (h, s, v) = rgb_to_hsv(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);

    // Reduce the shift first so whole turns leave the hue bit-identical.
    let shift = (params.hue_shift_degrees / 360.0).rem_euclid(1.0);
    let h = (h + shift).rem_euclid(1.0);
    let s = clamp(s * params.saturation_factor, &UNIT_RANGE);
    let v = clamp(v * params.brightness_factor, &UNIT_RANGE);
    let v = clamp(
        (v - CONTRAST_PIVOT) * params.contrast_factor + CONTRAST_PIVOT,
        &UNIT_RANGE,
    );

    let (r, g, b) = hsv_to_rgb(h, s, v);
    Rgba([to_channel(r), to_channel(g), to_channel(b), a])
}
