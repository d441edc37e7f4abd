//! Zoom and pan state of the preview canvas.

use image::{imageops, imageops::FilterType, RgbaImage};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// One wheel notch (120 units) zooms by 10%.
pub const SCROLL_DIVISOR: f64 = 1200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub pan: (i64, i64),
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: (0, 0),
        }
    }
}

impl ViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a scroll delta. Returns `false` and leaves the zoom untouched
    /// when the result would leave the open interval (`MIN_ZOOM`, `MAX_ZOOM`).
    pub fn zoom_by_scroll(&mut self, delta: f64) -> bool {
        let zoom = self.zoom * (1.0 + delta / SCROLL_DIVISOR);
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
            true
        } else {
            false
        }
    }

    pub fn pan_by(&mut self, dx: i64, dy: i64) {
        self.pan.0 += dx;
        self.pan.1 += dy;
    }

    /// Size of `raster` once scaled by the current zoom, truncated.
    pub fn zoomed_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        (
            (width as f64 * self.zoom) as u32,
            (height as f64 * self.zoom) as u32,
        )
    }

    /// Resample only the part of `raster` that lands inside a viewport of
    /// `viewport` pixels once zoomed and panned.
    ///
    /// Returns `None` when nothing is visible. The resampled window never
    /// exceeds `max_side` on either axis.
    pub fn render_visible(
        &self,
        raster: &RgbaImage,
        viewport: (u32, u32),
        max_side: u32,
    ) -> Option<VisibleRegion> {
        let (zoomed_w, zoomed_h) = self.zoomed_dimensions(raster.width(), raster.height());
        if zoomed_w == 0 || zoomed_h == 0 || viewport.0 == 0 || viewport.1 == 0 || max_side == 0 {
            return None;
        }

        let (x0, x1) = visible_span(self.pan.0, viewport.0, zoomed_w)?;
        let (y0, y1) = visible_span(self.pan.1, viewport.1, zoomed_h)?;

        let scale_x = zoomed_w as f64 / raster.width() as f64;
        let scale_y = zoomed_h as f64 / raster.height() as f64;
        let (src_x0, src_x1) = source_span(x0, x1, scale_x, raster.width());
        let (src_y0, src_y1) = source_span(y0, y1, scale_y, raster.height());

        let dest_x0 = (src_x0 as f64 * scale_x).round() as i64;
        let dest_y0 = (src_y0 as f64 * scale_y).round() as i64;
        let dest_w = ((src_x1 as f64 * scale_x).round() as i64 - dest_x0).clamp(1, max_side as i64) as u32;
        let dest_h = ((src_y1 as f64 * scale_y).round() as i64 - dest_y0).clamp(1, max_side as i64) as u32;

        let window = imageops::crop_imm(raster, src_x0, src_y0, src_x1 - src_x0, src_y1 - src_y0).to_image();
        let image = if window.dimensions() == (dest_w, dest_h) {
            window
        } else {
            imageops::resize(&window, dest_w, dest_h, FilterType::Lanczos3)
        };

        Some(VisibleRegion {
            image,
            offset: (self.pan.0 + dest_x0, self.pan.1 + dest_y0),
        })
    }
}

/// A resampled slice of the zoomed raster and where to draw it, relative to
/// the viewport's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRegion {
    pub image: RgbaImage,
    pub offset: (i64, i64),
}

/// Range of zoomed pixels in `[0, zoomed)` that fall inside `[0, viewport)`
/// when the raster is drawn at `pan`.
fn visible_span(pan: i64, viewport: u32, zoomed: u32) -> Option<(i64, i64)> {
    let start = (-pan).clamp(0, zoomed as i64);
    let end = (viewport as i64 - pan).clamp(0, zoomed as i64);
    (start < end).then_some((start, end))
}

/// Source pixels covering the zoomed range `[start, end)`.
fn source_span(start: i64, end: i64, scale: f64, len: u32) -> (u32, u32) {
    let from = ((start as f64 / scale).floor() as u32).min(len - 1);
    let to = ((end as f64 / scale).ceil() as u32).clamp(from + 1, len);
    (from, to)
}

/// Carries the sub-pixel part of pointer motion between drag events so slow
/// drags still pan.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DragAccumulator {
    remainder: (f64, f64),
}

impl DragAccumulator {
    /// Add a motion delta and return the whole pixels to pan by.
    pub fn accumulate(&mut self, dx: f64, dy: f64) -> (i64, i64) {
        let x = self.remainder.0 + dx;
        let y = self.remainder.1 + dy;
        let whole = (x.trunc(), y.trunc());
        self.remainder = (x - whole.0, y - whole.1);
        (whole.0 as i64, whole.1 as i64)
    }

    pub fn reset(&mut self) {
        self.remainder = (0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_scroll_notch_zooms_ten_percent() {
        let mut view = ViewState::default();
        assert!(view.zoom_by_scroll(120.0));
        assert!((view.zoom - 1.1).abs() < 1e-12);
        assert!(view.zoom_by_scroll(-120.0));
        assert!((view.zoom - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_stays_inside_bounds() {
        let mut view = ViewState::default();
        let mut steps = 0;
        while view.zoom_by_scroll(-120.0) {
            steps += 1;
        }
        assert!(view.zoom > MIN_ZOOM);
        assert!(view.zoom * 0.9 <= MIN_ZOOM);
        assert!(steps > 0);

        let before = view.zoom;
        assert!(!view.zoom_by_scroll(-120.0));
        assert_eq!(view.zoom, before);

        view.zoom = 9.5;
        assert!(!view.zoom_by_scroll(120.0));
        assert_eq!(view.zoom, 9.5);
    }

    #[test]
    fn test_pan_is_unbounded_and_cumulative() {
        let mut view = ViewState::default();
        view.pan_by(15, -4);
        view.pan_by(-100_000, 3);
        assert_eq!(view.pan, (-99_985, -1));
        view.reset();
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn test_visible_region_at_unit_zoom_is_the_raster() {
        let raster = RgbaImage::from_pixel(64, 110, Rgba([255, 0, 0, 255]));
        let view = ViewState {
            zoom: 1.0,
            pan: (7, -3),
        };
        let region = view.render_visible(&raster, (800, 600), 8192).unwrap();
        assert_eq!(region.offset, (7, 0));
        assert_eq!(region.image.dimensions(), (64, 107));
        assert!(region.image.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_visible_region_is_cropped_to_viewport() {
        let raster = RgbaImage::from_pixel(64, 110, Rgba([0, 0, 255, 255]));
        let view = ViewState {
            zoom: 2.0,
            pan: (-10, 20),
        };
        let region = view.render_visible(&raster, (50, 50), 8192).unwrap();
        assert_eq!(region.image.dimensions(), (50, 30));
        assert_eq!(region.offset, (0, 20));
    }

    #[test]
    fn test_tall_output_stays_near_viewport_size() {
        // A 1080-line photo renders 11880 lines tall.
        let raster = RgbaImage::new(640, 11880);
        let mut view = ViewState::default();
        let region = view.render_visible(&raster, (600, 500), 8192).unwrap();
        assert_eq!(region.image.dimensions(), (600, 500));

        view.zoom = 9.0;
        view.pan = (-4000, -60000);
        let region = view.render_visible(&raster, (600, 500), 8192).unwrap();
        let (w, h) = region.image.dimensions();
        assert!(w <= 600 + 18 && h <= 500 + 18, "got {}x{}", w, h);
        assert!(region.offset.0 <= 0 && region.offset.1 <= 0);
    }

    #[test]
    fn test_visible_region_respects_texture_cap() {
        let raster = RgbaImage::new(64, 2200);
        let view = ViewState::default();
        let region = view.render_visible(&raster, (4000, 4000), 1024).unwrap();
        let (w, h) = region.image.dimensions();
        assert!(w <= 1024 && h <= 1024, "got {}x{}", w, h);
    }

    #[test]
    fn test_nothing_visible() {
        let raster = RgbaImage::new(64, 110);
        let mut view = ViewState::default();
        view.pan = (-100, 0);
        assert!(view.render_visible(&raster, (800, 600), 8192).is_none());
        view.pan = (0, 600);
        assert!(view.render_visible(&raster, (800, 600), 8192).is_none());

        let tiny = ViewState {
            zoom: 0.2,
            pan: (0, 0),
        };
        assert!(tiny.render_visible(&RgbaImage::new(3, 40), (800, 600), 8192).is_none());
        assert!(tiny.render_visible(&RgbaImage::new(0, 0), (800, 600), 8192).is_none());
    }

    #[test]
    fn test_slow_drag_accumulates() {
        let mut drag = DragAccumulator::default();
        let moved: Vec<(i64, i64)> = (0..8).map(|_| drag.accumulate(0.25, -0.25)).collect();
        assert_eq!(moved.iter().map(|m| m.0).sum::<i64>(), 2);
        assert_eq!(moved.iter().map(|m| m.1).sum::<i64>(), -2);
        assert_eq!(moved[0], (0, 0));

        assert_eq!(drag.accumulate(-0.75, 0.0), (0, 0));
        assert_eq!(drag.accumulate(-0.75, 0.0), (-1, 0));
        assert_eq!(drag.accumulate(0.5, 0.0), (0, 0));
        drag.reset();
        assert_eq!(drag, DragAccumulator::default());
    }
}
